use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use greenscore::config::AppConfig;
use greenscore::error::AppError;
use greenscore::export::export_summary_csv;
use greenscore::import::ScheduleImporter;
use greenscore::scoring::{
    scoring_router, ComplianceSummary, InMemoryProjectRepository, Project, ProjectId,
    ProjectScoringService, ScoringConfig, ScoringEngine,
};
use greenscore::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "greenscore",
    about = "Score building material schedules against Green Star responsible product credits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a material schedule CSV and print the compliance report
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Material schedule CSV to assess
    #[arg(long)]
    schedule: PathBuf,
    /// Project name for the report (defaults to the schedule file name)
    #[arg(long)]
    project_name: Option<String>,
    /// Submission date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    submission_date: Option<NaiveDate>,
    /// Rulebook JSON to score against (defaults to the built-in sample)
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Also write the summary table as CSV to this path
    #[arg(long)]
    csv_out: Option<PathBuf>,
    /// Include a full product listing in the output
    #[arg(long)]
    list_products: bool,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score(args) => run_score(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn load_rulebook(path: Option<&Path>) -> Result<ScoringConfig, AppError> {
    match path {
        Some(path) => {
            let rulebook = ScoringConfig::from_path(path)?;
            info!(path = %path.display(), version = %rulebook.rules_version, "rulebook loaded");
            Ok(rulebook)
        }
        None => {
            tracing::warn!("no rulebook path configured, falling back to the built-in sample");
            Ok(ScoringConfig::sample())
        }
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let rulebook = load_rulebook(config.rules.path.as_deref())?;
    let rules_version = rulebook.rules_version.clone();
    let repository = Arc::new(InMemoryProjectRepository::default());
    let service = Arc::new(ProjectScoringService::new(repository, rulebook));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(scoring_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, %rules_version, "materials scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        schedule,
        project_name,
        submission_date,
        rules,
        csv_out,
        list_products,
    } = args;

    let rulebook = load_rulebook(rules.as_deref())?;
    let engine = ScoringEngine::new(rulebook);

    let products = ScheduleImporter::from_path(&schedule)?;
    let project = Project {
        project_id: ProjectId("local".to_owned()),
        project_name: project_name.unwrap_or_else(|| default_project_name(&schedule)),
        submission_date: submission_date.unwrap_or_else(|| Local::now().date_naive()),
        products,
    };

    let summary = engine.score(&project)?;
    render_compliance_report(&project, &summary, list_products);

    if let Some(path) = csv_out {
        export_summary_csv(&summary, &path)?;
        println!("\nSummary CSV written to {}", path.display());
    }

    Ok(())
}

fn default_project_name(schedule: &Path) -> String {
    schedule
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schedule".to_owned())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn render_compliance_report(project: &Project, summary: &ComplianceSummary, list_products: bool) {
    println!("Green Star materials assessment");
    println!(
        "Project: {} (submitted {})",
        project.project_name, project.submission_date
    );
    println!("Rulebook: {}", summary.rules_version);
    println!(
        "Products: {} totalling {:.2}",
        project.products.len(),
        project.total_project_cost()
    );

    println!("\nLayer spend");
    for (layer, cost) in project.building_layer_costs() {
        println!("- {}: {:.2}", layer.label(), cost);
    }

    println!("\nLayer and credit outcomes");
    for entry in &summary.total_compliance {
        println!(
            "- {} / {}: {:.1}% compliant spend, level {}, points {}",
            entry.building_layer.label(),
            entry.credit_type.label(),
            entry.percentage,
            entry.achievement_level.label(),
            entry.points
        );
    }

    println!("\nOverall");
    println!("- Score: {:.1}% compliant spend", summary.overall_score);
    println!("- Achievement: {}", summary.achievement_level.label());
    println!(
        "- Credits: {} of {}",
        summary.achieved_credits, summary.total_possible_credits
    );

    if summary.recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &summary.recommendations {
            println!("- {}", recommendation.message);
        }
    }

    if list_products {
        println!("\nProduct breakdown");
        for product in &project.products {
            let layers = product
                .building_layers
                .iter()
                .map(|layer| layer.label())
                .collect::<Vec<_>>()
                .join(", ");
            let certifications = if product.certifications.is_empty() {
                "uncertified".to_owned()
            } else {
                product
                    .certifications
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            println!(
                "- {} | {} | layers {} | cost {:.2} | {}",
                product.product_id, product.product_name, layers, product.cost, certifications
            );
        }
    }
}
