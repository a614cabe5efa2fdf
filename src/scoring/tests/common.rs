use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::scoring::domain::{
    BuildingLayer, CreditType, Product, Project, ProjectId, ProjectSubmission,
};
use crate::scoring::engine::{
    ComplianceResult, ComplianceSummary, CreditRule, LevelRule, LevelThresholds, ScoringConfig,
    ScoringEngine,
};
use crate::scoring::repository::{ProjectRecord, ProjectRepository, RepositoryError};
use crate::scoring::{scoring_router, AssessmentStatus, ProjectScoringService};

/// One flat certification per credit keeps fixture schedules easy to read.
pub(super) fn certification_for(credit: CreditType) -> &'static str {
    match credit {
        CreditType::Responsible => "ResponsibleCert",
        CreditType::Healthy => "HealthyCert",
        CreditType::Positive => "PositiveCert",
        CreditType::Circular => "CircularCert",
        CreditType::Leadership => "LeadershipCert",
    }
}

pub(super) fn all_certifications() -> Vec<&'static str> {
    CreditType::ordered()
        .into_iter()
        .map(certification_for)
        .collect()
}

pub(super) fn fixture_thresholds() -> LevelThresholds {
    LevelThresholds {
        good_practice: LevelRule {
            min_percentage: 25.0,
            points: 1,
        },
        best_practice: LevelRule {
            min_percentage: 50.0,
            points: 2,
        },
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    let mut credit_rules = BTreeMap::new();
    for credit in CreditType::ordered() {
        credit_rules.insert(
            credit,
            CreditRule {
                recognized_certifications: [certification_for(credit).to_string()]
                    .into_iter()
                    .collect(),
                thresholds: fixture_thresholds(),
            },
        );
    }

    ScoringConfig {
        rules_version: "test-rules-1".to_string(),
        credit_rules,
        summary_thresholds: fixture_thresholds(),
    }
}

pub(super) fn scoring_engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

pub(super) fn product(
    id: &str,
    cost: f64,
    layers: &[BuildingLayer],
    certifications: &[&str],
) -> Product {
    Product {
        product_id: id.to_string(),
        product_name: format!("Product {id}"),
        manufacturer: Some("Acme Building Materials".to_string()),
        cost,
        quantity: 1.0,
        unit: "unit".to_string(),
        building_layers: layers.iter().copied().collect(),
        certifications: certifications
            .iter()
            .map(|certification| certification.to_string())
            .collect(),
    }
}

pub(super) fn project(products: Vec<Product>) -> Project {
    Project {
        project_id: ProjectId("proj-test".to_string()),
        project_name: "Riverside Community Hub".to_string(),
        submission_date: NaiveDate::from_ymd_opt(2025, 7, 14).expect("valid date"),
        products,
    }
}

pub(super) fn submission(products: Vec<Product>) -> ProjectSubmission {
    ProjectSubmission {
        project_name: "Riverside Community Hub".to_string(),
        submission_date: NaiveDate::from_ymd_opt(2025, 7, 14).expect("valid date"),
        products,
    }
}

/// The quarter-share schedule: 100 of 400 structure dollars certified for
/// the Responsible credit, nothing else certified at all.
pub(super) fn quarter_share_products() -> Vec<Product> {
    vec![
        product(
            "p-beam",
            100.0,
            &[BuildingLayer::Structure],
            &["ResponsibleCert"],
        ),
        product("p-slab", 300.0, &[BuildingLayer::Structure], &[]),
    ]
}

pub(super) fn find_result(
    summary: &ComplianceSummary,
    layer: BuildingLayer,
    credit: CreditType,
) -> &ComplianceResult {
    summary
        .total_compliance
        .iter()
        .find(|entry| entry.building_layer == layer && entry.credit_type == credit)
        .unwrap_or_else(|| panic!("no entry for {layer:?}/{credit:?}"))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn build_service() -> (
    ProjectScoringService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ProjectScoringService::new(repository.clone(), scoring_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ProjectId, ProjectRecord>>>,
}

impl ProjectRepository for MemoryRepository {
    fn insert(&self, record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.project.project_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.project.project_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProjectRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.project.project_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn scored(&self, limit: usize) -> Result<Vec<ProjectRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<ProjectRecord> = guard
            .values()
            .filter(|record| record.status == AssessmentStatus::Scored)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.project.project_id.cmp(&a.project.project_id));
        records.truncate(limit);
        Ok(records)
    }
}

pub(super) struct ConflictRepository;

impl ProjectRepository for ConflictRepository {
    fn insert(&self, _record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ProjectRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
        Ok(None)
    }

    fn scored(&self, _limit: usize) -> Result<Vec<ProjectRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl ProjectRepository for UnavailableRepository {
    fn insert(&self, _record: ProjectRecord) -> Result<ProjectRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ProjectRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn scored(&self, _limit: usize) -> Result<Vec<ProjectRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 payload")
}

pub(super) fn scoring_router_with_service(
    service: ProjectScoringService<MemoryRepository>,
) -> axum::Router {
    scoring_router(Arc::new(service))
}
