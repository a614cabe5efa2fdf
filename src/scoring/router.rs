use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use crate::export;

use super::domain::{AssessmentStatus, ProjectId, ProjectSubmission};
use super::repository::{ProjectRepository, RepositoryError};
use super::service::{ProjectScoringService, ProjectServiceError};

const SCORED_LISTING_LIMIT: usize = 50;

/// Router builder exposing HTTP endpoints for intake, assessment, and export.
pub fn scoring_router<R>(service: Arc<ProjectScoringService<R>>) -> Router
where
    R: ProjectRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects",
            post(submit_handler::<R>).get(listing_handler::<R>),
        )
        .route("/api/v1/projects/:project_id", get(status_handler::<R>))
        .route(
            "/api/v1/projects/:project_id/assessment",
            post(assess_handler::<R>),
        )
        .route(
            "/api/v1/projects/:project_id/summary.csv",
            get(export_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ProjectScoringService<R>>>,
    axum::Json(submission): axum::Json<ProjectSubmission>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ProjectServiceError::Scoring(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ProjectServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "project already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn assess_handler<R>(
    State(service): State<Arc<ProjectScoringService<R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.assess(&id) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary.to_view())).into_response(),
        Err(ProjectServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "project not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(ProjectServiceError::Scoring(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ProjectScoringService<R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ProjectServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "project_id": id.0,
                "status": AssessmentStatus::Submitted.label(),
                "score_rationale": "pending assessment",
                "overall_score": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn listing_handler<R>(
    State(service): State<Arc<ProjectScoringService<R>>>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match service.scored(SCORED_LISTING_LIMIT) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<ProjectScoringService<R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.get(&id) {
        Ok(record) => match &record.summary {
            Some(summary) => match export::summary_csv_bytes(summary) {
                Ok(bytes) => (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
                    bytes,
                )
                    .into_response(),
                Err(error) => {
                    let payload = json!({
                        "error": error.to_string(),
                    });
                    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
                }
            },
            None => {
                let payload = json!({
                    "error": "project has not been scored yet",
                });
                (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
            }
        },
        Err(ProjectServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "project not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
