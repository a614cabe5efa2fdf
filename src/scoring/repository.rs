use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::domain::{AssessmentStatus, Project, ProjectId};
use super::engine::ComplianceSummary;

/// Repository record containing the schedule, its status, and any summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project: Project,
    pub status: AssessmentStatus,
    pub summary: Option<ComplianceSummary>,
}

impl ProjectRecord {
    pub fn score_rationale(&self) -> String {
        match &self.summary {
            Some(summary) => format!(
                "{} at {:.1}% overall compliant spend",
                summary.achievement_level.label(),
                summary.overall_score
            ),
            None => "pending assessment".to_string(),
        }
    }

    pub fn status_view(&self) -> ProjectStatusView {
        ProjectStatusView {
            project_id: self.project.project_id.clone(),
            project_name: self.project.project_name.clone(),
            status: self.status.label(),
            score_rationale: self.score_rationale(),
            overall_score: self.summary.as_ref().map(|summary| summary.overall_score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait ProjectRepository: Send + Sync {
    fn insert(&self, record: ProjectRecord) -> Result<ProjectRecord, RepositoryError>;
    fn update(&self, record: ProjectRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProjectId) -> Result<Option<ProjectRecord>, RepositoryError>;
    fn scored(&self, limit: usize) -> Result<Vec<ProjectRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of a project's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatusView {
    pub project_id: ProjectId,
    pub project_name: String,
    pub status: &'static str,
    pub score_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
}

/// Mutex-guarded map store backing the service binary and tests.
#[derive(Default, Clone)]
pub struct InMemoryProjectRepository {
    records: Arc<Mutex<HashMap<ProjectId, ProjectRecord>>>,
}

impl ProjectRepository for InMemoryProjectRepository {
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
        if guard.contains_key(&record.project.project_id) {
            guard.insert(record.project.project_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
        // Ids are zero-padded and sequential, so reverse id order is newest first.
        records.sort_by(|a, b| b.project.project_id.cmp(&a.project.project_id));
        records.truncate(limit);
        Ok(records)
    }
}
