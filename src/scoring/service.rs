use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{AssessmentStatus, Project, ProjectId, ProjectSubmission};
use super::engine::{ComplianceSummary, ScoringConfig, ScoringEngine, ScoringError};
use super::repository::{ProjectRecord, ProjectRepository, RepositoryError};
use super::validate;

/// Service composing intake validation, the repository, and the engine.
pub struct ProjectScoringService<R> {
    repository: Arc<R>,
    engine: Arc<ScoringEngine>,
}

static PROJECT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_project_id() -> ProjectId {
    let id = PROJECT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProjectId(format!("proj-{id:06}"))
}

impl<R> ProjectScoringService<R>
where
    R: ProjectRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    /// Accept a schedule for later assessment, returning the stored record.
    /// The same structural checks the engine applies run here, so a schedule
    /// that cannot be scored is never persisted.
    pub fn submit(
        &self,
        submission: ProjectSubmission,
    ) -> Result<ProjectRecord, ProjectServiceError> {
        validate::check_products(&submission.products)?;

        let record = ProjectRecord {
            project: Project {
                project_id: next_project_id(),
                project_name: submission.project_name,
                submission_date: submission.submission_date,
                products: submission.products,
            },
            status: AssessmentStatus::Submitted,
            summary: None,
        };

        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Assess a stored project and persist the summary.
    pub fn assess(
        &self,
        project_id: &ProjectId,
    ) -> Result<ComplianceSummary, ProjectServiceError> {
        let mut record = self
            .repository
            .fetch(project_id)?
            .ok_or(RepositoryError::NotFound)?;

        let summary = self.engine.score(&record.project)?;

        record.status = AssessmentStatus::Scored;
        record.summary = Some(summary.clone());
        self.repository.update(record)?;

        Ok(summary)
    }

    /// Fetch a project record and current status for API responses.
    pub fn get(&self, project_id: &ProjectId) -> Result<ProjectRecord, ProjectServiceError> {
        let record = self
            .repository
            .fetch(project_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Recently scored projects, newest first, capped at `limit`.
    pub fn scored(&self, limit: usize) -> Result<Vec<ProjectRecord>, ProjectServiceError> {
        Ok(self.repository.scored(limit)?)
    }
}

/// Error raised by the project scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
