//! Project intake, responsible-products scoring, and summary reporting.
//!
//! Everything downstream of intake is deterministic: the engine holds no
//! state beyond its injected rulebook, so a given schedule and rulebook pair
//! always produces the same summary.

pub mod domain;
pub(crate) mod engine;
pub mod repository;
pub mod router;
pub mod service;
pub(crate) mod validate;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AchievementLevel, AssessmentStatus, BuildingLayer, CreditType, Product, Project, ProjectId,
    ProjectSubmission,
};
pub use engine::{
    ComplianceResult, ComplianceSummary, CreditRule, LevelRule, LevelThresholds, Recommendation,
    RulebookError, ScoringConfig, ScoringEngine, ScoringError,
};
pub use repository::{
    InMemoryProjectRepository, ProjectRecord, ProjectRepository, ProjectStatusView,
    RepositoryError,
};
pub use router::scoring_router;
pub use service::{ProjectScoringService, ProjectServiceError};
pub use validate::ProductDataIssue;
pub use views::{ComplianceResultView, ComplianceSummaryView, RecommendationView};
