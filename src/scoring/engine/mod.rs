mod config;
mod levels;
mod recommend;
mod rules;

pub use config::{CreditRule, LevelRule, LevelThresholds, RulebookError, ScoringConfig};

use serde::{Deserialize, Serialize};

use super::domain::{AchievementLevel, BuildingLayer, CreditType, Project, ProjectId};
use super::validate::{self, ProductDataIssue};

/// Errors raised while assessing a project. Any of these aborts the whole
/// assessment; a summary is never produced alongside one.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("project contains no products to assess")]
    EmptyProject,
    #[error("product '{product_id}': {issue}")]
    InvalidProductData {
        product_id: String,
        issue: ProductDataIssue,
    },
    #[error("product '{product_id}' is not assigned to any building layer")]
    InvalidBuildingLayer { product_id: String },
    #[error("no scoring rule supplied for credit type {credit:?}")]
    MissingReferenceData { credit: CreditType },
}

/// Stateless assessor that applies a rulebook to a material schedule. All
/// thresholds and certification mappings come from the injected config, so
/// two engines built from the same rulebook always agree.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Assess a project against every credit category on every building
    /// layer that carries spend.
    pub fn score(&self, project: &Project) -> Result<ComplianceSummary, ScoringError> {
        validate::check_products(&project.products)?;

        let mut credit_rules = Vec::with_capacity(CreditType::ordered().len());
        for credit in CreditType::ordered() {
            let rule = self
                .config
                .credit_rule(credit)
                .ok_or(ScoringError::MissingReferenceData { credit })?;
            credit_rules.push((credit, rule));
        }

        let (results, totals) = rules::score_layers(&project.products, &credit_rules);

        let overall_score = if totals.total_cost > 0.0 {
            totals.compliant_cost / totals.total_cost * 100.0
        } else {
            0.0
        };

        let achievement_level =
            levels::achievement_for(overall_score, &self.config.summary_thresholds);
        let recommendations = recommend::gap_recommendations(&results, &credit_rules);

        Ok(ComplianceSummary {
            project_id: project.project_id.clone(),
            rules_version: self.config.rules_version.clone(),
            total_compliance: results,
            overall_score,
            achieved_credits: totals.achieved_credits,
            total_possible_credits: totals.possible_credits,
            achievement_level,
            recommendations,
        })
    }
}

/// Outcome for one building layer / credit category pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub building_layer: BuildingLayer,
    pub credit_type: CreditType,
    pub compliant_cost: f64,
    pub total_cost: f64,
    pub percentage: f64,
    pub achievement_level: AchievementLevel,
    pub points: u32,
}

/// A concrete step toward the next achievement tier for one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub building_layer: BuildingLayer,
    pub credit_type: CreditType,
    pub percentage: f64,
    pub gap: f64,
    pub target_level: AchievementLevel,
    pub message: String,
}

/// Full assessment of a project, covering every scored layer/credit pair
/// plus the cost-weighted overall picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub project_id: ProjectId,
    pub rules_version: String,
    pub total_compliance: Vec<ComplianceResult>,
    pub overall_score: f64,
    pub achieved_credits: u32,
    pub total_possible_credits: u32,
    pub achievement_level: AchievementLevel,
    pub recommendations: Vec<Recommendation>,
}
