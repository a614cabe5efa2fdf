use serde::Serialize;

use super::domain::{AchievementLevel, BuildingLayer, CreditType, ProjectId};
use super::engine::{ComplianceResult, ComplianceSummary, Recommendation};

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceResultView {
    pub building_layer: BuildingLayer,
    pub layer_label: &'static str,
    pub credit_type: CreditType,
    pub credit_label: &'static str,
    pub compliant_cost: f64,
    pub total_cost: f64,
    pub percentage: f64,
    pub achievement_level: AchievementLevel,
    pub level_label: &'static str,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub building_layer: BuildingLayer,
    pub layer_label: &'static str,
    pub credit_type: CreditType,
    pub credit_label: &'static str,
    pub percentage: f64,
    pub gap: f64,
    pub target_level: AchievementLevel,
    pub target_label: &'static str,
    pub message: String,
}

/// API-facing rendering of a summary with display labels resolved.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSummaryView {
    pub project_id: ProjectId,
    pub rules_version: String,
    pub overall_score: f64,
    pub achievement_level: AchievementLevel,
    pub level_label: &'static str,
    pub achieved_credits: u32,
    pub total_possible_credits: u32,
    pub results: Vec<ComplianceResultView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<RecommendationView>,
}

impl ComplianceResult {
    pub fn to_view(&self) -> ComplianceResultView {
        ComplianceResultView {
            building_layer: self.building_layer,
            layer_label: self.building_layer.label(),
            credit_type: self.credit_type,
            credit_label: self.credit_type.label(),
            compliant_cost: self.compliant_cost,
            total_cost: self.total_cost,
            percentage: self.percentage,
            achievement_level: self.achievement_level,
            level_label: self.achievement_level.label(),
            points: self.points,
        }
    }
}

impl Recommendation {
    pub fn to_view(&self) -> RecommendationView {
        RecommendationView {
            building_layer: self.building_layer,
            layer_label: self.building_layer.label(),
            credit_type: self.credit_type,
            credit_label: self.credit_type.label(),
            percentage: self.percentage,
            gap: self.gap,
            target_level: self.target_level,
            target_label: self.target_level.label(),
            message: self.message.clone(),
        }
    }
}

impl ComplianceSummary {
    pub fn to_view(&self) -> ComplianceSummaryView {
        ComplianceSummaryView {
            project_id: self.project_id.clone(),
            rules_version: self.rules_version.clone(),
            overall_score: self.overall_score,
            achievement_level: self.achievement_level,
            level_label: self.achievement_level.label(),
            achieved_credits: self.achieved_credits,
            total_possible_credits: self.total_possible_credits,
            results: self
                .total_compliance
                .iter()
                .map(ComplianceResult::to_view)
                .collect(),
            recommendations: self
                .recommendations
                .iter()
                .map(Recommendation::to_view)
                .collect(),
        }
    }
}
