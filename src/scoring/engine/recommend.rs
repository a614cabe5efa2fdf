use std::cmp::Ordering;

use super::super::domain::{AchievementLevel, CreditType};
use super::config::{CreditRule, LevelRule};
use super::{ComplianceResult, Recommendation};

/// Build one recommendation for every layer/credit entry still short of Best
/// Practice, pointing at the next tier up. Widest gap first; ties fall back
/// to canonical layer then credit order so output is stable across runs.
pub(crate) fn gap_recommendations(
    results: &[ComplianceResult],
    credit_rules: &[(CreditType, &CreditRule)],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for entry in results {
        if entry.achievement_level == AchievementLevel::BestPractice {
            continue;
        }

        let Some(rule) = credit_rules
            .iter()
            .find(|(credit, _)| *credit == entry.credit_type)
            .map(|(_, rule)| *rule)
        else {
            continue;
        };

        let (target_level, target): (AchievementLevel, &LevelRule) = match entry.achievement_level {
            AchievementLevel::None => (
                AchievementLevel::GoodPractice,
                &rule.thresholds.good_practice,
            ),
            _ => (
                AchievementLevel::BestPractice,
                &rule.thresholds.best_practice,
            ),
        };

        let gap = target.min_percentage - entry.percentage;

        recommendations.push(Recommendation {
            building_layer: entry.building_layer,
            credit_type: entry.credit_type,
            percentage: entry.percentage,
            gap,
            target_level,
            message: format!(
                "{} / {}: {:.1}% compliant spend, {:.1}% short of the {} threshold at {:.1}%",
                entry.building_layer.label(),
                entry.credit_type.label(),
                entry.percentage,
                gap,
                target_level.label(),
                target.min_percentage
            ),
        });
    }

    recommendations.sort_by(|a, b| {
        b.gap
            .partial_cmp(&a.gap)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.building_layer.cmp(&b.building_layer))
            .then_with(|| a.credit_type.cmp(&b.credit_type))
    });

    recommendations
}
