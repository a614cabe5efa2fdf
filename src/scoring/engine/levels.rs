use super::super::domain::AchievementLevel;
use super::config::LevelThresholds;

/// Map a compliant-cost percentage onto an achievement tier. Cutoffs are
/// inclusive, so landing exactly on a threshold earns the tier.
pub(crate) fn achievement_for(percentage: f64, thresholds: &LevelThresholds) -> AchievementLevel {
    if percentage >= thresholds.best_practice.min_percentage {
        AchievementLevel::BestPractice
    } else if percentage >= thresholds.good_practice.min_percentage {
        AchievementLevel::GoodPractice
    } else {
        AchievementLevel::None
    }
}

pub(crate) fn points_for(level: AchievementLevel, thresholds: &LevelThresholds) -> u32 {
    match level {
        AchievementLevel::None => 0,
        AchievementLevel::GoodPractice => thresholds.good_practice.points,
        AchievementLevel::BestPractice => thresholds.best_practice.points,
    }
}
