use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::domain::CreditType;

/// Point-bearing cutoff for one achievement tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRule {
    pub min_percentage: f64,
    pub points: u32,
}

/// The two tiers a credit is assessed against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelThresholds {
    pub good_practice: LevelRule,
    pub best_practice: LevelRule,
}

/// Which certification schemes count toward a credit, and at what cutoffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRule {
    pub recognized_certifications: BTreeSet<String>,
    pub thresholds: LevelThresholds,
}

/// Versioned reference data driving the scoring engine. Thresholds and
/// certification mappings always come from here, never from code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub rules_version: String,
    pub credit_rules: BTreeMap<CreditType, CreditRule>,
    pub summary_thresholds: LevelThresholds,
}

impl ScoringConfig {
    pub fn credit_rule(&self, credit: CreditType) -> Option<&CreditRule> {
        self.credit_rules.get(&credit)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RulebookError> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RulebookError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Every credit category must carry a rule, and thresholds must be
    /// well formed, before the rulebook is allowed anywhere near a score.
    pub fn validate(&self) -> Result<(), RulebookError> {
        for credit in CreditType::ordered() {
            let rule = self
                .credit_rules
                .get(&credit)
                .ok_or(RulebookError::MissingCredit { credit })?;
            check_thresholds(&rule.thresholds, format!("credit {}", credit.label()))?;
        }

        check_thresholds(&self.summary_thresholds, "summary".to_string())
    }

    /// Built-in demonstration rulebook. Cutoffs here are placeholders for a
    /// guideline release loaded at runtime, not authoritative Green Star data.
    pub fn sample() -> Self {
        let thresholds = LevelThresholds {
            good_practice: LevelRule {
                min_percentage: 25.0,
                points: 1,
            },
            best_practice: LevelRule {
                min_percentage: 50.0,
                points: 2,
            },
        };

        let mut credit_rules = BTreeMap::new();
        for credit in CreditType::ordered() {
            credit_rules.insert(
                credit,
                CreditRule {
                    recognized_certifications: sample_certifications(credit)
                        .iter()
                        .map(|scheme| scheme.to_string())
                        .collect(),
                    thresholds,
                },
            );
        }

        Self {
            rules_version: "sample-2025.1".to_string(),
            credit_rules,
            summary_thresholds: thresholds,
        }
    }
}

fn check_thresholds(thresholds: &LevelThresholds, scope: String) -> Result<(), RulebookError> {
    let good = thresholds.good_practice.min_percentage;
    let best = thresholds.best_practice.min_percentage;

    if !good.is_finite() || !best.is_finite() || good < 0.0 || best < 0.0 {
        return Err(RulebookError::InvalidThreshold { scope });
    }

    if good > best {
        return Err(RulebookError::ThresholdOrder { scope, good, best });
    }

    Ok(())
}

fn sample_certifications(credit: CreditType) -> &'static [&'static str] {
    match credit {
        CreditType::Responsible => &[
            "Responsible Steel Certified",
            "FSC Chain of Custody",
            "PEFC Chain of Custody",
        ],
        CreditType::Healthy => &["Declare Red List Free", "Global GreenTag HealthRate"],
        CreditType::Positive => &["Climate Active Carbon Neutral", "EPD Australasia Verified"],
        CreditType::Circular => &["Cradle to Cradle Certified", "GECA Certified"],
        CreditType::Leadership => &["ISC IS Rating", "Global GreenTag GreenRate Level A"],
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RulebookError {
    #[error("failed to read rulebook: {0}")]
    Io(#[from] std::io::Error),
    #[error("rulebook is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("rulebook has no rule for credit type {credit:?}")]
    MissingCredit { credit: CreditType },
    #[error("{scope} thresholds must be finite, non-negative percentages")]
    InvalidThreshold { scope: String },
    #[error("{scope} thresholds out of order (good practice {good} above best practice {best})")]
    ThresholdOrder { scope: String, good: f64, best: f64 },
}
