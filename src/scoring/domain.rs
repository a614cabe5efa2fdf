use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted projects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub String);

/// Shearing layers of a building, following the Green Star credit breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingLayer {
    Structure,
    Envelope,
    Systems,
    Finishes,
}

impl BuildingLayer {
    pub const fn ordered() -> [Self; 4] {
        [Self::Structure, Self::Envelope, Self::Systems, Self::Finishes]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "Structure",
            Self::Envelope => "Envelope",
            Self::Systems => "Systems",
            Self::Finishes => "Finishes",
        }
    }

    /// Case-insensitive lookup used when layers arrive as free text.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "structure" => Some(Self::Structure),
            "envelope" => Some(Self::Envelope),
            "systems" => Some(Self::Systems),
            "finishes" => Some(Self::Finishes),
            _ => None,
        }
    }
}

/// Responsible-products credit categories scored per building layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    Responsible,
    Healthy,
    Positive,
    Circular,
    Leadership,
}

impl CreditType {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Responsible,
            Self::Healthy,
            Self::Positive,
            Self::Circular,
            Self::Leadership,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Responsible => "Responsible",
            Self::Healthy => "Healthy",
            Self::Positive => "Positive",
            Self::Circular => "Circular",
            Self::Leadership => "Leadership",
        }
    }
}

/// Tiers a credit can reach. Variant order doubles as ranking, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementLevel {
    None,
    GoodPractice,
    BestPractice,
}

impl AchievementLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::GoodPractice => "Good Practice",
            Self::BestPractice => "Best Practice",
        }
    }
}

/// One line item from a project's material schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    pub cost: f64,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    pub building_layers: BTreeSet<BuildingLayer>,
    #[serde(default)]
    pub certifications: BTreeSet<String>,
}

fn default_quantity() -> f64 {
    1.0
}

/// Client supplied payload before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSubmission {
    pub project_name: String,
    pub submission_date: NaiveDate,
    pub products: Vec<Product>,
}

/// A material schedule accepted for assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    pub project_name: String,
    pub submission_date: NaiveDate,
    pub products: Vec<Product>,
}

impl Project {
    /// Total spend per building layer. A product tagged with several layers
    /// counts toward each of them.
    pub fn building_layer_costs(&self) -> BTreeMap<BuildingLayer, f64> {
        let mut costs = BTreeMap::new();
        for product in &self.products {
            for layer in &product.building_layers {
                *costs.entry(*layer).or_insert(0.0) += product.cost;
            }
        }
        costs
    }

    /// Whole-schedule spend. Each product counts once regardless of how many
    /// layers it is tagged with.
    pub fn total_project_cost(&self) -> f64 {
        self.products.iter().map(|product| product.cost).sum()
    }
}

/// High level status tracked for a stored project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Submitted,
    Scored,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Scored => "scored",
        }
    }
}
