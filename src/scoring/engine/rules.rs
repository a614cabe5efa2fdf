use super::super::domain::{BuildingLayer, CreditType, Product};
use super::config::CreditRule;
use super::levels;
use super::ComplianceResult;

/// Running aggregates carried out of the per-layer pass so the engine can
/// derive the cost-weighted overall score without a second walk.
pub(crate) struct ScoreTotals {
    pub compliant_cost: f64,
    pub total_cost: f64,
    pub achieved_credits: u32,
    pub possible_credits: u32,
}

/// Score every building layer against every credit category. Layers with no
/// spend are skipped entirely rather than reported as zero, and a product
/// tagged with several layers contributes its full cost to each of them.
pub(crate) fn score_layers(
    products: &[Product],
    credit_rules: &[(CreditType, &CreditRule)],
) -> (Vec<ComplianceResult>, ScoreTotals) {
    let mut results = Vec::new();
    let mut totals = ScoreTotals {
        compliant_cost: 0.0,
        total_cost: 0.0,
        achieved_credits: 0,
        possible_credits: 0,
    };

    for layer in BuildingLayer::ordered() {
        let tagged: Vec<&Product> = products
            .iter()
            .filter(|product| product.building_layers.contains(&layer))
            .collect();

        let layer_cost: f64 = tagged.iter().map(|product| product.cost).sum();
        if layer_cost == 0.0 {
            continue;
        }

        for (credit, rule) in credit_rules {
            let compliant_cost: f64 = tagged
                .iter()
                .filter(|product| holds_recognized_certification(product, rule))
                .map(|product| product.cost)
                .sum();

            let percentage = compliant_cost / layer_cost * 100.0;
            let achievement_level = levels::achievement_for(percentage, &rule.thresholds);
            let points = levels::points_for(achievement_level, &rule.thresholds);

            totals.compliant_cost += compliant_cost;
            totals.total_cost += layer_cost;
            totals.achieved_credits += points;
            totals.possible_credits += rule.thresholds.best_practice.points;

            results.push(ComplianceResult {
                building_layer: layer,
                credit_type: *credit,
                compliant_cost,
                total_cost: layer_cost,
                percentage,
                achievement_level,
                points,
            });
        }
    }

    (results, totals)
}

fn holds_recognized_certification(product: &Product, rule: &CreditRule) -> bool {
    product
        .certifications
        .iter()
        .any(|certification| rule.recognized_certifications.contains(certification))
}
