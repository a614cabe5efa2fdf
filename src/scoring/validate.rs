use std::fmt;

use super::domain::Product;
use super::engine::ScoringError;

/// What exactly is wrong with a rejected product row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductDataIssue {
    BlankIdentifier,
    NegativeCost(f64),
    NonFiniteCost,
    NegativeQuantity(f64),
    NonFiniteQuantity,
}

impl fmt::Display for ProductDataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductDataIssue::BlankIdentifier => write!(f, "product id is blank"),
            ProductDataIssue::NegativeCost(cost) => write!(f, "cost is negative ({cost})"),
            ProductDataIssue::NonFiniteCost => write!(f, "cost is not a finite number"),
            ProductDataIssue::NegativeQuantity(quantity) => {
                write!(f, "quantity is negative ({quantity})")
            }
            ProductDataIssue::NonFiniteQuantity => write!(f, "quantity is not a finite number"),
        }
    }
}

/// Screen a schedule before any scoring happens. The first offending product
/// is reported and nothing downstream runs, so a summary is never produced
/// from partially valid input.
pub(crate) fn check_products(products: &[Product]) -> Result<(), ScoringError> {
    if products.is_empty() {
        return Err(ScoringError::EmptyProject);
    }

    for product in products {
        if let Some(issue) = product_issue(product) {
            return Err(ScoringError::InvalidProductData {
                product_id: product.product_id.clone(),
                issue,
            });
        }

        if product.building_layers.is_empty() {
            return Err(ScoringError::InvalidBuildingLayer {
                product_id: product.product_id.clone(),
            });
        }
    }

    Ok(())
}

fn product_issue(product: &Product) -> Option<ProductDataIssue> {
    if product.product_id.trim().is_empty() {
        return Some(ProductDataIssue::BlankIdentifier);
    }

    if !product.cost.is_finite() {
        return Some(ProductDataIssue::NonFiniteCost);
    }

    if product.cost < 0.0 {
        return Some(ProductDataIssue::NegativeCost(product.cost));
    }

    if !product.quantity.is_finite() {
        return Some(ProductDataIssue::NonFiniteQuantity);
    }

    if product.quantity < 0.0 {
        return Some(ProductDataIssue::NegativeQuantity(product.quantity));
    }

    None
}
