use std::collections::BTreeSet;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::import::normalizer::normalize_text;
use crate::import::ScheduleImportError;
use crate::scoring::{BuildingLayer, Product};

/// Separator between values in the multi-valued schedule columns.
const VALUE_SEPARATOR: char = ';';

#[derive(Debug, Deserialize)]
struct ScheduleRow {
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Manufacturer", default, deserialize_with = "empty_string_as_none")]
    manufacturer: Option<String>,
    #[serde(rename = "Cost")]
    cost: String,
    #[serde(rename = "Quantity", default, deserialize_with = "empty_string_as_none")]
    quantity: Option<String>,
    #[serde(rename = "Unit", default)]
    unit: String,
    #[serde(rename = "Building Layers", default)]
    building_layers: String,
    #[serde(rename = "Certifications", default)]
    certifications: String,
}

pub(crate) fn parse_products<R: Read>(reader: R) -> Result<Vec<Product>, ScheduleImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut products = Vec::new();
    for (index, record) in csv_reader.deserialize::<ScheduleRow>().enumerate() {
        let row = record?;
        // The header occupies the first line of the file.
        let line = index + 2;
        products.push(to_product(line, row)?);
    }

    Ok(products)
}

fn to_product(line: usize, row: ScheduleRow) -> Result<Product, ScheduleImportError> {
    let product_id = normalize_text(&row.product_id);
    if product_id.is_empty() {
        return Err(ScheduleImportError::MissingProductId { line });
    }

    let cost = parse_number(&row.cost).ok_or_else(|| ScheduleImportError::InvalidNumber {
        line,
        column: "Cost",
        value: row.cost.clone(),
    })?;
    let quantity = match row.quantity.as_deref() {
        Some(raw) => parse_number(raw).ok_or_else(|| ScheduleImportError::InvalidNumber {
            line,
            column: "Quantity",
            value: raw.to_owned(),
        })?,
        None => 1.0,
    };

    let mut building_layers = BTreeSet::new();
    for token in row.building_layers.split(VALUE_SEPARATOR) {
        let label = normalize_text(token);
        if label.is_empty() {
            continue;
        }
        let layer = BuildingLayer::from_label(&label).ok_or_else(|| {
            ScheduleImportError::UnknownBuildingLayer {
                product_id: product_id.clone(),
                label,
            }
        })?;
        building_layers.insert(layer);
    }

    let mut certifications = BTreeSet::new();
    for token in row.certifications.split(VALUE_SEPARATOR) {
        let name = normalize_text(token);
        if !name.is_empty() {
            certifications.insert(name);
        }
    }

    Ok(Product {
        product_id,
        product_name: normalize_text(&row.product_name),
        manufacturer: row
            .manufacturer
            .map(|value| normalize_text(&value))
            .filter(|value| !value.is_empty()),
        cost,
        quantity,
        unit: normalize_text(&row.unit),
        building_layers,
        certifications,
    })
}

/// Accepts plain numbers as well as the currency shapes quantity
/// surveyors export, e.g. `$1,200.50`.
fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_start_matches('$');
    let plain: String = trimmed.chars().filter(|c| *c != ',').collect();
    if plain.is_empty() {
        return None;
    }
    plain.parse::<f64>().ok()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|inner| !inner.trim().is_empty()))
}

#[cfg(test)]
pub(crate) fn parse_number_for_tests(value: &str) -> Option<f64> {
    parse_number(value)
}
