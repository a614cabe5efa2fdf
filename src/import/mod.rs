//! Material schedule intake.
//!
//! Project teams hand over product schedules as CSV exports from cost
//! planning tools. The importer turns those rows into [`Product`]
//! records, cleaning up the usual spreadsheet artefacts on the way:
//! byte-order marks, stray whitespace, currency-formatted costs and
//! blank optional columns. Multi-valued columns (`Building Layers`,
//! `Certifications`) are semicolon separated.
//!
//! The importer only rejects rows it cannot read at all. Domain
//! screening, such as negative costs or products without a building
//! layer, stays with the scoring engine so that API submissions and
//! CSV imports fail with the same errors.

use std::error::Error;
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::scoring::Product;

mod normalizer;
mod parser;

#[derive(Debug)]
pub enum ScheduleImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingProductId {
        line: usize,
    },
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },
    UnknownBuildingLayer {
        product_id: String,
        label: String,
    },
}

impl fmt::Display for ScheduleImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read material schedule: {err}"),
            Self::Csv(err) => write!(f, "invalid schedule CSV data: {err}"),
            Self::MissingProductId { line } => {
                write!(f, "schedule line {line} has no product id")
            }
            Self::InvalidNumber {
                line,
                column,
                value,
            } => {
                write!(f, "schedule line {line}: {column} value '{value}' is not a number")
            }
            Self::UnknownBuildingLayer { product_id, label } => {
                write!(f, "product '{product_id}' names unknown building layer '{label}'")
            }
        }
    }
}

impl Error for ScheduleImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScheduleImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ScheduleImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads product schedules exported from cost planning tools.
pub struct ScheduleImporter;

impl ScheduleImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Product>, ScheduleImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Product>, ScheduleImportError> {
        parser::parse_products(reader)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::io::Cursor;

    use super::normalizer::normalize_for_tests;
    use super::parser::parse_number_for_tests;
    use super::{ScheduleImportError, ScheduleImporter};
    use crate::scoring::BuildingLayer;

    const HEADER: &str =
        "Product ID,Product Name,Manufacturer,Cost,Quantity,Unit,Building Layers,Certifications";

    fn schedule(rows: &[&str]) -> Cursor<String> {
        let mut data = String::from(HEADER);
        for row in rows {
            data.push('\n');
            data.push_str(row);
        }
        Cursor::new(data)
    }

    #[test]
    fn schedule_rows_parse_into_products() {
        let reader = schedule(&[
            "P-100,Recycled Steel Beam,GreenSteel Co,\"$1,200.50\",2,tonne,Structure; Envelope,ResponsibleCert; CircularCert",
            "P-200,Low VOC Paint,,85,,litre,Finishes,",
        ]);

        let products = ScheduleImporter::from_reader(reader).expect("schedule should parse");
        assert_eq!(products.len(), 2);

        let beam = &products[0];
        assert_eq!(beam.product_id, "P-100");
        assert_eq!(beam.product_name, "Recycled Steel Beam");
        assert_eq!(beam.manufacturer.as_deref(), Some("GreenSteel Co"));
        assert_eq!(beam.cost, 1200.50);
        assert_eq!(beam.quantity, 2.0);
        assert_eq!(beam.unit, "tonne");
        assert_eq!(
            beam.building_layers,
            BTreeSet::from([BuildingLayer::Structure, BuildingLayer::Envelope])
        );
        assert_eq!(
            beam.certifications,
            BTreeSet::from(["ResponsibleCert".to_owned(), "CircularCert".to_owned()])
        );

        let paint = &products[1];
        assert_eq!(paint.manufacturer, None);
        assert_eq!(paint.cost, 85.0);
        assert_eq!(paint.quantity, 1.0);
        assert_eq!(
            paint.building_layers,
            BTreeSet::from([BuildingLayer::Finishes])
        );
        assert!(paint.certifications.is_empty());
    }

    #[test]
    fn layer_labels_are_matched_case_insensitively() {
        let reader = schedule(&["P-300,Glazing Unit,,400,,m2,envelope,"]);

        let products = ScheduleImporter::from_reader(reader).expect("schedule should parse");
        assert_eq!(
            products[0].building_layers,
            BTreeSet::from([BuildingLayer::Envelope])
        );
    }

    #[test]
    fn layerless_rows_are_imported_for_later_screening() {
        let reader = schedule(&["P-400,Untagged Sealant,,60,,litre,,"]);

        let products = ScheduleImporter::from_reader(reader).expect("schedule should parse");
        assert!(products[0].building_layers.is_empty());
    }

    #[test]
    fn unknown_building_layer_is_rejected() {
        let reader = schedule(&["P-500,Carpet Tile,,90,,m2,Flooring,"]);

        let err = ScheduleImporter::from_reader(reader).expect_err("layer should be unknown");
        match err {
            ScheduleImportError::UnknownBuildingLayer { product_id, label } => {
                assert_eq!(product_id, "P-500");
                assert_eq!(label, "Flooring");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_product_id_is_rejected() {
        let reader = schedule(&[",Mystery Item,,10,,each,Systems,"]);

        let err = ScheduleImporter::from_reader(reader).expect_err("id should be required");
        match err {
            ScheduleImportError::MissingProductId { line } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_cost_is_rejected() {
        let reader = schedule(&["P-600,Duct Run,,twelve,,m,Systems,"]);

        let err = ScheduleImporter::from_reader(reader).expect_err("cost should not parse");
        match err {
            ScheduleImportError::InvalidNumber { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Cost");
                assert_eq!(value, "twelve");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_path_surfaces_io_errors() {
        let err = ScheduleImporter::from_path("/definitely/not/here/schedule.csv")
            .expect_err("path should not exist");
        assert!(matches!(err, ScheduleImportError::Io(_)));
    }

    #[test]
    fn normalizer_strips_invisible_characters() {
        assert_eq!(
            normalize_for_tests("\u{feff}Responsible\u{200b}  Steel   Certified "),
            "Responsible Steel Certified"
        );
    }

    #[test]
    fn currency_shapes_parse_as_numbers() {
        assert_eq!(parse_number_for_tests("$1,200.50"), Some(1200.50));
        assert_eq!(parse_number_for_tests(" 42 "), Some(42.0));
        assert_eq!(parse_number_for_tests("$"), None);
        assert_eq!(parse_number_for_tests("twelve"), None);
    }
}
