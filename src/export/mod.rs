//! Compliance summary export.
//!
//! Assessment results leave the system as CSV so they can be attached to
//! submission paperwork. The layout is a single table, one row per scored
//! building layer and credit pairing, closed out by an `overall` row
//! carrying the project-level score. Recommendations are advisory prose
//! and stay on the JSON surface.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scoring::ComplianceSummary;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create file '{}': {source}", path.display())]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV write failed: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("failed to flush CSV output: {message}")]
    Flush { message: String },
}

const SUMMARY_HEADER: [&str; 7] = [
    "Building Layer",
    "Credit Type",
    "Compliant Cost",
    "Total Cost",
    "Compliant Spend %",
    "Achievement Level",
    "Points",
];

/// Renders a scored summary as CSV bytes, ready to serve over HTTP.
pub fn summary_csv_bytes(summary: &ComplianceSummary) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    write_summary_csv(summary, &mut buffer)?;
    Ok(buffer)
}

/// Writes a scored summary as CSV to the given file path.
pub fn export_summary_csv<P: AsRef<Path>>(
    summary: &ComplianceSummary,
    path: P,
) -> Result<(), ExportError> {
    let path_ref = path.as_ref();
    let file = File::create(path_ref).map_err(|source| ExportError::FileCreate {
        path: path_ref.to_path_buf(),
        source,
    })?;
    write_summary_csv(summary, file)
}

pub fn write_summary_csv<W: Write>(
    summary: &ComplianceSummary,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(SUMMARY_HEADER)?;

    for entry in &summary.total_compliance {
        let compliant_cost = format!("{:.2}", entry.compliant_cost);
        let total_cost = format!("{:.2}", entry.total_cost);
        let percentage = format!("{:.1}", entry.percentage);
        let points = entry.points.to_string();
        csv_writer.write_record([
            entry.building_layer.label(),
            entry.credit_type.label(),
            compliant_cost.as_str(),
            total_cost.as_str(),
            percentage.as_str(),
            entry.achievement_level.label(),
            points.as_str(),
        ])?;
    }

    let overall_score = format!("{:.1}", summary.overall_score);
    let credits = format!(
        "{} of {}",
        summary.achieved_credits, summary.total_possible_credits
    );
    csv_writer.write_record([
        "overall",
        "",
        "",
        "",
        overall_score.as_str(),
        summary.achievement_level.label(),
        credits.as_str(),
    ])?;

    csv_writer.flush().map_err(|err| ExportError::Flush {
        message: err.to_string(),
    })?;

    Ok(())
}
