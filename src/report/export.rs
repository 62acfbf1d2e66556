//! JSON export of the attribute ranking

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::ranking::{class_entropy, RankedAttribute};
use crate::pipeline::{EncodedDataset, EvalConfig};

/// Metadata about the evaluation run
#[derive(Debug, Serialize)]
pub struct RankingMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    pub infogain_version: String,
    pub input_file: String,
    pub target_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_column: Option<String>,
    /// `true` when missing values are distributed over known values
    pub merge_missing_values: bool,
    pub binarize_numeric: bool,
    /// Thread limit as given ("all" or a count)
    pub threads: String,
}

/// Summary statistics of the ranking
#[derive(Debug, Serialize)]
pub struct RankingSummary {
    /// Non-class attributes ranked
    pub attributes: usize,
    pub numeric_attributes: usize,
    pub instances: usize,
    pub total_weight: f64,
    /// Entropy of the known class labels in bits
    pub class_entropy: f64,
    pub mean_info_gain: f64,
    pub max_info_gain: f64,
}

/// Complete export document
#[derive(Debug, Serialize)]
pub struct RankingExport {
    pub metadata: RankingMetadata,
    pub summary: RankingSummary,
    pub attributes: Vec<RankedAttribute>,
}

/// Run parameters recorded in the export metadata
pub struct ExportParams<'a> {
    pub input_file: &'a str,
    pub target_column: &'a str,
    pub weight_column: Option<&'a str>,
    pub config: &'a EvalConfig,
}

/// Assemble the export document
pub fn build_export(
    ranked: &[RankedAttribute],
    encoded: &EncodedDataset,
    params: &ExportParams,
) -> RankingExport {
    let mean_info_gain = if ranked.is_empty() {
        0.0
    } else {
        ranked.iter().map(|r| r.info_gain).sum::<f64>() / ranked.len() as f64
    };
    let max_info_gain = ranked.first().map_or(0.0, |r| r.info_gain);

    RankingExport {
        metadata: RankingMetadata {
            timestamp: Utc::now().to_rfc3339(),
            infogain_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            target_column: params.target_column.to_string(),
            weight_column: params.weight_column.map(str::to_string),
            merge_missing_values: params.config.merge_missing_values,
            binarize_numeric: params.config.binarize_numeric,
            threads: params.config.max_parallelism.to_string(),
        },
        summary: RankingSummary {
            attributes: ranked.len(),
            numeric_attributes: encoded.num_numeric(),
            instances: encoded.dataset.num_instances(),
            total_weight: encoded.dataset.total_weight(),
            class_entropy: class_entropy(&encoded.dataset),
            mean_info_gain,
            max_info_gain,
        },
        attributes: ranked.to_vec(),
    }
}

/// Write the ranking report to `output_path` as pretty-printed JSON
pub fn export_ranking(
    ranked: &[RankedAttribute],
    encoded: &EncodedDataset,
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_export(ranked, encoded, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize attribute ranking to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write attribute ranking to {}",
            output_path.display()
        )
    })?;

    Ok(())
}
