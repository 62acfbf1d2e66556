//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

/// Load a dataset into memory, choosing the reader by file extension.
///
/// # Arguments
/// * `path` - Path to a `.csv` or `.parquet` file
/// * `infer_schema_length` - Rows scanned to infer CSV column types; `0` scans the whole file
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let schema_rows = (infer_schema_length > 0).then_some(infer_schema_length);
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_rows)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Remove user-excluded columns, failing on names the dataset does not have
pub fn drop_columns(df: DataFrame, columns: &[String]) -> Result<DataFrame> {
    columns.iter().try_fold(df, |df, name| {
        df.drop(name)
            .with_context(|| format!("Cannot drop column '{}': not found in dataset", name))
    })
}
