//! Instance weight extraction

use anyhow::{bail, Context, Result};
use log::warn;
use polars::prelude::*;

/// Read instance weights from `weight_column`, or give every row weight 1.0.
///
/// # Arguments
/// * `df` - The DataFrame holding the instances
/// * `weight_column` - Optional name of a numeric weight column
///
/// # Behavior
/// - Null weights default to 1.0 and are reported once with a warning
/// - Zero weights are allowed; the row then contributes nothing to the counts
/// - NaN, infinite and negative weights are rejected
pub fn get_weights(df: &DataFrame, weight_column: Option<&str>) -> Result<Vec<f64>> {
    let Some(col_name) = weight_column else {
        return Ok(vec![1.0; df.height()]);
    };

    let column = df
        .column(col_name)
        .with_context(|| format!("Weight column '{}' not found in DataFrame", col_name))?;

    if !column.dtype().is_primitive_numeric() {
        bail!(
            "Weight column '{}' must be numeric, found {}",
            col_name,
            column.dtype()
        );
    }

    let float_col = column
        .cast(&DataType::Float64)
        .with_context(|| format!("Weight column '{}' cannot be cast to Float64", col_name))?;

    let mut null_count = 0usize;
    let weights = float_col
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            None => {
                null_count += 1;
                Ok(1.0)
            }
            Some(w) if w.is_nan() => bail!(
                "Weight column '{}' contains NaN at row {}. All weights must be valid numbers.",
                col_name,
                row
            ),
            Some(w) if w.is_infinite() => bail!(
                "Weight column '{}' contains an infinite value at row {}. All weights must be finite.",
                col_name,
                row
            ),
            Some(w) if w < 0.0 => bail!(
                "Weight column '{}' contains negative value {} at row {}. All weights must be non-negative.",
                col_name,
                w,
                row
            ),
            Some(w) => Ok(w),
        })
        .collect::<Result<Vec<f64>>>()?;

    if null_count > 0 {
        warn!(
            "Weight column '{}' contains {} null value(s), defaulting to weight 1.0",
            col_name, null_count
        );
    }

    Ok(weights)
}
