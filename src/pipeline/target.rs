//! Class column analysis and nominal encoding
//!
//! The class column must be nominal: strings, categoricals, booleans and
//! integers are accepted directly. Float columns are accepted only when every
//! non-null value is integral (e.g. a 0/1 label read back from CSV as f64).

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::EvalError;

/// A column encoded as indices into sorted labels; `None` is a missing value
#[derive(Debug, Clone, PartialEq)]
pub struct NominalColumn {
    pub labels: Vec<String>,
    pub values: Vec<Option<usize>>,
}

impl NominalColumn {
    pub fn num_values(&self) -> usize {
        self.labels.len()
    }
}

/// Encode the class column of `df`
pub fn encode_class_column(df: &DataFrame, target: &str) -> Result<NominalColumn> {
    let target_col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?;

    if target_col.len() == 0 {
        anyhow::bail!("Target column '{}' is empty", target);
    }

    if target_col.null_count() == target_col.len() {
        anyhow::bail!("Target column '{}' contains only null values", target);
    }

    if target_col.dtype().is_float() {
        let float_col = target_col.cast(&DataType::Float64)?;
        let non_integral = float_col
            .f64()?
            .into_iter()
            .flatten()
            .find(|v| !v.is_finite() || v.fract() != 0.0);
        if let Some(value) = non_integral {
            return Err(EvalError::NonNominalClass {
                name: target.to_string(),
                reason: format!("found non-integral value {}", value),
            }
            .into());
        }
        let int_col = float_col.cast(&DataType::Int64)?;
        return encode_nominal(&int_col);
    }

    if !is_nominal_dtype(target_col.dtype()) && !target_col.dtype().is_integer() {
        return Err(EvalError::NonNominalClass {
            name: target.to_string(),
            reason: format!("unsupported column type {}", target_col.dtype()),
        }
        .into());
    }

    encode_nominal(target_col)
}

/// Column types that are nominal as stored
pub fn is_nominal_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::String | DataType::Categorical(_, _) | DataType::Enum(_, _) | DataType::Boolean
    )
}

/// Encode a nominal column. Integer columns get numerically sorted labels,
/// everything else is compared as strings.
pub fn encode_nominal(col: &Column) -> Result<NominalColumn> {
    if col.dtype().is_integer() {
        let values: Vec<Option<i64>> = col.cast(&DataType::Int64)?.i64()?.into_iter().collect();
        return Ok(index_levels(values, |v| v.to_string()));
    }

    let string_col = col
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as nominal", col.name()))?;
    let values: Vec<Option<String>> = string_col
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect();
    Ok(index_levels(values, String::clone))
}

fn index_levels<K: Ord + Clone>(values: Vec<Option<K>>, label: impl Fn(&K) -> String) -> NominalColumn {
    let levels: Vec<K> = values
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<K>>()
        .into_iter()
        .collect();

    let encoded = values
        .iter()
        .map(|v| v.as_ref().and_then(|k| levels.binary_search(k).ok()))
        .collect();

    NominalColumn {
        labels: levels.iter().map(label).collect(),
        values: encoded,
    }
}
