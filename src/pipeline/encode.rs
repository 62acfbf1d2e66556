//! DataFrame to nominal dataset conversion
//!
//! Every column other than the weight column becomes one nominal attribute,
//! in the DataFrame's column order:
//!
//! - String, categorical and boolean columns keep their observed levels.
//! - Numeric and temporal columns are discretized with the supervised MDL
//!   method, or binarized (zero / non-zero) when requested.
//! - The target column becomes the class attribute.
//!
//! Values at level 0 are left implicit, so sparse columns produce sparse
//! instances.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::dataset::{Attribute, Dataset, Instance};
use super::discretize::{apply_cut_points, bin_labels, binarize, binary_labels, mdl_cut_points};
use super::target::{encode_class_column, encode_nominal, is_nominal_dtype, NominalColumn};
use crate::utils::progress::{create_progress_bar, finish_with_success};

/// How a source column was turned into a nominal attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureEncoding {
    /// The class attribute
    Class,
    /// Levels taken directly from the column
    Nominal,
    /// Numeric column split at MDL cut points
    Discretized { cut_points: Vec<f64> },
    /// Numeric column mapped to zero / non-zero
    Binarized,
}

impl std::fmt::Display for FeatureEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureEncoding::Class => write!(f, "class"),
            FeatureEncoding::Nominal => write!(f, "nominal"),
            FeatureEncoding::Discretized { cut_points } => {
                write!(f, "mdl ({} cut{})", cut_points.len(), if cut_points.len() == 1 { "" } else { "s" })
            }
            FeatureEncoding::Binarized => write!(f, "binarized"),
        }
    }
}

/// Options controlling the conversion
#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions<'a> {
    /// Name of the class column
    pub target: &'a str,
    /// Column holding instance weights; excluded from the attributes
    pub weight_column: Option<&'a str>,
    /// Binarize numeric columns instead of discretizing them
    pub binarize_numeric: bool,
}

/// A nominal dataset plus the per-attribute encoding record
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    pub dataset: Dataset,
    /// One entry per attribute, aligned with `dataset.attributes()`
    pub encodings: Vec<FeatureEncoding>,
}

impl EncodedDataset {
    pub fn class_index(&self) -> usize {
        self.dataset.class_index().unwrap_or_default()
    }

    /// Number of numeric columns that went through discretization or binarization
    pub fn num_numeric(&self) -> usize {
        self.encodings
            .iter()
            .filter(|e| matches!(e, FeatureEncoding::Discretized { .. } | FeatureEncoding::Binarized))
            .count()
    }
}

struct EncodedColumn {
    attribute: Attribute,
    encoding: FeatureEncoding,
    values: Vec<Option<usize>>,
}

/// Convert `df` into a weighted nominal dataset.
///
/// # Arguments
/// * `df` - Source data, one row per instance
/// * `weights` - One weight per row (see [`super::weights::get_weights`])
/// * `options` - Target column, weight column and numeric policy
pub fn encode_dataset(df: &DataFrame, weights: &[f64], options: &EncodeOptions) -> Result<EncodedDataset> {
    if weights.len() != df.height() {
        bail!(
            "Got {} weight(s) for {} row(s); expected one weight per row",
            weights.len(),
            df.height()
        );
    }
    if options.weight_column == Some(options.target) {
        bail!("Column '{}' cannot be both the target and the weight column", options.target);
    }

    let class = encode_class_column(df, options.target)?;

    let columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|col| Some(col.name().as_str()) != options.weight_column)
        .collect();

    let pb = create_progress_bar(columns.len() as u64, "   Encoding attributes");
    let encoded: Vec<EncodedColumn> = columns
        .par_iter()
        .map(|col| {
            let result = if col.name().as_str() == options.target {
                Ok(EncodedColumn {
                    attribute: Attribute::new(options.target, class.labels.clone()),
                    encoding: FeatureEncoding::Class,
                    values: class.values.clone(),
                })
            } else {
                encode_feature(col, &class, weights, options.binarize_numeric)
            };
            pb.inc(1);
            result
        })
        .collect::<Result<Vec<_>>>()?;

    let class_index = encoded
        .iter()
        .position(|c| c.encoding == FeatureEncoding::Class)
        .with_context(|| format!("Target column '{}' not found", options.target))?;

    let mut attributes = Vec::with_capacity(encoded.len());
    let mut encodings = Vec::with_capacity(encoded.len());
    let mut values = Vec::with_capacity(encoded.len());
    for column in encoded {
        attributes.push(column.attribute);
        encodings.push(column.encoding);
        values.push(column.values);
    }

    let mut dataset = Dataset::new(attributes, Some(class_index));
    for (row, &weight) in weights.iter().enumerate() {
        let stored: Vec<(usize, Option<usize>)> = values
            .iter()
            .enumerate()
            .filter(|&(k, _)| k != class_index)
            .filter_map(|(k, column)| match column[row] {
                Some(0) => None,
                value => Some((k, value)),
            })
            .collect();
        dataset
            .push(Instance::new(weight, class.values[row], stored))
            .with_context(|| format!("Invalid instance at row {}", row))?;
    }

    let numeric = encodings
        .iter()
        .filter(|e| matches!(e, FeatureEncoding::Discretized { .. } | FeatureEncoding::Binarized))
        .count();
    finish_with_success(
        &pb,
        &format!(
            "Encoded {} attributes ({} numeric, {} nominal)",
            encodings.len() - 1,
            numeric,
            encodings.len() - 1 - numeric
        ),
    );

    Ok(EncodedDataset { dataset, encodings })
}

fn encode_feature(
    col: &Column,
    class: &NominalColumn,
    weights: &[f64],
    binarize_numeric: bool,
) -> Result<EncodedColumn> {
    let name = col.name().to_string();
    let dtype = col.dtype();

    if is_nominal_dtype(dtype) || matches!(dtype, DataType::Null) {
        let nominal = encode_nominal(col)?;
        return Ok(EncodedColumn {
            attribute: Attribute::new(name, nominal.labels),
            encoding: FeatureEncoding::Nominal,
            values: nominal.values,
        });
    }

    if !(dtype.is_primitive_numeric() || dtype.is_temporal()) {
        bail!("Column '{}' has unsupported type {}", name, dtype);
    }

    let numeric: Vec<Option<f64>> = col
        .to_physical_repr()
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numeric", name))?
        .f64()?
        .into_iter()
        .collect();

    if binarize_numeric {
        return Ok(EncodedColumn {
            attribute: Attribute::new(name, binary_labels()),
            encoding: FeatureEncoding::Binarized,
            values: binarize(&numeric),
        });
    }

    let cut_points = mdl_cut_points(&numeric, &class.values, weights, class.num_values());
    Ok(EncodedColumn {
        attribute: Attribute::new(name, bin_labels(&cut_points)),
        values: apply_cut_points(&numeric, &cut_points),
        encoding: FeatureEncoding::Discretized { cut_points },
    })
}
