//! Command-line argument definitions using clap

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

use crate::pipeline::{EvalConfig, MaxParallelism};

/// infogain - Rank dataset attributes by information gain with respect to a class column
#[derive(Parser, Debug)]
#[command(name = "infogain")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Class column name. Must be nominal: strings, booleans, integers
    /// or floats holding integral values only.
    #[arg(short, long)]
    pub target: String,

    /// Column containing instance weights.
    /// The column is excluded from the ranking. Default: every row has weight 1.0.
    #[arg(short = 'w', long)]
    pub weight_column: Option<String>,

    /// Treat missing values as a separate value instead of distributing
    /// their weight across the known values.
    #[arg(short = 'M', long, default_value = "false")]
    pub missing_as_separate: bool,

    /// Binarize numeric attributes (zero / non-zero) instead of
    /// discretizing them with the supervised MDL method.
    #[arg(short = 'B', long, default_value = "false")]
    pub binarize: bool,

    /// Maximum number of worker threads. Use 0 or 'all' for every available core.
    #[arg(short = 'P', long, default_value = "0", allow_negative_numbers = true)]
    pub threads: MaxParallelism,

    /// Number of attributes shown in the ranking table. Default: all.
    #[arg(long)]
    pub top: Option<usize>,

    /// Output path of the JSON ranking report.
    /// Defaults to the input directory with an '_infogain.json' suffix (e.g., data.csv -> data_infogain.json).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip writing the JSON ranking report
    #[arg(long, default_value = "false")]
    pub no_export: bool,

    /// Columns to drop before processing (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Evaluation settings selected on the command line
    pub fn eval_config(&self) -> EvalConfig {
        EvalConfig::default()
            .with_merge_missing_values(!self.missing_as_separate)
            .with_binarize_numeric(self.binarize)
            .with_max_parallelism(self.threads)
    }

    /// Get the report path, deriving it from the input if not explicitly provided.
    /// Returns `None` when the export is disabled.
    pub fn output_path(&self) -> Option<PathBuf> {
        if self.no_export {
            return None;
        }
        Some(self.output.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            parent.join(format!("{}_infogain.json", stem))
        }))
    }

    /// Default log filter for the `-v` count
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
