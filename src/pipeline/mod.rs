//! Pipeline module - data preparation and parallel information gain evaluation

pub mod config;
pub mod contingency;
pub mod dataset;
pub mod discretize;
pub mod encode;
pub mod entropy;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod missing;
pub mod partition;
pub mod target;
pub mod weights;

pub use config::{EvalConfig, MaxParallelism};
pub use contingency::{count_instances, merge_partials, CountTable, PartialCounts};
pub use dataset::{Attribute, Dataset, Instance};
pub use encode::{encode_dataset, EncodeOptions, EncodedDataset, FeatureEncoding};
pub use entropy::info_gain;
pub use error::EvalError;
pub use evaluator::{
    evaluate, score_table, EvaluationStats, EvaluatorState, InfoGainEvaluator, InfoGainVector, Phase,
};
pub use loader::{drop_columns, load_dataset};
pub use missing::redistribute_missing;
pub use target::{encode_class_column, NominalColumn};
pub use weights::get_weights;
