//! Error types for dataset construction and information gain evaluation.

use thiserror::Error;

use super::evaluator::Phase;

/// Errors raised by the dataset contract and the evaluator.
///
/// Configuration errors are reported before any worker is dispatched.
/// Worker failures abort the whole evaluation; no partial scores are exposed.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The dataset has no designated class attribute.
    #[error("dataset has no class attribute designated")]
    NoClassAttribute,

    /// The designated class index does not name an attribute.
    #[error("class index {index} is out of range for {num_attributes} attribute(s)")]
    ClassIndexOutOfRange { index: usize, num_attributes: usize },

    /// The class attribute has no nominal values to predict.
    #[error("class attribute '{name}' has an empty nominal domain")]
    EmptyClassDomain { name: String },

    /// The class column cannot be treated as a nominal attribute.
    #[error("class attribute '{name}' is not nominal: {reason}")]
    NonNominalClass { name: String, reason: String },

    /// An instance weight is negative, NaN or infinite.
    #[error("instance {instance} has invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight { instance: usize, weight: f64 },

    /// A stored entry names an attribute that does not exist.
    #[error("instance {instance} stores attribute {attribute}, but the dataset has {num_attributes} attribute(s)")]
    AttributeOutOfRange {
        instance: usize,
        attribute: usize,
        num_attributes: usize,
    },

    /// A stored value index is not below the attribute's cardinality.
    #[error("instance {instance} stores value {value} for attribute {attribute} with only {num_values} value(s)")]
    ValueOutOfRange {
        instance: usize,
        attribute: usize,
        value: usize,
        num_values: usize,
    },

    /// The same attribute is stored twice in one instance.
    #[error("instance {instance} stores attribute {attribute} more than once")]
    DuplicateAttribute { instance: usize, attribute: usize },

    /// A dense row does not have one entry per attribute.
    #[error("dense row has {actual} value(s), expected {expected}")]
    RowLengthMismatch { expected: usize, actual: usize },

    /// A worker panicked or could not be joined.
    #[error("{phase} worker {worker} failed: {message}")]
    WorkerFailed {
        phase: Phase,
        worker: usize,
        message: String,
    },

    /// An attribute was not scored exactly once in the scoring phase.
    #[error("attribute {attribute} was scored {times} time(s) instead of exactly once")]
    ScoringCoverage { attribute: usize, times: usize },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Scores were requested before an evaluation completed.
    #[error("information gains are not available until an evaluation has completed")]
    NotEvaluated,

    /// The class attribute carries no score.
    #[error("attribute {0} is the class attribute and has no information gain")]
    ClassAttributeQueried(usize),

    /// The queried attribute index does not exist.
    #[error("attribute {attribute} is out of range for {num_attributes} attribute(s)")]
    UnknownAttribute {
        attribute: usize,
        num_attributes: usize,
    },
}
