//! Evaluation settings

use std::num::NonZeroUsize;

use serde::Serialize;

/// Upper bound on the number of workers in each phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MaxParallelism {
    /// Use every available hardware thread
    #[default]
    Unbounded,
    /// Use at most this many workers
    Limited(NonZeroUsize),
}

impl MaxParallelism {
    /// Thread-count semantics of the command line: zero or negative means unbounded
    pub fn from_threads(threads: i64) -> Self {
        usize::try_from(threads)
            .ok()
            .and_then(NonZeroUsize::new)
            .map_or(MaxParallelism::Unbounded, MaxParallelism::Limited)
    }

    /// Effective worker count given the currently available parallelism
    pub fn resolve(self, available: usize) -> usize {
        let available = available.max(1);
        match self {
            MaxParallelism::Unbounded => available,
            MaxParallelism::Limited(limit) => available.min(limit.get()),
        }
    }
}

impl std::fmt::Display for MaxParallelism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaxParallelism::Unbounded => write!(f, "all"),
            MaxParallelism::Limited(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for MaxParallelism {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("unbounded") {
            return Ok(MaxParallelism::Unbounded);
        }
        s.parse::<i64>()
            .map(MaxParallelism::from_threads)
            .map_err(|_| format!("'{}' is not a thread count. Use a number or 'all'.", s))
    }
}

/// Options recognised by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EvalConfig {
    /// Fold missing buckets into known cells; otherwise missing is its own category
    pub merge_missing_values: bool,
    /// Numeric columns were binarized rather than discretized upstream
    pub binarize_numeric: bool,
    /// Worker cap for both phases
    pub max_parallelism: MaxParallelism,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            merge_missing_values: true,
            binarize_numeric: false,
            max_parallelism: MaxParallelism::Unbounded,
        }
    }
}

impl EvalConfig {
    pub fn with_merge_missing_values(mut self, merge: bool) -> Self {
        self.merge_missing_values = merge;
        self
    }

    pub fn with_binarize_numeric(mut self, binarize: bool) -> Self {
        self.binarize_numeric = binarize;
        self
    }

    pub fn with_max_parallelism(mut self, max_parallelism: MaxParallelism) -> Self {
        self.max_parallelism = max_parallelism;
        self
    }
}
