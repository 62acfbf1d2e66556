//! Parallel information gain evaluation
//!
//! An evaluation runs two fork-join phases on one worker pool:
//!
//! 1. **Counting** - the instance range is split into contiguous spans and each
//!    worker builds its own set of count tables. All workers are joined before
//!    the tables are summed.
//! 2. **Scoring** - the non-class attributes are split into contiguous spans.
//!    Each worker folds missing buckets (when enabled) and computes the gain for
//!    its own attributes only, writing into its own slice of the result arena.
//!
//! Any worker failure fails the whole evaluation. Scores are only readable
//! once the evaluator reaches [`EvaluatorState::Ready`].

use std::any::Any;
use std::fmt;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use super::config::{EvalConfig, MaxParallelism};
use super::contingency::{count_instances, merge_partials, CountTable, PartialCounts};
use super::dataset::Dataset;
use super::entropy::info_gain;
use super::error::EvalError;
use super::missing::redistribute_missing;
use super::partition::{available_parallelism, span_count, split_spans};

/// Parallel phase of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Counting,
    Scoring,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Counting => write!(f, "counting"),
            Phase::Scoring => write!(f, "scoring"),
        }
    }
}

/// Lifecycle of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluatorState {
    #[default]
    Idle,
    Counting,
    Merging,
    /// Missing value redistribution and gain computation
    Scoring,
    Ready,
}

/// One information gain per attribute; the class attribute has no score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoGainVector {
    class_index: usize,
    scores: Vec<f64>,
}

impl InfoGainVector {
    /// Gain of `attribute`, or `None` for the class attribute and unknown indices
    pub fn get(&self, attribute: usize) -> Option<f64> {
        if attribute == self.class_index {
            return None;
        }
        self.scores.get(attribute).copied()
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Number of attribute slots, including the class slot
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// (attribute index, gain) pairs in attribute order, skipping the class
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.scores
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(attribute, _)| attribute != self.class_index)
    }

    /// Attributes sorted by gain descending, ties broken by attribute index
    pub fn ranked(&self) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }
}

/// How the work of the last evaluation was divided
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationStats {
    /// Instance range of each counting worker
    pub instance_spans: Vec<Range<usize>>,
    /// Attribute indices assigned to each scoring worker
    pub attribute_spans: Vec<Vec<usize>>,
    /// Scoring worker of each attribute (`None` for the class attribute)
    pub scored_by: Vec<Option<usize>>,
}

/// Information gain attribute evaluator
#[derive(Debug)]
pub struct InfoGainEvaluator {
    config: EvalConfig,
    state: EvaluatorState,
    pool: Option<rayon::ThreadPool>,
    gains: Option<InfoGainVector>,
    stats: Option<EvaluationStats>,
}

impl Default for InfoGainEvaluator {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}

impl InfoGainEvaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self {
            config,
            state: EvaluatorState::Idle,
            pool: None,
            gains: None,
            stats: None,
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Replace the settings; previous results and the worker pool are discarded
    pub fn set_config(&mut self, config: EvalConfig) {
        self.config = config;
        self.pool = None;
        self.reset();
    }

    pub fn state(&self) -> EvaluatorState {
        self.state
    }

    /// Scores of the last successful evaluation
    pub fn gains(&self) -> Option<&InfoGainVector> {
        self.gains.as_ref()
    }

    /// Work division of the last successful evaluation
    pub fn stats(&self) -> Option<&EvaluationStats> {
        self.stats.as_ref()
    }

    /// Information gain of one attribute; only valid once the evaluator is ready
    pub fn score(&self, attribute: usize) -> Result<f64, EvalError> {
        let gains = self.gains.as_ref().ok_or(EvalError::NotEvaluated)?;
        if attribute >= gains.len() {
            return Err(EvalError::UnknownAttribute {
                attribute,
                num_attributes: gains.len(),
            });
        }
        gains
            .get(attribute)
            .ok_or(EvalError::ClassAttributeQueried(attribute))
    }

    fn reset(&mut self) {
        self.state = EvaluatorState::Idle;
        self.gains = None;
        self.stats = None;
    }

    /// Run both phases over `dataset` and keep the resulting gains.
    ///
    /// On error the evaluator returns to `Idle` with no scores.
    pub fn evaluate(&mut self, dataset: &Dataset) -> Result<&InfoGainVector, EvalError> {
        self.reset();
        let class_index = check_class(dataset)?;

        let pool = match self.pool.take() {
            Some(pool) => pool,
            None => build_pool(&self.config)?,
        };
        let outcome = self.run_phases(&pool, dataset, class_index);
        self.pool = Some(pool);

        match outcome {
            Ok((gains, stats)) => {
                self.state = EvaluatorState::Ready;
                self.stats = Some(stats);
                Ok(self.gains.insert(gains))
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    fn run_phases(
        &mut self,
        pool: &rayon::ThreadPool,
        dataset: &Dataset,
        class_index: usize,
    ) -> Result<(InfoGainVector, EvaluationStats), EvalError> {
        let limit = self.config.max_parallelism;
        let merge_missing = self.config.merge_missing_values;

        self.state = EvaluatorState::Counting;
        let num_instances = dataset.num_instances();
        let instance_spans = split_spans(num_instances, span_count(limit, num_instances));
        debug!(
            "counting {} instance(s) in {} span(s): {:?}",
            num_instances,
            instance_spans.len(),
            instance_spans
        );

        let partials = count_partitions(pool, dataset, class_index, &instance_spans)?;

        self.state = EvaluatorState::Merging;
        let merged = merge_partials(dataset, class_index, &partials);
        drop(partials);

        self.state = EvaluatorState::Scoring;
        let attributes: Vec<usize> = (0..dataset.num_attributes())
            .filter(|&a| a != class_index)
            .collect();
        let attribute_spans = split_spans(attributes.len(), span_count(limit, attributes.len()));
        debug!(
            "scoring {} attribute(s) in {} span(s) (merge missing: {})",
            attributes.len(),
            attribute_spans.len(),
            merge_missing
        );

        let (arena, scored_by) =
            score_attributes(pool, &merged, &attributes, &attribute_spans, merge_missing)?;

        let mut scores = vec![f64::NAN; dataset.num_attributes()];
        for (&attribute, &gain) in attributes.iter().zip(&arena) {
            scores[attribute] = gain;
        }

        info!(
            "scored {} attribute(s) over {} instance(s) with {} counting and {} scoring worker(s)",
            attributes.len(),
            num_instances,
            instance_spans.len(),
            attribute_spans.len()
        );

        let stats = EvaluationStats {
            attribute_spans: attribute_spans
                .iter()
                .map(|span| attributes[span.clone()].to_vec())
                .collect(),
            instance_spans,
            scored_by,
        };
        Ok((
            InfoGainVector {
                class_index,
                scores,
            },
            stats,
        ))
    }
}

impl fmt::Display for InfoGainEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.state != EvaluatorState::Ready {
            return writeln!(f, "Information gain evaluator has not been built");
        }
        writeln!(f, "\tInformation Gain Ranking Filter")?;
        match self.config.max_parallelism {
            MaxParallelism::Unbounded => {
                writeln!(f, "\tUsing all ({}) threads", available_parallelism())?
            }
            MaxParallelism::Limited(n) => writeln!(f, "\tUsing {} threads", n)?,
        }
        if !self.config.merge_missing_values {
            writeln!(f, "\tMissing values treated as separate")?;
        }
        if self.config.binarize_numeric {
            writeln!(f, "\tNumeric attributes are just binarized")?;
        }
        Ok(())
    }
}

/// Evaluate `dataset` once with a throwaway evaluator
pub fn evaluate(dataset: &Dataset, config: EvalConfig) -> Result<InfoGainVector, EvalError> {
    let mut evaluator = InfoGainEvaluator::new(config);
    evaluator.evaluate(dataset).cloned()
}

/// Gain of one merged table under the missing value policy.
///
/// With merging enabled, a table whose known cells carry no weight is scored
/// unchanged, missing buckets included.
pub fn score_table(table: &CountTable, merge_missing: bool) -> f64 {
    if merge_missing {
        redistribute_missing(table).map_or_else(|| info_gain(table), |folded| info_gain(&folded))
    } else {
        info_gain(table)
    }
}

fn check_class(dataset: &Dataset) -> Result<usize, EvalError> {
    let index = dataset.class_index().ok_or(EvalError::NoClassAttribute)?;
    if index >= dataset.num_attributes() {
        return Err(EvalError::ClassIndexOutOfRange {
            index,
            num_attributes: dataset.num_attributes(),
        });
    }
    let class = dataset.attribute(index);
    if class.num_values() == 0 {
        return Err(EvalError::EmptyClassDomain {
            name: class.name().to_string(),
        });
    }
    Ok(index)
}

fn build_pool(config: &EvalConfig) -> Result<rayon::ThreadPool, EvalError> {
    let threads = config.max_parallelism.resolve(available_parallelism());
    debug!("building worker pool with {} thread(s)", threads);
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("infogain-worker-{}", i))
        .build()?)
}

/// Counting phase: one worker per instance span, each with its own tables
fn count_partitions(
    pool: &rayon::ThreadPool,
    dataset: &Dataset,
    class_index: usize,
    spans: &[Range<usize>],
) -> Result<Vec<PartialCounts>, EvalError> {
    pool.install(|| {
        spans
            .par_iter()
            .enumerate()
            .map(|(worker, span)| {
                run_worker(Phase::Counting, worker, || {
                    count_instances(dataset, class_index, span.clone())
                })
            })
            .collect::<Result<Vec<_>, _>>()
    })
}

/// Scoring phase: one worker per contiguous span of `attributes`.
///
/// Returns the gains in `attributes` order and, per attribute index, the
/// worker that scored it. `spans` must tile `0..attributes.len()`.
fn score_attributes(
    pool: &rayon::ThreadPool,
    merged: &PartialCounts,
    attributes: &[usize],
    spans: &[Range<usize>],
    merge_missing: bool,
) -> Result<(Vec<f64>, Vec<Option<usize>>), EvalError> {
    let mut arena = vec![0.0; attributes.len()];
    let slots = disjoint_slices(&mut arena, spans);
    let scored: Vec<Vec<usize>> = pool.install(|| {
        slots
            .into_par_iter()
            .zip(spans.par_iter())
            .enumerate()
            .map(|(worker, (slots, span))| {
                run_worker(Phase::Scoring, worker, || {
                    score_span(merged, &attributes[span.clone()], slots, merge_missing)
                })
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let scored_by = check_coverage(merged.num_attributes(), attributes, &scored)?;
    Ok((arena, scored_by))
}

fn score_span(
    merged: &PartialCounts,
    attributes: &[usize],
    slots: &mut [f64],
    merge_missing: bool,
) -> Vec<usize> {
    let mut scored = Vec::with_capacity(attributes.len());
    for (slot, &attribute) in slots.iter_mut().zip(attributes) {
        if let Some(table) = merged.table(attribute) {
            *slot = score_table(table, merge_missing);
            scored.push(attribute);
        }
    }
    scored
}

/// Verify every non-class attribute was scored exactly once
fn check_coverage(
    num_attributes: usize,
    attributes: &[usize],
    scored: &[Vec<usize>],
) -> Result<Vec<Option<usize>>, EvalError> {
    let mut times = vec![0usize; num_attributes];
    let mut scored_by = vec![None; num_attributes];
    for (worker, span) in scored.iter().enumerate() {
        for &attribute in span {
            times[attribute] += 1;
            scored_by[attribute] = Some(worker);
        }
    }
    for &attribute in attributes {
        if times[attribute] != 1 {
            return Err(EvalError::ScoringCoverage {
                attribute,
                times: times[attribute],
            });
        }
    }
    Ok(scored_by)
}

/// Cut `arena` into consecutive mutable slices matching contiguous `spans`
fn disjoint_slices<'a>(mut arena: &'a mut [f64], spans: &[Range<usize>]) -> Vec<&'a mut [f64]> {
    let mut slices = Vec::with_capacity(spans.len());
    for span in spans {
        let (head, tail) = std::mem::take(&mut arena).split_at_mut(span.len());
        slices.push(head);
        arena = tail;
    }
    slices
}

fn run_worker<T>(phase: Phase, worker: usize, task: impl FnOnce() -> T) -> Result<T, EvalError> {
    panic::catch_unwind(AssertUnwindSafe(task)).map_err(|payload| EvalError::WorkerFailed {
        phase,
        worker,
        message: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
