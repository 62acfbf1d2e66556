//! Integration tests for the parallel information gain evaluator

use std::num::NonZeroUsize;

use infogain::pipeline::{
    evaluate, Attribute, Dataset, EvalConfig, EvalError, EvaluatorState, InfoGainEvaluator,
    Instance, MaxParallelism,
};

#[path = "common/mod.rs"]
mod common;

use common::{assert_close, random_dataset, weather_dataset, WEATHER_CLASS_ENTROPY, WEATHER_GAINS};

fn limited(n: usize) -> MaxParallelism {
    MaxParallelism::Limited(NonZeroUsize::new(n).unwrap())
}

#[test]
fn test_weather_reference_gains() {
    let dataset = weather_dataset();
    let gains = evaluate(&dataset, EvalConfig::default()).unwrap();

    for (index, (name, expected)) in WEATHER_GAINS.iter().enumerate() {
        assert_eq!(dataset.attribute(index).name(), *name);
        let gain = gains.get(index).unwrap();
        assert!(
            (gain - expected).abs() < 1e-10,
            "{}: got {}, expected {}",
            name,
            gain,
            expected
        );
    }
    assert_eq!(gains.get(4), None, "class attribute has no score");
}

#[test]
fn test_weather_ranking_order() {
    let gains = evaluate(&weather_dataset(), EvalConfig::default()).unwrap();
    let order: Vec<usize> = gains.ranked().into_iter().map(|(a, _)| a).collect();
    // outlook, humidity, windy, temperature
    assert_eq!(order, vec![0, 2, 3, 1]);
}

#[test]
fn test_partition_count_invariance() {
    let dataset = random_dataset(7, 503, &[2, 3, 5, 1, 4, 7, 2, 3, 6, 2, 9], 3, 0.15);

    for merge in [true, false] {
        let base = EvalConfig::default().with_merge_missing_values(merge);
        let single = evaluate(&dataset, base.with_max_parallelism(limited(1))).unwrap();
        assert!(single.iter().all(|(_, gain)| gain.is_finite()));

        for limit in [
            limited(2),
            limited(3),
            limited(dataset.num_instances()),
            MaxParallelism::Unbounded,
        ] {
            let gains = evaluate(&dataset, base.with_max_parallelism(limit)).unwrap();
            for (attribute, gain) in gains.iter() {
                assert_close(gain, single.get(attribute).unwrap(), 1e-9);
            }
        }
    }
}

#[test]
fn test_gains_are_non_negative() {
    for seed in 0..10 {
        let dataset = random_dataset(seed, 120, &[2, 4, 3, 6], 4, 0.3);
        for merge in [true, false] {
            let config = EvalConfig::default().with_merge_missing_values(merge);
            let gains = evaluate(&dataset, config).unwrap();
            for (attribute, gain) in gains.iter() {
                assert!(gain >= -1e-12, "seed {} attribute {} gain {}", seed, attribute, gain);
            }
        }
    }
}

#[test]
fn test_no_missing_values_policy_is_irrelevant() {
    let dataset = random_dataset(42, 300, &[3, 2, 5, 4], 3, 0.0);
    let merged = evaluate(&dataset, EvalConfig::default()).unwrap();
    let separate = evaluate(
        &dataset,
        EvalConfig::default().with_merge_missing_values(false),
    )
    .unwrap();
    for (attribute, gain) in merged.iter() {
        assert_close(gain, separate.get(attribute).unwrap(), 1e-12);
    }
}

#[test]
fn test_missing_policy_changes_gain() {
    let attrs = vec![
        Attribute::with_cardinality("x", 2),
        Attribute::with_cardinality("class", 2),
    ];
    let mut dataset = Dataset::new(attrs, Some(1));
    dataset.push_dense(1.0, &[Some(0), Some(0)]).unwrap();
    dataset.push_dense(1.0, &[Some(1), Some(1)]).unwrap();
    dataset.push_dense(1.0, &[None, Some(0)]).unwrap();
    dataset.push_dense(1.0, &[None, Some(1)]).unwrap();

    let merged = evaluate(&dataset, EvalConfig::default()).unwrap().get(0).unwrap();
    let separate = evaluate(&dataset, EvalConfig::default().with_merge_missing_values(false))
        .unwrap()
        .get(0)
        .unwrap();

    // Merged: each known row absorbs half of the [1, 1] missing row
    let expected = 1.0 - (-(0.75f64 * 0.75f64.log2() + 0.25 * 0.25f64.log2()));
    assert!((merged - expected).abs() < 1e-12, "merged gain {}", merged);
    // Separate: the missing row carries no information, H = 1 - 0.5 * 1
    assert!((separate - 0.5).abs() < 1e-12, "separate gain {}", separate);
}

#[test]
fn test_merge_without_known_cells_scores_table_unchanged() {
    // x is only known where the class is missing
    let attrs = vec![
        Attribute::with_cardinality("x", 2),
        Attribute::with_cardinality("class", 2),
    ];
    let mut dataset = Dataset::new(attrs, Some(1));
    dataset.push_dense(1.0, &[Some(1), None]).unwrap();
    dataset.push_dense(1.0, &[None, Some(0)]).unwrap();
    dataset.push_dense(1.0, &[None, Some(1)]).unwrap();

    let merged = evaluate(&dataset, EvalConfig::default()).unwrap().get(0).unwrap();
    let separate = evaluate(&dataset, EvalConfig::default().with_merge_missing_values(false))
        .unwrap()
        .get(0)
        .unwrap();

    // Columns [1, 1, 1]; rows {x=1: [0, 0, 1], x=?: [1, 1, 0]}
    let expected = 3f64.log2() - 2.0 / 3.0;
    assert_close(merged, expected, 1e-12);
    assert_close(merged, separate, 1e-12);
}

#[test]
fn test_single_instance_scores_zero() {
    let dataset = random_dataset(3, 1, &[2, 3, 4], 2, 0.0);
    let gains = evaluate(&dataset, EvalConfig::default()).unwrap();
    assert!(gains.iter().all(|(_, gain)| gain == 0.0));
}

#[test]
fn test_empty_dataset_scores_zero() {
    let dataset = random_dataset(3, 0, &[2, 3], 2, 0.0);
    let gains = evaluate(&dataset, EvalConfig::default()).unwrap();
    assert_eq!(gains.len(), 3);
    assert!(gains.iter().all(|(_, gain)| gain == 0.0));
}

#[test]
fn test_perfect_split_equals_class_entropy() {
    let attrs = vec![
        Attribute::with_cardinality("class", 2),
        Attribute::with_cardinality("copy", 2),
    ];
    let mut dataset = Dataset::new(attrs, Some(0));
    for (class, weight) in [(0, 1.0), (0, 2.0), (1, 1.0), (0, 0.5)] {
        dataset.push_dense(weight, &[Some(class), Some(class)]).unwrap();
    }
    let p: f64 = 3.5 / 4.5;
    let h = -(p * p.log2() + (1.0 - p) * (1.0 - p).log2());

    let gains = evaluate(&dataset, EvalConfig::default()).unwrap();
    assert!((gains.get(1).unwrap() - h).abs() < 1e-12);
}

#[test]
fn test_weather_outlook_upper_bound() {
    let gains = evaluate(&weather_dataset(), EvalConfig::default()).unwrap();
    for (_, gain) in gains.iter() {
        assert!(gain <= WEATHER_CLASS_ENTROPY + 1e-12);
    }
}

#[test]
fn test_scoring_phase_disjointness() {
    let dataset = random_dataset(11, 64, &[2; 13], 2, 0.1);
    let mut evaluator = InfoGainEvaluator::new(EvalConfig::default().with_max_parallelism(limited(4)));
    evaluator.evaluate(&dataset).unwrap();
    let stats = evaluator.stats().unwrap();

    let class_index = dataset.class_index().unwrap();
    let mut seen = vec![0usize; dataset.num_attributes()];
    for (worker, span) in stats.attribute_spans.iter().enumerate() {
        for &attribute in span {
            seen[attribute] += 1;
            assert_eq!(stats.scored_by[attribute], Some(worker));
        }
    }
    for (attribute, &count) in seen.iter().enumerate() {
        let expected = usize::from(attribute != class_index);
        assert_eq!(count, expected, "attribute {}", attribute);
    }
    assert_eq!(stats.scored_by[class_index], None);

    let covered: usize = stats.instance_spans.iter().map(|r| r.len()).sum();
    assert_eq!(covered, dataset.num_instances());
    assert!(stats.instance_spans.len() <= 4);
}

#[test]
fn test_configuration_errors() {
    let attrs = vec![Attribute::with_cardinality("x", 2)];
    let no_class = Dataset::new(attrs.clone(), None);
    assert!(matches!(
        evaluate(&no_class, EvalConfig::default()),
        Err(EvalError::NoClassAttribute)
    ));

    let out_of_range = Dataset::new(attrs, Some(3));
    assert!(matches!(
        evaluate(&out_of_range, EvalConfig::default()),
        Err(EvalError::ClassIndexOutOfRange { index: 3, .. })
    ));

    let empty_domain = Dataset::new(
        vec![
            Attribute::with_cardinality("x", 2),
            Attribute::with_cardinality("class", 0),
        ],
        Some(1),
    );
    assert!(matches!(
        evaluate(&empty_domain, EvalConfig::default()),
        Err(EvalError::EmptyClassDomain { .. })
    ));
}

#[test]
fn test_score_lifecycle() {
    let dataset = weather_dataset();
    let mut evaluator = InfoGainEvaluator::default();
    assert_eq!(evaluator.state(), EvaluatorState::Idle);
    assert!(matches!(evaluator.score(0), Err(EvalError::NotEvaluated)));

    evaluator.evaluate(&dataset).unwrap();
    assert_eq!(evaluator.state(), EvaluatorState::Ready);
    assert!((evaluator.score(0).unwrap() - WEATHER_GAINS[0].1).abs() < 1e-10);
    assert!(matches!(
        evaluator.score(4),
        Err(EvalError::ClassAttributeQueried(4))
    ));
    assert!(matches!(
        evaluator.score(9),
        Err(EvalError::UnknownAttribute { attribute: 9, .. })
    ));

    // A failed evaluation leaves no stale scores behind
    let broken = Dataset::new(vec![Attribute::with_cardinality("x", 2)], None);
    assert!(evaluator.evaluate(&broken).is_err());
    assert_eq!(evaluator.state(), EvaluatorState::Idle);
    assert!(evaluator.gains().is_none());
}

#[test]
fn test_evaluator_is_reusable() {
    let mut evaluator = InfoGainEvaluator::new(EvalConfig::default().with_max_parallelism(limited(2)));
    let first = evaluator.evaluate(&weather_dataset()).unwrap().clone();
    let other = random_dataset(5, 50, &[3, 3], 2, 0.2);
    evaluator.evaluate(&other).unwrap();
    let again = evaluator.evaluate(&weather_dataset()).unwrap();
    assert_eq!(&first, again);

    evaluator.set_config(EvalConfig::default().with_merge_missing_values(false));
    assert_eq!(evaluator.state(), EvaluatorState::Idle);
    assert!(!evaluator.config().merge_missing_values);
}

#[test]
fn test_zero_weight_instances_contribute_nothing() {
    let mut dataset = weather_dataset();
    dataset
        .push(Instance::new(0.0, Some(1), vec![(0, Some(1)), (2, None)]))
        .unwrap();
    let gains = evaluate(&dataset, EvalConfig::default()).unwrap();
    for (index, (_, expected)) in WEATHER_GAINS.iter().enumerate() {
        assert!((gains.get(index).unwrap() - expected).abs() < 1e-10);
    }
}
