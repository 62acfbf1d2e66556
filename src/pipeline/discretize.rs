//! Numeric to nominal conversion
//!
//! Two policies turn a continuous column into a fixed-cardinality nominal one:
//!
//! - **MDL discretization**: supervised recursive entropy splitting (Fayyad &
//!   Irani). The best boundary between two distinct values is taken while the
//!   minimum description length criterion accepts it.
//! - **Binarization**: value `0` maps to bin 0, any other value to bin 1.
//!
//! Missing (null or NaN) values stay missing under both policies.

use super::entropy::entropy;

/// A candidate boundary inside a sorted subset
struct Split {
    /// Index of the first point on the right side
    index: usize,
    cut: f64,
    left: Vec<f64>,
    right: Vec<f64>,
    entropy: f64,
}

/// Weighted class entropy after splitting into `left` and `right`
fn split_entropy(left: &[f64], right: &[f64]) -> f64 {
    let left_total: f64 = left.iter().sum();
    let right_total: f64 = right.iter().sum();
    let total = left_total + right_total;
    if total <= 0.0 {
        return 0.0;
    }
    (left_total / total) * entropy(left) + (right_total / total) * entropy(right)
}

/// Find MDL cut points for one numeric attribute.
///
/// Only rows with a known value and a known class take part. Returns the cut
/// points in ascending order; an empty result means a single bin.
pub fn mdl_cut_points(
    values: &[Option<f64>],
    classes: &[Option<usize>],
    weights: &[f64],
    num_classes: usize,
) -> Vec<f64> {
    let mut points: Vec<(f64, usize, f64)> = values
        .iter()
        .zip(classes)
        .zip(weights)
        .filter_map(|((value, class), &weight)| match (value, class) {
            (Some(v), Some(c)) if v.is_finite() && *c < num_classes => Some((*v, *c, weight)),
            _ => None,
        })
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut cuts = Vec::new();
    cut_points_for_subset(&points, num_classes, &mut cuts);
    cuts
}

/// Recursively split a sorted subset, pushing accepted cuts in ascending order
fn cut_points_for_subset(points: &[(f64, usize, f64)], num_classes: usize, cuts: &mut Vec<f64>) {
    if points.len() < 2 {
        return;
    }

    let mut left = vec![0.0; num_classes];
    let mut right = vec![0.0; num_classes];
    for &(_, class, weight) in points {
        right[class] += weight;
    }
    let prior = right.clone();
    let prior_entropy = entropy(&prior);

    let mut best: Option<Split> = None;
    let mut best_entropy = prior_entropy;
    let mut num_cut_points = 0usize;

    for i in 0..points.len() - 1 {
        let (value, class, weight) = points[i];
        left[class] += weight;
        right[class] -= weight;

        let next = points[i + 1].0;
        if value < next {
            let current = split_entropy(&left, &right);
            if current < best_entropy {
                best_entropy = current;
                best = Some(Split {
                    index: i + 1,
                    cut: (value + next) / 2.0,
                    left: left.clone(),
                    right: right.clone(),
                    entropy: current,
                });
            }
            num_cut_points += 1;
        }
    }

    let Some(split) = best else {
        return;
    };
    if prior_entropy - split.entropy <= 0.0 {
        return;
    }
    if !mdl_accepts(&prior, &split, num_cut_points) {
        return;
    }

    cut_points_for_subset(&points[..split.index], num_classes, cuts);
    cuts.push(split.cut);
    cut_points_for_subset(&points[split.index..], num_classes, cuts);
}

/// Fayyad & Irani's MDL stopping criterion
fn mdl_accepts(prior: &[f64], split: &Split, num_cut_points: usize) -> bool {
    let num_instances: f64 = prior.iter().sum();
    if num_instances <= 0.0 {
        return false;
    }
    let classes_present = |counts: &[f64]| counts.iter().filter(|&&c| c > 0.0).count() as f64;

    let k = classes_present(prior);
    let k_left = classes_present(&split.left);
    let k_right = classes_present(&split.right);

    let prior_entropy = entropy(prior);
    let gain = prior_entropy - split.entropy;

    let delta = (3f64.powf(k) - 2.0).log2()
        - (k * prior_entropy - k_left * entropy(&split.left) - k_right * entropy(&split.right));

    gain > ((num_cut_points as f64).log2() + delta) / num_instances
}

/// Bin index of each value: the number of cut points strictly below it
pub fn apply_cut_points(values: &[Option<f64>], cuts: &[f64]) -> Vec<Option<usize>> {
    values
        .iter()
        .map(|value| match value {
            Some(v) if !v.is_nan() => Some(cuts.partition_point(|&c| c < *v)),
            _ => None,
        })
        .collect()
}

/// Labels for the bins delimited by `cuts`
pub fn bin_labels(cuts: &[f64]) -> Vec<String> {
    if cuts.is_empty() {
        return vec!["All".to_string()];
    }
    let mut labels = Vec::with_capacity(cuts.len() + 1);
    labels.push(format!("(-inf-{}]", format_cut(cuts[0])));
    for pair in cuts.windows(2) {
        labels.push(format!("({}-{}]", format_cut(pair[0]), format_cut(pair[1])));
    }
    labels.push(format!("({}-inf)", format_cut(cuts[cuts.len() - 1])));
    labels
}

fn format_cut(cut: f64) -> String {
    let text = format!("{:.6}", cut);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Zero goes to bin 0, everything else to bin 1
pub fn binarize(values: &[Option<f64>]) -> Vec<Option<usize>> {
    values
        .iter()
        .map(|value| match value {
            Some(v) if v.is_nan() => None,
            Some(v) => Some(usize::from(*v != 0.0)),
            None => None,
        })
        .collect()
}

/// Labels of a binarized column
pub fn binary_labels() -> Vec<String> {
    vec!["0".to_string(), "1".to_string()]
}
