//! Shared test utilities and fixture generators
#![allow(dead_code)]

use infogain::pipeline::{Attribute, Dataset, Instance};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// Rows of the classic 14-instance "weather" data:
/// outlook, temperature, humidity, windy, play
pub const WEATHER_ROWS: [(&str, &str, &str, bool, &str); 14] = [
    ("sunny", "hot", "high", false, "no"),
    ("sunny", "hot", "high", true, "no"),
    ("overcast", "hot", "high", false, "yes"),
    ("rainy", "mild", "high", false, "yes"),
    ("rainy", "cool", "normal", false, "yes"),
    ("rainy", "cool", "normal", true, "no"),
    ("overcast", "cool", "normal", true, "yes"),
    ("sunny", "mild", "high", false, "no"),
    ("sunny", "cool", "normal", false, "yes"),
    ("rainy", "mild", "normal", false, "yes"),
    ("sunny", "mild", "normal", true, "yes"),
    ("overcast", "mild", "high", true, "yes"),
    ("overcast", "hot", "normal", false, "yes"),
    ("rainy", "mild", "high", true, "no"),
];

/// Reference information gains of the weather attributes
pub const WEATHER_GAINS: [(&str, f64); 4] = [
    ("outlook", 0.24674981977443933),
    ("temperature", 0.02922256565895487),
    ("humidity", 0.15183550136234159),
    ("windy", 0.04812703040826949),
];

/// Entropy of the weather class (9 yes, 5 no)
pub const WEATHER_CLASS_ENTROPY: f64 = 0.9402859586706311;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn level(values: &[&str], value: &str) -> usize {
    values.iter().position(|v| *v == value).unwrap()
}

/// The weather data as a nominal dataset with the class last
pub fn weather_dataset() -> Dataset {
    let outlook = ["sunny", "overcast", "rainy"];
    let temperature = ["hot", "mild", "cool"];
    let humidity = ["high", "normal"];
    let windy = ["FALSE", "TRUE"];
    let play = ["yes", "no"];

    let mut dataset = Dataset::new(
        vec![
            Attribute::new("outlook", labels(&outlook)),
            Attribute::new("temperature", labels(&temperature)),
            Attribute::new("humidity", labels(&humidity)),
            Attribute::new("windy", labels(&windy)),
            Attribute::new("play", labels(&play)),
        ],
        Some(4),
    );
    for (o, t, h, w, p) in WEATHER_ROWS {
        dataset
            .push_dense(
                1.0,
                &[
                    Some(level(&outlook, o)),
                    Some(level(&temperature, t)),
                    Some(level(&humidity, h)),
                    Some(usize::from(w)),
                    Some(level(&play, p)),
                ],
            )
            .unwrap();
    }
    dataset
}

/// The weather data as a DataFrame
pub fn weather_dataframe() -> DataFrame {
    df! {
        "outlook" => WEATHER_ROWS.iter().map(|r| r.0).collect::<Vec<_>>(),
        "temperature" => WEATHER_ROWS.iter().map(|r| r.1).collect::<Vec<_>>(),
        "humidity" => WEATHER_ROWS.iter().map(|r| r.2).collect::<Vec<_>>(),
        "windy" => WEATHER_ROWS.iter().map(|r| r.3).collect::<Vec<_>>(),
        "play" => WEATHER_ROWS.iter().map(|r| r.4).collect::<Vec<_>>(),
    }
    .unwrap()
}

/// Seeded random sparse dataset with missing values.
///
/// Attribute `k` has cardinality `cardinalities[k]`; the class is appended
/// last with `num_classes` values. Roughly `missing_rate` of the attribute
/// values and class labels are missing, and most known values are 0 so the
/// instances are sparse.
pub fn random_dataset(
    seed: u64,
    num_instances: usize,
    cardinalities: &[usize],
    num_classes: usize,
    missing_rate: f64,
) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let class_index = cardinalities.len();

    let mut attributes: Vec<Attribute> = cardinalities
        .iter()
        .enumerate()
        .map(|(k, &n)| Attribute::with_cardinality(format!("a{}", k), n))
        .collect();
    attributes.push(Attribute::with_cardinality("class", num_classes));

    let mut dataset = Dataset::new(attributes, Some(class_index));
    for _ in 0..num_instances {
        let weight = rng.gen_range(0.5..2.0);
        let class = if rng.gen_bool(missing_rate) {
            None
        } else {
            Some(rng.gen_range(0..num_classes))
        };
        let mut stored = Vec::new();
        for (k, &n) in cardinalities.iter().enumerate() {
            if rng.gen_bool(missing_rate) {
                stored.push((k, None));
            } else if n > 1 && rng.gen_bool(0.4) {
                stored.push((k, Some(rng.gen_range(1..n))));
            }
        }
        dataset.push(Instance::new(weight, class, stored)).unwrap();
    }
    dataset
}

/// Numeric DataFrame whose `signal` column separates the binary `target`
pub fn create_numeric_dataframe(rows: usize, seed: u64) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let target: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    let signal: Vec<f64> = target
        .iter()
        .map(|&t| f64::from(t) * 10.0 + rng.gen::<f64>())
        .collect();
    let noise: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();

    df! {
        "signal" => signal,
        "noise" => noise,
        "target" => target,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Relative comparison used for parallelism invariance checks
pub fn assert_close(a: f64, b: f64, rel: f64) {
    let scale = a.abs().max(b.abs()).max(1e-12);
    assert!((a - b).abs() <= rel * scale, "{} != {} (rel {})", a, b, rel);
}
