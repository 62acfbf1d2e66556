//! Unit tests for dataset loader

use infogain::pipeline::{drop_columns, load_dataset};
use polars::prelude::*;
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::{create_temp_csv, create_temp_parquet, weather_dataframe};

#[test]
fn test_load_csv_file() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "a,b,c").unwrap();
    writeln!(file, "1,x,3.5").unwrap();
    writeln!(file, "4,y,").unwrap();
    drop(file);

    let df = load_dataset(&csv_path, 100).unwrap();

    assert_eq!(df.shape(), (2, 3));
    assert_eq!(df.get_column_names(), &["a", "b", "c"]);
    assert_eq!(df.column("c").unwrap().null_count(), 1);
}

#[test]
fn test_load_csv_full_schema_scan() {
    let mut df = weather_dataframe();
    let (_dir, path) = create_temp_csv(&mut df);
    let loaded = load_dataset(&path, 0).unwrap();
    assert_eq!(loaded.shape(), (14, 5));
    assert_eq!(loaded.column("windy").unwrap().dtype(), &DataType::Boolean);
}

#[test]
fn test_load_parquet_file() {
    let mut df = df! {
        "x" => [1i32, 2, 3],
        "y" => ["a", "b", "a"],
    }
    .unwrap();
    let (_dir, path) = create_temp_parquet(&mut df);

    let loaded = load_dataset(&path, 100).unwrap();
    assert_eq!(loaded.shape(), (3, 2));
    assert_eq!(loaded.get_column_names(), &["x", "y"]);
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.arff");
    std::fs::write(&path, "@relation weather").unwrap();

    let err = load_dataset(&path, 100).unwrap_err();
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_dataset(&temp_dir.path().join("absent.csv"), 100).is_err());
}

#[test]
fn test_drop_columns() {
    let df = weather_dataframe();
    let dropped = drop_columns(df.clone(), &["temperature".to_string(), "windy".to_string()]).unwrap();
    assert_eq!(dropped.get_column_names(), &["outlook", "humidity", "play"]);

    let err = drop_columns(df, &["nope".to_string()]).unwrap_err();
    assert!(err.to_string().contains("nope"));
}
