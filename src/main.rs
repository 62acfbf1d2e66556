//! infogain: attribute ranking CLI
//!
//! Loads a CSV or Parquet dataset, encodes every column as a nominal
//! attribute and ranks the attributes by information gain with respect to
//! the class column.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::info;

use infogain::cli::Cli;
use infogain::pipeline::{
    drop_columns, encode_dataset, get_weights, load_dataset, EncodeOptions, InfoGainEvaluator,
};
use infogain::report::{display_ranking, export_ranking, rank_attributes, ExportParams};
use infogain::utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config, print_count,
    print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let config = cli.eval_config();
    let output_path = cli.output_path();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        &cli.target,
        cli.weight_column.as_deref(),
        output_path.as_deref(),
        &config,
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    let df = if cli.drop_columns.is_empty() {
        df
    } else {
        let df = drop_columns(df, &cli.drop_columns)?;
        print_count("column(s) dropped on request", cli.drop_columns.len(), None);
        df
    };

    let (rows, cols) = df.shape();
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!(
        "      Estimated memory: {:.2} MB",
        df.estimated_size() as f64 / (1024.0 * 1024.0)
    );
    print_step_time(step_start.elapsed());

    // Step 2: Encode attributes
    print_step_header(2, "Encode Attributes");
    let step_start = Instant::now();
    let weights = get_weights(&df, cli.weight_column.as_deref())?;
    let options = EncodeOptions {
        target: &cli.target,
        weight_column: cli.weight_column.as_deref(),
        binarize_numeric: config.binarize_numeric,
    };
    let encoded = encode_dataset(&df, &weights, &options)?;
    drop(df);

    let dataset = &encoded.dataset;
    let missing_classes = dataset
        .instances()
        .iter()
        .filter(|i| i.class_is_missing())
        .count();
    print_count(
        "class value(s)",
        dataset.num_classes(),
        Some(&format!("in '{}'", cli.target)),
    );
    if missing_classes > 0 {
        print_info(&format!(
            "{} instance(s) have a missing class value",
            missing_classes
        ));
    }
    print_step_time(step_start.elapsed());

    // Step 3: Evaluate information gain
    print_step_header(3, "Information Gain");
    let step_start = Instant::now();
    let spinner = create_spinner("Counting and scoring attributes...");
    let mut evaluator = InfoGainEvaluator::new(config);
    evaluator
        .evaluate(dataset)
        .context("Information gain evaluation failed")?;
    finish_with_success(&spinner, "Information gain computed");
    info!("{}", evaluator.to_string().trim_end());

    let gains = evaluator
        .gains()
        .context("Evaluator finished without scores")?;
    let ranked = rank_attributes(&encoded, gains);
    let informative = ranked.iter().filter(|r| r.info_gain > 0.0).count();
    print_count(
        "informative attribute(s)",
        informative,
        Some(&format!("of {}", ranked.len())),
    );
    print_step_time(step_start.elapsed());

    display_ranking(&ranked, cli.top);

    // Step 4: Export
    if let Some(output_path) = output_path {
        print_step_header(4, "Save Results");
        let step_start = Instant::now();
        let input_file = cli.input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            target_column: &cli.target,
            weight_column: cli.weight_column.as_deref(),
            config: evaluator.config(),
        };
        export_ranking(&ranked, &encoded, &output_path, &params)?;
        print_success(&format!("Ranking saved to {}", output_path.display()));
        print_step_time(step_start.elapsed());
    }

    print_completion();

    Ok(())
}
