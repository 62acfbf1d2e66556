//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

use crate::pipeline::EvalConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SCALE: Emoji<'_, '_> = Emoji("⚖️  ", "");
pub static THREADS: Emoji<'_, '_> = Emoji("🧵 ", "");

const BOX_WIDTH: usize = 56;

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
    ██╗███╗   ██╗███████╗ ██████╗  ██████╗  █████╗ ██╗███╗   ██╗
    ██║████╗  ██║██╔════╝██╔═══██╗██╔════╝ ██╔══██╗██║████╗  ██║
    ██║██╔██╗ ██║█████╗  ██║   ██║██║  ███╗███████║██║██╔██╗ ██║
    ██║██║╚██╗██║██╔══╝  ██║   ██║██║   ██║██╔══██║██║██║╚██╗██║
    ██║██║ ╚████║██║     ╚██████╔╝╚██████╔╝██║  ██║██║██║ ╚████║
    ╚═╝╚═╝  ╚═══╝╚═╝      ╚═════╝  ╚═════╝ ╚═╝  ╚═╝╚═╝╚═╝  ╚═══╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("H(C) - H(C|A)").magenta().bold(),
        style("Attribute ranking by information gain").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the configuration card
pub fn print_config(
    input: &Path,
    target: &str,
    weight_column: Option<&str>,
    output: Option<&Path>,
    config: &EvalConfig,
) {
    let line = "─".repeat(BOX_WIDTH - 2);
    let output = output.map_or_else(|| "(export disabled)".to_string(), |p| truncate_path(p, 38));
    let missing = if config.merge_missing_values {
        "distributed"
    } else {
        "separate value"
    };
    let numeric = if config.binarize_numeric {
        "binarized"
    } else {
        "MDL discretized"
    };

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(BOX_WIDTH - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:  {:<39}│", FOLDER, truncate_path(input, 38));
    println!("    │  {} Target: {:<39}│", TARGET, truncate_string(target, 38));
    println!(
        "    │  {} Weight: {:<39}│",
        SCALE,
        truncate_string(weight_column.unwrap_or("(none)"), 38)
    );
    println!("    │  {} Output: {:<39}│", SAVE, output);
    println!("    ├{}┤", line);
    println!("    │  {} Missing values: {:<31}│", CHART, style(missing).yellow());
    println!("    │  {} Numeric:        {:<31}│", CHART, style(numeric).yellow());
    println!(
        "    │  {} Threads:        {:<31}│",
        THREADS,
        style(config.max_parallelism).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the time a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("completed in {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    match detail {
        Some(detail) => println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(detail).dim()
        ),
        None => println!("      Found {} {}", style(count).yellow().bold(), description),
    }
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Information gain ranking complete!").green().bold()
    );
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    truncate_string(&path.display().to_string(), max_len)
}

/// Keep the tail of `s` so that it fits in `max_len` characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len + 3 - max_len).collect();
        format!("...{}", tail)
    }
}
