//! Attribute ranking and its terminal table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;
use serde::Serialize;

use crate::pipeline::entropy::entropy;
use crate::pipeline::{Dataset, EncodedDataset, FeatureEncoding, InfoGainVector};

/// One attribute's position in the ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAttribute {
    /// 1-based rank, highest gain first
    pub rank: usize,
    /// Column position in the encoded dataset
    pub index: usize,
    pub name: String,
    pub encoding: FeatureEncoding,
    /// Number of known values after encoding
    pub cardinality: usize,
    pub info_gain: f64,
}

/// Order every non-class attribute by descending information gain
pub fn rank_attributes(encoded: &EncodedDataset, gains: &InfoGainVector) -> Vec<RankedAttribute> {
    gains
        .ranked()
        .into_iter()
        .enumerate()
        .map(|(position, (index, info_gain))| {
            let attribute = encoded.dataset.attribute(index);
            RankedAttribute {
                rank: position + 1,
                index,
                name: attribute.name().to_string(),
                encoding: encoded.encodings[index].clone(),
                cardinality: attribute.num_values(),
                info_gain,
            }
        })
        .collect()
}

/// Entropy of the known class labels, in bits
pub fn class_entropy(dataset: &Dataset) -> f64 {
    let mut class_weights = vec![0.0; dataset.num_classes()];
    for instance in dataset.instances() {
        if let Some(class) = instance.class_value() {
            class_weights[class] += instance.weight();
        }
    }
    entropy(&class_weights)
}

/// Print the ranking table, limited to the first `top` rows when given
pub fn display_ranking(ranked: &[RankedAttribute], top: Option<usize>) {
    println!();
    println!(
        "    {} {}",
        style("🏆").cyan(),
        style("ATTRIBUTE RANKING").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    let shown = top.unwrap_or(ranked.len()).min(ranked.len());
    let table = ranking_table(&ranked[..shown]);
    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    if shown < ranked.len() {
        println!(
            "      {}",
            style(format!("... {} more attribute(s) not shown", ranked.len() - shown)).dim()
        );
    }
}

fn ranking_table(ranked: &[RankedAttribute]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Rank").add_attribute(Attribute::Bold),
        Cell::new("Attribute").add_attribute(Attribute::Bold),
        Cell::new("Encoding").add_attribute(Attribute::Bold),
        Cell::new("Values").add_attribute(Attribute::Bold),
        Cell::new("Info Gain").add_attribute(Attribute::Bold),
    ]);

    let best = ranked.first().map_or(0.0, |r| r.info_gain);
    for entry in ranked {
        let color = if entry.info_gain <= 0.0 {
            Color::DarkGrey
        } else if entry.info_gain >= 0.5 * best {
            Color::Green
        } else {
            Color::Yellow
        };
        table.add_row(vec![
            Cell::new(entry.rank).set_alignment(CellAlignment::Right),
            Cell::new(&entry.name),
            Cell::new(&entry.encoding),
            Cell::new(entry.cardinality).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.6}", entry.info_gain))
                .fg(color)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
