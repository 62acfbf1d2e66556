//! Entropy statistics over weighted contingency tables
//!
//! Rows are attribute values, columns are classes. All entropies are in bits.

use super::contingency::CountTable;

/// Entropy of a weighted distribution, ignoring empty entries
pub fn entropy(weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    weights
        .iter()
        .filter(|&&w| w > 0.0)
        .map(|&w| {
            let p = w / total;
            -p * p.log2()
        })
        .sum()
}

/// Entropy of the class distribution given by the column sums
pub fn entropy_over_columns(table: &CountTable) -> f64 {
    entropy(&table.column_sums())
}

/// Expected class entropy within each row, weighted by the row's share
pub fn entropy_conditioned_on_rows(table: &CountTable) -> f64 {
    let total = table.total();
    if total <= 0.0 {
        return 0.0;
    }
    (0..table.rows())
        .map(|r| {
            let row = table.row(r);
            let row_sum: f64 = row.iter().sum();
            if row_sum > 0.0 {
                (row_sum / total) * entropy(row)
            } else {
                0.0
            }
        })
        .sum()
}

/// `H(Class) - H(Class | Attribute)` for a finalized table
pub fn info_gain(table: &CountTable) -> f64 {
    if table.total() <= 0.0 {
        return 0.0;
    }
    entropy_over_columns(table) - entropy_conditioned_on_rows(table)
}
