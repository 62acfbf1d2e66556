//! Missing value redistribution
//!
//! Folds the "attribute missing" row and the "class missing" column of a
//! merged count table back into the known cells, in proportion to how the
//! known weight is spread. Total weight is preserved.

use super::contingency::CountTable;

/// Fold missing buckets of a `(V + 1) × (C + 1)` table into a `V × C` table.
///
/// For each known cell `(i, j)` the added weight is
/// - `rowSum[i] / total` of the missing-value row entry `[V][j]`,
/// - `colSum[j] / total` of the missing-class column entry `[i][C]`,
/// - `cell / total` of the jointly missing corner `[V][C]`,
///
/// where the sums run over known cells only.
///
/// Returns `None` when the known cells carry no weight, since there is
/// nothing to distribute proportionally to.
pub fn redistribute_missing(table: &CountTable) -> Option<CountTable> {
    let num_values = table.rows().checked_sub(1)?;
    let num_classes = table.cols().checked_sub(1)?;

    let mut row_sums = vec![0.0; num_values];
    let mut col_sums = vec![0.0; num_classes];
    let mut total = 0.0;
    for i in 0..num_values {
        for j in 0..num_classes {
            let cell = table.get(i, j);
            row_sums[i] += cell;
            col_sums[j] += cell;
        }
        total += row_sums[i];
    }

    if total <= 0.0 {
        return None;
    }

    let corner = table.get(num_values, num_classes);
    let mut folded = CountTable::zeros(num_values, num_classes);
    for i in 0..num_values {
        let missing_class = table.get(i, num_classes);
        for j in 0..num_classes {
            let cell = table.get(i, j);
            let addition = (row_sums[i] / total) * table.get(num_values, j)
                + (col_sums[j] / total) * missing_class
                + (cell / total) * corner;
            folded.set(i, j, cell + addition);
        }
    }

    Some(folded)
}
