//! Weighted attribute × class contingency tables
//!
//! Each non-class attribute gets a `(numValues + 1) × (numClasses + 1)` table.
//! The last row collects instances whose attribute value is missing and the
//! last column collects instances whose class is missing.

use std::ops::Range;

use super::dataset::Dataset;

/// Dense row-major table of weighted counts
#[derive(Debug, Clone, PartialEq)]
pub struct CountTable {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl CountTable {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    /// Build a table from nested rows; all rows must have the same length
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        debug_assert!(rows.iter().all(|r| r.len() == cols), "ragged rows");
        Self {
            rows: rows.len(),
            cols,
            cells: rows.iter().flatten().copied().collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn add(&mut self, row: usize, col: usize, weight: f64) {
        self.cells[row * self.cols + col] += weight;
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.cells[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Sum of every cell
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows).map(|r| self.row(r).iter().sum()).collect()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for r in 0..self.rows {
            for (sum, cell) in sums.iter_mut().zip(self.row(r)) {
                *sum += cell;
            }
        }
        sums
    }

    /// Elementwise `self += other`
    pub fn accumulate(&mut self, other: &CountTable) {
        assert_eq!(
            (self.rows, self.cols),
            (other.rows, other.cols),
            "cannot merge count tables of different shapes"
        );
        for (cell, add) in self.cells.iter_mut().zip(&other.cells) {
            *cell += add;
        }
    }
}

/// One count table per attribute; the class attribute's slot is empty
#[derive(Debug, Clone, PartialEq)]
pub struct PartialCounts {
    tables: Vec<Option<CountTable>>,
}

impl PartialCounts {
    /// Zeroed tables shaped for every non-class attribute of `dataset`
    pub fn zeros(dataset: &Dataset, class_index: usize) -> Self {
        let num_classes = dataset.attribute(class_index).num_values();
        let tables = dataset
            .attributes()
            .iter()
            .enumerate()
            .map(|(k, attr)| {
                (k != class_index).then(|| CountTable::zeros(attr.num_values() + 1, num_classes + 1))
            })
            .collect();
        Self { tables }
    }

    pub fn table(&self, attribute: usize) -> Option<&CountTable> {
        self.tables.get(attribute).and_then(Option::as_ref)
    }

    pub fn num_attributes(&self) -> usize {
        self.tables.len()
    }

    pub fn tables(&self) -> &[Option<CountTable>] {
        &self.tables
    }

    /// Elementwise merge of another partition's tables into these
    pub fn accumulate(&mut self, other: &PartialCounts) {
        assert_eq!(self.tables.len(), other.tables.len(), "attribute count mismatch");
        for (mine, theirs) in self.tables.iter_mut().zip(&other.tables) {
            match (mine, theirs) {
                (Some(mine), Some(theirs)) => mine.accumulate(theirs),
                (None, None) => {}
                _ => panic!("class attribute slot differs between partitions"),
            }
        }
    }
}

/// Count the instances in `range` into a fresh set of tables.
///
/// Pass A seeds row 0 of every table with the per-class weight of the whole
/// range, assuming each attribute holds value 0. Pass B walks only the stored
/// entries and moves their weight out of row 0 into the right cell.
pub fn count_instances(dataset: &Dataset, class_index: usize, range: Range<usize>) -> PartialCounts {
    let num_classes = dataset.attribute(class_index).num_values();
    let mut counts = PartialCounts::zeros(dataset, class_index);
    let instances = &dataset.instances()[range];

    // Pass A
    let mut class_weights = vec![0.0; num_classes + 1];
    for inst in instances {
        let col = inst.class_value().unwrap_or(num_classes);
        class_weights[col] += inst.weight();
    }
    for table in counts.tables.iter_mut().flatten() {
        table.row_mut(0).copy_from_slice(&class_weights);
    }

    // Pass B
    for inst in instances {
        let weight = inst.weight();
        let col = inst.class_value().unwrap_or(num_classes);
        for &(attribute, value) in inst.stored() {
            if attribute == class_index {
                continue;
            }
            let num_values = dataset.attribute(attribute).num_values();
            if let Some(table) = counts.tables[attribute].as_mut() {
                let row = value.unwrap_or(num_values);
                table.add(row, col, weight);
                table.add(0, col, -weight);
            }
        }
    }

    counts
}

/// Sum partial tables from every counting partition.
///
/// Starts from zeroed tables so that an empty partition list still yields a
/// correctly shaped result.
pub fn merge_partials(
    dataset: &Dataset,
    class_index: usize,
    partials: &[PartialCounts],
) -> PartialCounts {
    let mut merged = PartialCounts::zeros(dataset, class_index);
    for partial in partials {
        merged.accumulate(partial);
    }
    merged
}
