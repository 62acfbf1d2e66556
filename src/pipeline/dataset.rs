//! Weighted, sparse, nominal dataset consumed by the evaluator
//!
//! Every attribute is nominal with a fixed set of labels. An instance stores
//! only the attributes whose value differs from value 0; anything not stored
//! is implicitly value 0. `None` marks a missing value, which is distinct
//! from value 0.

use serde::Serialize;

use super::error::EvalError;

/// A nominal attribute with a fixed, known set of labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    name: String,
    labels: Vec<String>,
}

impl Attribute {
    /// Create a nominal attribute from its labels (value `i` is `labels[i]`)
    pub fn new(name: impl Into<String>, labels: Vec<String>) -> Self {
        Self {
            name: name.into(),
            labels,
        }
    }

    /// Create a nominal attribute with `num_values` anonymous labels `"0"`, `"1"`, ...
    pub fn with_cardinality(name: impl Into<String>, num_values: usize) -> Self {
        Self::new(name, (0..num_values).map(|v| v.to_string()).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of distinct known values
    pub fn num_values(&self) -> usize {
        self.labels.len()
    }
}

/// One weighted record
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    weight: f64,
    class_value: Option<usize>,
    /// (attribute index, value) pairs sorted by attribute index
    stored: Vec<(usize, Option<usize>)>,
}

impl Instance {
    /// Create an instance from explicitly stored entries.
    ///
    /// Entries are sorted by attribute index; validation happens when the
    /// instance is pushed into a [`Dataset`].
    pub fn new(
        weight: f64,
        class_value: Option<usize>,
        mut stored: Vec<(usize, Option<usize>)>,
    ) -> Self {
        stored.sort_by_key(|&(attribute, _)| attribute);
        Self {
            weight,
            class_value,
            stored,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Class value, or `None` when the class is missing
    pub fn class_value(&self) -> Option<usize> {
        self.class_value
    }

    pub fn class_is_missing(&self) -> bool {
        self.class_value.is_none()
    }

    /// Explicitly stored (attribute, value) pairs
    pub fn stored(&self) -> &[(usize, Option<usize>)] {
        &self.stored
    }

    /// Value of `attribute`, resolving unstored attributes to value 0
    pub fn value(&self, attribute: usize) -> Option<usize> {
        match self
            .stored
            .binary_search_by_key(&attribute, |&(index, _)| index)
        {
            Ok(pos) => self.stored[pos].1,
            Err(_) => Some(0),
        }
    }
}

/// Ordered sequence of instances over a fixed nominal schema
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
    instances: Vec<Instance>,
}

impl Dataset {
    /// Create an empty dataset. The class index is checked by the evaluator.
    pub fn new(attributes: Vec<Attribute>, class_index: Option<usize>) -> Self {
        Self {
            attributes,
            class_index,
            instances: Vec::new(),
        }
    }

    /// Append a sparse instance after validating it against the schema
    pub fn push(&mut self, instance: Instance) -> Result<(), EvalError> {
        self.validate(&instance)?;
        self.instances.push(instance);
        Ok(())
    }

    /// Append a dense row with one entry per attribute.
    ///
    /// The class value is read from the class position. Entries equal to
    /// value 0 are not stored.
    pub fn push_dense(&mut self, weight: f64, row: &[Option<usize>]) -> Result<(), EvalError> {
        if row.len() != self.attributes.len() {
            return Err(EvalError::RowLengthMismatch {
                expected: self.attributes.len(),
                actual: row.len(),
            });
        }

        let class_value = self.class_index.and_then(|c| row.get(c).copied().flatten());
        let stored = row
            .iter()
            .enumerate()
            .filter(|&(attribute, value)| Some(attribute) != self.class_index && *value != Some(0))
            .map(|(attribute, &value)| (attribute, value))
            .collect();

        self.push(Instance::new(weight, class_value, stored))
    }

    fn validate(&self, instance: &Instance) -> Result<(), EvalError> {
        let index = self.instances.len();
        let num_attributes = self.attributes.len();

        if !instance.weight.is_finite() || instance.weight < 0.0 {
            return Err(EvalError::InvalidWeight {
                instance: index,
                weight: instance.weight,
            });
        }

        if let (Some(class_index), Some(class_value)) = (self.class_index, instance.class_value) {
            if let Some(class_attr) = self.attributes.get(class_index) {
                if class_value >= class_attr.num_values() {
                    return Err(EvalError::ValueOutOfRange {
                        instance: index,
                        attribute: class_index,
                        value: class_value,
                        num_values: class_attr.num_values(),
                    });
                }
            }
        }

        let mut previous = None;
        for &(attribute, value) in &instance.stored {
            if attribute >= num_attributes {
                return Err(EvalError::AttributeOutOfRange {
                    instance: index,
                    attribute,
                    num_attributes,
                });
            }
            if previous == Some(attribute) {
                return Err(EvalError::DuplicateAttribute {
                    instance: index,
                    attribute,
                });
            }
            previous = Some(attribute);

            let num_values = self.attributes[attribute].num_values();
            if let Some(value) = value {
                if value >= num_values {
                    return Err(EvalError::ValueOutOfRange {
                        instance: index,
                        attribute,
                        value,
                        num_values,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }

    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// Number of class values, or 0 when no valid class is designated
    pub fn num_classes(&self) -> usize {
        self.class_index
            .and_then(|c| self.attributes.get(c))
            .map_or(0, Attribute::num_values)
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> &Instance {
        &self.instances[index]
    }

    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Sum of all instance weights
    pub fn total_weight(&self) -> f64 {
        self.instances.iter().map(Instance::weight).sum()
    }
}
