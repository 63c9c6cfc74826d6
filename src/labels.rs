//! Mapping raw label values onto dense class indices.
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};


/// A single class in a [`ClassMap`]:
/// a scalar label, or a canonicalized label set for multilabel data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassValue {
    /// A scalar label from a single-label file.
    Scalar(f64),
    /// A sorted label set from a multilabel file.
    Set(Vec<f64>),
}


/// A bijection from original label values onto `0..num_classes`.
///
/// Indices are assigned by enumerating the sorted class set in
/// ascending order, so index `0` always belongs to the smallest class
/// value. The mapping is total over every label present in the data
/// it was fitted on, and the indices are contiguous from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMap {
    classes: Vec<ClassValue>,
}


impl ClassMap {
    /// Build the mapping and remap `labels` to class indices.
    ///
    /// Without `explicit`, the class set is the sorted set of distinct
    /// values observed in `labels`. With `explicit`, the given set is
    /// sorted and used as-is, which keeps index semantics consistent
    /// across splits that do not observe every class.
    ///
    /// Every observed label must be covered by the class set;
    /// an uncovered label is a caller precondition violation and is
    /// reported as [`Error::Config`] rather than silently misindexed.
    pub fn fit(labels: &[f64], explicit: Option<Vec<f64>>)
        -> Result<(Self, Vec<i64>)>
    {
        let classes = match explicit {
            Some(mut classes) => {
                classes.sort_by(f64::total_cmp);
                classes.dedup();
                classes
            }
            None => distinct_sorted(labels),
        };

        let targets = labels.iter()
            .map(|&y| {
                classes.binary_search_by(|c| c.total_cmp(&y))
                    .map(|i| i as i64)
                    .map_err(|_| Error::Config(format!(
                        "label {y} is not in the declared class set"
                    )))
            })
            .collect::<Result<Vec<_>>>()?;

        let classes = classes.into_iter()
            .map(ClassValue::Scalar)
            .collect();

        Ok((Self { classes }, targets))
    }


    /// Build the mapping for multilabel records, where each distinct
    /// (sorted) label set counts as one class.
    pub fn fit_sets(sets: &[Vec<f64>]) -> Result<(Self, Vec<i64>)> {
        let canonical = sets.iter()
            .map(|set| {
                let mut set = set.clone();
                set.sort_by(f64::total_cmp);
                set.dedup();
                set
            })
            .collect::<Vec<_>>();

        let mut classes = canonical.clone();
        classes.sort_by(|a, b| cmp_sets(a, b));
        classes.dedup();

        let targets = canonical.iter()
            .map(|set| {
                let i = classes
                    .binary_search_by(|c| cmp_sets(c, set))
                    .expect("every canonical set was inserted above");
                i as i64
            })
            .collect();

        let classes = classes.into_iter()
            .map(ClassValue::Set)
            .collect();

        Ok((Self { classes }, targets))
    }


    /// Number of classes in the mapping.
    pub fn len(&self) -> usize {
        self.classes.len()
    }


    /// Returns `true` if the mapping holds no class.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }


    /// The classes in index order:
    /// `classes()[i]` is the original value mapped to index `i`.
    pub fn classes(&self) -> &[ClassValue] {
        &self.classes
    }


    /// The index assigned to the scalar label `y`,
    /// or `None` if `y` is not a class of this mapping.
    pub fn index_of(&self, y: f64) -> Option<usize> {
        self.classes.iter()
            .position(|c| matches!(c, ClassValue::Scalar(v) if v.total_cmp(&y).is_eq()))
    }
}


/// Sorted distinct values of `labels`.
fn distinct_sorted(labels: &[f64]) -> Vec<f64> {
    let mut values = labels.to_vec();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}


/// Lexicographic order on canonical label sets.
fn cmp_sets(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = x.total_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
