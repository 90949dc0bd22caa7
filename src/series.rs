use std::ops::{Deref, Index};

use serde::{Deserialize, Serialize};

/// Sampled values positionally aligned with a [`SampleGrid`](crate::SampleGrid).
///
/// A series is produced once and never mutated afterwards; element `i`
/// belongs to grid point `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    pub fn new(values: Vec<f64>) -> Self {
        Series { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for Series {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl Index<usize> for Series {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series { values }
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Series {
            values: iter.into_iter().collect(),
        }
    }
}
