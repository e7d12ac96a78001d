use serde::{Deserialize, Serialize};

use crate::lttb;
use crate::lttb::DownsampleError;
use crate::sample::Sample;

// Series is a sampled curve: paired x/y values in input order.
//
// x is typically time or frequency and is expected, but not required, to be
// non-decreasing. Every operation works on input order.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    /// Builds a series, rejecting mismatched lengths up front.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, DownsampleError> {
        if x.len() != y.len() {
            return Err(DownsampleError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Series { x, y })
    }

    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut x = Vec::with_capacity(samples.len());
        let mut y = Vec::with_capacity(samples.len());
        for sample in samples {
            x.push(sample.x);
            y.push(sample.y);
        }
        Series { x, y }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Reduce to at most `threshold` points with LTTB.
    pub fn downsample(&self, threshold: usize) -> Result<Series, DownsampleError> {
        let (x, y) = lttb::downsample(&self.x, &self.y, threshold)?;
        Ok(Series { x, y })
    }

    /// Min and max over the finite x values, if there are any.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.x)
    }

    /// Min and max over the finite y values, if there are any.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.y)
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for &v in values {
        if !v.is_finite() {
            continue;
        }
        range = match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        };
    }
    range
}
