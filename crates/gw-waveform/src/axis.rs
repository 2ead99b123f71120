//! Uniform time grid.
//!
//! Samples are point measurements at `t[i] = start + i * delta_t`. Storing
//! (start, delta_t, len) instead of a materialized array makes uniform
//! spacing a construction-time invariant rather than something every
//! consumer has to re-check.

use crate::error::{WaveformError, WfResult};
use std::ops::Range;

/// A uniformly spaced time axis.
///
/// Units follow the owning waveform: seconds for physical waveforms, total
/// mass M for dimensionless ones.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeAxis {
    start: f64,
    delta_t: f64,
    len: usize,
}

impl TimeAxis {
    /// Create an axis, validating that the step is positive and finite.
    pub fn new(start: f64, delta_t: f64, len: usize) -> WfResult<Self> {
        if !start.is_finite() {
            return Err(WaveformError::InvalidArg {
                what: "time axis start must be finite",
            });
        }
        if !delta_t.is_finite() || delta_t <= 0.0 {
            return Err(WaveformError::InvalidArg {
                what: "delta_t must be positive and finite",
            });
        }
        if len == 0 {
            return Err(WaveformError::InvalidArg {
                what: "time axis must contain at least one sample",
            });
        }
        Ok(Self {
            start,
            delta_t,
            len,
        })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Time of the last sample.
    pub fn end(&self) -> f64 {
        self.start + (self.len - 1) as f64 * self.delta_t
    }

    /// Span from the first to the last sample.
    pub fn span(&self) -> f64 {
        (self.len - 1) as f64 * self.delta_t
    }

    /// Time of sample `i`.
    pub fn sample(&self, i: usize) -> f64 {
        self.start + i as f64 * self.delta_t
    }

    /// Materialize the axis as a vector of sample times.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.sample(i)).collect()
    }

    /// Axis translated by `offset`.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            start: self.start + offset,
            ..*self
        }
    }

    /// Axis with start and step multiplied by `factor` (unit rescaling).
    pub fn scaled(&self, factor: f64) -> WfResult<Self> {
        Self::new(self.start * factor, self.delta_t * factor, self.len)
    }

    /// Sub-axis covering `range` of the current samples.
    pub fn slice(&self, range: Range<usize>) -> WfResult<Self> {
        if range.start >= range.end || range.end > self.len {
            return Err(WaveformError::InvalidArg {
                what: "time axis slice out of bounds",
            });
        }
        Self::new(self.sample(range.start), self.delta_t, range.len())
    }
}
