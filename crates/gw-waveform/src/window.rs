//! Low-frequency cut for dimensionalized waveforms.

use crate::error::{WaveformError, WfResult};
use gw_core::{gradient_uniform, unwrap_phase};
use num_complex::Complex64;
use std::f64::consts::PI;
use std::ops::Range;

/// Longest contiguous run of samples whose instantaneous gravitational-wave
/// frequency exceeds `f_lower`.
///
/// The frequency is the time derivative of the decreasing unwrapped phase
/// divided by 2π, so `delta_t` and `f_lower` must share a unit system.
pub fn frequency_window(
    strain: &[Complex64],
    delta_t: f64,
    f_lower: f64,
) -> WfResult<Range<usize>> {
    if strain.len() < 2 {
        return Err(WaveformError::InvalidArg {
            what: "frequency window needs at least two samples",
        });
    }

    let mut phase: Vec<f64> = strain.iter().map(|h| -h.arg()).collect();
    unwrap_phase(&mut phase);
    let omega = gradient_uniform(&phase, delta_t);

    let mut best: Option<Range<usize>> = None;
    let mut run_start: Option<usize> = None;
    for (i, &w) in omega.iter().enumerate() {
        let above = w / (2.0 * PI) > f_lower;
        match (above, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                if best.as_ref().map_or(true, |b| i - start > b.len()) {
                    best = Some(start..i);
                }
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        let end = omega.len();
        if best.as_ref().map_or(true, |b| end - start > b.len()) {
            best = Some(start..end);
        }
    }

    best.ok_or(WaveformError::EmptyFrequencyWindow)
}
