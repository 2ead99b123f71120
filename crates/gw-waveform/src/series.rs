//! Common mode-series storage shared by both waveform representations.

use crate::axis::TimeAxis;
use crate::error::{WaveformError, WfResult};
use crate::harmonics::spin_weighted_harmonic;
use gw_core::{Mode, gradient_uniform, unwrap_phase};
use num_complex::Complex64;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Multi-mode complex strain over one shared time axis.
///
/// Invariant: every stored series has exactly `time.len()` samples, and
/// stored modes have `m > 0`. Negative-m lookups are derived from the parity
/// relation `h_{l,-m} = (-1)^l conj(h_{l,m})`.
#[derive(Clone, Debug)]
pub struct ModeSeries {
    time: TimeAxis,
    modes: BTreeMap<Mode, Vec<Complex64>>,
}

impl ModeSeries {
    /// Create a mode series, validating shape invariants.
    pub fn new(time: TimeAxis, modes: BTreeMap<Mode, Vec<Complex64>>) -> WfResult<Self> {
        if modes.is_empty() {
            return Err(WaveformError::InvalidArg {
                what: "mode series must contain at least one mode",
            });
        }
        for (mode, strain) in &modes {
            if mode.m() <= 0 {
                return Err(WaveformError::InvalidArg {
                    what: "stored modes must have m > 0",
                });
            }
            if strain.len() != time.len() {
                return Err(WaveformError::Inconsistent {
                    what: "mode series length differs from time axis",
                });
            }
        }
        Ok(Self { time, modes })
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    /// Stored mode keys in (l, m) order.
    pub fn modes(&self) -> Vec<Mode> {
        self.modes.keys().copied().collect()
    }

    pub fn contains(&self, mode: Mode) -> bool {
        if mode.m() > 0 {
            self.modes.contains_key(&mode)
        } else {
            self.modes.contains_key(&mode.conjugate())
        }
    }

    /// The mode used for peak alignment and frequency tracking: (2, 2) when
    /// present, otherwise the lowest stored mode.
    pub fn dominant_mode(&self) -> Mode {
        let dominant = Mode::dominant();
        if self.modes.contains_key(&dominant) {
            dominant
        } else {
            *self.modes.keys().next().expect("mode series is non-empty")
        }
    }

    /// Strain of the requested mode.
    ///
    /// Positive-m modes are returned borrowed; negative-m modes are derived
    /// via the conjugate parity relation.
    pub fn strain(&self, mode: Mode) -> WfResult<Cow<'_, [Complex64]>> {
        if mode.m() > 0 {
            match self.modes.get(&mode) {
                Some(strain) => Ok(Cow::Borrowed(strain.as_slice())),
                None => Err(WaveformError::ModeNotFound { mode }),
            }
        } else {
            let stored = self
                .modes
                .get(&mode.conjugate())
                .ok_or(WaveformError::ModeNotFound { mode })?;
            let parity = mode.parity_sign();
            Ok(Cow::Owned(
                stored.iter().map(|h| parity * h.conj()).collect(),
            ))
        }
    }

    /// Amplitude |h(t)| of the requested mode.
    pub fn amp(&self, mode: Mode) -> WfResult<Vec<f64>> {
        Ok(self.strain(mode)?.iter().map(|h| h.norm()).collect())
    }

    /// Unwrapped phase of the requested mode.
    pub fn phase(&self, mode: Mode) -> WfResult<Vec<f64>> {
        let mut phase: Vec<f64> = self.strain(mode)?.iter().map(|h| h.arg()).collect();
        unwrap_phase(&mut phase);
        Ok(phase)
    }

    /// Instantaneous angular frequency of the requested mode, the time
    /// derivative of the decreasing unwrapped phase.
    pub fn omega(&self, mode: Mode) -> WfResult<Vec<f64>> {
        let phase = self.phase(mode)?;
        let neg: Vec<f64> = phase.iter().map(|p| -p).collect();
        Ok(gradient_uniform(&neg, self.time.delta_t()))
    }

    /// Index of the amplitude maximum of the requested mode.
    pub fn peak_index(&self, mode: Mode) -> WfResult<usize> {
        let amp = self.amp(mode)?;
        let (idx, _) = amp
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                if v > bv { (i, v) } else { (bi, bv) }
            });
        Ok(idx)
    }

    /// Shift the time axis so the dominant-mode amplitude peak sits at t = 0.
    pub fn align_to_peak(&mut self) -> WfResult<()> {
        let peak = self.peak_index(self.dominant_mode())?;
        let offset = self.time.sample(peak);
        self.time = self.time.shifted(-offset);
        Ok(())
    }

    /// Recombine stored modes into the observer strain at the given
    /// inclination and coalescence phase.
    ///
    /// Each stored mode contributes together with its derived negative-m
    /// counterpart: Σ h_lm ₋₂Y_lm + h_{l,-m} ₋₂Y_{l,-m}.
    pub fn recombine(&self, inclination: f64, coa_phase: f64) -> WfResult<Vec<Complex64>> {
        let mut total = vec![Complex64::ZERO; self.time.len()];
        for &mode in self.modes.keys() {
            let pos = self.strain(mode)?;
            let neg = self.strain(mode.conjugate())?;
            let y_pos = spin_weighted_harmonic(mode, inclination, coa_phase);
            let y_neg = spin_weighted_harmonic(mode.conjugate(), inclination, coa_phase);
            for (i, out) in total.iter_mut().enumerate() {
                *out += pos[i] * y_pos + neg[i] * y_neg;
            }
        }
        Ok(total)
    }

    /// Apply a per-mode transformation to the strain data, keeping the axis.
    pub(crate) fn map_strain<F>(&self, mut f: F) -> WfResult<Self>
    where
        F: FnMut(Mode, &[Complex64]) -> Vec<Complex64>,
    {
        let mut mapped = BTreeMap::new();
        for (&mode, strain) in &self.modes {
            mapped.insert(mode, f(mode, strain));
        }
        Self::new(self.time, mapped)
    }

    /// Restrict all modes and the axis to `range`.
    pub(crate) fn sliced(&self, range: std::ops::Range<usize>) -> WfResult<Self> {
        let time = self.time.slice(range.clone())?;
        let mut modes = BTreeMap::new();
        for (&mode, strain) in &self.modes {
            modes.insert(mode, strain[range.clone()].to_vec());
        }
        Self::new(time, modes)
    }

    /// Replace the time axis, keeping strain data (unit rescaling).
    pub(crate) fn with_time(&self, time: TimeAxis) -> WfResult<Self> {
        Self::new(time, self.modes.clone())
    }
}
