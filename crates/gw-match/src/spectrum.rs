//! Frequency-domain view of a physical waveform.

use crate::error::{MatchError, MatchResult};
use gw_waveform::Waveform;
use num_complex::Complex64;
use realfft::RealFftPlanner;

/// One-sided strain spectrum.
///
/// Bin `k` approximates the continuous transform at `k * delta_f`:
/// `ã_k = Δt · DFT(h)_k`, covering DC through Nyquist.
#[derive(Clone, Debug)]
pub struct FrequencySeries {
    bins: Vec<Complex64>,
    delta_f: f64,
}

impl FrequencySeries {
    pub fn bins(&self) -> &[Complex64] {
        &self.bins
    }

    pub fn delta_f(&self) -> f64 {
        self.delta_f
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Frequency of bin `k` in Hz.
    pub fn frequency(&self, k: usize) -> f64 {
        k as f64 * self.delta_f
    }

    /// Bin index and frequency of the largest-magnitude bin.
    pub fn peak(&self) -> (usize, f64) {
        let (idx, _) = self
            .bins
            .iter()
            .map(|z| z.norm())
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, v)| {
                if v > bv { (i, v) } else { (bi, bv) }
            });
        (idx, self.frequency(idx))
    }
}

/// Forward real-to-complex transform of `samples`, zero-padded to `flen` and
/// scaled by `delta_t` so bins approximate the continuous transform.
pub(crate) fn forward_spectrum(
    samples: &mut Vec<f64>,
    flen: usize,
    delta_t: f64,
) -> MatchResult<Vec<Complex64>> {
    samples.resize(flen, 0.0);
    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(flen);
    let mut spec = r2c.make_output_vec();
    r2c.process(samples, &mut spec)
        .map_err(|_| MatchError::Incompatible {
            what: "forward transform failed",
        })?;
    for bin in &mut spec {
        *bin *= delta_t;
    }
    Ok(spec)
}

/// One-sided spectrum of the waveform's plus polarization, zero-padded to
/// the next power of two.
pub fn frequency_series(wf: &Waveform) -> MatchResult<FrequencySeries> {
    let delta_t = wf.delta_t();
    let (mut hp, _) = wf.polarizations()?;
    let flen = hp.len().next_power_of_two();
    let bins = forward_spectrum(&mut hp, flen, delta_t)?;
    Ok(FrequencySeries {
        bins,
        delta_f: 1.0 / (flen as f64 * delta_t),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_input_concentrates_at_dc() {
        let mut samples = vec![1.0; 16];
        let spec = forward_spectrum(&mut samples, 16, 0.5).unwrap();
        assert_eq!(spec.len(), 9);
        assert!((spec[0].re - 8.0).abs() < 1e-12);
        for bin in &spec[1..] {
            assert!(bin.norm() < 1e-12);
        }
    }

    #[test]
    fn zero_padding_refines_the_bin_spacing() {
        let mut short = vec![1.0, -1.0, 1.0, -1.0];
        let spec = forward_spectrum(&mut short, 16, 0.25).unwrap();
        assert_eq!(short.len(), 16);
        assert_eq!(spec.len(), 9);
    }
}
