//! Integration tests for the match engine.

use gw_core::Mode;
use gw_core::units::{hz, s};
use gw_match::{AligoZeroDetHighPower, FlatPsd, MatchOptions, frequency_series, match_waveforms};
use gw_waveform::{GeneratedMode, ModeGenerator, SourceParams, TimeAxis, Waveform, WfResult};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Deterministic chirp backend: a one-second sweep from 1.5 f_lower to
/// 7.5 f_lower with a Gaussian envelope, optionally delayed. Fixing the
/// duration (rather than the sample count) makes waveforms generated at
/// different delta_t samplings of the same continuous signal.
struct ChirpBackend {
    duration: f64,
    delay: f64,
}

impl ChirpBackend {
    fn new() -> Self {
        Self {
            duration: 1.0,
            delay: 0.0,
        }
    }

    fn delayed(delay: f64) -> Self {
        Self {
            duration: 1.0,
            delay,
        }
    }
}

impl ModeGenerator for ChirpBackend {
    fn name(&self) -> &str {
        "chirp-backend"
    }

    fn supports(&self, approximant: &str) -> bool {
        approximant == "TestChirp"
    }

    fn generate_mode(
        &self,
        _approximant: &str,
        mode: Mode,
        params: &SourceParams,
    ) -> WfResult<GeneratedMode> {
        let dt = params.delta_t.value;
        let n = (self.duration / dt).round() as usize;
        let time = TimeAxis::new(0.0, dt, n)?;

        let f0 = params.f_lower.value * 1.5;
        let f1 = params.f_lower.value * 7.5;
        let rate = (f1 - f0) / self.duration;
        let t_peak = 0.8 * self.duration;
        let m_scale = mode.m() as f64 / 2.0;

        let strain = (0..n)
            .map(|i| {
                let t = i as f64 * dt - self.delay;
                let phi = 2.0 * PI * m_scale * (f0 * t + 0.5 * rate * t * t);
                let envelope = 1e-21 * (-((t - t_peak) / 0.1).powi(2)).exp();
                Complex64::from_polar(envelope, -phi)
            })
            .collect();
        Ok(GeneratedMode { time, strain })
    }
}

fn chirp_waveform(delta_t: f64, f_lower: f64) -> Waveform {
    let params = SourceParams::new(30.0, 25.0, 400.0, s(delta_t), hz(f_lower));
    Waveform::from_model(&ChirpBackend::new(), "TestChirp", &[Mode::dominant()], &params)
        .unwrap()
}

#[test]
fn self_match_is_unity() {
    let wf = chirp_waveform(1.0 / 4096.0, 20.0);
    let outcome = match_waveforms(&wf, &wf, &FlatPsd, &MatchOptions::default()).unwrap();
    assert!((outcome.value - 1.0).abs() < 1e-9);
    assert!(outcome.time_shift.abs() < 1e-12);
}

#[test]
fn self_match_is_unity_under_detector_noise_weighting() {
    let wf = chirp_waveform(1.0 / 4096.0, 20.0);
    let outcome =
        match_waveforms(&wf, &wf, &AligoZeroDetHighPower, &MatchOptions::default()).unwrap();
    assert!((outcome.value - 1.0).abs() < 1e-9);
}

#[test]
fn match_across_sampling_rates_resamples_to_coarser_step() {
    let fine = chirp_waveform(1.0 / 4096.0, 20.0);
    let coarse = chirp_waveform(1.0 / 2048.0, 20.0);
    let outcome = match_waveforms(&fine, &coarse, &FlatPsd, &MatchOptions::default()).unwrap();
    assert!((outcome.delta_t - 1.0 / 2048.0).abs() < 1e-12);
    // Same continuous signal, different samplings
    assert!(outcome.value > 0.99);
}

#[test]
fn time_shift_is_recovered() {
    let dt = 1.0 / 4096.0;
    let delay = 50.0 * dt;
    let params = SourceParams::new(30.0, 25.0, 400.0, s(dt), hz(20.0));
    let a = Waveform::from_model(
        &ChirpBackend::new(),
        "TestChirp",
        &[Mode::dominant()],
        &params,
    )
    .unwrap();
    let b = Waveform::from_model(
        &ChirpBackend::delayed(delay),
        "TestChirp",
        &[Mode::dominant()],
        &params,
    )
    .unwrap();

    let outcome = match_waveforms(&a, &b, &FlatPsd, &MatchOptions::default()).unwrap();
    assert!(outcome.value > 0.98);
    assert!((outcome.time_shift.abs() - delay).abs() < 2.0 * dt);
}

#[test]
fn different_signals_have_reduced_match() {
    let a = chirp_waveform(1.0 / 4096.0, 20.0);
    let b = chirp_waveform(1.0 / 4096.0, 30.0); // different sweep
    let opts = MatchOptions {
        f_lower: Some(hz(20.0)),
        ..Default::default()
    };
    let outcome = match_waveforms(&a, &b, &FlatPsd, &opts).unwrap();
    assert!(outcome.value < 0.99);
    assert!(outcome.value > 0.0);
}

#[test]
fn spectrum_peaks_inside_the_sweep_band() {
    let wf = chirp_waveform(1.0 / 4096.0, 20.0);
    let spec = frequency_series(&wf).unwrap();
    let (_, f_peak) = spec.peak();
    // The backend sweeps from 30 Hz to 150 Hz
    assert!(f_peak > 30.0 && f_peak < 150.0);
    assert!(spec.delta_f() > 0.0);
    assert_eq!(spec.frequency(spec.len() - 1), 0.5 * 4096.0);
}

#[test]
fn inverted_cutoffs_are_rejected() {
    let wf = chirp_waveform(1.0 / 4096.0, 20.0);
    let opts = MatchOptions {
        f_lower: Some(hz(500.0)),
        f_upper: Some(hz(100.0)),
    };
    assert!(match_waveforms(&wf, &wf, &FlatPsd, &opts).is_err());
}
