//! Physical-unit waveforms and the model-generation factory.

use crate::axis::TimeAxis;
use crate::dimensionless::DimensionlessWaveform;
use crate::error::{WaveformError, WfResult};
use crate::metadata::{Metadata, PhysicalParams, Scale, Source};
use crate::model::{ModeGenerator, SourceParams};
use crate::series::ModeSeries;
use gw_core::units::{Frequency, si_strain_to_geometric, si_time_to_geometric};
use gw_core::{Mode, Tolerances, nearly_equal};
use num_complex::Complex64;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

/// A multi-mode time-domain gravitational waveform in physical units.
#[derive(Clone, Debug)]
pub struct Waveform {
    series: ModeSeries,
    metadata: Metadata,
}

impl Waveform {
    /// Assemble a physical waveform, checking series/metadata agreement.
    pub fn new(series: ModeSeries, metadata: Metadata) -> WfResult<Self> {
        if !metadata.is_physical() {
            return Err(WaveformError::ScaleMismatch {
                what: "physical waveform requires physical metadata",
            });
        }
        if metadata.modes() != series.modes() {
            return Err(WaveformError::Inconsistent {
                what: "metadata mode list differs from stored modes",
            });
        }
        if !nearly_equal(
            metadata.delta_t_value(),
            series.time().delta_t(),
            Tolerances::default(),
        ) {
            return Err(WaveformError::Inconsistent {
                what: "metadata delta_t differs from time axis",
            });
        }
        Ok(Self { series, metadata })
    }

    /// Generate a waveform from an external model backend.
    ///
    /// Every requested mode is generated separately; the backend must honor
    /// the requested delta_t, and all modes must agree on the time axis. An
    /// empty generator result is an explicit error rather than a silent
    /// zero-length waveform.
    pub fn from_model(
        generator: &dyn ModeGenerator,
        approximant: &str,
        modes: &[Mode],
        params: &SourceParams,
    ) -> WfResult<Self> {
        params.validate()?;
        if !generator.supports(approximant) {
            return Err(WaveformError::Generator {
                message: format!(
                    "{} does not support approximant {approximant}",
                    generator.name()
                ),
            });
        }

        let mut requested: Vec<Mode> = modes.to_vec();
        requested.sort();
        requested.dedup();
        if requested.is_empty() {
            return Err(WaveformError::InvalidArg {
                what: "at least one mode must be requested",
            });
        }
        if requested.iter().any(|mode| mode.m() <= 0) {
            return Err(WaveformError::InvalidArg {
                what: "requested modes must have m > 0",
            });
        }

        let mut axis: Option<TimeAxis> = None;
        let mut generated = BTreeMap::new();
        for &mode in &requested {
            let out = generator.generate_mode(approximant, mode, params)?;
            if out.strain.is_empty() {
                return Err(WaveformError::EmptyModeOutput { mode });
            }
            if out.strain.len() != out.time.len() {
                return Err(WaveformError::Inconsistent {
                    what: "generated strain length differs from its time axis",
                });
            }
            if !nearly_equal(
                out.time.delta_t(),
                params.delta_t.value,
                Tolerances::default(),
            ) {
                return Err(WaveformError::Inconsistent {
                    what: "generator did not honor the requested delta_t",
                });
            }
            match &axis {
                None => axis = Some(out.time),
                Some(first) => {
                    if out.time != *first {
                        return Err(WaveformError::Inconsistent {
                            what: "generated modes disagree on the time axis",
                        });
                    }
                }
            }
            generated.insert(mode, out.strain);
        }
        let axis = axis.expect("at least one mode was generated");

        let mut series = ModeSeries::new(axis, generated)?;
        series.align_to_peak()?;

        let metadata = Metadata::new(
            Source::Model {
                approximant: approximant.to_string(),
            },
            params.mass_ratio(),
            params.spin1,
            params.spin2,
            params.eccentricity,
            requested.clone(),
            Scale::Physical(PhysicalParams {
                delta_t: params.delta_t,
                total_mass: params.total_mass(),
                distance: params.distance,
                f_lower: params.f_lower,
                f_ref: params.f_ref,
                inclination: params.inclination,
                coa_phase: params.coa_phase,
            }),
        )?
        .marked_aligned();

        debug!(
            generator = generator.name(),
            approximant,
            modes = requested.len(),
            samples = series.time().len(),
            "generated waveform"
        );
        Self::new(series, metadata)
    }

    pub fn series(&self) -> &ModeSeries {
        &self.series
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn time(&self) -> &TimeAxis {
        self.series.time()
    }

    /// Sampling step in seconds.
    pub fn delta_t(&self) -> f64 {
        self.series.time().delta_t()
    }

    /// Lower frequency bound recorded at construction.
    pub fn f_lower(&self) -> Frequency {
        self.metadata
            .physical()
            .expect("physical waveform carries physical metadata")
            .f_lower
    }

    pub fn strain(&self, mode: Mode) -> WfResult<Cow<'_, [Complex64]>> {
        self.series.strain(mode)
    }

    pub fn amp(&self, mode: Mode) -> WfResult<Vec<f64>> {
        self.series.amp(mode)
    }

    pub fn phase(&self, mode: Mode) -> WfResult<Vec<f64>> {
        self.series.phase(mode)
    }

    pub fn omega(&self, mode: Mode) -> WfResult<Vec<f64>> {
        self.series.omega(mode)
    }

    /// Observer-frame polarizations (h₊, hₓ) from the recombined modes at
    /// the metadata's inclination and coalescence phase.
    pub fn polarizations(&self) -> WfResult<(Vec<f64>, Vec<f64>)> {
        let params = self.metadata.physical()?;
        let combined = self
            .series
            .recombine(params.inclination, params.coa_phase)?;
        let hp = combined.iter().map(|h| h.re).collect();
        let hc = combined.iter().map(|h| -h.im).collect();
        Ok((hp, hc))
    }

    /// Inverse of [`DimensionlessWaveform::to_waveform`]: rescale back to
    /// geometric units. No windowing is undone; only units change.
    pub fn to_dimensionless(&self) -> WfResult<DimensionlessWaveform> {
        let params = *self.metadata.physical()?;
        let geometric_axis = self
            .series
            .time()
            .scaled(si_time_to_geometric(1.0, params.total_mass))?;
        let rescaled = self
            .series
            .with_time(geometric_axis)?
            .map_strain(|_, strain| {
                strain
                    .iter()
                    .map(|h| h * si_strain_to_geometric(1.0, params.total_mass, params.distance))
                    .collect()
            })?;

        let metadata = self.metadata.to_geometric()?;
        DimensionlessWaveform::new(rescaled, metadata)
    }

    /// Rebuild selected modes from an externally supplied (time, phase,
    /// amplitude) correction, tagging the result with a new eccentricity.
    ///
    /// The correction runs once per requested mode and must return series on
    /// a shared uniform axis.
    pub fn apply_eccentricity<F>(
        &self,
        correction: F,
        eccentricity: f64,
        modes: &[Mode],
    ) -> WfResult<Self>
    where
        F: Fn(&Self, Mode) -> WfResult<(TimeAxis, Vec<f64>, Vec<f64>)>,
    {
        let mut requested: Vec<Mode> = modes.to_vec();
        requested.sort();
        requested.dedup();

        let mut axis: Option<TimeAxis> = None;
        let mut rebuilt = BTreeMap::new();
        for &mode in &requested {
            let (time, phase, amp) = correction(self, mode)?;
            if phase.len() != time.len() || amp.len() != time.len() {
                return Err(WaveformError::Inconsistent {
                    what: "eccentricity correction returned mismatched lengths",
                });
            }
            match &axis {
                None => axis = Some(time),
                Some(first) if *first != time => {
                    return Err(WaveformError::Inconsistent {
                        what: "eccentricity-corrected modes disagree on the time axis",
                    });
                }
                _ => {}
            }
            let strain: Vec<Complex64> = amp
                .iter()
                .zip(&phase)
                .map(|(&a, &p)| Complex64::from_polar(a, p))
                .collect();
            rebuilt.insert(mode, strain);
        }
        let axis = axis.ok_or(WaveformError::InvalidArg {
            what: "at least one mode must be requested",
        })?;

        let series = ModeSeries::new(axis, rebuilt)?;
        let metadata = self
            .metadata
            .with_modes(requested)?
            .with_eccentricity(eccentricity)?;
        Self::new(series, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GeneratedMode;
    use gw_core::units::{hz, s};
    use std::f64::consts::PI;

    /// Deterministic chirp backend used in place of a real model library.
    pub(crate) struct ChirpGenerator;

    impl ModeGenerator for ChirpGenerator {
        fn name(&self) -> &str {
            "chirp-test"
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
            let n = 4096;
            let time = TimeAxis::new(0.0, dt, n)?;
            let f0 = params.f_lower.value * 1.5;
            let f1 = f0 * 5.0;
            let rate = (f1 - f0) / ((n - 1) as f64 * dt);
            let t_peak = 0.8 * (n - 1) as f64 * dt;
            let m_scale = mode.m() as f64 / 2.0;
            let strain = (0..n)
                .map(|i| {
                    let t = i as f64 * dt;
                    let phi = 2.0 * PI * m_scale * (f0 * t + 0.5 * rate * t * t);
                    let envelope = 1e-21 * (-((t - t_peak) / (0.2 * t_peak)).powi(2)).exp();
                    Complex64::from_polar(envelope, -phi)
                })
                .collect();
            Ok(GeneratedMode { time, strain })
        }
    }

    /// Backend that returns nothing, exercising the empty-output path.
    struct EmptyGenerator;

    impl ModeGenerator for EmptyGenerator {
        fn name(&self) -> &str {
            "empty-test"
        }

        fn supports(&self, _approximant: &str) -> bool {
            true
        }

        fn generate_mode(
            &self,
            _approximant: &str,
            _mode: Mode,
            params: &SourceParams,
        ) -> WfResult<GeneratedMode> {
            Ok(GeneratedMode {
                time: TimeAxis::new(0.0, params.delta_t.value, 8)?,
                strain: Vec::new(),
            })
        }
    }

    pub(crate) fn test_params() -> SourceParams {
        SourceParams::new(30.0, 25.0, 400.0, s(1.0 / 4096.0), hz(20.0))
    }

    #[test]
    fn from_model_builds_aligned_waveform() {
        let wf = Waveform::from_model(
            &ChirpGenerator,
            "TestChirp",
            &[Mode::dominant()],
            &test_params(),
        )
        .unwrap();

        assert!(wf.metadata().is_physical());
        assert!(wf.metadata().aligned_to_peak());
        assert!((wf.metadata().q() - 1.2).abs() < 1e-12);

        let peak = wf.series().peak_index(Mode::dominant()).unwrap();
        assert!(wf.time().sample(peak).abs() < 1e-12);
    }

    #[test]
    fn unsupported_approximant_is_an_error() {
        let err = Waveform::from_model(
            &ChirpGenerator,
            "SomethingElse",
            &[Mode::dominant()],
            &test_params(),
        )
        .unwrap_err();
        assert!(matches!(err, WaveformError::Generator { .. }));
    }

    #[test]
    fn empty_generator_output_is_an_error() {
        let err = Waveform::from_model(
            &EmptyGenerator,
            "TestChirp",
            &[Mode::dominant()],
            &test_params(),
        )
        .unwrap_err();
        assert!(matches!(err, WaveformError::EmptyModeOutput { .. }));
    }

    #[test]
    fn polarizations_face_on() {
        let wf = Waveform::from_model(
            &ChirpGenerator,
            "TestChirp",
            &[Mode::dominant()],
            &test_params(),
        )
        .unwrap();
        let (hp, hc) = wf.polarizations().unwrap();
        assert_eq!(hp.len(), wf.time().len());
        assert_eq!(hc.len(), wf.time().len());
        // Face-on single (2,2) mode: hp and hc are quadrature components of
        // comparable magnitude
        let max_hp = hp.iter().cloned().fold(0.0_f64, |a, b| a.max(b.abs()));
        let max_hc = hc.iter().cloned().fold(0.0_f64, |a, b| a.max(b.abs()));
        assert!(max_hp > 0.0 && max_hc > 0.0);
        assert!((max_hp / max_hc - 1.0).abs() < 0.2);
    }

    #[test]
    fn round_trip_preserves_mode_keys() {
        let wf = Waveform::from_model(
            &ChirpGenerator,
            "TestChirp",
            &[Mode::dominant(), Mode::new(3, 3).unwrap()],
            &test_params(),
        )
        .unwrap();
        let dwf = wf.to_dimensionless().unwrap();
        assert!(dwf.metadata().is_geometric());
        assert_eq!(dwf.series().modes(), wf.series().modes());

        // Strain rescaling is exactly invertible
        let back = dwf
            .to_waveform(
                wf.f_lower(),
                wf.metadata().physical().unwrap().total_mass,
                wf.metadata().physical().unwrap().distance,
                0.0,
                0.0,
            )
            .unwrap();
        assert_eq!(back.series().modes(), wf.series().modes());
    }

    #[test]
    fn eccentricity_correction_rebuilds_modes() {
        let wf = Waveform::from_model(
            &ChirpGenerator,
            "TestChirp",
            &[Mode::dominant()],
            &test_params(),
        )
        .unwrap();

        let corrected = wf
            .apply_eccentricity(
                |wf, mode| {
                    let amp = wf.amp(mode)?;
                    let phase = wf.phase(mode)?;
                    Ok((wf.time().clone(), phase, amp))
                },
                0.1,
                &[Mode::dominant()],
            )
            .unwrap();

        assert!((corrected.metadata().eccentricity() - 0.1).abs() < 1e-12);
        assert_eq!(corrected.time().len(), wf.time().len());
    }
}
