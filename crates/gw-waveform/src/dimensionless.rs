//! Dimensionless waveforms from numerical-relativity archives.

use crate::archive::SimulationArchive;
use crate::axis::TimeAxis;
use crate::error::{WaveformError, WfResult};
use crate::metadata::{Metadata, Scale, Source};
use crate::physical::Waveform;
use crate::series::ModeSeries;
use crate::window::frequency_window;
use gw_core::units::{
    Frequency, Megaparsec, SolarMass, geometric_strain_to_si, geometric_time_to_si,
};
use gw_core::{Mode, Tolerances, nearly_equal, unwrap_phase};
use num_complex::Complex64;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

/// A gravitational waveform in geometric units (time in M, strain r h / M).
///
/// Produced by loading simulation data through a [`SimulationArchive`];
/// converted to physical units with the pure [`to_waveform`] function.
///
/// [`to_waveform`]: DimensionlessWaveform::to_waveform
#[derive(Clone, Debug)]
pub struct DimensionlessWaveform {
    series: ModeSeries,
    metadata: Metadata,
}

impl DimensionlessWaveform {
    /// Assemble a dimensionless waveform, checking series/metadata agreement.
    pub fn new(series: ModeSeries, metadata: Metadata) -> WfResult<Self> {
        if !metadata.is_geometric() {
            return Err(WaveformError::ScaleMismatch {
                what: "dimensionless waveform requires geometric metadata",
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

    /// Load requested modes of a simulation and peak-align the result.
    pub fn from_archive(
        archive: &dyn SimulationArchive,
        sim_id: &str,
        modes: &[Mode],
    ) -> WfResult<Self> {
        let mut requested: Vec<Mode> = modes.to_vec();
        requested.sort();
        requested.dedup();
        if requested.iter().any(|mode| mode.m() <= 0) {
            return Err(WaveformError::InvalidArg {
                what: "requested modes must have m > 0",
            });
        }

        let raw = archive.load(sim_id, &requested)?;

        let mut selected = BTreeMap::new();
        for &mode in &requested {
            let strain = raw.modes.get(&mode).ok_or_else(|| {
                WaveformError::ModeNotInSimulation {
                    mode,
                    sim_id: sim_id.to_string(),
                }
            })?;
            selected.insert(mode, strain.clone());
        }

        let mut series = ModeSeries::new(raw.time, selected)?;
        series.align_to_peak()?;

        let q = if raw.params.mass_ratio < 1.0 {
            1.0 / raw.params.mass_ratio
        } else {
            raw.params.mass_ratio
        };
        let metadata = Metadata::new(
            Source::Simulation {
                id: sim_id.to_string(),
            },
            q,
            raw.params.spin1,
            raw.params.spin2,
            raw.params.eccentricity,
            requested.clone(),
            Scale::Geometric {
                delta_t: series.time().delta_t(),
            },
        )?
        .marked_aligned();

        debug!(
            archive = archive.name(),
            sim_id,
            modes = requested.len(),
            samples = series.time().len(),
            "loaded dimensionless waveform"
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

    /// Convert to a physical [`Waveform`] — a pure function, the receiver is
    /// left untouched.
    ///
    /// Steps:
    /// 1. scale time by M·T_sun and strain by M·T_sun·c / D,
    /// 2. cut to the longest dominant-mode segment above `f_lower`,
    /// 3. re-zero each mode's phase at its amplitude peak and rebuild the
    ///    strain from the amplitude/phase decomposition.
    pub fn to_waveform(
        &self,
        f_lower: Frequency,
        total_mass: SolarMass,
        distance: Megaparsec,
        inclination: f64,
        coa_phase: f64,
    ) -> WfResult<Waveform> {
        let time_scale = geometric_time_to_si(1.0, total_mass);
        let amp_scale = geometric_strain_to_si(1.0, total_mass, distance);

        let si_axis = self.series.time().scaled(time_scale)?;
        let scaled = self
            .series
            .with_time(si_axis)?
            .map_strain(|_, strain| strain.iter().map(|h| h * amp_scale).collect())?;

        let dominant = scaled.strain(scaled.dominant_mode())?;
        let window = frequency_window(&dominant, scaled.time().delta_t(), f_lower.value)?;
        debug!(
            kept = window.len(),
            total = scaled.time().len(),
            f_lower_hz = f_lower.value,
            "applied frequency window"
        );
        let windowed = scaled.sliced(window)?;

        let rebuilt = windowed.map_strain(|_, strain| {
            let amps: Vec<f64> = strain.iter().map(|h| h.norm()).collect();
            let mut phases: Vec<f64> = strain.iter().map(|h| h.arg()).collect();
            unwrap_phase(&mut phases);

            let peak = amps
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |(bi, bv), (i, &v)| {
                    if v > bv { (i, v) } else { (bi, bv) }
                })
                .0;
            let offset = phases[peak];

            amps.iter()
                .zip(&phases)
                .map(|(&a, &p)| Complex64::from_polar(a, p - offset))
                .collect()
        })?;

        let metadata =
            self.metadata
                .to_physical(f_lower, total_mass, distance, inclination, coa_phase)?;
        Waveform::new(rebuilt, metadata)
    }
}
