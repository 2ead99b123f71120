//! Mode-generator backend seam.
//!
//! Waveform-model libraries are black boxes behind the [`ModeGenerator`]
//! trait: they receive validated physical parameters and a mode index and
//! hand back one complex time series per call.

use crate::axis::TimeAxis;
use crate::error::{WaveformError, WfResult};
use gw_core::units::{Frequency, Megaparsec, SolarMass, Time};
use gw_core::Mode;
use num_complex::Complex64;

/// Physical source parameters for model generation.
///
/// Replaces stringly-keyed parameter dictionaries: a missing required
/// parameter is a compile error, and value validation happens in one place.
#[derive(Clone, Copy, Debug)]
pub struct SourceParams {
    /// Primary mass [solar masses].
    pub mass1: SolarMass,
    /// Secondary mass [solar masses].
    pub mass2: SolarMass,
    /// Dimensionless spin vector of the primary.
    pub spin1: [f64; 3],
    /// Dimensionless spin vector of the secondary.
    pub spin2: [f64; 3],
    /// Luminosity distance [Mpc].
    pub distance: Megaparsec,
    /// Inclination angle [rad].
    pub inclination: f64,
    /// Coalescence phase [rad].
    pub coa_phase: f64,
    /// Orbital eccentricity.
    pub eccentricity: f64,
    /// Sampling step.
    pub delta_t: Time,
    /// Lower frequency cutoff.
    pub f_lower: Frequency,
    /// Reference frequency; defaults to f_lower when absent.
    pub f_ref: Option<Frequency>,
}

impl SourceParams {
    /// Parameters with the required quantities set and everything else at
    /// its conventional default (zero spins, face-on, circular).
    pub fn new(
        mass1: SolarMass,
        mass2: SolarMass,
        distance: Megaparsec,
        delta_t: Time,
        f_lower: Frequency,
    ) -> Self {
        Self {
            mass1,
            mass2,
            spin1: [0.0; 3],
            spin2: [0.0; 3],
            distance,
            inclination: 0.0,
            coa_phase: 0.0,
            eccentricity: 0.0,
            delta_t,
            f_lower,
            f_ref: None,
        }
    }

    /// Validate all parameters for physical plausibility.
    pub fn validate(&self) -> WfResult<()> {
        for (mass, what) in [
            (self.mass1, "mass1 must be positive and finite"),
            (self.mass2, "mass2 must be positive and finite"),
        ] {
            if !mass.is_finite() || mass <= 0.0 {
                return Err(WaveformError::NonPhysical { what });
            }
        }
        if !self.distance.is_finite() || self.distance <= 0.0 {
            return Err(WaveformError::NonPhysical {
                what: "distance must be positive and finite",
            });
        }
        if !self.delta_t.value.is_finite() || self.delta_t.value <= 0.0 {
            return Err(WaveformError::NonPhysical {
                what: "delta_t must be positive and finite",
            });
        }
        if !self.f_lower.value.is_finite() || self.f_lower.value <= 0.0 {
            return Err(WaveformError::NonPhysical {
                what: "f_lower must be positive and finite",
            });
        }
        for spin in [&self.spin1, &self.spin2] {
            let mag2: f64 = spin.iter().map(|c| c * c).sum();
            if !mag2.is_finite() || mag2 > 1.0 + 1e-12 {
                return Err(WaveformError::NonPhysical {
                    what: "dimensionless spin magnitude must be <= 1",
                });
            }
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(WaveformError::NonPhysical {
                what: "eccentricity must lie in [0, 1)",
            });
        }
        Ok(())
    }

    pub fn total_mass(&self) -> SolarMass {
        self.mass1 + self.mass2
    }

    /// Mass ratio normalized to q >= 1.
    pub fn mass_ratio(&self) -> f64 {
        let q = self.mass1 / self.mass2;
        if q < 1.0 { 1.0 / q } else { q }
    }
}

/// One generated mode from a backend model.
#[derive(Clone, Debug)]
pub struct GeneratedMode {
    /// Time axis in seconds; the epoch convention is the backend's.
    pub time: TimeAxis,
    /// Complex strain h_lm, same length as the axis.
    pub strain: Vec<Complex64>,
}

/// Trait for external waveform-model generators.
pub trait ModeGenerator {
    /// Backend name (for provenance and logging).
    fn name(&self) -> &str;

    /// Whether the backend recognizes the given approximant.
    fn supports(&self, approximant: &str) -> bool;

    /// Generate a single (l, m) mode in physical units.
    fn generate_mode(
        &self,
        approximant: &str,
        mode: Mode,
        params: &SourceParams,
    ) -> WfResult<GeneratedMode>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_core::units::{hz, s};

    fn base_params() -> SourceParams {
        SourceParams::new(30.0, 25.0, 400.0, s(1.0 / 4096.0), hz(20.0))
    }

    #[test]
    fn defaults_validate() {
        base_params().validate().unwrap();
    }

    #[test]
    fn mass_ratio_normalized() {
        let mut params = base_params();
        assert!((params.mass_ratio() - 1.2).abs() < 1e-12);
        params.mass1 = 25.0;
        params.mass2 = 30.0;
        assert!((params.mass_ratio() - 1.2).abs() < 1e-12);
        assert!((params.total_mass() - 55.0).abs() < 1e-12);
    }

    #[test]
    fn reject_zero_mass() {
        let mut params = base_params();
        params.mass2 = 0.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn reject_negative_delta_t() {
        let mut params = base_params();
        params.delta_t = s(-1.0);
        assert!(params.validate().is_err());
    }
}
