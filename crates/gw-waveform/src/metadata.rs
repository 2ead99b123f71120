//! Waveform metadata with a tagged unit-system scale.

use crate::error::{WaveformError, WfResult};
use gw_core::units::{Frequency, Megaparsec, SolarMass, Time, geometric_time_to_si, s};
use gw_core::Mode;

/// Provenance of a waveform.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Source {
    /// Numerical-relativity simulation, identified by catalog id.
    Simulation { id: String },
    /// Semi-analytic model, identified by approximant name.
    Model { approximant: String },
}

/// Physical-scale parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalParams {
    /// Sampling step.
    pub delta_t: Time,
    /// Total mass [solar masses].
    pub total_mass: SolarMass,
    /// Luminosity distance [Mpc].
    pub distance: Megaparsec,
    /// Lower frequency bound of the signal.
    pub f_lower: Frequency,
    /// Reference frequency at which parameters are defined.
    pub f_ref: Option<Frequency>,
    /// Inclination angle [rad].
    pub inclination: f64,
    /// Coalescence phase [rad].
    pub coa_phase: f64,
}

/// Unit-system tag of a waveform.
///
/// Replaces the dimensionless/dimensional boolean + nullable-field pattern:
/// a geometric waveform structurally cannot carry a total mass or distance,
/// and a physical one cannot lack them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scale {
    /// Geometric units: time in M, strain as r h / M.
    Geometric {
        /// Sampling step in units of total mass M.
        delta_t: f64,
    },
    /// SI / astronomical units.
    Physical(PhysicalParams),
}

/// Unified container for waveform metadata or generation parameters.
///
/// Immutable once constructed: all fields are private and every derived
/// variant goes through a validating constructor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    source: Source,
    q: f64,
    spin1: [f64; 3],
    spin2: [f64; 3],
    eccentricity: f64,
    modes: Vec<Mode>,
    scale: Scale,
    aligned_to_peak: bool,
}

impl Metadata {
    /// Create metadata, validating every parameter.
    pub fn new(
        source: Source,
        q: f64,
        spin1: [f64; 3],
        spin2: [f64; 3],
        eccentricity: f64,
        modes: Vec<Mode>,
        scale: Scale,
    ) -> WfResult<Self> {
        if !q.is_finite() || q < 1.0 {
            return Err(WaveformError::NonPhysical {
                what: "mass ratio q must be finite and >= 1",
            });
        }
        for spin in [&spin1, &spin2] {
            let mag2: f64 = spin.iter().map(|c| c * c).sum();
            if !mag2.is_finite() || mag2 > 1.0 + 1e-12 {
                return Err(WaveformError::NonPhysical {
                    what: "dimensionless spin magnitude must be <= 1",
                });
            }
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(WaveformError::NonPhysical {
                what: "eccentricity must lie in [0, 1)",
            });
        }
        if modes.is_empty() {
            return Err(WaveformError::InvalidArg {
                what: "metadata must list at least one mode",
            });
        }
        for window in modes.windows(2) {
            if window[0] >= window[1] {
                return Err(WaveformError::InvalidArg {
                    what: "mode list must be sorted and free of duplicates",
                });
            }
        }
        if modes.iter().any(|mode| mode.m() <= 0) {
            return Err(WaveformError::InvalidArg {
                what: "metadata modes must have m > 0",
            });
        }
        Self::validate_scale(&scale)?;

        Ok(Self {
            source,
            q,
            spin1,
            spin2,
            eccentricity,
            modes,
            scale,
            aligned_to_peak: false,
        })
    }

    fn validate_scale(scale: &Scale) -> WfResult<()> {
        match scale {
            Scale::Geometric { delta_t } => {
                if !delta_t.is_finite() || *delta_t <= 0.0 {
                    return Err(WaveformError::NonPhysical {
                        what: "geometric delta_t must be positive and finite",
                    });
                }
            }
            Scale::Physical(p) => {
                if !p.delta_t.value.is_finite() || p.delta_t.value <= 0.0 {
                    return Err(WaveformError::NonPhysical {
                        what: "delta_t must be positive and finite",
                    });
                }
                if !p.total_mass.is_finite() || p.total_mass <= 0.0 {
                    return Err(WaveformError::NonPhysical {
                        what: "total mass must be positive and finite",
                    });
                }
                if !p.distance.is_finite() || p.distance <= 0.0 {
                    return Err(WaveformError::NonPhysical {
                        what: "distance must be positive and finite",
                    });
                }
                if !p.f_lower.value.is_finite() || p.f_lower.value <= 0.0 {
                    return Err(WaveformError::NonPhysical {
                        what: "f_lower must be positive and finite",
                    });
                }
                if !p.inclination.is_finite() || !p.coa_phase.is_finite() {
                    return Err(WaveformError::NonPhysical {
                        what: "orientation angles must be finite",
                    });
                }
            }
        }
        Ok(())
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Mass ratio, normalized to q >= 1.
    pub fn q(&self) -> f64 {
        self.q
    }

    pub fn spin1(&self) -> [f64; 3] {
        self.spin1
    }

    pub fn spin2(&self) -> [f64; 3] {
        self.spin2
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn is_geometric(&self) -> bool {
        matches!(self.scale, Scale::Geometric { .. })
    }

    pub fn is_physical(&self) -> bool {
        matches!(self.scale, Scale::Physical(_))
    }

    pub fn aligned_to_peak(&self) -> bool {
        self.aligned_to_peak
    }

    /// Sampling step in the metadata's own unit system (M or seconds).
    pub fn delta_t_value(&self) -> f64 {
        match &self.scale {
            Scale::Geometric { delta_t } => *delta_t,
            Scale::Physical(p) => p.delta_t.value,
        }
    }

    /// Physical parameters, or a scale-mismatch error for geometric metadata.
    pub fn physical(&self) -> WfResult<&PhysicalParams> {
        match &self.scale {
            Scale::Physical(p) => Ok(p),
            Scale::Geometric { .. } => Err(WaveformError::ScaleMismatch {
                what: "physical parameters requested from geometric metadata",
            }),
        }
    }

    /// Copy with the peak-alignment flag set.
    pub(crate) fn marked_aligned(mut self) -> Self {
        self.aligned_to_peak = true;
        self
    }

    /// Copy with a replaced mode list (validated).
    pub fn with_modes(&self, modes: Vec<Mode>) -> WfResult<Self> {
        let mut meta = Self::new(
            self.source.clone(),
            self.q,
            self.spin1,
            self.spin2,
            self.eccentricity,
            modes,
            self.scale.clone(),
        )?;
        meta.aligned_to_peak = self.aligned_to_peak;
        Ok(meta)
    }

    /// Copy with a replaced eccentricity (validated).
    pub fn with_eccentricity(&self, eccentricity: f64) -> WfResult<Self> {
        let mut meta = Self::new(
            self.source.clone(),
            self.q,
            self.spin1,
            self.spin2,
            eccentricity,
            self.modes.clone(),
            self.scale.clone(),
        )?;
        meta.aligned_to_peak = self.aligned_to_peak;
        Ok(meta)
    }

    /// Pure conversion of geometric metadata to physical metadata.
    ///
    /// Converts delta_t from M-units to SI seconds and attaches the scaling
    /// parameters; the receiver is left untouched.
    pub fn to_physical(
        &self,
        f_lower: Frequency,
        total_mass: SolarMass,
        distance: Megaparsec,
        inclination: f64,
        coa_phase: f64,
    ) -> WfResult<Self> {
        let Scale::Geometric { delta_t } = self.scale else {
            return Err(WaveformError::ScaleMismatch {
                what: "to_physical requires geometric metadata",
            });
        };
        let params = PhysicalParams {
            delta_t: s(geometric_time_to_si(delta_t, total_mass)),
            total_mass,
            distance,
            f_lower,
            f_ref: None,
            inclination,
            coa_phase,
        };
        let mut meta = Self::new(
            self.source.clone(),
            self.q,
            self.spin1,
            self.spin2,
            self.eccentricity,
            self.modes.clone(),
            Scale::Physical(params),
        )?;
        meta.aligned_to_peak = self.aligned_to_peak;
        Ok(meta)
    }

    /// Pure conversion of physical metadata back to geometric metadata.
    pub fn to_geometric(&self) -> WfResult<Self> {
        let params = *self.physical()?;
        let delta_t = gw_core::units::si_time_to_geometric(params.delta_t.value, params.total_mass);
        let mut meta = Self::new(
            self.source.clone(),
            self.q,
            self.spin1,
            self.spin2,
            self.eccentricity,
            self.modes.clone(),
            Scale::Geometric { delta_t },
        )?;
        meta.aligned_to_peak = self.aligned_to_peak;
        Ok(meta)
    }
}
