//! Simulation-archive backend seam.
//!
//! Catalog access (network fetch, HDF5 parsing, extrapolation order) lives
//! behind the [`SimulationArchive`] trait. Implementations hand back raw
//! geometric-unit data on a uniform grid; the loader in
//! [`crate::dimensionless`] validates and normalizes it.

use crate::axis::TimeAxis;
use crate::error::WfResult;
use gw_core::Mode;
use num_complex::Complex64;
use std::collections::BTreeMap;

/// Intrinsic parameters reported by a simulation archive.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    /// Initial mass ratio (any orientation; normalized by the loader).
    pub mass_ratio: f64,
    /// Reference dimensionless spin of the primary.
    pub spin1: [f64; 3],
    /// Reference dimensionless spin of the secondary.
    pub spin2: [f64; 3],
    /// Reference eccentricity.
    pub eccentricity: f64,
}

/// Raw uniform-grid simulation data handed over by an archive backend.
///
/// Contract: the time axis is geometric (units of M) and uniform at the
/// finest step of the source data, and every requested mode series has the
/// same length as the axis.
#[derive(Clone, Debug)]
pub struct RawSimulation {
    pub params: SimulationParams,
    pub time: TimeAxis,
    pub modes: BTreeMap<Mode, Vec<Complex64>>,
}

/// Trait for numerical-relativity simulation archives.
pub trait SimulationArchive {
    /// Archive name (for provenance and logging).
    fn name(&self) -> &str;

    /// Load the requested modes of a simulation by catalog id.
    ///
    /// Implementations should report a missing simulation as
    /// [`crate::WaveformError::Archive`] and leave missing-mode reporting to
    /// the loader (return only the modes that exist).
    fn load(&self, sim_id: &str, modes: &[Mode]) -> WfResult<RawSimulation>;
}
