//! Waveform errors.

use gw_core::{GwError, Mode};
use thiserror::Error;

/// Result type for waveform operations.
pub type WfResult<T> = Result<T, WaveformError>;

/// Errors that can occur while building or transforming waveforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveformError {
    /// Requested mode is not stored in the waveform.
    #[error("Mode {mode} not found in this waveform")]
    ModeNotFound { mode: Mode },

    /// Requested mode is not available in the simulation archive.
    #[error("Mode {mode} not available in simulation {sim_id}")]
    ModeNotInSimulation { mode: Mode, sim_id: String },

    /// Non-physical parameter values (negative mass, distance, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A mode generator returned an empty series.
    #[error("Generator returned no samples for mode {mode}")]
    EmptyModeOutput { mode: Mode },

    /// No part of the waveform survives the low-frequency cut.
    #[error("No samples remain above the frequency cutoff")]
    EmptyFrequencyWindow,

    /// Operation applied to the wrong unit system.
    #[error("Scale mismatch: {what}")]
    ScaleMismatch { what: &'static str },

    /// Mode series disagree on time axis or length.
    #[error("Inconsistent mode series: {what}")]
    Inconsistent { what: &'static str },

    /// Archive backend error.
    #[error("Archive error: {message}")]
    Archive { message: String },

    /// Generator backend error.
    #[error("Generator error: {message}")]
    Generator { message: String },
}

impl From<WaveformError> for GwError {
    fn from(err: WaveformError) -> Self {
        GwError::Waveform {
            message: err.to_string(),
        }
    }
}
