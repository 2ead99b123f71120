//! Match-engine errors.

use gw_core::GwError;
use gw_waveform::WaveformError;
use thiserror::Error;

/// Result type for match operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors that can occur while comparing waveforms.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Not enough samples to operate on.
    #[error("Insufficient data: needed {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The two inputs cannot be compared.
    #[error("Incompatible waveforms: {what}")]
    Incompatible { what: &'static str },

    /// The analysis band contains no usable spectral content.
    #[error("No spectral content in the analysis band")]
    EmptyBand,

    /// Error raised while preparing a waveform for comparison.
    #[error(transparent)]
    Waveform(#[from] WaveformError),
}

impl From<MatchError> for GwError {
    fn from(err: MatchError) -> Self {
        GwError::Match {
            message: err.to_string(),
        }
    }
}
