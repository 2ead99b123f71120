//! gw-match: standardized waveform comparison.
//!
//! Resamples two physical waveforms to a common step, aligns them in time,
//! and computes the noise-weighted normalized overlap (match), maximized
//! over relative time shift and coalescence phase.

pub mod error;
pub mod overlap;
pub mod psd;
pub mod resample;
pub mod spectrum;

pub use error::{MatchError, MatchResult};
pub use overlap::{MatchOptions, MatchOutcome, match_waveforms};
pub use psd::{AligoZeroDetHighPower, FlatPsd, Psd};
pub use resample::{are_compatible_dt, resample_uniform};
pub use spectrum::{FrequencySeries, frequency_series};
