//! gw-waveform: unified object model for gravitational waveforms.
//!
//! Waveform data from numerical-relativity archives and semi-analytic models
//! is carried by two value types over one common storage layer:
//!
//! - [`DimensionlessWaveform`] — simulation output in geometric units
//!   (time in M, strain as r h / M), loaded through the
//!   [`SimulationArchive`] trait.
//! - [`Waveform`] — physical units, produced either by a
//!   [`ModeGenerator`] backend or by rescaling a dimensionless waveform.
//!
//! The unit system is a tagged [`Scale`] in [`Metadata`]; conversion between
//! the two representations is a pure function returning a new value.

pub mod archive;
pub mod axis;
pub mod dimensionless;
pub mod error;
pub mod harmonics;
pub mod metadata;
pub mod model;
pub mod physical;
pub mod series;
pub mod window;

pub use archive::{RawSimulation, SimulationArchive, SimulationParams};
pub use axis::TimeAxis;
pub use dimensionless::DimensionlessWaveform;
pub use error::{WaveformError, WfResult};
pub use metadata::{Metadata, PhysicalParams, Scale, Source};
pub use model::{GeneratedMode, ModeGenerator, SourceParams};
pub use physical::Waveform;
pub use series::ModeSeries;
