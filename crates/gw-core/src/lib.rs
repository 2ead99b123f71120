//! gw-core: stable foundation for gravwave.
//!
//! Contains:
//! - units (uom SI types + geometric-unit conversion helpers)
//! - numeric (Real + tolerances + phase/gradient helpers)
//! - mode (spherical-harmonic (l, m) index type)
//! - error (shared error types)

pub mod error;
pub mod mode;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GwError, GwResult};
pub use mode::Mode;
pub use numeric::*;
pub use units::*;
