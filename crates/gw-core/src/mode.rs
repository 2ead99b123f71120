use crate::error::{GwError, GwResult};
use core::fmt;

/// Spherical-harmonic decomposition index (l, m) of gravitational radiation.
///
/// - `l >= 2` (no monopole/dipole radiation)
/// - `|m| <= l`
///
/// Stored modes usually have `m > 0`; the negative-m counterpart follows from
/// the parity relation `h_{l,-m} = (-1)^l conj(h_{l,m})` for non-precessing
/// systems.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mode {
    l: u32,
    m: i32,
}

impl Mode {
    /// Create a validated mode index.
    pub fn new(l: u32, m: i32) -> GwResult<Self> {
        if l < 2 {
            return Err(GwError::InvalidArg {
                what: "mode degree l must be >= 2",
            });
        }
        if m.unsigned_abs() > l {
            return Err(GwError::InvalidArg {
                what: "mode order |m| must be <= l",
            });
        }
        Ok(Self { l, m })
    }

    /// The dominant (2, 2) quadrupole mode.
    pub const fn dominant() -> Self {
        Self { l: 2, m: 2 }
    }

    pub const fn l(self) -> u32 {
        self.l
    }

    pub const fn m(self) -> i32 {
        self.m
    }

    /// The mode with the sign of m flipped.
    pub const fn conjugate(self) -> Self {
        Self {
            l: self.l,
            m: -self.m,
        }
    }

    /// Parity sign (-1)^l relating h_{l,-m} to conj(h_{l,m}).
    pub const fn parity_sign(self) -> f64 {
        if self.l % 2 == 0 { 1.0 } else { -1.0 }
    }
}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode({}, {})", self.l, self.m)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.l, self.m)
    }
}
