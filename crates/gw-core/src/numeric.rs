use crate::GwError;
use std::f64::consts::PI;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GwError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GwError::NonFinite { what, value: v })
    }
}

/// Unwrap a sampled phase in-place so that consecutive samples never jump
/// by more than pi.
pub fn unwrap_phase(phase: &mut [Real]) {
    let tau = 2.0 * PI;
    let mut offset = 0.0;
    for i in 1..phase.len() {
        let raw = phase[i] + offset;
        let mut diff = raw - phase[i - 1];
        while diff > PI {
            diff -= tau;
            offset -= tau;
        }
        while diff < -PI {
            diff += tau;
            offset += tau;
        }
        phase[i] = phase[i - 1] + diff;
    }
}

/// Numerical derivative of uniformly sampled data.
///
/// Central differences in the interior, one-sided at the ends.
pub fn gradient_uniform(y: &[Real], dx: Real) -> Vec<Real> {
    let n = y.len();
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let mut out = Vec::with_capacity(n);
            out.push((y[1] - y[0]) / dx);
            for i in 1..n - 1 {
                out.push((y[i + 1] - y[i - 1]) / (2.0 * dx));
            }
            out.push((y[n - 1] - y[n - 2]) / dx);
            out
        }
    }
}
