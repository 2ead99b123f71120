//! Spin-weighted spherical harmonics.

use gw_core::Mode;
use num_complex::Complex64;
use std::f64::consts::PI;

/// Spin weight of gravitational radiation.
const SPIN_WEIGHT: i64 = -2;

fn factorial(n: i64) -> f64 {
    (1..=n).map(|k| k as f64).product()
}

fn binomial(n: i64, k: i64) -> f64 {
    if k < 0 || k > n {
        return 0.0;
    }
    factorial(n) / (factorial(k) * factorial(n - k))
}

/// Evaluate the spin-weight -2 spherical harmonic ₋₂Y_lm(ι, φ).
///
/// Closed-form alternating sum over the Wigner-d expansion; exact for
/// integer (l, m).
pub fn spin_weighted_harmonic(mode: Mode, inclination: f64, coa_phase: f64) -> Complex64 {
    let l = mode.l() as i64;
    let m = mode.m() as i64;
    let s = SPIN_WEIGHT;

    let sign = if (l + m) % 2 == 0 { 1.0 } else { -1.0 };
    let prefactor = sign
        * (factorial(l + m) * factorial(l - m) * (2 * l + 1) as f64
            / (4.0 * PI * factorial(l + s) * factorial(l - s)))
        .sqrt();

    let half = inclination / 2.0;
    let (sin_half, cos_half) = (half.sin(), half.cos());

    let r_min = (m - s).max(0);
    let r_max = (l - s).min(l + m);
    let mut alternating_sum = 0.0;
    for r in r_min..=r_max {
        let term_sign = if r % 2 == 0 { 1.0 } else { -1.0 };
        alternating_sum += term_sign
            * binomial(l - s, r)
            * binomial(l + s, r + s - m)
            * sin_half.powi((2 * l - 2 * r - s + m) as i32)
            * cos_half.powi((2 * r + s - m) as i32);
    }

    prefactor * alternating_sum * Complex64::from_polar(1.0, m as f64 * coa_phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn y(l: u32, m: i32, iota: f64, phi: f64) -> Complex64 {
        spin_weighted_harmonic(Mode::new(l, m).unwrap(), iota, phi)
    }

    #[test]
    fn face_on_dominant_mode() {
        // ₋₂Y₂₂(0, 0) = sqrt(5/(64π)) (1 + cos ι)² = sqrt(5/(4π))
        let expected = (5.0 / (4.0 * PI)).sqrt();
        let val = y(2, 2, 0.0, 0.0);
        assert!((val.re - expected).abs() < 1e-12);
        assert!(val.im.abs() < 1e-12);
    }

    #[test]
    fn face_on_conjugate_mode_vanishes() {
        // ₋₂Y₂,₋₂ ∝ (1 - cos ι)², zero face-on
        let val = y(2, -2, 0.0, 0.0);
        assert!(val.norm() < 1e-12);
    }

    #[test]
    fn edge_on_dominant_mode() {
        // ₋₂Y₂₂(π/2, 0) = sqrt(5/(64π))
        let expected = (5.0 / (64.0 * PI)).sqrt();
        let val = y(2, 2, PI / 2.0, 0.0);
        assert!((val.re - expected).abs() < 1e-12);
    }

    #[test]
    fn coalescence_phase_rotates_by_m() {
        let base = y(2, 2, 0.3, 0.0);
        let rotated = y(2, 2, 0.3, 0.25);
        let expected = base * Complex64::from_polar(1.0, 2.0 * 0.25);
        assert!((rotated - expected).norm() < 1e-12);
    }

    #[test]
    fn higher_mode_finite() {
        let val = y(3, 3, 1.0, 0.5);
        assert!(val.norm().is_finite());
        assert!(val.norm() > 0.0);
    }
}
