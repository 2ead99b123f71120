//! Analytic detector noise power spectral densities.

/// One-sided noise power spectral density S_n(f).
pub trait Psd {
    /// Model name (for logging).
    fn name(&self) -> &str;

    /// S_n at frequency `f_hz` [1/Hz]. Implementations return
    /// `f64::INFINITY` where the detector has no sensitivity, which zeroes
    /// the corresponding weight in the overlap integral.
    fn value(&self, f_hz: f64) -> f64;
}

/// Unit-weight PSD: reduces the match to a plain normalized inner product.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatPsd;

impl Psd for FlatPsd {
    fn name(&self) -> &str {
        "flat"
    }

    fn value(&self, _f_hz: f64) -> f64 {
        1.0
    }
}

/// Analytic fit to the Advanced LIGO zero-detuned high-power design curve.
///
/// S_n(f) = 10⁻⁴⁹ · (x⁻⁴·¹⁴ − 5 x⁻² + 111 (1 − x² + x⁴/2)/(1 + x²/2)),
/// with x = f / 215 Hz. The fit is not meaningful below the seismic wall,
/// so frequencies under 9 Hz get infinite noise.
#[derive(Clone, Copy, Debug, Default)]
pub struct AligoZeroDetHighPower;

impl AligoZeroDetHighPower {
    const F_KNEE_HZ: f64 = 215.0;
    const SEISMIC_WALL_HZ: f64 = 9.0;
}

impl Psd for AligoZeroDetHighPower {
    fn name(&self) -> &str {
        "aLIGOZeroDetHighPower"
    }

    fn value(&self, f_hz: f64) -> f64 {
        if f_hz < Self::SEISMIC_WALL_HZ {
            return f64::INFINITY;
        }
        let x = f_hz / Self::F_KNEE_HZ;
        let x2 = x * x;
        1e-49
            * (x.powf(-4.14) - 5.0 / x2
                + 111.0 * (1.0 - x2 + 0.5 * x2 * x2) / (1.0 + 0.5 * x2))
    }
}
