// gw-core/src/units.rs

use uom::si::f64::{Frequency as UomFrequency, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Time = UomTime;
pub type Frequency = UomFrequency;

/// Total mass in solar masses.
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SolarMass = f64;

/// Luminosity distance in megaparsecs.
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type Megaparsec = f64;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

pub mod constants {
    /// Geometrized solar mass G*Msun/c^3 [s].
    pub const MTSUN_SI: f64 = 4.925_490_947_641_267e-6;

    /// Parsec [m].
    pub const PC_SI: f64 = 3.085_677_581_491_367e16;

    /// Speed of light [m/s].
    pub const C_SI: f64 = 299_792_458.0;

    /// Megaparsec [m].
    pub const MPC_SI: f64 = PC_SI * 1e6;
}

use constants::{C_SI, MPC_SI, MTSUN_SI};

/// Converts time in units of total mass M into seconds.
#[inline]
pub fn geometric_time_to_si(t: f64, total_mass: SolarMass) -> f64 {
    t * (MTSUN_SI * total_mass)
}

/// Converts time in seconds into units of total mass M.
#[inline]
pub fn si_time_to_geometric(t: f64, total_mass: SolarMass) -> f64 {
    t / (MTSUN_SI * total_mass)
}

/// Converts frequency in units of 1/M into hertz.
#[inline]
pub fn geometric_freq_to_si(f: f64, total_mass: SolarMass) -> f64 {
    f / (MTSUN_SI * total_mass)
}

/// Converts frequency in hertz into units of 1/M.
#[inline]
pub fn si_freq_to_geometric(f: f64, total_mass: SolarMass) -> f64 {
    f * (MTSUN_SI * total_mass)
}

/// Converts geometric strain (r h / M) into dimensionless SI strain at the
/// given distance.
#[inline]
pub fn geometric_strain_to_si(h: f64, total_mass: SolarMass, distance: Megaparsec) -> f64 {
    h * total_mass * MTSUN_SI * C_SI / (distance * MPC_SI)
}

/// Inverse of [`geometric_strain_to_si`].
#[inline]
pub fn si_strain_to_geometric(h: f64, total_mass: SolarMass, distance: Megaparsec) -> f64 {
    h * (distance * MPC_SI) / (total_mass * MTSUN_SI * C_SI)
}
