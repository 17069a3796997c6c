//! Core constants, unit helpers, special functions, and the shared fixed-point solver
//! used by every habitat sub-model.

pub mod iteration;
pub mod special;

pub use iteration::{FixedPoint, IterationError, Solution, Step, Tolerance};

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Stefan–Boltzmann constant (W/m²K⁴).
    pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;
    /// Solar irradiation at one astronomical unit (W/m²).
    pub const SOLAR_CONSTANT_W_M2: f64 = 1360.0;
    /// Metres per astronomical unit, rounded as used for the apparent sun size.
    pub const AU_M: f64 = 1.5e11;
    /// Solar radius (m).
    pub const SUN_RADIUS_M: f64 = 7.0e8;
    /// Pascals per bar.
    pub const PA_PER_BAR: f64 = 1.0e5;
    /// Air density per bar of pressure at habitat temperature (kg/m³/bar).
    pub const AIR_DENSITY_PER_BAR: f64 = 1.2;
    /// Water vapour saturation pressure at the reference temperature (Pa).
    pub const WATER_SATURATION_PRESSURE_PA: f64 = 611.0;
    /// Reference temperature of the saturation curve (K).
    pub const WATER_REFERENCE_TEMP_K: f64 = 273.0;
    /// Latent heat over the vapour gas constant (K).
    pub const WATER_LATENT_OVER_GAS_CONSTANT_K: f64 = 5321.0;
    /// Specific gas constant of water vapour (J/kgK).
    pub const WATER_VAPOR_GAS_CONSTANT: f64 = 461.0;
    /// Latent heat of water evaporation (J/kg).
    pub const WATER_LATENT_HEAT_J_KG: f64 = 2.453e6;
    /// Latent heat released by humidity condensing in the radiator (J/kg).
    pub const CONDENSATION_LATENT_HEAT_J_KG: f64 = 2.45e6;
    /// Molar mass ratio of water to air.
    pub const WATER_TO_AIR_MOLAR_RATIO: f64 = 18.0 / 30.0;
    /// Floor applied to divisors that may legitimately reach zero.
    pub const EPSILON: f64 = 1e-10;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{AU_M, PA_PER_BAR};

    /// Convert bar to pascals.
    #[inline]
    pub fn bar_to_pa(v: f64) -> f64 {
        v * PA_PER_BAR
    }

    /// Convert astronomical units to metres.
    #[inline]
    pub fn au_to_m(v: f64) -> f64 {
        v * AU_M
    }

    /// Convert an angular rate in rad/s to rounds per minute.
    #[inline]
    pub fn rad_s_to_rpm(v: f64) -> f64 {
        v * 30.0 / std::f64::consts::PI
    }
}

/// Water saturation helpers shared by coolant, emission and air-humidity models.
pub mod water {
    use super::constants::{WATER_LATENT_OVER_GAS_CONSTANT_K, WATER_REFERENCE_TEMP_K};

    /// Saturation pressure relative to the reference point (Clausius–Clapeyron form).
    #[inline]
    pub fn saturation_ratio(temperature_k: f64) -> f64 {
        (WATER_LATENT_OVER_GAS_CONSTANT_K * (1.0 / WATER_REFERENCE_TEMP_K - 1.0 / temperature_k))
            .exp()
    }
}

/// Guard a divisor against zero.
#[inline]
pub fn floored(v: f64) -> f64 {
    v.max(constants::EPSILON)
}
