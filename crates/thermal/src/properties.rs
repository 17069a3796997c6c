//! Coolant loop temperatures and phase-dependent fluid properties.

use habitat_config::{CoolantPhase, HabitatConfig};
use habitat_core::constants::{
    AIR_DENSITY_PER_BAR, EPSILON, PA_PER_BAR, WATER_LATENT_HEAT_J_KG,
    WATER_LATENT_OVER_GAS_CONSTANT_K, WATER_SATURATION_PRESSURE_PA, WATER_TO_AIR_MOLAR_RATIO,
    WATER_VAPOR_GAS_CONSTANT,
};
use habitat_core::floored;
use habitat_core::water::saturation_ratio;

pub const LIQUID_VISCOSITY_PA_S: f64 = 1e-3;
const VAPOR_HEAT_CAPACITY_J_KGK: f64 = 1900.0;
const VAPOR_VISCOSITY_PA_S: f64 = 8e-6;
const AIR_HEAT_CAPACITY_J_KGK: f64 = 1000.0;
const AIR_VISCOSITY_PA_S: f64 = 1.8e-5;
const LAMINAR_REYNOLDS_LIMIT: f64 = 2300.0;

/// Properties of the coolant loop derived once per configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CoolingProperties {
    pub phase: CoolantPhase,
    /// Coolant temperature entering the absorption stage.
    pub incoming_temp_k: f64,
    /// Coolant temperature leaving the absorption stage.
    pub outgoing_temp_k: f64,
    pub outgoing_dew_point_k: f64,
    pub density_kg_m3: f64,
    pub heat_capacity_j_kgk: f64,
    pub viscosity_pa_s: f64,
    /// Heat taken up per kilogram of coolant, including latent heat.
    pub internal_energy_change_j_kg: f64,
    pub absorption_surface_per_power_m2_w: f64,
}

impl CoolingProperties {
    pub fn new(config: &HabitatConfig) -> Self {
        let phase = config.coolant;
        let (incoming_temp_k, outgoing_temp_k) = loop_temperatures(config);
        let outgoing_dew_point_k = 1.0
            / (1.0 / outgoing_temp_k
                - config.outgoing_relative_humidity.ln() / WATER_LATENT_OVER_GAS_CONSTANT_K);

        let (density_kg_m3, heat_capacity_j_kgk, viscosity_pa_s) = match phase {
            CoolantPhase::Liquid => (
                config.liquid_density_kg_m3,
                config.liquid_heat_capacity_j_kgk,
                LIQUID_VISCOSITY_PA_S,
            ),
            CoolantPhase::Vapor => (
                WATER_SATURATION_PRESSURE_PA / WATER_VAPOR_GAS_CONSTANT / incoming_temp_k
                    * saturation_ratio(incoming_temp_k),
                VAPOR_HEAT_CAPACITY_J_KGK,
                VAPOR_VISCOSITY_PA_S,
            ),
            CoolantPhase::Air => (
                AIR_DENSITY_PER_BAR * config.air_pressure_bar,
                AIR_HEAT_CAPACITY_J_KGK,
                AIR_VISCOSITY_PA_S,
            ),
        };

        let sensible = heat_capacity_j_kgk * (outgoing_temp_k - incoming_temp_k);
        let internal_energy_change_j_kg = match phase {
            CoolantPhase::Liquid => sensible,
            CoolantPhase::Vapor => sensible + config.vapor_latent_heat_j_kg,
            CoolantPhase::Air => {
                sensible
                    + WATER_LATENT_HEAT_J_KG * WATER_TO_AIR_MOLAR_RATIO * WATER_SATURATION_PRESSURE_PA
                        / (config.air_pressure_bar * PA_PER_BAR)
                        * (config.outgoing_relative_humidity * saturation_ratio(outgoing_temp_k)
                            - saturation_ratio(incoming_temp_k))
            }
        };

        let absorption_surface_per_power_m2_w = match phase {
            CoolantPhase::Air => config.inner_surface_per_power_m2_w,
            _ => {
                let approach = config.min_temp_diff_hab_coolant_k;
                let difference = (config.max_habitat_temp_k - outgoing_temp_k)
                    .max(config.min_habitat_temp_k - incoming_temp_k);
                if difference > approach {
                    (difference / approach).ln()
                        / (config.absorption_transfer_coeff_w_m2k * (difference - approach))
                } else {
                    1.0 / (config.absorption_transfer_coeff_w_m2k * difference)
                }
            }
        };

        Self {
            phase,
            incoming_temp_k,
            outgoing_temp_k,
            outgoing_dew_point_k,
            density_kg_m3,
            heat_capacity_j_kgk,
            viscosity_pa_s,
            internal_energy_change_j_kg,
            absorption_surface_per_power_m2_w,
        }
    }
}

/// Fit the coolant temperature band inside the habitat band, keeping the minimum
/// approach temperature; air flows through the habitat directly.
fn loop_temperatures(config: &HabitatConfig) -> (f64, f64) {
    if config.coolant == CoolantPhase::Air {
        return (config.min_habitat_temp_k, config.max_habitat_temp_k);
    }
    if config.max_habitat_temp_k - config.min_habitat_temp_k < config.temp_diff_flow_k {
        let outgoing = config.max_habitat_temp_k - config.min_temp_diff_hab_coolant_k;
        (outgoing - config.temp_diff_flow_k, outgoing)
    } else {
        let incoming = config.min_habitat_temp_k - config.min_temp_diff_hab_coolant_k;
        (incoming, incoming + config.temp_diff_flow_k)
    }
}

/// Darcy friction factor: laminar below Re 2300, Blasius above, floored at the
/// configured roughness minimum.
pub fn friction_factor(reynolds: f64, min_friction_factor: f64) -> f64 {
    if reynolds == 0.0 {
        EPSILON
    } else if reynolds < LAMINAR_REYNOLDS_LIMIT {
        64.0 / reynolds
    } else {
        (0.3164 * reynolds.powf(-0.25)).max(min_friction_factor)
    }
}

/// Pipe velocity at which `friction_power_w` is spent pumping through `surface_m2`
/// of pipe wall.
pub(crate) fn pipe_velocity(
    config: &HabitatConfig,
    friction_power_w: f64,
    reynolds: f64,
    density_kg_m3: f64,
    surface_m2: f64,
) -> f64 {
    (8.0 * config.pump_efficiency * friction_power_w
        / friction_factor(reynolds, config.min_friction_factor)
        / density_kg_m3
        / floored(surface_m2))
    .cbrt()
}
