//! Radiator: rejects the cooling load plus friction heat to space.

use std::f64::consts::PI;

use habitat_config::{CoolantPhase, FrictionFractions, HabitatConfig};
use habitat_core::constants::{
    CONDENSATION_LATENT_HEAT_J_KG, PA_PER_BAR, STEFAN_BOLTZMANN, WATER_SATURATION_PRESSURE_PA,
    WATER_TO_AIR_MOLAR_RATIO,
};
use habitat_core::floored;
use habitat_core::water::saturation_ratio;

use crate::properties::{CoolingProperties, LIQUID_VISCOSITY_PA_S, pipe_velocity};

/// Emission stage of the cooling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    pub absorption_friction_power_w: f64,
    pub connection_friction_power_w: f64,
    pub emission_friction_power_w: f64,
    /// Cooling power amplified by all three friction stages.
    pub radiator_power_w: f64,
    pub mass_flow_kg_s: f64,
    pub friction_fraction: f64,
    /// Coolant warming caused by connection friction, split over both lines.
    pub connection_temp_increase_k: f64,
    /// Black-body surface needed at the coolant temperatures.
    pub black_body_surface_m2: f64,
    pub effective_temp_k: f64,
    pub surface_m2: f64,
    pub surface_mass_kg: f64,
    pub radius_m: f64,
    pub reynolds: f64,
    pub velocity_m_s: f64,
    pub cross_section_m2: f64,
    pub pipe_diameter_m: f64,
    pub pipe_number: f64,
    pub coolant_mass_kg: f64,
    pub volume_m3: f64,
}

/// Rotation geometry the radiator radius is bounded by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiatorBounds {
    pub rotational_radius_m: f64,
    pub corotational_radius_m: f64,
}

impl Emission {
    /// `fractions.absorption` must be the fraction actually spent by the
    /// absorption stage, which differs from the requested one for air flow.
    pub fn new(
        config: &HabitatConfig,
        props: &CoolingProperties,
        cooling_power_w: f64,
        fractions: FrictionFractions,
        mass_flow_kg_s: f64,
        outside_power_w: f64,
        bounds: RadiatorBounds,
    ) -> Self {
        let radiator = config.emissivity * STEFAN_BOLTZMANN;
        let absorption_friction_power_w = fractions.absorption * cooling_power_w;
        let connection_friction_power_w =
            fractions.connection * (cooling_power_w + absorption_friction_power_w);
        let emission_friction_power_w = fractions.emission
            * (cooling_power_w + absorption_friction_power_w + connection_friction_power_w);
        let radiator_power_w = fractions.amplification() * cooling_power_w;
        let rejected = cooling_power_w + absorption_friction_power_w + connection_friction_power_w;

        let connection_temp_increase_k = connection_friction_power_w
            / (2.0 * props.heat_capacity_j_kgk * floored(mass_flow_kg_s));
        let coldest = props.incoming_temp_k - connection_temp_increase_k;
        let mut black_body_surface_m2 = match props.phase {
            CoolantPhase::Vapor => rejected / (radiator * props.incoming_temp_k.powi(4)),
            CoolantPhase::Liquid | CoolantPhase::Air => {
                mass_flow_kg_s * props.heat_capacity_j_kgk / (3.0 * radiator)
                    * (coldest.powi(-3) - (props.outgoing_temp_k + connection_temp_increase_k).powi(-3))
            }
        };
        if props.phase == CoolantPhase::Air {
            // condensing humidity releases latent heat between dew point and the cold end
            let humidity_per_t4 = |t: f64| {
                WATER_TO_AIR_MOLAR_RATIO * WATER_SATURATION_PRESSURE_PA
                    / (config.air_pressure_bar * PA_PER_BAR)
                    * saturation_ratio(t)
                    * t.powi(-4)
            };
            let dew = props.outgoing_dew_point_k;
            let average = (dew + coldest) / 2.0;
            black_body_surface_m2 += mass_flow_kg_s * CONDENSATION_LATENT_HEAT_J_KG / radiator
                * (humidity_per_t4(dew) - humidity_per_t4(coldest)
                    + 4.0 * humidity_per_t4(average) * (dew - coldest) / average);
        }

        let effective_temp_k = (rejected / (radiator * floored(black_body_surface_m2))).powf(0.25);
        let t4 = effective_temp_k.powi(4);
        let surface_m2 = (1.0 + fractions.emission + outside_power_w / floored(cooling_power_w)) * t4
            / (t4 - config.sky_temp_k.powi(4))
            * black_body_surface_m2;
        let radius_m = (config.max_radiator_to_rot_radius * bounds.rotational_radius_m)
            .min(config.max_radiator_to_corot_radius * bounds.corotational_radius_m)
            .min(surface_m2.sqrt() / 4.0);

        let reynolds_of =
            |viscosity: f64| 8.0 * radius_m * mass_flow_kg_s / floored(surface_m2) / viscosity;
        let reynolds = reynolds_of(props.viscosity_pa_s);
        let velocity_m_s = pipe_velocity(
            config,
            emission_friction_power_w,
            reynolds,
            props.density_kg_m3,
            surface_m2,
        );
        let cross_section_m2 = mass_flow_kg_s / props.density_kg_m3 / floored(velocity_m_s);
        let pipe_diameter_m = 8.0 * radius_m * cross_section_m2 / floored(surface_m2);
        let pipe_number = surface_m2 / PI / floored(pipe_diameter_m) / 2.0 / radius_m;

        let (coolant_mass_kg, volume_m3) = if props.phase == CoolantPhase::Vapor {
            let liquid_velocity = pipe_velocity(
                config,
                emission_friction_power_w,
                reynolds_of(LIQUID_VISCOSITY_PA_S),
                config.liquid_density_kg_m3,
                surface_m2,
            );
            let line = mass_flow_kg_s * radius_m;
            (
                line * (1.0 / floored(velocity_m_s) + 1.0 / floored(liquid_velocity)),
                line * (1.0 / floored(velocity_m_s * props.density_kg_m3)
                    + 1.0 / floored(liquid_velocity * config.liquid_density_kg_m3)),
            )
        } else {
            let coolant = 2.0 * mass_flow_kg_s * radius_m / floored(velocity_m_s);
            (coolant, coolant / props.density_kg_m3)
        };

        Self {
            absorption_friction_power_w,
            connection_friction_power_w,
            emission_friction_power_w,
            radiator_power_w,
            mass_flow_kg_s,
            friction_fraction: fractions.emission,
            connection_temp_increase_k,
            black_body_surface_m2,
            effective_temp_k,
            surface_m2,
            surface_mass_kg: surface_m2 * config.emission_surface_density_kg_m2,
            radius_m,
            reynolds,
            velocity_m_s,
            cross_section_m2,
            pipe_diameter_m,
            pipe_number,
            coolant_mass_kg,
            volume_m3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: RadiatorBounds = RadiatorBounds {
        rotational_radius_m: 460.95,
        corotational_radius_m: 2167.67,
    };

    fn emission(config: &HabitatConfig, outside_power_w: f64) -> Emission {
        let props = CoolingProperties::new(config);
        let mass_flow = 1.01e9 / props.internal_energy_change_j_kg;
        Emission::new(
            config,
            &props,
            1e9,
            FrictionFractions::new(0.01, 0.01, 0.01),
            mass_flow,
            outside_power_w,
            BOUNDS,
        )
    }

    #[test]
    fn friction_powers_stack() {
        let em = emission(&HabitatConfig::default(), 0.0);
        assert!((em.absorption_friction_power_w - 1e7).abs() < 1e-3);
        assert!((em.connection_friction_power_w - 1.01e7).abs() < 1e-3);
        assert!((em.emission_friction_power_w - 0.01 * (1.01e9 + 1.01e7)).abs() < 1e-3);
        assert!((em.radiator_power_w - 1.01_f64.powi(3) * 1e9).abs() < 1e-3);
    }

    #[test]
    fn liquid_radiator_runs_between_loop_temperatures() {
        let em = emission(&HabitatConfig::default(), 0.0);
        assert!(em.effective_temp_k > 275.0 - em.connection_temp_increase_k);
        assert!(em.effective_temp_k < 295.0 + em.connection_temp_increase_k);
        assert!(em.surface_m2 > em.black_body_surface_m2);
        assert!(em.radius_m <= em.surface_m2.sqrt() / 4.0);
        assert!(em.radius_m <= 2.0 * BOUNDS.rotational_radius_m);
        assert!(em.pipe_number > 0.0);
    }

    #[test]
    fn vapor_radiates_at_condensation_temperature() {
        let config = HabitatConfig {
            coolant: CoolantPhase::Vapor,
            ..HabitatConfig::default()
        };
        let em = emission(&config, 0.0);
        assert!((em.effective_temp_k - 275.0).abs() < 1e-9);
        assert!(em.coolant_mass_kg > 0.0);
        assert!(em.volume_m3 > em.coolant_mass_kg / config.liquid_density_kg_m3);
    }

    #[test]
    fn outside_power_enlarges_radiator() {
        let config = HabitatConfig::default();
        let inside = emission(&config, 0.0);
        let outside = emission(&config, 5e8);
        assert!((outside.surface_m2 / inside.surface_m2 - 1.51 / 1.01).abs() < 1e-9);
    }

    #[test]
    fn humid_air_needs_extra_radiator() {
        let config = HabitatConfig {
            coolant: CoolantPhase::Air,
            ..HabitatConfig::default()
        };
        let props = CoolingProperties::new(&config);
        let em = emission(&config, 0.0);
        let mass_flow = 1.01e9 / props.internal_energy_change_j_kg;
        let sensible = mass_flow * props.heat_capacity_j_kgk / (3.0 * 0.9 * STEFAN_BOLTZMANN)
            * ((285.0 - em.connection_temp_increase_k).powi(-3)
                - (300.0 + em.connection_temp_increase_k).powi(-3));
        assert!(em.black_body_surface_m2 > sensible);

        let humidity = |t: f64| 0.6 * 611.0 / 0.4e5 * saturation_ratio(t) * t.powi(-4);
        let dew = props.outgoing_dew_point_k;
        let cold = 285.0 - em.connection_temp_increase_k;
        let mid = (dew + cold) / 2.0;
        let latent = mass_flow * 2.45e6 / (0.9 * STEFAN_BOLTZMANN)
            * (humidity(dew) - humidity(cold) + 4.0 * humidity(mid) * (dew - cold) / mid);
        let expected = sensible + latent;
        assert!((em.black_body_surface_m2 / expected - 1.0).abs() < 1e-9);
    }
}
