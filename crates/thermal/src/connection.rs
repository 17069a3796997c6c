//! Coolant lines between the habitat interior and the radiator.

use std::f64::consts::PI;

use habitat_config::{CoolantPhase, HabitatConfig};
use habitat_core::floored;
use tracing::warn;

use crate::properties::{CoolingProperties, LIQUID_VISCOSITY_PA_S};

/// Velocity exponent when the friction factor sits at its floor.
const ROUGH_EXPONENT: f64 = 2.0 / 5.0;
/// Velocity exponent in the Blasius regime.
const BLASIUS_EXPONENT: f64 = 8.0 / 19.0;

/// Habitat side of the connection: where the lines start and what they may occupy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionLoad {
    pub hab_radius_m: f64,
    pub hab_length_m: f64,
    pub hab_volume_m3: f64,
    pub absorption_volume_m3: f64,
    pub emission_surface_m2: f64,
    pub emission_radius_m: f64,
    pub mass_flow_kg_s: f64,
    pub friction_power_w: f64,
    /// Share of the absorbed heat spent pumping through the lines.
    pub friction_fraction: f64,
}

/// Connection stage of the cooling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    /// Length through the hull.
    pub connection_length_m: f64,
    /// Length inside the habitat.
    pub absorption_length_m: f64,
    /// Length out along the radiator.
    pub emission_length_m: f64,
    pub effective_length_m: f64,
    pub total_length_m: f64,
    pub mass_flow_kg_s: f64,
    pub friction_fraction: f64,
    pub reynolds: f64,
    pub velocity_m_s: f64,
    /// Exponent of the last velocity evaluation (the liquid return line for vapour).
    pub velocity_exponent: f64,
    pub surface_m2: f64,
    pub surface_mass_kg: f64,
    pub pipe_diameter_m: f64,
    pub cross_section_m2: f64,
    /// Pipes of `pipe_diameter_m` filling the cross-section.
    pub pipe_number: f64,
    pub coolant_mass_kg: f64,
    pub volume_m3: f64,
    /// Coolant carried outside the habitat along the radiator.
    pub outer_coolant_mass_kg: f64,
    pub coolant_volume_fraction: f64,
    pub area_fraction: f64,
    pub is_cooling_possible: bool,
    pub report: Option<String>,
}

/// Line velocity spending `friction_power_w` over `effective_length_m`, and the
/// power-law exponent of the regime it lands in.
pub fn connection_velocity(
    config: &HabitatConfig,
    friction_power_w: f64,
    effective_length_m: f64,
    mass_flow_kg_s: f64,
    viscosity_pa_s: f64,
    density_kg_m3: f64,
) -> (f64, f64) {
    let flux = floored(mass_flow_kg_s * density_kg_m3);
    let threshold = 3.918e-10 / config.min_friction_factor.powi(19) * viscosity_pa_s.powi(5)
        * effective_length_m
        / config.pump_efficiency
        / flux.powi(2);
    if friction_power_w > threshold {
        let velocity = (0.798 / config.min_friction_factor * config.pump_efficiency
            * friction_power_w
            / effective_length_m
            / flux.sqrt())
        .powf(ROUGH_EXPONENT);
        (velocity, ROUGH_EXPONENT)
    } else {
        let velocity = (2.383 * config.pump_efficiency * friction_power_w
            / effective_length_m
            / flux.powf(3.0 / 8.0)
            / viscosity_pa_s.powf(0.25))
        .powf(BLASIUS_EXPONENT);
        (velocity, BLASIUS_EXPONENT)
    }
}

impl Connection {
    pub fn new(config: &HabitatConfig, props: &CoolingProperties, load: ConnectionLoad) -> Self {
        let mass_flow = load.mass_flow_kg_s;
        let connection_length_m = config.hull_surface_density_kg_m2 / config.hull_density_kg_m3;
        let absorption_length_m = load.hab_length_m / 2.0;
        let emission_length_m = load.emission_surface_m2 / 8.0 / floored(load.emission_radius_m);
        let effective_length_m =
            connection_length_m + 2.0 / 3.0 * (absorption_length_m + emission_length_m);
        let total_length_m = 2.0 * (absorption_length_m + connection_length_m + emission_length_m);

        let velocity_for = |viscosity: f64, density: f64| {
            connection_velocity(
                config,
                load.friction_power_w,
                effective_length_m,
                mass_flow,
                viscosity,
                density,
            )
        };
        let (velocity_m_s, mut velocity_exponent) =
            velocity_for(props.viscosity_pa_s, props.density_kg_m3);

        let surface_m2 = 4.0
            * effective_length_m
            * (2.0 * PI * mass_flow / props.density_kg_m3 / floored(velocity_m_s)).sqrt();
        let reynolds = 2.0 / props.viscosity_pa_s
            * floored(props.density_kg_m3 * mass_flow * velocity_m_s / 2.0 / PI).sqrt();
        let pipe_diameter_m =
            reynolds * props.viscosity_pa_s / props.density_kg_m3 / floored(velocity_m_s);
        let mut cross_section_m2 = mass_flow / props.density_kg_m3 / floored(velocity_m_s);

        // each line runs half the absorption and emission lengths on average
        let line_length = connection_length_m + absorption_length_m / 2.0 + emission_length_m / 2.0;
        let (coolant_mass_kg, volume_m3) = if props.phase == CoolantPhase::Vapor {
            cross_section_m2 /= 2.0;
            let (liquid_velocity, liquid_exponent) =
                velocity_for(LIQUID_VISCOSITY_PA_S, config.liquid_density_kg_m3);
            velocity_exponent = liquid_exponent;
            (
                mass_flow
                    * line_length
                    * (1.0 / floored(velocity_m_s) + 1.0 / floored(liquid_velocity)),
                mass_flow
                    * line_length
                    * (1.0 / floored(velocity_m_s * props.density_kg_m3)
                        + 1.0 / floored(liquid_velocity * config.liquid_density_kg_m3)),
            )
        } else {
            let coolant = 2.0 * mass_flow * line_length / floored(velocity_m_s);
            (coolant, coolant / props.density_kg_m3)
        };

        let pipe_number = cross_section_m2 / (PI / 4.0 * floored(pipe_diameter_m).powi(2));

        let span = 2.0 * connection_length_m + absorption_length_m + emission_length_m;
        let outer_coolant_mass_kg = emission_length_m / span * coolant_mass_kg;
        let interior_volume = absorption_length_m / span * volume_m3;
        let coolant_volume_fraction =
            (load.absorption_volume_m3 + interior_volume) / load.hab_volume_m3;
        let area_fraction = cross_section_m2 / PI / load.hab_radius_m.powi(2);

        let report = if area_fraction > 1.0 {
            Some(format!(
                "Connection cross-section ({cross_section_m2:.1e} m²) would surpass habitat cross-section"
            ))
        } else if props.phase != CoolantPhase::Air
            && coolant_volume_fraction > config.max_coolant_volume_fraction
        {
            Some(format!(
                "Coolant volume fraction ({coolant_volume_fraction:.2}) would surpass maximum fraction of habitat volume"
            ))
        } else {
            None
        };
        if let Some(message) = &report {
            warn!(%message, "connection infeasible");
        }

        Self {
            connection_length_m,
            absorption_length_m,
            emission_length_m,
            effective_length_m,
            total_length_m,
            mass_flow_kg_s: mass_flow,
            friction_fraction: load.friction_fraction,
            reynolds,
            velocity_m_s,
            velocity_exponent,
            surface_m2,
            surface_mass_kg: surface_m2 * config.emission_surface_density_kg_m2,
            pipe_diameter_m,
            cross_section_m2,
            pipe_number,
            coolant_mass_kg,
            volume_m3,
            outer_coolant_mass_kg,
            coolant_volume_fraction,
            area_fraction,
            is_cooling_possible: report.is_none(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(mass_flow_kg_s: f64) -> ConnectionLoad {
        ConnectionLoad {
            hab_radius_m: 460.95,
            hab_length_m: 599.2,
            hab_volume_m3: 4e8,
            absorption_volume_m3: 1e5,
            emission_surface_m2: 3e6,
            emission_radius_m: 430.0,
            mass_flow_kg_s,
            friction_power_w: 1e7,
            friction_fraction: 0.01,
        }
    }

    #[test]
    fn line_lengths() {
        let config = HabitatConfig::default();
        let connection = Connection::new(&config, &CoolingProperties::new(&config), load(1.2e4));
        assert_eq!(connection.connection_length_m, 5.0);
        assert!((connection.absorption_length_m - 299.6).abs() < 1e-9);
        assert!((connection.emission_length_m - 3e6 / 8.0 / 430.0).abs() < 1e-9);
        let expected = 2.0 * (5.0 + 299.6 + connection.emission_length_m);
        assert!((connection.total_length_m - expected).abs() < 1e-9);
        assert!(connection.outer_coolant_mass_kg < connection.coolant_mass_kg);
        assert!(connection.is_cooling_possible);
    }

    #[test]
    fn supply_and_return_lines_fill_the_cross_section() {
        let config = HabitatConfig::default();
        let connection = Connection::new(&config, &CoolingProperties::new(&config), load(1.2e4));
        assert_eq!(connection.mass_flow_kg_s, 1.2e4);
        assert_eq!(connection.friction_fraction, 0.01);
        assert!(connection.reynolds > 2300.0);
        assert!((connection.pipe_number - 2.0).abs() < 1e-9);
    }

    #[test]
    fn velocity_regime_switches_with_friction_power() {
        let config = HabitatConfig::default();
        let (_, rough) = connection_velocity(&config, 1e9, 500.0, 1.2e4, 1e-3, 1000.0);
        assert_eq!(rough, 2.0 / 5.0);
        let (_, smooth) = connection_velocity(&config, 1e-30, 500.0, 1e-6, 1e-3, 1000.0);
        assert_eq!(smooth, 8.0 / 19.0);
    }

    #[test]
    fn velocity_grows_with_friction_power() {
        let config = HabitatConfig::default();
        let (slow, _) = connection_velocity(&config, 1e8, 500.0, 1.2e4, 1e-3, 1000.0);
        let (fast, _) = connection_velocity(&config, 1e9, 500.0, 1.2e4, 1e-3, 1000.0);
        assert!((fast / slow - 10.0_f64.powf(0.4)).abs() < 1e-9);
    }

    #[test]
    fn vapor_splits_cross_section_and_reports_liquid_exponent() {
        let config = HabitatConfig {
            coolant: CoolantPhase::Vapor,
            ..HabitatConfig::default()
        };
        let props = CoolingProperties::new(&config);
        let connection = Connection::new(&config, &props, load(400.0));
        let full = 400.0 / props.density_kg_m3 / connection.velocity_m_s;
        assert!((connection.cross_section_m2 - full / 2.0).abs() < 1e-9 * full);
        let (_, liquid) = connection_velocity(
            &config,
            1e7,
            connection.effective_length_m,
            400.0,
            LIQUID_VISCOSITY_PA_S,
            config.liquid_density_kg_m3,
        );
        assert_eq!(connection.velocity_exponent, liquid);
    }

    #[test]
    fn crowded_interior_is_infeasible() {
        let config = HabitatConfig::default();
        let crowded = ConnectionLoad {
            absorption_volume_m3: 0.3 * 4e8,
            ..load(1.2e4)
        };
        let connection = Connection::new(&config, &CoolingProperties::new(&config), crowded);
        assert!(!connection.is_cooling_possible);
        assert!(connection.report.is_some());
    }
}
