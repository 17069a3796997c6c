//! Heat absorption inside the habitat: coolant pipework or forced air flow.

use std::f64::consts::PI;

use habitat_config::{CoolantPhase, FrictionFractions, HabitatConfig};
use habitat_core::{FixedPoint, Step, Tolerance, floored};
use tracing::warn;

use crate::ThermalError;
use crate::properties::{CoolingProperties, LIQUID_VISCOSITY_PA_S, pipe_velocity};

const AIR_FLOW_MAX_ITERATIONS: usize = 1_000;

/// Absorption stage of the cooling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Absorption {
    pub cooling_power_w: f64,
    pub friction_power_w: f64,
    /// Friction power actually spent, relative to the cooling power.
    pub friction_fraction: f64,
    pub mass_flow_kg_s: f64,
    pub surface_m2: f64,
    pub surface_mass_kg: f64,
    pub reynolds: f64,
    pub velocity_m_s: f64,
    pub cross_section_m2: f64,
    pub pipe_diameter_m: f64,
    pub pipe_number: f64,
    pub coolant_mass_kg: f64,
    pub volume_m3: f64,
    pub is_cooling_possible: bool,
    pub report: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct AirFlow {
    mass_flow: f64,
    velocity: f64,
    reynolds: f64,
    friction_power: f64,
}

impl Absorption {
    pub fn new(
        config: &HabitatConfig,
        props: &CoolingProperties,
        cooling_power_w: f64,
        fractions: FrictionFractions,
        hab_radius_m: f64,
        hab_volume_m3: f64,
    ) -> Result<Self, ThermalError> {
        let seed_friction = fractions.absorption * cooling_power_w;
        let seed_flow = (cooling_power_w + seed_friction) / props.internal_energy_change_j_kg;
        let surface_m2 = props.absorption_surface_per_power_m2_w * cooling_power_w;
        let reynolds_of = |mass_flow: f64, viscosity: f64| {
            8.0 * hab_radius_m * mass_flow / floored(surface_m2) / viscosity
        };

        let mut is_cooling_possible = true;
        let mut report = None;
        let flow = if props.phase == CoolantPhase::Air && seed_flow > 0.0 {
            // fan power raises the mass flow, which raises the fan power
            let budget = (config.max_friction_fraction - fractions.connection - fractions.emission)
                * cooling_power_w;
            let solver =
                FixedPoint::new("air absorption", Tolerance::Relative(0.01), AIR_FLOW_MAX_ITERATIONS);
            let initial = AirFlow {
                mass_flow: seed_flow,
                velocity: 0.0,
                reynolds: 0.0,
                friction_power: seed_friction,
            };
            let solution = solver.iterate(
                initial,
                |state| state.mass_flow,
                |state| {
                    let velocity = 2.0 * hab_radius_m * state.mass_flow
                        / (props.density_kg_m3 * config.windy_volume_fraction * hab_volume_m3);
                    let reynolds = reynolds_of(state.mass_flow, props.viscosity_pa_s);
                    let friction_power = crate::friction_factor(reynolds, config.min_friction_factor)
                        * props.density_kg_m3
                        / 8.0
                        / config.pump_efficiency
                        * surface_m2
                        * velocity.powi(3);
                    let next = AirFlow {
                        mass_flow: (cooling_power_w + friction_power)
                            / props.internal_energy_change_j_kg,
                        velocity,
                        reynolds,
                        friction_power,
                    };
                    if friction_power > budget {
                        Step::Halt(next)
                    } else {
                        Step::Next(next)
                    }
                },
            )?;
            if solution.halted {
                is_cooling_possible = false;
                let message = format!(
                    "Fan power for air absorption ({:.1e} W) would surpass the friction budget ({:.1e} W)",
                    solution.state.friction_power, budget
                );
                warn!(%message, "absorption infeasible");
                report = Some(message);
            }
            solution.state
        } else {
            let reynolds = reynolds_of(seed_flow, props.viscosity_pa_s);
            AirFlow {
                mass_flow: seed_flow,
                velocity: pipe_velocity(config, seed_friction, reynolds, props.density_kg_m3, surface_m2),
                reynolds,
                friction_power: seed_friction,
            }
        };

        let mass_flow_kg_s = flow.mass_flow;
        let cross_section_m2 = mass_flow_kg_s / props.density_kg_m3 / floored(flow.velocity);
        let pipe_diameter_m = 8.0 * hab_radius_m * cross_section_m2 / floored(surface_m2);
        let pipe_number = surface_m2 / PI / floored(pipe_diameter_m) / 2.0 / hab_radius_m;

        let (surface_mass_kg, coolant_mass_kg, volume_m3) = match props.phase {
            CoolantPhase::Air => (0.0, 0.0, config.windy_volume_fraction * hab_volume_m3),
            CoolantPhase::Vapor => {
                let liquid_reynolds = reynolds_of(mass_flow_kg_s, LIQUID_VISCOSITY_PA_S);
                let liquid_velocity = pipe_velocity(
                    config,
                    flow.friction_power,
                    liquid_reynolds,
                    config.liquid_density_kg_m3,
                    surface_m2,
                );
                let line = mass_flow_kg_s * hab_radius_m;
                (
                    surface_m2 * config.absorption_surface_density_kg_m2,
                    line * (1.0 / floored(flow.velocity) + 1.0 / floored(liquid_velocity)),
                    line * (1.0 / floored(flow.velocity * props.density_kg_m3)
                        + 1.0 / floored(liquid_velocity * config.liquid_density_kg_m3)),
                )
            }
            CoolantPhase::Liquid => {
                let coolant = 2.0 * mass_flow_kg_s * hab_radius_m / floored(flow.velocity);
                (
                    surface_m2 * config.absorption_surface_density_kg_m2,
                    coolant,
                    coolant / props.density_kg_m3,
                )
            }
        };

        Ok(Self {
            cooling_power_w,
            friction_power_w: flow.friction_power,
            friction_fraction: flow.friction_power / floored(cooling_power_w),
            mass_flow_kg_s,
            surface_m2,
            surface_mass_kg,
            reynolds: flow.reynolds,
            velocity_m_s: flow.velocity,
            cross_section_m2,
            pipe_diameter_m,
            pipe_number,
            coolant_mass_kg,
            volume_m3,
            is_cooling_possible,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fractions() -> FrictionFractions {
        FrictionFractions::new(0.01, 0.01, 0.01)
    }

    #[test]
    fn liquid_mass_flow_carries_cooling_and_friction_power() {
        let config = HabitatConfig::default();
        let props = CoolingProperties::new(&config);
        let absorption =
            Absorption::new(&config, &props, 1e9, fractions(), 400.0, 5e8).expect("absorption");
        assert!((absorption.mass_flow_kg_s - 1.01e9 / (4280.0 * 20.0)).abs() < 1e-6);
        assert!((absorption.friction_fraction - 0.01).abs() < 1e-12);
        assert!(absorption.velocity_m_s > 0.0);
        assert!(
            (absorption.coolant_mass_kg
                - 2.0 * absorption.mass_flow_kg_s * 400.0 / absorption.velocity_m_s)
                .abs()
                < 1e-6 * absorption.coolant_mass_kg
        );
        assert!(absorption.is_cooling_possible);
    }

    #[test]
    fn air_flow_iterates_fan_power() {
        let config = HabitatConfig {
            coolant: CoolantPhase::Air,
            ..HabitatConfig::default()
        };
        let props = CoolingProperties::new(&config);
        let absorption =
            Absorption::new(&config, &props, 1e9, fractions(), 400.0, 5e8).expect("absorption");
        assert_eq!(absorption.coolant_mass_kg, 0.0);
        assert_eq!(absorption.surface_mass_kg, 0.0);
        assert!((absorption.volume_m3 - 0.25 * 5e8).abs() < 1e-6);
        let expected = (1e9 + absorption.friction_power_w) / props.internal_energy_change_j_kg;
        assert!((absorption.mass_flow_kg_s / expected - 1.0).abs() < 0.02);
    }

    #[test]
    fn cramped_air_flow_is_infeasible() {
        let config = HabitatConfig {
            coolant: CoolantPhase::Air,
            windy_volume_fraction: 1e-4,
            ..HabitatConfig::default()
        };
        let props = CoolingProperties::new(&config);
        let absorption =
            Absorption::new(&config, &props, 1e9, fractions(), 400.0, 5e8).expect("absorption");
        assert!(!absorption.is_cooling_possible);
        assert!(absorption.report.is_some());
        assert!(absorption.friction_power_w > (0.5 - 0.02) * 1e9);
    }

    #[test]
    fn zero_cooling_power_is_inert() {
        let config = HabitatConfig::default();
        let props = CoolingProperties::new(&config);
        let absorption =
            Absorption::new(&config, &props, 0.0, fractions(), 400.0, 5e8).expect("absorption");
        assert_eq!(absorption.mass_flow_kg_s, 0.0);
        assert_eq!(absorption.coolant_mass_kg, 0.0);
        assert!(absorption.is_cooling_possible);
    }
}
