//! One fully evaluated habitat at a given power and friction split.

use habitat_config::{FrictionFractions, HabitatConfig};
use habitat_geometry::{Gravity, Shape};
use habitat_structure::{MassDistribution, Structure, StructureLoads};
use habitat_thermal::{CoolingChain, CoolingLoad, CoolingProperties, HullTransfer};
use tracing::{info, warn};

use crate::HabitatError;
use crate::lighting::Lighting;

/// Photovoltaic supply for habitat power and for the cooling pumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Electricity {
    pub cooling_power_w: f64,
    pub cooling_mass_kg: f64,
    pub mass_per_power_kg_w: f64,
    /// Collector mass feeding the habitat itself.
    pub hab_mass_kg: f64,
    pub power_w: f64,
    pub area_m2: f64,
    pub mass_kg: f64,
}

impl Electricity {
    fn new(config: &HabitatConfig, power_w: f64, electric_fraction: f64, cooling_power_w: f64) -> Self {
        let yield_w_m2 = config.irradiation_w_m2() * config.electric_efficiency;
        let mass_per_power_kg_w = config.electric_surface_density_kg_m2 / yield_w_m2;
        let electric_power_w = power_w * electric_fraction + cooling_power_w;
        let area_m2 = electric_power_w / yield_w_m2;
        Self {
            cooling_power_w,
            cooling_mass_kg: mass_per_power_kg_w * cooling_power_w,
            mass_per_power_kg_w,
            hab_mass_kg: mass_per_power_kg_w * power_w * electric_fraction,
            power_w: electric_power_w,
            area_m2,
            mass_kg: area_m2 * config.electric_surface_density_kg_m2,
        }
    }
}

/// Where the habitat's power ends up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerBalance {
    /// Dissipated outside the habitat and radiated without the coolant loop.
    pub outside_power_w: f64,
    /// Released inside, including absorbed channel light and window heat.
    pub inside_power_w: f64,
    /// Leaking through the hull without active cooling.
    pub hull_power_w: f64,
    pub cooling_power_w: f64,
}

#[derive(Debug, Clone)]
pub struct Habitat {
    pub power_w: f64,
    pub population: f64,
    /// Friction fractions the habitat was evaluated with.
    pub requested_fractions: FrictionFractions,
    pub shape: Shape,
    pub gravity: Gravity,
    pub hull_power_per_surface_w_m2: f64,
    pub lighting: Lighting,
    pub balance: PowerBalance,
    pub corotational_radius_m: f64,
    pub cooling: CoolingChain,
    pub electricity: Electricity,
    /// Radius of the mirror disc.
    pub light_radius_m: f64,
    /// Outer radius of the photovoltaic annulus around the mirrors.
    pub collection_radius_m: f64,
    pub total_cooling_mass_kg: f64,
    /// Interior payload plus absorption pipework and coolant.
    pub total_inner_mass_kg: f64,
    pub structure: Structure,
    pub total_mass_kg: f64,
}

impl Habitat {
    /// Evaluate a habitat; `hull_flux` reuses a known hull power per surface.
    pub fn evaluate(
        config: &HabitatConfig,
        power_w: f64,
        fractions: FrictionFractions,
        hull_flux: Option<f64>,
    ) -> Result<Self, HabitatError> {
        let shape = Shape::new(config, power_w)?;
        let hab_radius_m = shape.effective_radius_m();

        let hull_power_per_surface_w_m2 = match hull_flux {
            Some(flux) => flux,
            None => {
                HullTransfer::new(config, shape.cross_section_m2 / shape.hull_surface_m2)?
                    .power_per_surface_w_m2
            }
        };

        let lighting = Lighting::new(config, &shape, power_w);
        let light = &lighting.collection;

        let outside_power_w = (1.0 - config.inside_power_fraction) * power_w;
        let inside_power_w =
            power_w - outside_power_w + light.light_abs_power_w + light.window_to_hab_power_w;
        let hull_power_w = inside_power_w
            .min(hull_power_per_surface_w_m2 * (shape.hull_surface_m2 - light.window_area_m2));
        let cooling_power_w = inside_power_w - hull_power_w + light.window_cooling_power_w;
        let balance = PowerBalance {
            outside_power_w,
            inside_power_w,
            hull_power_w,
            cooling_power_w,
        };

        let corotational_radius_m = (config.stress_per_density_m2_s2 * shape.rotational_radius_m
            / config.max_gravity_m_s2)
            .sqrt();
        let props = CoolingProperties::new(config);
        let cooling = CoolingChain::evaluate(
            config,
            &props,
            CoolingLoad {
                cooling_power_w,
                outside_power_w,
                hab_radius_m,
                hab_length_m: shape.effective_length_m(),
                hab_volume_m3: shape.hab_volume_m3,
                rotational_radius_m: shape.rotational_radius_m,
                corotational_radius_m,
            },
            fractions,
        )?;
        if let Some(report) = &cooling.cooling_report {
            warn!(%report, power_w, "cooling infeasible");
        }

        let electricity = Electricity::new(
            config,
            power_w,
            lighting.electric_fraction,
            cooling.electric_cooling_power_w,
        );
        let collection_radius_m =
            ((electricity.area_m2 + light.light_collection_area_m2) / std::f64::consts::PI).sqrt();
        let light_radius_m = (light.light_collection_area_m2 / std::f64::consts::PI).sqrt();

        let total_cooling_mass_kg =
            cooling.coolant_mass_kg() + cooling.surface_mass_kg() + electricity.cooling_mass_kg;
        let total_inner_mass_kg = shape.interior_mass_kg
            + cooling.absorption.surface_mass_kg
            + cooling.absorption.coolant_mass_kg;

        let gravity = Gravity::new(config, &shape.geometry);
        let structure = Structure::new(
            config,
            &shape.geometry,
            &StructureLoads {
                pressured_volume_m3: shape.hab_volume_m3 + cooling.pressured_volume_m3(),
                pressured_mass_kg: shape.air_mass_kg + cooling.pressured_coolant_mass_kg(),
                ground_distribution: ground_distribution(&gravity, total_inner_mass_kg),
                hull_distribution: hull_distribution(&gravity, shape.rotational_radius_m, shape.hull_mass_kg),
                radiator_radius_m: cooling.emission.radius_m,
                radiator_mass_kg: cooling.radiator_mass_kg(),
                light_radius_m,
                light_mass_kg: light.light_mass_kg,
                electric_radius_m: collection_radius_m,
                electric_mass_kg: electricity.mass_kg,
            },
        );

        let total_mass_kg = shape.interior_mass_kg
            + shape.hull_mass_kg
            + light.light_mass_kg
            + electricity.hab_mass_kg
            + total_cooling_mass_kg
            + structure.total_structural_mass_kg;

        info!(
            power_w,
            shape = config.shape.name(),
            rotational_radius_m = shape.rotational_radius_m,
            total_mass_kg,
            is_cooling_possible = cooling.is_cooling_possible,
            "habitat evaluated"
        );

        Ok(Self {
            power_w,
            population: power_w / config.power_per_person_w,
            requested_fractions: fractions,
            shape,
            gravity,
            hull_power_per_surface_w_m2,
            lighting,
            balance,
            corotational_radius_m,
            cooling,
            electricity,
            light_radius_m,
            collection_radius_m,
            total_cooling_mass_kg,
            total_inner_mass_kg,
            structure,
            total_mass_kg,
        })
    }

    pub fn is_cooling_possible(&self) -> bool {
        self.cooling.is_cooling_possible
    }

    pub fn is_complete_lighting(&self) -> bool {
        self.lighting.is_complete_lighting
    }

    /// Friction fractions with the absorption share actually spent.
    pub fn fractions(&self) -> FrictionFractions {
        self.cooling.fractions
    }

    pub fn cooling_power_w(&self) -> f64 {
        self.balance.cooling_power_w
    }
}

/// Interior payload spread over the floors in proportion to their ground area.
fn ground_distribution(gravity: &Gravity, mass_kg: f64) -> MassDistribution {
    let total = gravity.total_ground_area();
    if total > 0.0 {
        gravity
            .floors
            .iter()
            .map(|floor| (floor.ground_radius_m, floor.ground_area_m2 / total * mass_kg))
            .collect()
    } else {
        gravity
            .floors
            .first()
            .map(|floor| vec![(floor.ground_radius_m, mass_kg)])
            .unwrap_or_default()
    }
}

/// Hull mass spread over the floors, with the extra hull area at the rim.
fn hull_distribution(gravity: &Gravity, rotational_radius_m: f64, mass_kg: f64) -> MassDistribution {
    let total = gravity.total_hull_area();
    if total > 0.0 {
        gravity
            .floors
            .iter()
            .map(|floor| (floor.floor_radius_m, floor.hull_area_m2 / total * mass_kg))
            .chain(std::iter::once((
                rotational_radius_m,
                gravity.extra_hull_area_m2 / total * mass_kg,
            )))
            .collect()
    } else {
        gravity
            .floors
            .first()
            .map(|floor| vec![(floor.floor_radius_m, mass_kg)])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitat_config::CoolantPhase;

    fn seed() -> FrictionFractions {
        FrictionFractions::new(0.01, 0.01, 0.01)
    }

    #[test]
    fn golden_cylinder_cooling_mass() {
        let habitat =
            Habitat::evaluate(&HabitatConfig::default(), 1e10, seed(), None).expect("habitat");
        let log_mass = habitat.total_cooling_mass_kg.log10();
        assert!((log_mass - 8.964883982294).abs() < 1e-9, "log10 = {log_mass:.12}");
        assert!(habitat.is_complete_lighting());
        assert!(habitat.is_cooling_possible());
        assert!((habitat.population - 2.5e5).abs() < 1e-6);
    }

    #[test]
    fn power_balance_closes() {
        let habitat =
            Habitat::evaluate(&HabitatConfig::default(), 1e10, seed(), None).expect("habitat");
        let balance = habitat.balance;
        let light = &habitat.lighting.collection;
        assert!(
            (balance.cooling_power_w + balance.hull_power_w
                - balance.inside_power_w
                - light.window_cooling_power_w)
                .abs()
                < 1e-3
        );
        assert!(balance.hull_power_w <= balance.inside_power_w);
        assert!(habitat.collection_radius_m > habitat.light_radius_m);
    }

    #[test]
    fn mass_distributions_carry_their_totals() {
        let habitat =
            Habitat::evaluate(&HabitatConfig::default(), 1e10, seed(), None).expect("habitat");
        let ground = ground_distribution(&habitat.gravity, habitat.total_inner_mass_kg);
        let sum: f64 = ground.iter().map(|(_, m)| m).sum();
        assert!((sum / habitat.total_inner_mass_kg - 1.0).abs() < 1e-9);
        let hull = hull_distribution(&habitat.gravity, habitat.shape.rotational_radius_m, habitat.shape.hull_mass_kg);
        let sum: f64 = hull.iter().map(|(_, m)| m).sum();
        assert!((sum / habitat.shape.hull_mass_kg - 1.0).abs() < 1e-9);
        let (rim, _) = hull.last().copied().expect("rim entry");
        assert_eq!(rim, habitat.shape.rotational_radius_m);
    }

    #[test]
    fn hull_flux_override_is_used() {
        let config = HabitatConfig::default();
        let free = Habitat::evaluate(&config, 1e10, seed(), None).expect("habitat");
        let pinned = Habitat::evaluate(&config, 1e10, seed(), Some(0.0)).expect("habitat");
        assert_eq!(pinned.hull_power_per_surface_w_m2, 0.0);
        assert_eq!(pinned.balance.hull_power_w, 0.0);
        assert!(pinned.cooling_power_w() > free.cooling_power_w());
    }

    #[test]
    fn mass_flow_threads_through_the_chain() {
        for coolant in [CoolantPhase::Liquid, CoolantPhase::Vapor, CoolantPhase::Air] {
            let config = HabitatConfig {
                coolant,
                ..HabitatConfig::default()
            };
            let habitat = Habitat::evaluate(&config, 1e9, seed(), None).expect("habitat");
            let props = CoolingProperties::new(&config);
            let absorption = &habitat.cooling.absorption;
            assert_eq!(habitat.cooling.connection.mass_flow_kg_s, absorption.mass_flow_kg_s);
            assert_eq!(habitat.cooling.emission.mass_flow_kg_s, absorption.mass_flow_kg_s);
            let carried = absorption.mass_flow_kg_s * props.internal_energy_change_j_kg;
            assert!(
                (carried - habitat.cooling_power_w() - absorption.friction_power_w).abs()
                    < 1e-6 * carried,
                "{coolant:?}"
            );
        }
    }
}
