//! Friction split that approximately minimises cooling mass.
//!
//! Raising a stage's friction power speeds up its coolant, shrinking the coolant
//! mass, but costs collector mass for the pump power and a larger radiator.
//! Each new fraction balances those marginal costs using the velocity scaling
//! of its stage. The correction is applied once, not iterated.

use habitat_config::{CoolantPhase, FrictionFractions, HabitatConfig};
use habitat_core::floored;
use tracing::debug;

use crate::HabitatError;
use crate::habitat::Habitat;

/// Evaluate at the configured seed fractions, rebalance them once, and evaluate again.
pub fn optimize(
    config: &HabitatConfig,
    power_w: f64,
    hull_flux: Option<f64>,
) -> Result<Habitat, HabitatError> {
    let seed = Habitat::evaluate(config, power_w, config.friction_fractions(), hull_flux)?;
    if seed.cooling_power_w() == 0.0 {
        return Habitat::evaluate(config, power_w, FrictionFractions::zero(), hull_flux);
    }
    let fractions = optimal_fractions(config, &seed);
    debug!(
        absorption = fractions.absorption,
        connection = fractions.connection,
        emission = fractions.emission,
        "rebalanced friction fractions"
    );
    Habitat::evaluate(config, power_w, fractions, hull_flux)
}

/// Marginal-cost balanced fractions for `habitat`, scaled to the friction budget.
pub fn optimal_fractions(config: &HabitatConfig, habitat: &Habitat) -> FrictionFractions {
    let current = habitat.fractions();
    let cooling = &habitat.cooling;
    let absorption_mass = cooling.absorption.coolant_mass_kg;
    let connection_mass = cooling.connection.coolant_mass_kg;
    let emission_mass = cooling.emission.coolant_mass_kg;
    let exponent = cooling.connection.velocity_exponent;

    // mass growing linearly with the total friction power
    let linear = floored(
        cooling.connection.outer_coolant_mass_kg
            + cooling.emission.surface_mass_kg
            + habitat.electricity.mass_per_power_kg_w
                * current.amplification()
                * habitat.cooling_power_w(),
    );

    let absorption = if config.coolant == CoolantPhase::Air {
        current.absorption
    } else {
        ((1.0 + current.absorption) * current.absorption.cbrt() * absorption_mass
            / 3.0
            / floored(absorption_mass + connection_mass + emission_mass + linear))
        .powf(0.75)
    };
    let connection = (exponent * (1.0 + current.connection) * current.connection.powf(exponent)
        * connection_mass
        / linear)
        .powf(1.0 / (exponent + 1.0));
    let emission =
        ((1.0 + current.emission) * current.emission.cbrt() * emission_mass / 3.0 / linear).powf(0.75);

    let proposed = FrictionFractions::new(absorption, connection, emission);
    let total = proposed.total();
    if total > config.max_friction_fraction {
        let scale = config.max_friction_fraction / total;
        FrictionFractions::new(absorption * scale, connection * scale, emission * scale)
    } else {
        proposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimized_split_stays_within_budget() {
        for max_friction_fraction in [0.5, 1e-3] {
            let config = HabitatConfig {
                max_friction_fraction,
                ..HabitatConfig::default()
            };
            let seed = Habitat::evaluate(&config, 1e10, config.friction_fractions(), None).expect("seed");
            let fractions = optimal_fractions(&config, &seed);
            assert!(fractions.total() <= max_friction_fraction * (1.0 + 1e-12));
            assert!(fractions.absorption > 0.0);
            assert!(fractions.connection > 0.0);
            assert!(fractions.emission > 0.0);
        }
    }

    #[test]
    fn scaling_preserves_ratios() {
        let loose = HabitatConfig::default();
        let tight = HabitatConfig {
            max_friction_fraction: 1e-4,
            ..HabitatConfig::default()
        };
        let seed = Habitat::evaluate(&loose, 1e10, loose.friction_fractions(), None).expect("seed");
        let free = optimal_fractions(&loose, &seed);
        let capped = optimal_fractions(&tight, &seed);
        assert!(free.total() > 1e-4);
        assert!((capped.total() - 1e-4).abs() < 1e-15);
        assert!((capped.absorption / capped.emission - free.absorption / free.emission).abs() < 1e-9);
        assert!((capped.connection / capped.emission - free.connection / free.emission).abs() < 1e-9);
    }

    #[test]
    fn optimization_lowers_cooling_mass() {
        let config = HabitatConfig::default();
        let seed = Habitat::evaluate(&config, 1e10, config.friction_fractions(), None).expect("seed");
        let optimized = optimize(&config, 1e10, None).expect("optimized");
        assert!(optimized.total_cooling_mass_kg < seed.total_cooling_mass_kg);
    }

    #[test]
    fn air_keeps_its_fan_fraction() {
        let config = HabitatConfig {
            coolant: CoolantPhase::Air,
            ..HabitatConfig::default()
        };
        let seed = Habitat::evaluate(&config, 1e9, config.friction_fractions(), None).expect("seed");
        let fractions = optimal_fractions(&config, &seed);
        assert_eq!(fractions.absorption, seed.fractions().absorption);
    }
}
