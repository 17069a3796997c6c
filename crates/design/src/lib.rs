//! Habitat design: sizing, lighting, power balance, cooling, structure and the
//! friction optimizer, composed into a single evaluated [`Habitat`].
//!
//! Infeasible designs still evaluate; they carry flags and reports instead of
//! failing. Errors are reserved for invalid configurations and solver breakdowns.

pub mod habitat;
pub mod lighting;
pub mod optimizer;

pub use habitat::{Electricity, Habitat, PowerBalance};
pub use lighting::Lighting;
pub use optimizer::{optimal_fractions, optimize};

use habitat_config::{ConfigError, FrictionFractions, HabitatConfig};
use habitat_geometry::{Gravity, Shape, ShapeError};
use habitat_thermal::ThermalError;
use thiserror::Error;

/// Top-level habitat evaluation error.
#[derive(Debug, Error)]
pub enum HabitatError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("shape sizing failed: {0}")]
    Shape(#[from] ShapeError),
    #[error("thermal model failed: {0}")]
    Thermal(#[from] ThermalError),
}

/// Size the configured shape family for `power_w`.
pub fn evaluate_shape(config: &HabitatConfig, power_w: f64) -> Result<Shape, HabitatError> {
    config.validate()?;
    Ok(Shape::new(config, power_w)?)
}

/// Floor partition and average gravities of a sized shape.
pub fn evaluate_gravity(config: &HabitatConfig, shape: &Shape) -> Gravity {
    Gravity::new(config, &shape.geometry)
}

/// Full evaluation at the given friction fractions.
pub fn evaluate_habitat(
    config: &HabitatConfig,
    power_w: f64,
    fractions: FrictionFractions,
) -> Result<Habitat, HabitatError> {
    evaluate_habitat_with_hull_flux(config, power_w, fractions, None)
}

/// Full evaluation reusing a precomputed hull power per surface when given.
pub fn evaluate_habitat_with_hull_flux(
    config: &HabitatConfig,
    power_w: f64,
    fractions: FrictionFractions,
    hull_flux: Option<f64>,
) -> Result<Habitat, HabitatError> {
    config.validate()?;
    Habitat::evaluate(config, power_w, fractions, hull_flux)
}

/// Evaluation with friction fractions rebalanced to cut cooling mass.
pub fn optimize_habitat(config: &HabitatConfig, power_w: f64) -> Result<Habitat, HabitatError> {
    config.validate()?;
    optimize(config, power_w, None)
}

/// Evaluate as the configuration asks: optimized or at its seed fractions.
pub fn design_habitat(config: &HabitatConfig, power_w: f64) -> Result<Habitat, HabitatError> {
    if config.is_friction_optimized {
        optimize_habitat(config, power_w)
    } else {
        evaluate_habitat(config, power_w, config.friction_fractions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitat_config::ShapeFamily;

    #[test]
    fn invalid_configuration_is_rejected_before_evaluation() {
        let config = HabitatConfig {
            stress_per_density_m2_s2: 0.0,
            ..HabitatConfig::default()
        };
        let err = evaluate_habitat(&config, 1e10, config.friction_fractions()).expect_err("invalid");
        assert!(matches!(err, HabitatError::Config(_)));
    }

    #[test]
    fn inverted_dumbbell_is_a_shape_error() {
        let config = HabitatConfig {
            shape: ShapeFamily::Dumbbell,
            dumbbell_major_to_minor_radius: 0.5,
            ..HabitatConfig::default()
        };
        let err = evaluate_shape(&config, 1e10).expect_err("asymmetric");
        assert!(matches!(err, HabitatError::Shape(ShapeError::AsymmetricDumbbell { .. })));
    }

    #[test]
    fn design_follows_optimization_flag() {
        let config = HabitatConfig {
            is_friction_optimized: true,
            ..HabitatConfig::default()
        };
        let optimized = design_habitat(&config, 1e10).expect("optimized");
        assert_ne!(optimized.requested_fractions, config.friction_fractions());
        let plain = design_habitat(&HabitatConfig::default(), 1e10).expect("plain");
        assert_eq!(plain.requested_fractions, config.friction_fractions());
    }
}
