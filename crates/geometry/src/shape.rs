//! Habitat shape sized for a target power: dimensions, hull and interior masses.

use std::f64::consts::PI;

use habitat_config::HabitatConfig;
use habitat_core::IterationError;
use habitat_core::constants::AIR_DENSITY_PER_BAR;
use thiserror::Error;

use crate::{Geometry, GeometryProvider};

/// Failures while sizing a shape.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error(
        "counterweight lobe radius {opposite_radius_m:.3} m exceeds rotational radius {rotational_radius_m:.3} m"
    )]
    AsymmetricDumbbell {
        rotational_radius_m: f64,
        opposite_radius_m: f64,
    },
    #[error("interior volume must be positive and finite, got {0}")]
    InvalidVolume(f64),
    #[error(transparent)]
    Iteration(#[from] IterationError),
}

/// Geometry and bulk masses of one habitat.
#[derive(Debug, Clone)]
pub struct Shape {
    pub geometry: Geometry,
    pub hab_volume_m3: f64,
    pub rotational_radius_m: f64,
    /// Counterweight radius for dumbbell families.
    pub opposite_rotational_radius_m: Option<f64>,
    pub hull_surface_m2: f64,
    pub cross_section_m2: f64,
    pub hull_mass_kg: f64,
    pub hull_volume_m3: f64,
    pub air_mass_kg: f64,
    /// Payload mass (interior structures, people, soil), the reference for the interior support.
    pub interior_mass_kg: f64,
}

impl Shape {
    /// Size the configured shape family for a habitat consuming `power_w`.
    pub fn new(config: &HabitatConfig, power_w: f64) -> Result<Self, ShapeError> {
        let hab_volume_m3 = power_w / config.power_per_volume();
        let geometry = Geometry::from_volume(config, hab_volume_m3)?;
        let hull_surface_m2 = geometry.hull_surface();

        Ok(Self {
            hab_volume_m3,
            rotational_radius_m: geometry.rotational_radius(),
            opposite_rotational_radius_m: geometry.opposite_radius(),
            hull_surface_m2,
            cross_section_m2: geometry.cross_section(),
            hull_mass_kg: hull_surface_m2 * config.hull_surface_density_kg_m2,
            hull_volume_m3: hull_surface_m2
                * (config.hull_surface_density_kg_m2 / config.hull_density_kg_m3
                    + config.gap_thickness_m),
            air_mass_kg: hab_volume_m3 * config.air_pressure_bar * AIR_DENSITY_PER_BAR,
            interior_mass_kg: power_w * config.interior_mass_per_power(),
            geometry,
        })
    }

    /// Radius of the circle with the same cross-section.
    pub fn effective_radius_m(&self) -> f64 {
        (self.cross_section_m2 / PI).sqrt()
    }

    /// Length of the cylinder with the same cross-section and volume.
    pub fn effective_length_m(&self) -> f64 {
        self.hab_volume_m3 / self.cross_section_m2
    }
}
