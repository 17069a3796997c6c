//! Flat, serializable view of an evaluated habitat.

use habitat_design::Habitat;
use serde::Serialize;

/// One exported row per evaluated habitat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitatSummary {
    pub power_w: f64,
    pub population: f64,
    pub shape: &'static str,
    pub hab_volume_m3: f64,
    pub rotational_radius_m: f64,
    pub opposite_rotational_radius_m: Option<f64>,
    pub corotational_radius_m: f64,
    pub rotation_rate_rpm: f64,
    pub floor_count: usize,
    pub average_volumetric_gravity: f64,
    pub average_ground_gravity: f64,
    pub average_hull_gravity: f64,
    pub hull_surface_m2: f64,
    pub cross_section_m2: f64,
    pub hull_power_per_surface_w_m2: f64,
    pub electric_fraction: f64,
    pub is_complete_lighting: bool,
    pub lighting_report: Option<String>,
    pub cooling_power_w: f64,
    pub absorption_friction_fraction: f64,
    pub connection_friction_fraction: f64,
    pub emission_friction_fraction: f64,
    pub mass_flow_kg_s: f64,
    pub radiator_surface_m2: f64,
    pub radiator_radius_m: f64,
    pub light_radius_m: f64,
    pub collection_radius_m: f64,
    pub is_cooling_possible: bool,
    pub cooling_report: Option<String>,
    pub interior_mass_kg: f64,
    pub hull_mass_kg: f64,
    pub light_mass_kg: f64,
    pub electric_mass_kg: f64,
    pub total_cooling_mass_kg: f64,
    pub structural_mass_kg: f64,
    pub total_mass_kg: f64,
}

impl From<&Habitat> for HabitatSummary {
    fn from(habitat: &Habitat) -> Self {
        let shape = &habitat.shape;
        let gravity = &habitat.gravity;
        let fractions = habitat.fractions();
        Self {
            power_w: habitat.power_w,
            population: habitat.population,
            shape: shape.geometry.family().name(),
            hab_volume_m3: shape.hab_volume_m3,
            rotational_radius_m: shape.rotational_radius_m,
            opposite_rotational_radius_m: shape.opposite_rotational_radius_m,
            corotational_radius_m: habitat.corotational_radius_m,
            rotation_rate_rpm: gravity.rotation_rate_rpm,
            floor_count: gravity.floor_count(),
            average_volumetric_gravity: gravity.average_volumetric_gravity,
            average_ground_gravity: gravity.average_ground_gravity,
            average_hull_gravity: gravity.average_hull_gravity,
            hull_surface_m2: shape.hull_surface_m2,
            cross_section_m2: shape.cross_section_m2,
            hull_power_per_surface_w_m2: habitat.hull_power_per_surface_w_m2,
            electric_fraction: habitat.lighting.electric_fraction,
            is_complete_lighting: habitat.is_complete_lighting(),
            lighting_report: habitat.lighting.report.clone(),
            cooling_power_w: habitat.cooling_power_w(),
            absorption_friction_fraction: fractions.absorption,
            connection_friction_fraction: fractions.connection,
            emission_friction_fraction: fractions.emission,
            mass_flow_kg_s: habitat.cooling.absorption.mass_flow_kg_s,
            radiator_surface_m2: habitat.cooling.emission.surface_m2,
            radiator_radius_m: habitat.cooling.emission.radius_m,
            light_radius_m: habitat.light_radius_m,
            collection_radius_m: habitat.collection_radius_m,
            is_cooling_possible: habitat.is_cooling_possible(),
            cooling_report: habitat.cooling.cooling_report.clone(),
            interior_mass_kg: shape.interior_mass_kg,
            hull_mass_kg: shape.hull_mass_kg,
            light_mass_kg: habitat.lighting.collection.light_mass_kg,
            electric_mass_kg: habitat.electricity.hab_mass_kg,
            total_cooling_mass_kg: habitat.total_cooling_mass_kg,
            structural_mass_kg: habitat.structure.total_structural_mass_kg,
            total_mass_kg: habitat.total_mass_kg,
        }
    }
}
