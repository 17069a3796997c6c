//! Support mass needed to hold a spinning habitat and its co-rotating systems together.
//!
//! Every subsystem is reduced to `(radius, mass)` elements; each element needs
//! `fraction(radius) * mass` of extra structure. Radiators and collectors are
//! split into rings so the sum approximates the radial integral.

pub mod support;

pub use support::{DIVERGENT_FRACTION, Support, collector_ring_radius, radiator_ring_radius};

use habitat_config::HabitatConfig;
use habitat_core::constants::PA_PER_BAR;
use habitat_core::units::rad_s_to_rpm;
use habitat_geometry::GeometryProvider;
use tracing::{debug, warn};

/// Rings per radiator or collector.
pub const RING_COUNT: usize = 10;

/// Masses at radii, e.g. floors or hull shells.
pub type MassDistribution = Vec<(f64, f64)>;

/// Structure attributed to one supported subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StructuralLoad {
    pub mass_kg: f64,
    /// Supported mass the structure is measured against.
    pub reference_mass_kg: f64,
    pub fraction: f64,
    /// Share of the subsystem that can co-rotate at all; below 1 part of it lies
    /// beyond the reach of any support.
    pub co_rotational_fraction: f64,
}

impl StructuralLoad {
    fn new(mass_kg: f64, reference_mass_kg: f64, co_rotational_fraction: f64) -> Self {
        Self {
            mass_kg,
            reference_mass_kg,
            fraction: if reference_mass_kg > 0.0 {
                mass_kg / reference_mass_kg
            } else {
                0.0
            },
            co_rotational_fraction,
        }
    }
}

/// Everything the structure has to carry.
#[derive(Debug, Clone, Default)]
pub struct StructureLoads {
    /// Pressurised volume: habitat interior plus external coolant lines.
    pub pressured_volume_m3: f64,
    /// Mass held by the pressure: air and external coolant.
    pub pressured_mass_kg: f64,
    pub ground_distribution: MassDistribution,
    pub hull_distribution: MassDistribution,
    pub radiator_radius_m: f64,
    pub radiator_mass_kg: f64,
    pub light_radius_m: f64,
    pub light_mass_kg: f64,
    /// Outer radius of the photovoltaic annulus around the mirrors.
    pub electric_radius_m: f64,
    pub electric_mass_kg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub support: Support,
    pub rotation_rate_rpm: f64,
    /// Whether interior and hull may hang on tension rings.
    pub horizontal_support: bool,
    pub pressure: StructuralLoad,
    pub interior: StructuralLoad,
    pub hull: StructuralLoad,
    pub radiator: StructuralLoad,
    pub light: StructuralLoad,
    pub electric: StructuralLoad,
    pub total_structural_mass_kg: f64,
}

impl Structure {
    pub fn new<G>(config: &HabitatConfig, geometry: &G, loads: &StructureLoads) -> Self
    where
        G: GeometryProvider + ?Sized,
    {
        let support = Support::new(config, geometry.rotational_radius());
        let horizontal_support = config.horizontal_support && geometry.supports_horizontal();
        let collection_limit = config.max_collection_to_corot_radius * support.corotational_radius_m;

        let pressure = StructuralLoad::new(
            2.0 * config.air_pressure_bar * PA_PER_BAR * loads.pressured_volume_m3
                / config.stress_per_density_m2_s2,
            loads.pressured_mass_kg,
            1.0,
        );
        let interior = distributed(&support, &loads.ground_distribution, horizontal_support);
        let hull = distributed(&support, &loads.hull_distribution, horizontal_support);

        let radiator_rings: MassDistribution = (0..RING_COUNT)
            .map(|i| {
                (
                    radiator_ring_radius(i, RING_COUNT, loads.radiator_radius_m),
                    loads.radiator_mass_kg / RING_COUNT as f64,
                )
            })
            .collect();
        let radiator = distributed(&support, &radiator_rings, false);

        let light = collector(
            &support,
            collection_limit,
            0.0,
            loads.light_radius_m,
            loads.light_mass_kg,
        );
        let electric = collector(
            &support,
            collection_limit,
            loads.light_radius_m,
            loads.electric_radius_m,
            loads.electric_mass_kg,
        );
        if light.co_rotational_fraction < 1.0 || electric.co_rotational_fraction < 1.0 {
            warn!(
                light = light.co_rotational_fraction,
                electric = electric.co_rotational_fraction,
                "collectors reach beyond the co-rotational limit"
            );
        }

        let total_structural_mass_kg: f64 = [pressure, interior, hull, radiator, light, electric]
            .iter()
            .map(|load| load.mass_kg)
            .sum();
        debug!(
            corotational_radius_m = support.corotational_radius_m,
            total_structural_mass_kg, "structure evaluated"
        );

        Self {
            rotation_rate_rpm: rad_s_to_rpm(support.rotation_rate_rad_s),
            support,
            horizontal_support,
            pressure,
            interior,
            hull,
            radiator,
            light,
            electric,
            total_structural_mass_kg,
        }
    }

    pub fn corotational_radius_m(&self) -> f64 {
        self.support.corotational_radius_m
    }

    pub fn fraction_without_self_weight(&self, radius_m: f64) -> f64 {
        self.support.fraction_without_self_weight(radius_m)
    }
}

fn distributed(support: &Support, elements: &[(f64, f64)], horizontal: bool) -> StructuralLoad {
    let (structural, reference) = elements
        .iter()
        .filter(|(_, mass)| *mass > 0.0)
        .fold((0.0, 0.0), |(structural, reference), &(radius, mass)| {
            (structural + support.fraction(radius, horizontal) * mass, reference + mass)
        });
    StructuralLoad::new(structural, reference, 1.0)
}

/// Annuli beyond `limit_m` cannot co-rotate; they carry no structure and no credit.
fn collector(support: &Support, limit_m: f64, inner_m: f64, outer_m: f64, mass_kg: f64) -> StructuralLoad {
    if mass_kg <= 0.0 {
        return StructuralLoad {
            co_rotational_fraction: 1.0,
            ..StructuralLoad::default()
        };
    }
    let ring_mass = mass_kg / RING_COUNT as f64;
    let rings: MassDistribution = (0..RING_COUNT)
        .map(|i| collector_ring_radius(i, RING_COUNT, inner_m, outer_m))
        .filter(|radius| *radius <= limit_m)
        .map(|radius| (radius, ring_mass))
        .collect();
    let co_rotational_fraction = rings.len() as f64 / RING_COUNT as f64;
    let load = distributed(support, &rings, false);
    StructuralLoad {
        co_rotational_fraction,
        ..load
    }
}
