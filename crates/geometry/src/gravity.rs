//! Floor-by-floor partition of the habitat interior and the resulting average gravities.

use habitat_config::HabitatConfig;
use habitat_core::units::rad_s_to_rpm;

use crate::GeometryProvider;

/// One floor, bounded outward by its ground radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    pub ground_radius_m: f64,
    /// Mid-height radius of the floor.
    pub floor_radius_m: f64,
    pub height_m: f64,
    pub ground_area_m2: f64,
    pub hull_area_m2: f64,
    pub volume_m3: f64,
}

/// Gravity distribution of a rotating habitat.
#[derive(Debug, Clone)]
pub struct Gravity {
    pub rotational_radius_m: f64,
    pub opposite_rotational_radius_m: Option<f64>,
    pub rotation_rate_rad_s: f64,
    pub rotation_rate_rpm: f64,
    /// Floors from the rim inward.
    pub floors: Vec<Floor>,
    /// Hull area outside the floor sweep, attributed to the outermost floor.
    pub extra_hull_area_m2: f64,
    pub average_volumetric_gravity: f64,
    pub average_ground_gravity: f64,
    pub average_hull_gravity: f64,
}

#[derive(Default)]
struct Weighted {
    moment: f64,
    total: f64,
}

impl Weighted {
    fn add(&mut self, weight: f64, gravity: f64) {
        self.moment += weight * gravity;
        self.total += weight;
    }

    fn average_or(&self, fallback: f64) -> f64 {
        if self.total > 0.0 {
            self.moment / self.total
        } else {
            fallback
        }
    }
}

impl Gravity {
    /// Stack floors from the rotational radius down to the axis.
    ///
    /// Floor height grows toward the axis as `constant + variable * R / r`; the
    /// last floor is clipped at the axis.
    pub fn new<G>(config: &HabitatConfig, geometry: &G) -> Self
    where
        G: GeometryProvider + ?Sized,
    {
        let radius = geometry.rotational_radius();
        let local_gravity = |r: f64| config.max_gravity_m_s2 * r / radius;
        let extra_hull_area_m2 = geometry.extra_hull_area();

        let mut floors = Vec::new();
        let mut volumetric = Weighted::default();
        let mut ground = Weighted::default();
        let mut hull = Weighted::default();

        let mut lower = radius;
        while lower > 0.0 {
            let height = config.constant_floor_height_m
                + config.variable_floor_height_m * radius / lower;
            let upper = (lower - height).max(0.0);
            let middle = (lower + upper) / 2.0;

            let ground_area = geometry.ground_area(lower);
            ground.add(ground_area, local_gravity(lower));

            let volume = height * geometry.ground_area(middle);
            volumetric.add(volume, local_gravity(middle));

            if floors.is_empty() {
                hull.add(extra_hull_area_m2, local_gravity(middle));
            }
            let hull_area =
                height * geometry.hull_length(middle) * geometry.orientation_factor(middle);
            hull.add(hull_area, local_gravity(middle));

            floors.push(Floor {
                ground_radius_m: lower,
                floor_radius_m: middle,
                height_m: height,
                ground_area_m2: ground_area,
                hull_area_m2: hull_area,
                volume_m3: volume,
            });
            lower = upper;
        }

        let innermost = floors.last().map(|f| local_gravity(f.ground_radius_m)).unwrap_or(0.0);
        let rotation_rate_rad_s = (config.max_gravity_m_s2 / radius).sqrt();

        Self {
            rotational_radius_m: radius,
            opposite_rotational_radius_m: geometry.opposite_radius(),
            rotation_rate_rad_s,
            rotation_rate_rpm: rad_s_to_rpm(rotation_rate_rad_s),
            floors,
            extra_hull_area_m2,
            average_volumetric_gravity: volumetric.average_or(innermost),
            average_ground_gravity: ground.average_or(innermost),
            average_hull_gravity: hull.average_or(innermost),
        }
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    pub fn ground_radii(&self) -> Vec<f64> {
        self.floors.iter().map(|f| f.ground_radius_m).collect()
    }

    pub fn floor_radii(&self) -> Vec<f64> {
        self.floors.iter().map(|f| f.floor_radius_m).collect()
    }

    pub fn total_ground_area(&self) -> f64 {
        self.floors.iter().map(|f| f.ground_area_m2).sum()
    }

    /// Floor-swept hull area plus the extra hull area.
    pub fn total_hull_area(&self) -> f64 {
        self.floors.iter().map(|f| f.hull_area_m2).sum::<f64>() + self.extra_hull_area_m2
    }

    pub fn total_volume(&self) -> f64 {
        self.floors.iter().map(|f| f.volume_m3).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cylinder, Dumbbell, DumbbellTube, Oblate, Torus, Tube};

    fn stacked_floors() -> HabitatConfig {
        HabitatConfig {
            constant_floor_height_m: 5.0,
            variable_floor_height_m: 2.0,
            ..HabitatConfig::default()
        }
    }

    fn assert_averages(gravity: &Gravity, volumetric: f64, ground: f64, hull: f64) {
        assert!(
            (gravity.average_volumetric_gravity - volumetric).abs() < 1e-3,
            "volumetric {}",
            gravity.average_volumetric_gravity
        );
        assert!(
            (gravity.average_ground_gravity - ground).abs() < 1e-3,
            "ground {}",
            gravity.average_ground_gravity
        );
        assert!(
            (gravity.average_hull_gravity - hull).abs() < 1e-3,
            "hull {}",
            gravity.average_hull_gravity
        );
    }

    #[test]
    fn cylinder_floor_stack() {
        let cylinder = Cylinder {
            rotational_radius_m: 100.0,
            length_to_radius: 1.0,
        };
        let gravity = Gravity::new(&stacked_floors(), &cylinder);
        assert_eq!(gravity.floor_count(), 11);
        let last = gravity.floors.last().expect("floors");
        assert!((last.ground_radius_m - 14.1268).abs() < 1e-4);
        assert!(last.ground_radius_m - last.height_m < 0.0);
        assert_eq!(last.floor_radius_m, last.ground_radius_m / 2.0);
        assert_averages(&gravity, 6.4827, 7.1184, 7.9694);
        assert!((gravity.rotation_rate_rpm - 2.991).abs() < 1e-3);
    }

    #[test]
    fn oblate_and_torus_floor_stacks() {
        let oblate = Oblate {
            rotational_radius_m: 100.0,
            minor_to_radius: 0.5,
        };
        assert_averages(&Gravity::new(&stacked_floors(), &oblate), 5.7284, 6.0865, 6.9548);

        let torus = Torus {
            rotational_radius_m: 100.0,
            hab_to_radius: 0.25,
        };
        assert_averages(&Gravity::new(&stacked_floors(), &torus), 7.5760, 7.5323, 7.1030);
    }

    #[test]
    fn tube_floor_stack() {
        let tube = Tube {
            rotational_radius_m: 100.0,
            tube_to_radius: 0.1,
        };
        assert_averages(&Gravity::new(&stacked_floors(), &tube), 4.5454, 5.9261, 5.1057);
    }

    #[test]
    fn dumbbell_floor_stacks() {
        let dumbbell = Dumbbell {
            rotational_radius_m: 100.0,
            opposite_radius_m: 80.0,
            minor_to_radius: 0.1,
            major_to_minor: 1.3,
        };
        assert_averages(&Gravity::new(&stacked_floors(), &dumbbell), 7.3022, 7.3253, 7.4713);

        let with_tube = DumbbellTube::with_radii(100.0, 80.0, 0.2, 1.5, 0.05);
        assert_averages(&Gravity::new(&stacked_floors(), &with_tube), 5.6119, 5.8110, 5.1770);
    }

    #[test]
    fn empty_shape_falls_back_to_innermost_gravity() {
        let torus = Torus {
            rotational_radius_m: 100.0,
            hab_to_radius: 0.01,
        };
        let config = HabitatConfig {
            constant_floor_height_m: 60.0,
            variable_floor_height_m: 0.0,
            ..HabitatConfig::default()
        };
        let gravity = Gravity::new(&config, &torus);
        // both floor boundaries miss the thin ring entirely
        assert_eq!(gravity.total_ground_area(), 0.0);
        let innermost = 9.81 * gravity.floors.last().expect("floors").ground_radius_m / 100.0;
        assert!((gravity.average_ground_gravity - innermost).abs() < 1e-12);
    }
}
