//! Structural fraction of a mass element held at a given radius.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use habitat_config::HabitatConfig;
use habitat_core::special::erf;

/// Returned instead of overflowing once a cable would be hopelessly long.
pub const DIVERGENT_FRACTION: f64 = 1e200;
/// Beyond this many co-rotational radii the vertical fraction is [`DIVERGENT_FRACTION`].
const MAX_VERTICAL_RATIO: f64 = 30.0;
/// Below this share of the co-rotational radius horizontal support always wins.
const HORIZONTAL_ONLY_RATIO: f64 = 0.1;

/// Support of a habitat spinning at `rotation_rate_rad_s` with material limited to
/// `stress_per_density` (m²/s²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Support {
    pub rotation_rate_rad_s: f64,
    pub corotational_radius_m: f64,
    pub stress_per_density_m2_s2: f64,
    /// Spacing of vertical cables bridged by horizontal members; 0 disables bridges.
    pub cable_spacing_m: f64,
    pub bridge_thickness_m: f64,
}

impl Support {
    pub fn new(config: &HabitatConfig, rotational_radius_m: f64) -> Self {
        let spd = config.stress_per_density_m2_s2;
        Self {
            rotation_rate_rad_s: (config.max_gravity_m_s2 / rotational_radius_m).sqrt(),
            corotational_radius_m: (spd * rotational_radius_m / config.max_gravity_m_s2).sqrt(),
            stress_per_density_m2_s2: spd,
            cable_spacing_m: config.distance_between_vertical_cables_m,
            bridge_thickness_m: config.bridge_thickness_m,
        }
    }

    /// Ring held in tension around the axis.
    ///
    /// Only meaningful below the co-rotational radius, where it stays finite.
    pub fn horizontal_fraction(&self, radius_m: f64) -> f64 {
        let ratio = radius_m / self.corotational_radius_m;
        1.0 / (ratio.powi(-2) - 1.0)
    }

    /// Cable hanging from the axis, carrying its own weight in the linear gravity gradient.
    pub fn vertical_fraction(&self, radius_m: f64) -> f64 {
        if radius_m == 0.0 {
            return 0.0;
        }
        let ratio = radius_m / self.corotational_radius_m;
        if ratio > MAX_VERTICAL_RATIO {
            return DIVERGENT_FRACTION;
        }
        let cable = ratio * (PI / 2.0).sqrt() * (ratio * ratio / 2.0).exp() * erf(ratio * FRAC_1_SQRT_2);
        if self.cable_spacing_m > 0.0 {
            let spacing = self.cable_spacing_m;
            let bridges = self.rotation_rate_rad_s.powi(2) * radius_m * spacing
                * (spacing / self.bridge_thickness_m + 1.0)
                / (6.0 * self.stress_per_density_m2_s2);
            (1.0 + cable) * (1.0 + bridges) - 1.0
        } else {
            cable
        }
    }

    /// Lighter of the admissible support methods at `radius_m`.
    pub fn fraction(&self, radius_m: f64, horizontal_allowed: bool) -> f64 {
        if radius_m == 0.0 {
            0.0
        } else if horizontal_allowed && radius_m < self.corotational_radius_m {
            if radius_m < HORIZONTAL_ONLY_RATIO * self.corotational_radius_m {
                self.horizontal_fraction(radius_m)
            } else {
                self.horizontal_fraction(radius_m).min(self.vertical_fraction(radius_m))
            }
        } else {
            self.vertical_fraction(radius_m)
        }
    }

    /// Stress share of a massless support: the lower bound of every method.
    pub fn fraction_without_self_weight(&self, radius_m: f64) -> f64 {
        (self.rotation_rate_rad_s * radius_m).powi(2) / self.stress_per_density_m2_s2
    }
}

/// Radius of ring `index` of `count` along a radiator arm of length `max_radius_m`,
/// weighted so a ring's moment matches its slice of the arm.
pub fn radiator_ring_radius(index: usize, count: usize, max_radius_m: f64) -> f64 {
    let i = index as f64;
    max_radius_m / count as f64 * (((i + 1.0).powi(3) - i.powi(3)) / 3.0).sqrt()
}

/// Radius of annulus `index` of `count` equal-area annuli between `inner_m` and `outer_m`.
pub fn collector_ring_radius(index: usize, count: usize, inner_m: f64, outer_m: f64) -> f64 {
    (inner_m.powi(2) + (index as f64 + 0.5) * (outer_m.powi(2) - inner_m.powi(2)) / count as f64).sqrt()
}
