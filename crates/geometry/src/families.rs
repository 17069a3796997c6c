//! Shape families and their analytic volume inversions.

use std::f64::consts::PI;

use habitat_config::{HabitatConfig, ShapeFamily};
use habitat_core::special::{ellipe, ellipk};
use habitat_core::{FixedPoint, Tolerance};
use tracing::warn;

use crate::{GeometryProvider, ShapeError};

const DUMBBELL_TUBE_MAX_ITERATIONS: usize = 200;

/// Relative slack when comparing the two dumbbell radii; symmetric dumbbells
/// land on equality up to rounding.
const OPPOSITE_RADIUS_SLACK: f64 = 1e-9;

/// Closed cylinder rotating about its own axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub rotational_radius_m: f64,
    pub length_to_radius: f64,
}

impl Cylinder {
    pub fn from_volume(volume_m3: f64, length_to_radius: f64) -> Self {
        Self {
            rotational_radius_m: (volume_m3 / (length_to_radius * PI)).cbrt(),
            length_to_radius,
        }
    }
}

impl GeometryProvider for Cylinder {
    fn rotational_radius(&self) -> f64 {
        self.rotational_radius_m
    }

    fn volume(&self) -> f64 {
        PI * self.length_to_radius * self.rotational_radius_m.powi(3)
    }

    fn hull_surface(&self) -> f64 {
        2.0 * PI * self.rotational_radius_m.powi(2) * (1.0 + self.length_to_radius)
    }

    fn cross_section(&self) -> f64 {
        PI * self.rotational_radius_m.powi(2)
    }

    fn ground_area(&self, radius: f64) -> f64 {
        2.0 * PI * radius * self.length_to_radius * self.rotational_radius_m
    }

    fn hull_length(&self, radius: f64) -> f64 {
        4.0 * PI * radius
    }

    fn orientation_factor(&self, _radius: f64) -> f64 {
        1.0
    }

    fn extra_hull_area(&self) -> f64 {
        self.ground_area(self.rotational_radius_m)
    }

    fn supports_horizontal(&self) -> bool {
        true
    }
}

/// Straight rod of circular section spanning the rotation diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    pub rotational_radius_m: f64,
    pub tube_to_radius: f64,
}

impl Tube {
    pub fn from_volume(volume_m3: f64, tube_to_radius: f64) -> Self {
        Self {
            rotational_radius_m: (volume_m3 / (2.0 * PI * tube_to_radius.powi(2))).cbrt(),
            tube_to_radius,
        }
    }

    fn tube_radius(&self) -> f64 {
        self.tube_to_radius * self.rotational_radius_m
    }
}

impl GeometryProvider for Tube {
    fn rotational_radius(&self) -> f64 {
        self.rotational_radius_m
    }

    fn volume(&self) -> f64 {
        2.0 * PI * self.tube_to_radius.powi(2) * self.rotational_radius_m.powi(3)
    }

    fn hull_surface(&self) -> f64 {
        let t = self.tube_to_radius;
        2.0 * PI * self.rotational_radius_m.powi(2) * (t * t + 2.0 * t)
    }

    fn cross_section(&self) -> f64 {
        4.0 * self.tube_to_radius * self.rotational_radius_m.powi(2)
    }

    fn ground_area(&self, radius: f64) -> f64 {
        if radius > self.rotational_radius_m {
            return 0.0;
        }
        rod_ground_area(radius, self.tube_radius())
    }

    fn hull_length(&self, radius: f64) -> f64 {
        if radius > self.rotational_radius_m {
            return 0.0;
        }
        rod_hull_length(radius, self.tube_radius())
    }

    fn orientation_factor(&self, _radius: f64) -> f64 {
        1.0
    }

    fn extra_hull_area(&self) -> f64 {
        2.0 * PI * self.tube_radius().powi(2)
    }
}

/// Spheroid with its symmetry axis along the rotation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oblate {
    pub rotational_radius_m: f64,
    /// Polar semi-axis over equatorial radius (`< 1` oblate, `> 1` prolate).
    pub minor_to_radius: f64,
}

impl Oblate {
    pub fn from_volume(volume_m3: f64, minor_to_radius: f64) -> Self {
        Self {
            rotational_radius_m: (3.0 * volume_m3 / (4.0 * PI * minor_to_radius)).cbrt(),
            minor_to_radius,
        }
    }

    fn polar_semi_axis(&self) -> f64 {
        self.minor_to_radius * self.rotational_radius_m
    }

    fn axial_slope(&self, radius: f64) -> Option<f64> {
        let r = self.rotational_radius_m;
        let remaining = 1.0 - radius * radius / (r * r);
        (remaining > 0.0).then(|| remaining.sqrt())
    }
}

impl GeometryProvider for Oblate {
    fn rotational_radius(&self) -> f64 {
        self.rotational_radius_m
    }

    fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.minor_to_radius * self.rotational_radius_m.powi(3)
    }

    fn hull_surface(&self) -> f64 {
        let m = self.minor_to_radius;
        let base = PI * self.rotational_radius_m.powi(2);
        if (1.0 - m).abs() < 1e-9 {
            4.0 * base
        } else if m < 1.0 {
            let e = (1.0 - m * m).sqrt();
            base * (2.0 + m * m / e * ((1.0 + e) / (1.0 - e)).ln())
        } else {
            let e = (1.0 - 1.0 / (m * m)).sqrt();
            2.0 * base * (1.0 + m / e * e.asin())
        }
    }

    fn cross_section(&self) -> f64 {
        PI * self.rotational_radius_m.powi(2)
    }

    fn ground_area(&self, radius: f64) -> f64 {
        match self.axial_slope(radius) {
            Some(root) => 4.0 * PI * radius * self.polar_semi_axis() * root,
            None => 0.0,
        }
    }

    fn hull_length(&self, radius: f64) -> f64 {
        if radius < self.rotational_radius_m {
            4.0 * PI * radius
        } else {
            0.0
        }
    }

    fn orientation_factor(&self, radius: f64) -> f64 {
        match self.axial_slope(radius) {
            Some(root) => {
                let r = self.rotational_radius_m;
                let slope = self.polar_semi_axis() * radius / (r * r * root);
                (1.0 + slope * slope).sqrt()
            }
            None => 1.0,
        }
    }

    fn supports_horizontal(&self) -> bool {
        true
    }
}

/// Ring torus whose outer equator sits at the rotational radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub rotational_radius_m: f64,
    /// Tube radius over rotational radius.
    pub hab_to_radius: f64,
}

impl Torus {
    pub fn from_volume(volume_m3: f64, hab_to_radius: f64) -> Self {
        let t = hab_to_radius;
        Self {
            rotational_radius_m: (volume_m3 / (2.0 * PI * PI * t * t * (1.0 - t))).cbrt(),
            hab_to_radius,
        }
    }

    fn tube_radius(&self) -> f64 {
        self.hab_to_radius * self.rotational_radius_m
    }

    fn centre_radius(&self) -> f64 {
        self.rotational_radius_m - self.tube_radius()
    }

    fn half_width_sq(&self, radius: f64) -> f64 {
        self.tube_radius().powi(2) - (radius - self.centre_radius()).powi(2)
    }
}

impl GeometryProvider for Torus {
    fn rotational_radius(&self) -> f64 {
        self.rotational_radius_m
    }

    fn volume(&self) -> f64 {
        let t = self.hab_to_radius;
        2.0 * PI * PI * t * t * (1.0 - t) * self.rotational_radius_m.powi(3)
    }

    fn hull_surface(&self) -> f64 {
        let t = self.hab_to_radius;
        4.0 * PI * PI * self.rotational_radius_m.powi(2) * t * (1.0 - t)
    }

    fn cross_section(&self) -> f64 {
        let t = self.hab_to_radius;
        PI * self.rotational_radius_m.powi(2) * (1.0 - (1.0 - 2.0 * t).powi(2))
    }

    fn ground_area(&self, radius: f64) -> f64 {
        let width_sq = self.half_width_sq(radius);
        if width_sq > 0.0 {
            4.0 * PI * radius * width_sq.sqrt()
        } else {
            0.0
        }
    }

    fn hull_length(&self, radius: f64) -> f64 {
        if (radius - self.centre_radius()).abs() < self.tube_radius() {
            4.0 * PI * radius
        } else {
            0.0
        }
    }

    fn orientation_factor(&self, radius: f64) -> f64 {
        let width_sq = self.half_width_sq(radius);
        if width_sq > 0.0 {
            (1.0 + (radius - self.centre_radius()).powi(2) / width_sq).sqrt()
        } else {
            0.0
        }
    }

    fn supports_horizontal(&self) -> bool {
        true
    }
}

/// Sphere centred `centre_m` from the rotation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lobe {
    pub centre_m: f64,
    pub radius_m: f64,
}

impl Lobe {
    fn half_chord_sq(&self, radius: f64) -> f64 {
        self.radius_m.powi(2) - (radius - self.centre_m).powi(2)
    }

    /// Area of the sphere's intersection with the cylinder of the given radius.
    pub fn ground_area(&self, radius: f64) -> f64 {
        let b2 = self.half_chord_sq(radius);
        if b2 <= 0.0 || radius <= 0.0 {
            return 0.0;
        }
        let span = 4.0 * radius * self.centre_m;
        if b2 < span {
            let m = b2 / span;
            16.0 * radius * (radius * self.centre_m).sqrt() * (ellipe(m) - (1.0 - m) * ellipk(m))
        } else {
            8.0 * radius * b2.sqrt() * ellipe(span / b2)
        }
    }

    pub fn hull_length(&self, radius: f64) -> f64 {
        let b2 = self.half_chord_sq(radius);
        if b2 <= 0.0 || radius <= 0.0 {
            return 0.0;
        }
        let cos_phi = (radius * radius + self.centre_m.powi(2) - self.radius_m.powi(2))
            / (2.0 * radius * self.centre_m);
        let arc = if cos_phi <= -1.0 {
            PI * radius
        } else {
            radius * cos_phi.min(1.0).acos()
        };
        2.0 * PI * ((b2 + arc * arc) / 2.0).sqrt()
    }

    pub fn orientation_factor(&self, radius: f64) -> f64 {
        let b2 = self.half_chord_sq(radius);
        if b2 <= 0.0 {
            return 0.0;
        }
        self.radius_m / b2.sqrt()
    }

    /// Innermost radius of the lobe, where a connecting tube arm ends.
    pub fn arm_limit(&self) -> f64 {
        self.centre_m - self.radius_m
    }
}

/// Two spheres on opposite sides of the axis, balanced by their masses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dumbbell {
    pub rotational_radius_m: f64,
    pub opposite_radius_m: f64,
    /// Primary lobe radius over rotational radius.
    pub minor_to_radius: f64,
    /// Counterweight lobe radius over primary lobe radius.
    pub major_to_minor: f64,
}

impl Dumbbell {
    pub fn from_volume(config: &HabitatConfig, volume_m3: f64) -> Result<Self, ShapeError> {
        let m = config.dumbbell_minor_to_rot_radius;
        let big_m = config.dumbbell_major_to_minor_radius;
        let radius = lobe_radius(volume_m3, big_m) / m;
        let ratio = mass_ratio(config, radius);
        let dumbbell = Self {
            rotational_radius_m: radius,
            opposite_radius_m: opposite_radius(m, big_m, ratio, radius),
            minor_to_radius: m,
            major_to_minor: big_m,
        };
        check_opposite(dumbbell.rotational_radius_m, dumbbell.opposite_radius_m)?;
        Ok(dumbbell)
    }

    pub fn lobes(&self) -> [Lobe; 2] {
        dumbbell_lobes(
            self.rotational_radius_m,
            self.opposite_radius_m,
            self.minor_to_radius,
            self.major_to_minor,
        )
    }

    fn lobe_volume_factor(&self) -> f64 {
        4.0 * PI / 3.0 * (1.0 + self.major_to_minor.powi(3)) * self.minor_to_radius.powi(3)
    }
}

impl GeometryProvider for Dumbbell {
    fn rotational_radius(&self) -> f64 {
        self.rotational_radius_m
    }

    fn volume(&self) -> f64 {
        self.lobe_volume_factor() * self.rotational_radius_m.powi(3)
    }

    fn hull_surface(&self) -> f64 {
        4.0 * PI
            * (self.rotational_radius_m * self.minor_to_radius).powi(2)
            * (1.0 + self.major_to_minor.powi(2))
    }

    fn cross_section(&self) -> f64 {
        self.hull_surface() / 4.0
    }

    fn ground_area(&self, radius: f64) -> f64 {
        self.lobes().iter().map(|lobe| lobe.ground_area(radius)).sum()
    }

    fn hull_length(&self, radius: f64) -> f64 {
        self.lobes().iter().map(|lobe| lobe.hull_length(radius)).sum()
    }

    fn orientation_factor(&self, radius: f64) -> f64 {
        let (length, weighted) = self.lobes().iter().fold((0.0, 0.0), |(l, w), lobe| {
            let part = lobe.hull_length(radius);
            (l + part, w + part * lobe.orientation_factor(radius))
        });
        if length > 0.0 { weighted / length } else { 1.0 }
    }

    fn opposite_radius(&self) -> Option<f64> {
        Some(self.opposite_radius_m)
    }
}

/// Dumbbell whose lobes are joined by a pressurised tube through the axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DumbbellTube {
    pub rotational_radius_m: f64,
    pub opposite_radius_m: f64,
    pub minor_to_radius: f64,
    pub major_to_minor: f64,
    pub tube_to_radius: f64,
    /// Connecting tube length over rotational radius.
    pub tube_length_to_radius: f64,
}

impl DumbbellTube {
    pub fn from_volume(config: &HabitatConfig, volume_m3: f64) -> Result<Self, ShapeError> {
        let m = config.dumbbell_minor_to_rot_radius;
        let big_m = config.dumbbell_major_to_minor_radius;
        let t = config.tube_radius_to_rot_radius;

        let initial = lobe_radius(volume_m3, big_m) / m;
        let solver = FixedPoint::new(
            "dumbbell tube radius",
            Tolerance::Relative(1e-12),
            DUMBBELL_TUBE_MAX_ITERATIONS,
        );
        let radius = solver
            .solve::<ShapeError, _>(initial, |radius| {
                let length = tube_length_ratio(m, big_m, mass_ratio(config, radius));
                Ok((volume_m3 / tube_volume_factor(m, big_m, t, length)).cbrt())
            })?
            .state;

        let ratio = mass_ratio(config, radius);
        let shape = Self {
            rotational_radius_m: radius,
            opposite_radius_m: opposite_radius(m, big_m, ratio, radius),
            minor_to_radius: m,
            major_to_minor: big_m,
            tube_to_radius: t,
            tube_length_to_radius: tube_length_ratio(m, big_m, ratio),
        };
        check_opposite(shape.rotational_radius_m, shape.opposite_radius_m)?;
        Ok(shape)
    }

    /// Rebuild the shape from both radii, recovering the mass ratio they imply.
    pub fn with_radii(
        rotational_radius_m: f64,
        opposite_radius_m: f64,
        minor_to_radius: f64,
        major_to_minor: f64,
        tube_to_radius: f64,
    ) -> Self {
        let ratio = (opposite_radius_m / rotational_radius_m - major_to_minor * minor_to_radius)
            / (1.0 - minor_to_radius);
        Self {
            rotational_radius_m,
            opposite_radius_m,
            minor_to_radius,
            major_to_minor,
            tube_to_radius,
            tube_length_to_radius: tube_length_ratio(minor_to_radius, major_to_minor, ratio),
        }
    }

    pub fn lobes(&self) -> [Lobe; 2] {
        dumbbell_lobes(
            self.rotational_radius_m,
            self.opposite_radius_m,
            self.minor_to_radius,
            self.major_to_minor,
        )
    }

    fn tube_radius(&self) -> f64 {
        self.tube_to_radius * self.rotational_radius_m
    }

    /// Half a rod per lobe, covering the stretch between the axis and the lobe.
    fn arms(&self, radius: f64, rod: fn(f64, f64) -> f64) -> f64 {
        let tube_radius = self.tube_radius();
        self.lobes()
            .iter()
            .filter(|lobe| radius > 0.0 && radius <= lobe.arm_limit())
            .map(|_| rod(radius, tube_radius) / 2.0)
            .sum()
    }
}

impl GeometryProvider for DumbbellTube {
    fn rotational_radius(&self) -> f64 {
        self.rotational_radius_m
    }

    fn volume(&self) -> f64 {
        tube_volume_factor(
            self.minor_to_radius,
            self.major_to_minor,
            self.tube_to_radius,
            self.tube_length_to_radius,
        ) * self.rotational_radius_m.powi(3)
    }

    fn hull_surface(&self) -> f64 {
        let (m, big_m, t) = (self.minor_to_radius, self.major_to_minor, self.tube_to_radius);
        2.0 * PI
            * self.rotational_radius_m.powi(2)
            * (2.0 * m * m * (1.0 + big_m * big_m) + t * self.tube_length_to_radius - t * t)
    }

    fn cross_section(&self) -> f64 {
        let (m, big_m, t) = (self.minor_to_radius, self.major_to_minor, self.tube_to_radius);
        self.rotational_radius_m.powi(2)
            * (PI * m * m * (1.0 + big_m * big_m) + 2.0 * t * self.tube_length_to_radius)
    }

    fn ground_area(&self, radius: f64) -> f64 {
        let lobes: f64 = self.lobes().iter().map(|lobe| lobe.ground_area(radius)).sum();
        lobes + self.arms(radius, rod_ground_area)
    }

    fn hull_length(&self, radius: f64) -> f64 {
        let lobes: f64 = self.lobes().iter().map(|lobe| lobe.hull_length(radius)).sum();
        lobes + self.arms(radius, rod_hull_length)
    }

    fn orientation_factor(&self, radius: f64) -> f64 {
        let arms = self.arms(radius, rod_hull_length);
        let (length, weighted) = self.lobes().iter().fold((arms, arms), |(l, w), lobe| {
            let part = lobe.hull_length(radius);
            (l + part, w + part * lobe.orientation_factor(radius))
        });
        if length > 0.0 { weighted / length } else { 1.0 }
    }

    fn opposite_radius(&self) -> Option<f64> {
        Some(self.opposite_radius_m)
    }
}

/// Hull geometry of one of the six supported families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Cylinder(Cylinder),
    Tube(Tube),
    Oblate(Oblate),
    Torus(Torus),
    Dumbbell(Dumbbell),
    DumbbellTube(DumbbellTube),
}

impl Geometry {
    /// Size the configured family so that it encloses `volume_m3`.
    pub fn from_volume(config: &HabitatConfig, volume_m3: f64) -> Result<Self, ShapeError> {
        if !(volume_m3 > 0.0 && volume_m3.is_finite()) {
            return Err(ShapeError::InvalidVolume(volume_m3));
        }
        let geometry = match config.shape {
            ShapeFamily::Cylinder => Geometry::Cylinder(Cylinder::from_volume(
                volume_m3,
                config.cylinder_length_to_rot_radius,
            )),
            ShapeFamily::Tube => {
                Geometry::Tube(Tube::from_volume(volume_m3, config.tube_radius_to_rot_radius))
            }
            ShapeFamily::Oblate => {
                Geometry::Oblate(Oblate::from_volume(volume_m3, config.oblate_minor_to_rot_radius))
            }
            ShapeFamily::Torus => {
                Geometry::Torus(Torus::from_volume(volume_m3, config.torus_hab_to_rot_radius))
            }
            ShapeFamily::Dumbbell => Geometry::Dumbbell(Dumbbell::from_volume(config, volume_m3)?),
            ShapeFamily::DumbbellTube => {
                Geometry::DumbbellTube(DumbbellTube::from_volume(config, volume_m3)?)
            }
        };
        Ok(geometry)
    }

    pub fn family(&self) -> ShapeFamily {
        match self {
            Geometry::Cylinder(_) => ShapeFamily::Cylinder,
            Geometry::Tube(_) => ShapeFamily::Tube,
            Geometry::Oblate(_) => ShapeFamily::Oblate,
            Geometry::Torus(_) => ShapeFamily::Torus,
            Geometry::Dumbbell(_) => ShapeFamily::Dumbbell,
            Geometry::DumbbellTube(_) => ShapeFamily::DumbbellTube,
        }
    }

    fn provider(&self) -> &dyn GeometryProvider {
        match self {
            Geometry::Cylinder(shape) => shape,
            Geometry::Tube(shape) => shape,
            Geometry::Oblate(shape) => shape,
            Geometry::Torus(shape) => shape,
            Geometry::Dumbbell(shape) => shape,
            Geometry::DumbbellTube(shape) => shape,
        }
    }
}

impl GeometryProvider for Geometry {
    fn rotational_radius(&self) -> f64 {
        self.provider().rotational_radius()
    }

    fn volume(&self) -> f64 {
        self.provider().volume()
    }

    fn hull_surface(&self) -> f64 {
        self.provider().hull_surface()
    }

    fn cross_section(&self) -> f64 {
        self.provider().cross_section()
    }

    fn ground_area(&self, radius: f64) -> f64 {
        self.provider().ground_area(radius)
    }

    fn hull_length(&self, radius: f64) -> f64 {
        self.provider().hull_length(radius)
    }

    fn orientation_factor(&self, radius: f64) -> f64 {
        self.provider().orientation_factor(radius)
    }

    fn extra_hull_area(&self) -> f64 {
        self.provider().extra_hull_area()
    }

    fn supports_horizontal(&self) -> bool {
        self.provider().supports_horizontal()
    }

    fn opposite_radius(&self) -> Option<f64> {
        self.provider().opposite_radius()
    }
}

/// Floor area of a rod of radius `tube_radius` crossing the axis, cut at `radius`.
fn rod_ground_area(radius: f64, tube_radius: f64) -> f64 {
    if radius <= 0.0 {
        0.0
    } else if radius < tube_radius {
        2.0 * PI * radius * (tube_radius + (tube_radius.powi(2) - radius.powi(2)).sqrt())
    } else {
        2.0 * PI * tube_radius * radius * (tube_radius / radius).asin()
    }
}

fn rod_hull_length(radius: f64, tube_radius: f64) -> f64 {
    if radius <= 0.0 {
        return 0.0;
    }
    let p = radius.min(tube_radius);
    let q = radius.max(tube_radius);
    4.0 * PI * ((p * p + (q * (p / q).asin()).powi(2)) / 2.0).sqrt()
}

/// Primary lobe radius of a tube-less dumbbell enclosing `volume_m3`.
fn lobe_radius(volume_m3: f64, major: f64) -> f64 {
    (volume_m3 * 3.0 / (4.0 * PI * (1.0 + major.powi(3)))).cbrt()
}

/// Counterweight-to-primary mass ratio balancing hull and interior of both lobes.
fn mass_ratio(config: &HabitatConfig, radius: f64) -> f64 {
    let m = config.dumbbell_minor_to_rot_radius;
    let big_m = config.dumbbell_major_to_minor_radius;
    let sigma = config.hull_surface_density_kg_m2;
    let interior = config.interior_density() / 3.0 * m * radius;
    (sigma + interior) / (sigma * big_m * big_m + interior * big_m.powi(3))
}

fn opposite_radius(minor: f64, major: f64, ratio: f64, radius: f64) -> f64 {
    (major * minor + ratio * (1.0 - minor)) * radius
}

fn tube_length_ratio(minor: f64, major: f64, ratio: f64) -> f64 {
    (1.0 + ratio - minor * (2.0 + major + ratio)).max(0.0)
}

fn tube_volume_factor(minor: f64, major: f64, tube: f64, length: f64) -> f64 {
    4.0 * PI / 3.0 * (1.0 + major.powi(3)) * minor.powi(3) + PI * tube * tube * length
}

fn dumbbell_lobes(rotational: f64, opposite: f64, minor: f64, major: f64) -> [Lobe; 2] {
    let primary = minor * rotational;
    let secondary = major * primary;
    [
        Lobe {
            centre_m: rotational - primary,
            radius_m: primary,
        },
        Lobe {
            centre_m: opposite - secondary,
            radius_m: secondary,
        },
    ]
}

fn check_opposite(rotational: f64, opposite: f64) -> Result<(), ShapeError> {
    if opposite > rotational * (1.0 + OPPOSITE_RADIUS_SLACK) {
        warn!(
            rotational_radius_m = rotational,
            opposite_radius_m = opposite,
            "counterweight lobe reaches beyond the primary lobe"
        );
        return Err(ShapeError::AsymmetricDumbbell {
            rotational_radius_m: rotational,
            opposite_radius_m: opposite,
        });
    }
    Ok(())
}
