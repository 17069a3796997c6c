//! Habitat geometry: analytic shape families and the floor-by-floor gravity distribution.
//!
//! Every family implements [`GeometryProvider`] once; [`Gravity`] and the structural
//! model only ever see that capability, never the family enum.

pub mod families;
pub mod gravity;
pub mod shape;

pub use families::{Cylinder, Dumbbell, DumbbellTube, Geometry, Lobe, Oblate, Torus, Tube};
pub use gravity::{Floor, Gravity};
pub use shape::{Shape, ShapeError};

/// Geometric capability shared by every shape family.
///
/// Radii passed to the per-radius functions are distances from the rotation axis.
pub trait GeometryProvider {
    /// Radius of the outermost (floor-level) point, where gravity is at its maximum.
    fn rotational_radius(&self) -> f64;

    /// Interior volume enclosed by the hull.
    fn volume(&self) -> f64;

    fn hull_surface(&self) -> f64;

    fn cross_section(&self) -> f64;

    /// Floor area available at distance `radius` from the axis.
    fn ground_area(&self, radius: f64) -> f64;

    /// Length of the hull contour cut by the cylinder of the given radius.
    fn hull_length(&self, radius: f64) -> f64;

    /// Ratio of hull area to its projection onto the axial direction.
    fn orientation_factor(&self, radius: f64) -> f64;

    /// Hull area not reached by the floor sweep (end caps, outer wall).
    fn extra_hull_area(&self) -> f64 {
        0.0
    }

    /// Whether ring-shaped horizontal support can carry the interior.
    fn supports_horizontal(&self) -> bool {
        false
    }

    /// Rotational radius of the counterweight lobe, for dumbbell families.
    fn opposite_radius(&self) -> Option<f64> {
        None
    }
}
