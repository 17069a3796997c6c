//! Thermal models of the habitat: coolant properties, heat flow through the hull,
//! concentrated lighting, and the absorption, emission and connection stages of the
//! cooling loop.
//!
//! Each cooling stage is an immutable value computed from the previous stage's
//! output; [`CoolingChain`] threads the single mass flow through all three.

pub mod absorption;
pub mod chain;
pub mod connection;
pub mod emission;
pub mod hull;
pub mod light;
pub mod properties;

pub use absorption::Absorption;
pub use chain::{CoolingChain, CoolingLoad};
pub use connection::{Connection, ConnectionLoad, connection_velocity};
pub use emission::{Emission, RadiatorBounds};
pub use hull::{GapRadiation, HullTransfer, gap_radiation};
pub use light::LightCollection;
pub use properties::{CoolingProperties, friction_factor};

use habitat_core::IterationError;
use thiserror::Error;

/// Fatal failures of the thermal solvers. Infeasible designs are not errors; they
/// are flagged on the stage results instead.
#[derive(Debug, Error)]
pub enum ThermalError {
    #[error(transparent)]
    Iteration(#[from] IterationError),
}
