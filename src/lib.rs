//! Mass and feasibility model of rotating space habitats.
//!
//! The physics lives in the member crates; this package ties them together so
//! front-ends (the `habitat` CLI, notebooks, other tools) depend on one crate.

pub use habitat_config as config;
pub use habitat_core as numerics;
pub use habitat_design as design;
pub use habitat_export as export;
pub use habitat_geometry as geometry;
pub use habitat_structure as structure;
pub use habitat_thermal as thermal;

pub use habitat_config::{
    CoolantPhase, FrictionFractions, HabitatConfig, ShapeFamily, load_config, load_configs,
    log_range,
};
pub use habitat_design::{
    Habitat, HabitatError, design_habitat, evaluate_gravity, evaluate_habitat,
    evaluate_habitat_with_hull_flux, evaluate_shape, optimize_habitat,
};

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
