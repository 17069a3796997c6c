//! Absorption, emission and connection evaluated in sequence for one friction split.

use habitat_config::{FrictionFractions, HabitatConfig};
use habitat_core::floored;
use tracing::debug;

use crate::ThermalError;
use crate::absorption::Absorption;
use crate::connection::{Connection, ConnectionLoad};
use crate::emission::{Emission, RadiatorBounds};
use crate::properties::CoolingProperties;

/// Heat the cooling loop must carry and the habitat it is attached to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingLoad {
    pub cooling_power_w: f64,
    /// Power dissipated outside the habitat, radiated by the same radiator.
    pub outside_power_w: f64,
    pub hab_radius_m: f64,
    pub hab_length_m: f64,
    pub hab_volume_m3: f64,
    pub rotational_radius_m: f64,
    pub corotational_radius_m: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoolingChain {
    pub absorption: Absorption,
    pub emission: Emission,
    pub connection: Connection,
    /// Requested fractions with the absorption share replaced by the one actually spent.
    pub fractions: FrictionFractions,
    pub is_cooling_possible: bool,
    pub cooling_report: Option<String>,
    /// Electric power drawn by pumps and fans.
    pub electric_cooling_power_w: f64,
}

impl CoolingChain {
    pub fn evaluate(
        config: &HabitatConfig,
        props: &CoolingProperties,
        load: CoolingLoad,
        requested: FrictionFractions,
    ) -> Result<Self, ThermalError> {
        let absorption = Absorption::new(
            config,
            props,
            load.cooling_power_w,
            requested,
            load.hab_radius_m,
            load.hab_volume_m3,
        )?;
        let fractions = FrictionFractions {
            absorption: absorption.friction_power_w / floored(load.cooling_power_w),
            ..requested
        };

        let emission = Emission::new(
            config,
            props,
            load.cooling_power_w,
            fractions,
            absorption.mass_flow_kg_s,
            load.outside_power_w,
            RadiatorBounds {
                rotational_radius_m: load.rotational_radius_m,
                corotational_radius_m: load.corotational_radius_m,
            },
        );

        let connection = Connection::new(
            config,
            props,
            ConnectionLoad {
                hab_radius_m: load.hab_radius_m,
                hab_length_m: load.hab_length_m,
                hab_volume_m3: load.hab_volume_m3,
                absorption_volume_m3: absorption.volume_m3,
                emission_surface_m2: emission.surface_m2,
                emission_radius_m: emission.radius_m,
                mass_flow_kg_s: absorption.mass_flow_kg_s,
                friction_power_w: emission.connection_friction_power_w,
                friction_fraction: fractions.connection,
            },
        );

        let is_cooling_possible = absorption.is_cooling_possible && connection.is_cooling_possible;
        let cooling_report = if !absorption.is_cooling_possible {
            absorption.report.clone()
        } else {
            connection.report.clone()
        };
        let electric_cooling_power_w = (fractions.amplification() - 1.0) * load.cooling_power_w;

        debug!(
            mass_flow_kg_s = absorption.mass_flow_kg_s,
            radiator_surface_m2 = emission.surface_m2,
            radiator_radius_m = emission.radius_m,
            is_cooling_possible,
            "cooling chain evaluated"
        );

        Ok(Self {
            absorption,
            emission,
            connection,
            fractions,
            is_cooling_possible,
            cooling_report,
            electric_cooling_power_w,
        })
    }

    pub fn coolant_mass_kg(&self) -> f64 {
        self.absorption.coolant_mass_kg
            + self.connection.coolant_mass_kg
            + self.emission.coolant_mass_kg
    }

    pub fn surface_mass_kg(&self) -> f64 {
        self.absorption.surface_mass_kg
            + self.connection.surface_mass_kg
            + self.emission.surface_mass_kg
    }

    /// Coolant and pipe mass carried by the radiator structure.
    pub fn radiator_mass_kg(&self) -> f64 {
        self.emission.coolant_mass_kg + self.emission.surface_mass_kg
    }

    /// Coolant volume held at habitat pressure outside the habitat.
    pub fn pressured_volume_m3(&self) -> f64 {
        self.connection.volume_m3 + self.emission.volume_m3
    }

    pub fn pressured_coolant_mass_kg(&self) -> f64 {
        self.connection.coolant_mass_kg + self.emission.coolant_mass_kg
    }
}
