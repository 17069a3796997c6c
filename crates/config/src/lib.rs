//! Configuration model and loaders for the habitat calculator.
//!
//! A [`HabitatConfig`] carries every named physical parameter of one evaluation.
//! Files only need to list the parameters they override; everything else keeps
//! its default.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use habitat_core::constants::SOLAR_CONSTANT_W_M2;

/// Geometry family of the pressurised hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeFamily {
    Cylinder,
    Tube,
    Oblate,
    Torus,
    Dumbbell,
    DumbbellTube,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 6] = [
        ShapeFamily::Cylinder,
        ShapeFamily::Tube,
        ShapeFamily::Oblate,
        ShapeFamily::Torus,
        ShapeFamily::Dumbbell,
        ShapeFamily::DumbbellTube,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeFamily::Cylinder => "cylinder",
            ShapeFamily::Tube => "tube",
            ShapeFamily::Oblate => "oblate",
            ShapeFamily::Torus => "torus",
            ShapeFamily::Dumbbell => "dumbbell",
            ShapeFamily::DumbbellTube => "dumbbell_tube",
        }
    }
}

/// Phase of the coolant circulating through the cooling chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolantPhase {
    Liquid,
    Vapor,
    Air,
}

impl CoolantPhase {
    pub fn name(&self) -> &'static str {
        match self {
            CoolantPhase::Liquid => "liquid",
            CoolantPhase::Vapor => "vapor",
            CoolantPhase::Air => "air",
        }
    }
}

/// Pump power spent against flow resistance, as a fraction of the power
/// entering each cooling stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionFractions {
    pub absorption: f64,
    pub connection: f64,
    pub emission: f64,
}

impl FrictionFractions {
    pub fn new(absorption: f64, connection: f64, emission: f64) -> Self {
        Self {
            absorption,
            connection,
            emission,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn total(&self) -> f64 {
        self.absorption + self.connection + self.emission
    }

    /// Product `(1 + a)(1 + c)(1 + e)` of the forward-propagated friction powers.
    pub fn amplification(&self) -> f64 {
        (1.0 + self.absorption) * (1.0 + self.connection) * (1.0 + self.emission)
    }
}

/// Every parameter of a habitat evaluation (SI units unless the suffix says otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitatConfig {
    // habitat
    pub volume_per_person_m3: f64,
    pub power_per_person_w: f64,
    pub interior_mass_per_person_kg: f64,
    pub inside_power_fraction: f64,

    // geometry
    pub shape: ShapeFamily,
    pub cylinder_length_to_rot_radius: f64,
    pub tube_radius_to_rot_radius: f64,
    pub oblate_minor_to_rot_radius: f64,
    pub torus_hab_to_rot_radius: f64,
    pub dumbbell_minor_to_rot_radius: f64,
    pub dumbbell_major_to_minor_radius: f64,

    // floors
    pub constant_floor_height_m: f64,
    pub variable_floor_height_m: f64,

    // structure
    pub stress_per_density_m2_s2: f64,
    pub air_pressure_bar: f64,
    pub max_gravity_m_s2: f64,
    pub distance_between_vertical_cables_m: f64,
    pub bridge_thickness_m: f64,
    pub horizontal_support: bool,

    // energy collection
    pub solar_distance_au: f64,
    pub shaded_fraction: f64,
    pub electric_fraction: f64,
    pub electric_efficiency: f64,
    pub electric_surface_density_kg_m2: f64,
    pub concentration_factor: f64,
    pub outer_reflectivity: f64,
    pub window_reflectivity: f64,
    pub window_absorptivity: f64,
    pub max_window_temperature_k: f64,
    pub inner_reflectivity: f64,
    pub surface_intensity_w_m2: f64,
    pub light_surface_density_kg_m2: f64,
    pub max_light_volume_fraction: f64,
    pub max_collection_to_corot_radius: f64,

    // hull
    pub hull_surface_density_kg_m2: f64,
    pub hull_density_kg_m3: f64,
    pub hull_conductivity_w_mk: f64,
    pub hull_surface_absorptivity: f64,
    pub gap_thickness_m: f64,
    pub gap_location: f64,
    pub inner_gap_emissivity: f64,
    pub outer_gap_emissivity: f64,
    pub gap_transfer_coeff_w_m2k: f64,
    pub gap_conductivity_w_mk: f64,

    // coolant
    pub coolant: CoolantPhase,
    pub liquid_density_kg_m3: f64,
    pub liquid_heat_capacity_j_kgk: f64,
    pub vapor_latent_heat_j_kg: f64,

    // habitat temperature
    pub min_habitat_temp_k: f64,
    pub max_habitat_temp_k: f64,

    // heat absorption
    pub temp_diff_flow_k: f64,
    pub min_temp_diff_hab_coolant_k: f64,
    pub absorption_transfer_coeff_w_m2k: f64,
    pub absorption_surface_density_kg_m2: f64,
    pub max_coolant_volume_fraction: f64,
    pub outgoing_relative_humidity: f64,
    pub inner_surface_per_power_m2_w: f64,
    pub windy_volume_fraction: f64,

    // heat emission
    pub emissivity: f64,
    pub sky_temp_k: f64,
    pub emission_surface_density_kg_m2: f64,
    pub max_radiator_to_rot_radius: f64,
    pub max_radiator_to_corot_radius: f64,

    // friction
    pub pump_efficiency: f64,
    pub min_friction_factor: f64,
    pub is_friction_optimized: bool,
    pub absorption_friction_fraction: f64,
    pub connection_friction_fraction: f64,
    pub emission_friction_fraction: f64,
    pub max_friction_fraction: f64,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            volume_per_person_m3: 1600.0,
            power_per_person_w: 4e4,
            interior_mass_per_person_kg: 1e5,
            inside_power_fraction: 1.0,

            shape: ShapeFamily::Cylinder,
            cylinder_length_to_rot_radius: 1.3,
            tube_radius_to_rot_radius: 0.1,
            oblate_minor_to_rot_radius: 1.0,
            torus_hab_to_rot_radius: 0.25,
            dumbbell_minor_to_rot_radius: 0.1,
            dumbbell_major_to_minor_radius: 1.0,

            constant_floor_height_m: 5.0,
            variable_floor_height_m: 5.0,

            stress_per_density_m2_s2: 1e5,
            air_pressure_bar: 0.4,
            max_gravity_m_s2: 9.81,
            distance_between_vertical_cables_m: 10.0,
            bridge_thickness_m: 1.0,
            horizontal_support: true,

            solar_distance_au: 1.0,
            shaded_fraction: 0.0,
            electric_fraction: 0.25,
            electric_efficiency: 0.2,
            electric_surface_density_kg_m2: 5.0,
            concentration_factor: 400.0,
            outer_reflectivity: 0.5,
            window_reflectivity: 0.3,
            window_absorptivity: 0.05,
            max_window_temperature_k: 500.0,
            inner_reflectivity: 0.99,
            surface_intensity_w_m2: 500.0,
            light_surface_density_kg_m2: 1.0,
            max_light_volume_fraction: 0.2,
            max_collection_to_corot_radius: 1.0,

            hull_surface_density_kg_m2: 5000.0,
            hull_density_kg_m3: 1000.0,
            hull_conductivity_w_mk: 1.0,
            hull_surface_absorptivity: 0.0,
            gap_thickness_m: 0.1,
            gap_location: 0.1,
            inner_gap_emissivity: 0.9,
            outer_gap_emissivity: 0.9,
            gap_transfer_coeff_w_m2k: 5.0,
            gap_conductivity_w_mk: 0.01,

            coolant: CoolantPhase::Liquid,
            liquid_density_kg_m3: 1000.0,
            liquid_heat_capacity_j_kgk: 4280.0,
            vapor_latent_heat_j_kg: 2.453e6,

            min_habitat_temp_k: 273.0 + 12.0,
            max_habitat_temp_k: 273.0 + 27.0,

            temp_diff_flow_k: 20.0,
            min_temp_diff_hab_coolant_k: 5.0,
            absorption_transfer_coeff_w_m2k: 20.0,
            absorption_surface_density_kg_m2: 3.0,
            max_coolant_volume_fraction: 0.2,
            outgoing_relative_humidity: 0.8,
            inner_surface_per_power_m2_w: 0.01,
            windy_volume_fraction: 0.25,

            emissivity: 0.9,
            sky_temp_k: 3.0,
            emission_surface_density_kg_m2: 5.0,
            max_radiator_to_rot_radius: 2.0,
            max_radiator_to_corot_radius: 1.0,

            pump_efficiency: 0.8,
            min_friction_factor: 0.005,
            is_friction_optimized: false,
            absorption_friction_fraction: 0.01,
            connection_friction_fraction: 0.01,
            emission_friction_fraction: 0.01,
            max_friction_fraction: 0.5,
        }
    }
}

impl HabitatConfig {
    /// Sunlight reaching the habitat after distance and shading (W/m²).
    pub fn irradiation_w_m2(&self) -> f64 {
        SOLAR_CONSTANT_W_M2 / self.solar_distance_au.powi(2) * (1.0 - self.shaded_fraction)
    }

    /// Habitat power per interior volume (W/m³).
    pub fn power_per_volume(&self) -> f64 {
        self.power_per_person_w / self.volume_per_person_m3
    }

    /// Interior (payload) mass per habitat power (kg/W).
    pub fn interior_mass_per_power(&self) -> f64 {
        self.interior_mass_per_person_kg / self.power_per_person_w
    }

    /// Interior (payload) mass per interior volume (kg/m³).
    pub fn interior_density(&self) -> f64 {
        self.interior_mass_per_power() * self.power_per_volume()
    }

    /// Seed friction fractions from the configuration.
    pub fn friction_fractions(&self) -> FrictionFractions {
        FrictionFractions::new(
            self.absorption_friction_fraction,
            self.connection_friction_fraction,
            self.emission_friction_fraction,
        )
    }

    /// Reject parameter combinations that make the physical models undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("volume_per_person_m3", self.volume_per_person_m3),
            ("power_per_person_w", self.power_per_person_w),
            ("cylinder_length_to_rot_radius", self.cylinder_length_to_rot_radius),
            ("tube_radius_to_rot_radius", self.tube_radius_to_rot_radius),
            ("oblate_minor_to_rot_radius", self.oblate_minor_to_rot_radius),
            ("dumbbell_minor_to_rot_radius", self.dumbbell_minor_to_rot_radius),
            ("dumbbell_major_to_minor_radius", self.dumbbell_major_to_minor_radius),
            ("stress_per_density_m2_s2", self.stress_per_density_m2_s2),
            ("max_gravity_m_s2", self.max_gravity_m_s2),
            ("bridge_thickness_m", self.bridge_thickness_m),
            ("solar_distance_au", self.solar_distance_au),
            ("electric_efficiency", self.electric_efficiency),
            ("concentration_factor", self.concentration_factor),
            ("outer_reflectivity", self.outer_reflectivity),
            ("surface_intensity_w_m2", self.surface_intensity_w_m2),
            ("hull_density_kg_m3", self.hull_density_kg_m3),
            ("hull_conductivity_w_mk", self.hull_conductivity_w_mk),
            ("liquid_density_kg_m3", self.liquid_density_kg_m3),
            ("liquid_heat_capacity_j_kgk", self.liquid_heat_capacity_j_kgk),
            ("min_habitat_temp_k", self.min_habitat_temp_k),
            ("temp_diff_flow_k", self.temp_diff_flow_k),
            ("min_temp_diff_hab_coolant_k", self.min_temp_diff_hab_coolant_k),
            ("absorption_transfer_coeff_w_m2k", self.absorption_transfer_coeff_w_m2k),
            ("windy_volume_fraction", self.windy_volume_fraction),
            ("pump_efficiency", self.pump_efficiency),
            ("min_friction_factor", self.min_friction_factor),
            ("max_friction_fraction", self.max_friction_fraction),
            ("air_pressure_bar", self.air_pressure_bar),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("interior_mass_per_person_kg", self.interior_mass_per_person_kg),
            ("constant_floor_height_m", self.constant_floor_height_m),
            ("variable_floor_height_m", self.variable_floor_height_m),
            ("distance_between_vertical_cables_m", self.distance_between_vertical_cables_m),
            ("hull_surface_density_kg_m2", self.hull_surface_density_kg_m2),
            ("gap_thickness_m", self.gap_thickness_m),
            ("sky_temp_k", self.sky_temp_k),
            ("max_collection_to_corot_radius", self.max_collection_to_corot_radius),
            ("absorption_friction_fraction", self.absorption_friction_fraction),
            ("connection_friction_fraction", self.connection_friction_fraction),
            ("emission_friction_fraction", self.emission_friction_fraction),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("must not be negative, got {value}")));
            }
        }

        let unit_interval = [
            ("inside_power_fraction", self.inside_power_fraction),
            ("shaded_fraction", self.shaded_fraction),
            ("electric_fraction", self.electric_fraction),
            ("window_reflectivity", self.window_reflectivity),
            ("window_absorptivity", self.window_absorptivity),
            ("inner_reflectivity", self.inner_reflectivity),
            ("max_light_volume_fraction", self.max_light_volume_fraction),
            ("hull_surface_absorptivity", self.hull_surface_absorptivity),
            ("gap_location", self.gap_location),
            ("max_coolant_volume_fraction", self.max_coolant_volume_fraction),
        ];
        for (field, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("must lie in [0, 1], got {value}")));
            }
        }

        let emissivities = [
            ("emissivity", self.emissivity),
            ("inner_gap_emissivity", self.inner_gap_emissivity),
            ("outer_gap_emissivity", self.outer_gap_emissivity),
            ("outgoing_relative_humidity", self.outgoing_relative_humidity),
        ];
        for (field, value) in emissivities {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::invalid(field, format!("must lie in (0, 1], got {value}")));
            }
        }

        if self.window_reflectivity + self.window_absorptivity >= 1.0 {
            return Err(ConfigError::invalid(
                "window_absorptivity",
                "window reflectivity plus absorptivity must stay below 1".to_string(),
            ));
        }
        if !(self.torus_hab_to_rot_radius > 0.0 && self.torus_hab_to_rot_radius < 1.0) {
            return Err(ConfigError::invalid(
                "torus_hab_to_rot_radius",
                format!("must lie in (0, 1), got {}", self.torus_hab_to_rot_radius),
            ));
        }
        if self.dumbbell_minor_to_rot_radius >= 1.0 {
            return Err(ConfigError::invalid(
                "dumbbell_minor_to_rot_radius",
                format!("must stay below 1, got {}", self.dumbbell_minor_to_rot_radius),
            ));
        }
        if self.max_habitat_temp_k <= self.min_habitat_temp_k {
            return Err(ConfigError::invalid(
                "max_habitat_temp_k",
                "must exceed min_habitat_temp_k".to_string(),
            ));
        }
        if self.constant_floor_height_m + self.variable_floor_height_m <= 0.0 {
            return Err(ConfigError::invalid(
                "constant_floor_height_m",
                "floor height rule must produce positive heights".to_string(),
            ));
        }
        Ok(())
    }
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid parameter `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("no configuration found in {0}")]
    Empty(PathBuf),
}

impl ConfigError {
    fn invalid(field: &'static str, reason: String) -> Self {
        ConfigError::Invalid { field, reason }
    }
}

/// Load and validate a single configuration from a `.toml` or `.yaml`/`.yml` file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HabitatConfig, ConfigError> {
    let path = path.as_ref();
    let config: HabitatConfig = if is_toml(path) {
        toml::from_str(&std::fs::read_to_string(path)?)?
    } else {
        serde_yaml::from_reader(File::open(path)?)?
    };
    config.validate()?;
    Ok(config)
}

/// Load and validate every configuration from a directory of `.toml` files
/// (sorted by name), a single TOML file, or a YAML list.
pub fn load_configs<P: AsRef<Path>>(path: P) -> Result<Vec<HabitatConfig>, ConfigError> {
    let path = path.as_ref();
    let configs: Vec<HabitatConfig> = load_records(path)?;
    if configs.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    for config in &configs {
        config.validate()?;
    }
    Ok(configs)
}

/// Geometrically spaced powers between `min` and `max` (inclusive).
pub fn log_range(count: usize, min: f64, max: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max.ln() - min.ln()) / (count - 1) as f64;
            (0..count)
                .map(|i| (min.ln() + step * i as f64).exp())
                .collect()
        }
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if is_toml(path) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
