//! Concentrated sunlight delivered through windows and reflective light channels.

use habitat_config::HabitatConfig;
use habitat_core::constants::{AU_M, STEFAN_BOLTZMANN, SUN_RADIUS_M};

/// Mirror, window and light-channel system delivering `light_power_w` of daylight.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCollection {
    pub light_power_w: f64,
    /// Apparent angular spread of the concentrated beam (rad).
    pub max_angular_deviation: f64,
    pub light_channel_surface_m2: f64,
    /// Power absorbed by the imperfect channel walls.
    pub light_abs_power_w: f64,
    pub window_power_w: f64,
    pub light_collection_area_m2: f64,
    pub window_area_m2: f64,
    pub light_mass_kg: f64,
    pub window_temperature_k: f64,
    /// Heat the window cannot radiate away on its own once it sits at its temperature limit.
    pub window_cooling_power_w: f64,
    pub window_to_hab_power_w: f64,
    pub light_volume_m3: f64,
    /// Whether the collection area fits within the habitat's own cross-section.
    pub is_unconcentrated_lighting_possible: bool,
}

impl LightCollection {
    pub fn new(
        config: &HabitatConfig,
        light_power_w: f64,
        hab_radius_m: f64,
        cross_section_m2: f64,
    ) -> Self {
        let irradiation = config.irradiation_w_m2();
        let transmission = 1.0 - config.window_reflectivity - config.window_absorptivity;
        let radiator = config.emissivity * STEFAN_BOLTZMANN;

        let max_angular_deviation =
            config.concentration_factor.sqrt() * SUN_RADIUS_M / AU_M / config.solar_distance_au;
        let light_channel_surface_m2 = light_power_w / config.surface_intensity_w_m2;
        let light_abs_power_w = light_channel_surface_m2
            * (1.0 - config.inner_reflectivity)
            * irradiation
            * (config.solar_distance_au * AU_M).powi(2)
            / (3.0 * SUN_RADIUS_M.powi(2))
            * config.outer_reflectivity
            * transmission
            * max_angular_deviation.powi(3);
        let window_power_w = (light_power_w + light_abs_power_w) / transmission;
        let light_collection_area_m2 = window_power_w / config.outer_reflectivity / irradiation;
        let window_area_m2 = light_collection_area_m2 / config.concentration_factor;
        let light_mass_kg =
            (light_collection_area_m2 + light_channel_surface_m2) * config.light_surface_density_kg_m2;

        let sky4 = config.sky_temp_k.powi(4);
        let hab4 = config.max_habitat_temp_k.powi(4);
        let equilibrium = (0.5
            * (config.window_absorptivity * window_power_w / (window_area_m2 * radiator) + sky4 + hab4))
            .powf(0.25);
        let window_temperature_k = config.max_window_temperature_k.min(equilibrium);
        let window_cooling_power_w = if window_temperature_k < config.max_window_temperature_k {
            0.0
        } else {
            config.window_absorptivity * window_power_w
                - window_area_m2 * radiator * (2.0 * window_temperature_k.powi(4) - sky4 - hab4)
        };
        let window_to_hab_power_w = window_area_m2 * radiator * (window_temperature_k.powi(4) - hab4);

        let light_volume_m3 = (light_power_w + light_abs_power_w)
            / (3.0 * config.outer_reflectivity * transmission * config.concentration_factor * irradiation)
            * hab_radius_m;

        Self {
            light_power_w,
            max_angular_deviation,
            light_channel_surface_m2,
            light_abs_power_w,
            window_power_w,
            light_collection_area_m2,
            window_area_m2,
            light_mass_kg,
            window_temperature_k,
            window_cooling_power_w,
            window_to_hab_power_w,
            light_volume_m3,
            is_unconcentrated_lighting_possible: light_collection_area_m2 < cross_section_m2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_area_follows_window_power() {
        let config = HabitatConfig::default();
        let light = LightCollection::new(&config, 7.5e9, 460.95, 6.7e5);
        let transmission = 1.0 - 0.3 - 0.05;
        assert!((light.window_power_w * transmission - (7.5e9 + light.light_abs_power_w)).abs() < 1.0);
        assert!((light.light_collection_area_m2 - light.window_power_w / 0.5 / 1360.0).abs() < 1e-6);
        assert!((light.window_area_m2 * 400.0 - light.light_collection_area_m2).abs() < 1e-6);
        assert!(light.light_channel_surface_m2 == 1.5e7);
        assert!(!light.is_unconcentrated_lighting_possible);
    }

    #[test]
    fn window_temperature_is_capped() {
        let config = HabitatConfig {
            window_absorptivity: 0.3,
            window_reflectivity: 0.1,
            max_window_temperature_k: 350.0,
            ..HabitatConfig::default()
        };
        let light = LightCollection::new(&config, 1e9, 100.0, 1e4);
        assert_eq!(light.window_temperature_k, 350.0);
        assert!(light.window_cooling_power_w > 0.0);
    }

    #[test]
    fn cool_window_needs_no_extra_cooling() {
        let config = HabitatConfig {
            window_absorptivity: 1e-4,
            ..HabitatConfig::default()
        };
        let light = LightCollection::new(&config, 1e6, 10.0, 1e4);
        assert!(light.window_temperature_k < config.max_window_temperature_k);
        assert_eq!(light.window_cooling_power_w, 0.0);
    }
}
