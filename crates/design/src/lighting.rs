//! Daylight supply with fallback to electric lighting when the optics do not fit.

use habitat_config::HabitatConfig;
use habitat_geometry::Shape;
use habitat_thermal::LightCollection;
use tracing::warn;

/// Light collection actually built, after any fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    /// Share of habitat power supplied electrically (lamps and appliances).
    pub electric_fraction: f64,
    pub light_power_w: f64,
    pub collection: LightCollection,
    /// Whether the configured electric fraction could be kept.
    pub is_complete_lighting: bool,
    pub report: Option<String>,
}

impl Lighting {
    pub fn new(config: &HabitatConfig, shape: &Shape, power_w: f64) -> Self {
        let hab_radius_m = shape.effective_radius_m();
        let collect = |electric_fraction: f64| {
            LightCollection::new(
                config,
                power_w * (1.0 - electric_fraction),
                hab_radius_m,
                shape.cross_section_m2,
            )
        };

        let max_light_volume = config.max_light_volume_fraction * shape.hab_volume_m3;
        let collection = collect(config.electric_fraction);
        let fits = collection.is_unconcentrated_lighting_possible
            || (collection.light_volume_m3 < max_light_volume
                && collection.window_area_m2 < shape.hull_surface_m2);
        if fits {
            return Self {
                electric_fraction: config.electric_fraction,
                light_power_w: collection.light_power_w,
                collection,
                is_complete_lighting: true,
                report: None,
            };
        }

        let report = if collection.window_area_m2 > shape.hull_surface_m2 {
            format!(
                "Window area ({:.1e} m²) would surpass hull area",
                collection.window_area_m2
            )
        } else {
            format!(
                "Light channel volume ({:.1e} m³) would surpass maximum fraction of habitat volume",
                collection.light_volume_m3
            )
        };
        warn!(%report, power_w, "falling back to electric lighting");

        // shrink daylight until the tighter of both limits is met
        let scale = (max_light_volume / collection.light_volume_m3)
            .min(shape.hull_surface_m2 / collection.window_area_m2);
        let electric_fraction = 1.0 - (1.0 - config.electric_fraction) * scale;
        let collection = collect(electric_fraction);
        Self {
            electric_fraction,
            light_power_w: collection.light_power_w,
            collection,
            is_complete_lighting: false,
            report: Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_habitat_is_lit_by_daylight() {
        let config = HabitatConfig::default();
        let shape = Shape::new(&config, 1e10).expect("shape");
        let lighting = Lighting::new(&config, &shape, 1e10);
        assert!(lighting.is_complete_lighting);
        assert_eq!(lighting.electric_fraction, 0.25);
        assert!((lighting.light_power_w - 7.5e9).abs() < 1e-3);
    }

    #[test]
    fn cramped_light_channels_fall_back_to_electric_light() {
        let config = HabitatConfig {
            max_light_volume_fraction: 1e-4,
            ..HabitatConfig::default()
        };
        let shape = Shape::new(&config, 1e10).expect("shape");
        let lighting = Lighting::new(&config, &shape, 1e10);
        assert!(!lighting.is_complete_lighting);
        let report = lighting.report.as_deref().expect("report");
        assert!(report.starts_with("Light channel volume"));
        assert!(lighting.electric_fraction > 0.25 && lighting.electric_fraction < 1.0);
        let limit = 1e-4 * shape.hab_volume_m3;
        assert!((lighting.collection.light_volume_m3 / limit - 1.0).abs() < 1e-6);
    }
}
