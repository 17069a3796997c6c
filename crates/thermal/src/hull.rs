//! Steady-state heat flux leaking through the hull.
//!
//! The hull is modelled as an inner convective film, the inner hull layer, a gas
//! gap (convection, conduction and grey-body radiation in parallel), the outer
//! hull layer, and a radiating outer surface facing the sky.

use habitat_config::HabitatConfig;
use habitat_core::constants::STEFAN_BOLTZMANN;
use habitat_core::{FixedPoint, Step, Tolerance};

use crate::ThermalError;

const HULL_MAX_ITERATIONS: usize = 10_000;
const GAP_MAX_ITERATIONS: usize = 10_000;
/// Initial flux guess (W/m²), one damped step away from zero.
const INITIAL_FLUX_W_M2: f64 = 20.0;
const FLUX_DAMPING: f64 = 0.2;

/// Radiative exchange between two grey parallel plates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapRadiation {
    /// Temperature difference per transmitted flux (m²K/W).
    pub resistance_m2k_w: f64,
    pub effective_emissivity: f64,
    /// Reflection orders that contributed to the exchanged power.
    pub reflections: usize,
}

#[derive(Debug, Clone, Copy)]
struct Reflection {
    from_hot: f64,
    from_cold: f64,
    power: f64,
    order: usize,
    counted: usize,
}

/// Sum the series of reflections between plates at `t1` and `t2` until the net
/// power changes by less than 1 %.
pub fn gap_radiation(t1: f64, t2: f64, e1: f64, e2: f64) -> Result<GapRadiation, ThermalError> {
    let (r1, r2) = (1.0 - e1, 1.0 - e2);
    let from_hot = e1 * STEFAN_BOLTZMANN * t1.powi(4);
    let from_cold = -e2 * STEFAN_BOLTZMANN * t2.powi(4);
    let initial = Reflection {
        from_hot,
        from_cold,
        power: from_hot + from_cold,
        order: 0,
        counted: 0,
    };

    let solver = FixedPoint::new("gap radiation", Tolerance::Relative(0.01), GAP_MAX_ITERATIONS);
    let solution = solver.iterate(
        initial,
        |state| state.power,
        |state| {
            let order = state.order + 1;
            let (hot_factor, cold_factor) = if order % 2 == 1 { (r2, r1) } else { (r1, r2) };
            let from_hot = -state.from_hot * hot_factor;
            let from_cold = -state.from_cold * cold_factor;
            let contribution = from_hot + from_cold;
            let next = Reflection {
                from_hot,
                from_cold,
                power: state.power + contribution,
                order,
                counted: state.counted + usize::from(contribution != 0.0),
            };
            if from_hot == 0.0 && from_cold == 0.0 {
                Step::Halt(next)
            } else {
                Step::Next(next)
            }
        },
    )?;

    let power = solution.state.power;
    Ok(GapRadiation {
        resistance_m2k_w: (t1 - t2) / power,
        effective_emissivity: power / STEFAN_BOLTZMANN / (t1.powi(4) - t2.powi(4)),
        reflections: solution.state.counted,
    })
}

/// Converged heat flux through the hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullTransfer {
    /// Power leaving the habitat per square metre of hull (W/m²), never negative.
    pub power_per_surface_w_m2: f64,
    pub iterations: usize,
}

impl HullTransfer {
    /// Solve the hull balance for a habitat whose sunlit cross-section is
    /// `cross_section_to_hull` times its hull surface.
    pub fn new(config: &HabitatConfig, cross_section_to_hull: f64) -> Result<Self, ThermalError> {
        let solver = FixedPoint::new("hull transfer", Tolerance::Absolute(0.1), HULL_MAX_ITERATIONS)
            .with_damping(FLUX_DAMPING);
        let solution = solver.solve(INITIAL_FLUX_W_M2, |flux| {
            outer_surface_balance(config, flux, cross_section_to_hull)
        })?;
        Ok(Self {
            power_per_surface_w_m2: solution.state,
            iterations: solution.iterations,
        })
    }
}

/// Net radiation of the outer surface when `flux` is conducted through the hull.
fn outer_surface_balance(
    config: &HabitatConfig,
    flux: f64,
    cross_section_to_hull: f64,
) -> Result<f64, ThermalError> {
    let resistance =
        config.hull_surface_density_kg_m2 / config.hull_density_kg_m3 / config.hull_conductivity_w_mk;

    let inner_hull = config.min_habitat_temp_k - flux / config.absorption_transfer_coeff_w_m2k;
    let inner_gap = inner_hull - flux * config.gap_location * resistance;
    let outer_gap = if config.gap_thickness_m > 0.0 {
        let radiation = gap_radiation(
            inner_gap,
            inner_gap - 1.0,
            config.inner_gap_emissivity,
            config.outer_gap_emissivity,
        )?;
        inner_gap
            - flux
                / (config.gap_transfer_coeff_w_m2k / 2.0
                    + config.gap_conductivity_w_mk / config.gap_thickness_m
                    + 1.0 / radiation.resistance_m2k_w)
    } else {
        inner_gap
    };
    let surface = config
        .sky_temp_k
        .max(outer_gap - flux * (1.0 - config.gap_location) * resistance);

    let emitted = config.emissivity * STEFAN_BOLTZMANN * (surface.powi(4) - config.sky_temp_k.powi(4));
    let absorbed = config.irradiation_w_m2() * config.hull_surface_absorptivity * cross_section_to_hull;
    Ok((emitted - absorbed).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_plates_need_no_reflections() {
        let gap = gap_radiation(300.0, 299.0, 1.0, 1.0).expect("converges");
        assert_eq!(gap.reflections, 0);
        let expected = STEFAN_BOLTZMANN * (300.0_f64.powi(4) - 299.0_f64.powi(4));
        assert!((1.0 / gap.resistance_m2k_w - expected).abs() < 1e-9 * expected);
        assert!((gap.effective_emissivity - 1.0).abs() < 1e-12);
    }

    #[test]
    fn grey_plates_approach_parallel_plate_emissivity() {
        let gap = gap_radiation(300.0, 299.0, 0.9, 0.9).expect("converges");
        assert!(gap.reflections > 0);
        // closed form 1 / (1/e1 + 1/e2 - 1)
        let closed = 1.0 / (2.0 / 0.9 - 1.0);
        assert!((gap.effective_emissivity - closed).abs() < 0.02, "{}", gap.effective_emissivity);
    }

    #[test]
    fn default_hull_leaks_reference_flux() {
        let hull = HullTransfer::new(&HabitatConfig::default(), 1.0 / (2.0 * 2.3)).expect("hull");
        assert!(
            (hull.power_per_surface_w_m2 - 25.906).abs() < 1e-3,
            "flux = {}",
            hull.power_per_surface_w_m2
        );
    }

    #[test]
    fn sunlit_hull_never_reports_negative_flux() {
        let config = HabitatConfig {
            hull_surface_absorptivity: 1.0,
            ..HabitatConfig::default()
        };
        let hull = HullTransfer::new(&config, 1.0).expect("hull");
        // the damped iterate decays toward the clamped balance of zero
        assert!(hull.power_per_surface_w_m2 >= 0.0);
        assert!(hull.power_per_surface_w_m2 < 0.1);
    }

    #[test]
    fn insulating_hull_transmits_less() {
        let mut previous = f64::INFINITY;
        for conductivity in [10.0, 1.0, 0.1, 0.01] {
            let config = HabitatConfig {
                hull_conductivity_w_mk: conductivity,
                ..HabitatConfig::default()
            };
            let flux = HullTransfer::new(&config, 0.2).expect("hull").power_per_surface_w_m2;
            assert!(flux >= 0.0);
            assert!(flux < previous, "k = {conductivity}: {flux} !< {previous}");
            previous = flux;
        }
    }
}
