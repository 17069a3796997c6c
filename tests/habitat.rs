use habitat_calculator::geometry::ShapeError;
use habitat_calculator::{
    CoolantPhase, FrictionFractions, HabitatConfig, HabitatError, ShapeFamily, evaluate_gravity,
    evaluate_habitat, evaluate_habitat_with_hull_flux, evaluate_shape, optimize_habitat,
};

fn config(shape: ShapeFamily) -> HabitatConfig {
    HabitatConfig {
        shape,
        ..HabitatConfig::default()
    }
}

#[test]
fn default_cylinder_matches_reference_cooling_mass() {
    let config = HabitatConfig::default();
    let habitat = evaluate_habitat(&config, 1e10, FrictionFractions::new(0.01, 0.01, 0.01))
        .expect("habitat");
    let log_mass = habitat.total_cooling_mass_kg.log10();
    assert!((log_mass - 8.964883982294).abs() < 1e-9, "log10 = {log_mass:.12}");
    assert!(habitat.total_mass_kg > habitat.total_cooling_mass_kg);
}

#[test]
fn floors_reproduce_shape_volume_for_every_family() {
    for shape in ShapeFamily::ALL {
        let config = config(shape);
        let sized = evaluate_shape(&config, 1e10).expect("shape");
        let gravity = evaluate_gravity(&config, &sized);

        let volume_ratio = gravity.total_volume() / sized.hab_volume_m3;
        assert!((volume_ratio - 1.0).abs() < 0.05, "{shape:?}: volume ratio {volume_ratio}");
        let hull_ratio = gravity.total_hull_area() / sized.hull_surface_m2;
        assert!(hull_ratio > 0.85 && hull_ratio < 1.05, "{shape:?}: hull ratio {hull_ratio}");

        assert!(gravity.average_ground_gravity <= config.max_gravity_m_s2 * (1.0 + 1e-12));
    }
}

#[test]
fn floors_reproduce_asymmetric_dumbbell_volume() {
    for shape in [ShapeFamily::Dumbbell, ShapeFamily::DumbbellTube] {
        let config = HabitatConfig {
            shape,
            dumbbell_major_to_minor_radius: 3.0,
            ..HabitatConfig::default()
        };
        let sized = evaluate_shape(&config, 1e10).expect("shape");
        let opposite = sized.opposite_rotational_radius_m.expect("counterweight");
        assert!(opposite < sized.rotational_radius_m);

        let gravity = evaluate_gravity(&config, &sized);
        let volume_ratio = gravity.total_volume() / sized.hab_volume_m3;
        assert!((volume_ratio - 1.0).abs() < 0.1, "{shape:?}: volume ratio {volume_ratio}");
        let hull_ratio = gravity.total_hull_area() / sized.hull_surface_m2;
        assert!((hull_ratio - 1.0).abs() < 0.1, "{shape:?}: hull ratio {hull_ratio}");
    }
}

#[test]
fn every_family_evaluates() {
    for shape in ShapeFamily::ALL {
        let habitat = evaluate_habitat(&config(shape), 1e10, FrictionFractions::new(0.01, 0.01, 0.01))
            .unwrap_or_else(|err| panic!("{shape:?}: {err}"));
        assert_eq!(habitat.shape.geometry.family(), shape);
        assert!(habitat.total_mass_kg.is_finite() && habitat.total_mass_kg > 0.0);
    }
}

#[test]
fn counterweight_larger_than_habitat_lobe_is_rejected() {
    for shape in [ShapeFamily::Dumbbell, ShapeFamily::DumbbellTube] {
        let config = HabitatConfig {
            shape,
            dumbbell_major_to_minor_radius: 0.5,
            ..HabitatConfig::default()
        };
        let err = evaluate_shape(&config, 1e10).expect_err("inverted dumbbell");
        assert!(
            matches!(err, HabitatError::Shape(ShapeError::AsymmetricDumbbell { .. })),
            "{shape:?}: {err}"
        );
    }
}

#[test]
fn symmetric_dumbbell_balances_on_the_axis() {
    let sized = evaluate_shape(&config(ShapeFamily::Dumbbell), 1e10).expect("shape");
    let opposite = sized.opposite_rotational_radius_m.expect("counterweight");
    assert!((opposite / sized.rotational_radius_m - 1.0).abs() < 1e-9);
}

#[test]
fn optimizer_respects_friction_budget() {
    for max_friction_fraction in [0.5, 0.01] {
        let config = HabitatConfig {
            max_friction_fraction,
            ..HabitatConfig::default()
        };
        let habitat = optimize_habitat(&config, 1e10).expect("optimized");
        assert!(habitat.requested_fractions.total() <= max_friction_fraction * (1.0 + 1e-12));
    }
}

#[test]
fn reused_hull_flux_reproduces_full_evaluation() {
    let config = HabitatConfig::default();
    let fractions = config.friction_fractions();
    let full = evaluate_habitat(&config, 1e10, fractions).expect("full");
    let reused = evaluate_habitat_with_hull_flux(
        &config,
        1e10,
        fractions,
        Some(full.hull_power_per_surface_w_m2),
    )
    .expect("reused");
    assert_eq!(reused.total_cooling_mass_kg, full.total_cooling_mass_kg);
    assert_eq!(reused.total_mass_kg, full.total_mass_kg);
}

#[test]
fn coolant_phases_trade_mass_flow() {
    let mass_flow = |coolant| {
        let config = HabitatConfig {
            coolant,
            ..HabitatConfig::default()
        };
        evaluate_habitat(&config, 1e9, config.friction_fractions())
            .expect("habitat")
            .cooling
            .absorption
            .mass_flow_kg_s
    };
    let liquid = mass_flow(CoolantPhase::Liquid);
    let vapor = mass_flow(CoolantPhase::Vapor);
    // latent heat carries far more energy per kilogram than a 20 K swing
    assert!(vapor < liquid / 10.0);
    assert!(mass_flow(CoolantPhase::Air) > 0.0);
}

#[test]
fn invalid_configuration_never_reaches_the_model() {
    let config = HabitatConfig {
        max_habitat_temp_k: 280.0,
        ..HabitatConfig::default()
    };
    let err = evaluate_habitat(&config, 1e10, config.friction_fractions()).expect_err("invalid");
    assert!(matches!(err, HabitatError::Config(_)));
}
