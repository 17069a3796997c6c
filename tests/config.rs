use std::fs;

use habitat_calculator::config::ConfigError;
use habitat_calculator::{CoolantPhase, ShapeFamily, load_config, load_configs, log_range};

#[test]
fn toml_and_yaml_files_override_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let toml_path = dir.path().join("torus.toml");
    fs::write(&toml_path, "shape = \"torus\"\ntorus_hab_to_rot_radius = 0.2\n").expect("write");
    let yaml_path = dir.path().join("vapor.yaml");
    fs::write(&yaml_path, "coolant: vapor\nair_pressure_bar: 1.0\n").expect("write");

    let torus = load_config(&toml_path).expect("toml");
    assert_eq!(torus.shape, ShapeFamily::Torus);
    assert_eq!(torus.torus_hab_to_rot_radius, 0.2);
    assert_eq!(torus.coolant, CoolantPhase::Liquid);

    let vapor = load_config(&yaml_path).expect("yaml");
    assert_eq!(vapor.coolant, CoolantPhase::Vapor);
    assert_eq!(vapor.air_pressure_bar, 1.0);
    assert_eq!(vapor.shape, ShapeFamily::Cylinder);
}

#[test]
fn directory_of_configs_loads_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("b.toml"), "shape = \"oblate\"\n").expect("write");
    fs::write(dir.path().join("a.toml"), "shape = \"tube\"\n").expect("write");

    let configs = load_configs(dir.path()).expect("configs");
    let shapes: Vec<ShapeFamily> = configs.iter().map(|c| c.shape).collect();
    assert_eq!(shapes, vec![ShapeFamily::Tube, ShapeFamily::Oblate]);
}

#[test]
fn yaml_list_yields_every_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("set.yaml");
    fs::write(&path, "- shape: dumbbell\n- coolant: air\n").expect("write");

    let configs = load_configs(&path).expect("configs");
    assert_eq!(configs.len(), 2);
    assert_eq!(configs[0].shape, ShapeFamily::Dumbbell);
    assert_eq!(configs[1].coolant, CoolantPhase::Air);
}

#[test]
fn out_of_range_parameter_names_the_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gap.toml");
    fs::write(&path, "gap_location = 1.5\n").expect("write");

    match load_config(&path) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "gap_location"),
        other => panic!("expected invalid gap_location, got {other:?}"),
    }
}

#[test]
fn power_sweep_is_geometric() {
    let powers = log_range(3, 1e9, 1e11);
    assert_eq!(powers.len(), 3);
    assert!((powers[1] / 1e10 - 1.0).abs() < 1e-12);
    assert_eq!(log_range(1, 5e9, 1e11), vec![5e9]);
}
