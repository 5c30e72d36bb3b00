use std::path::PathBuf;

use approx::assert_relative_eq;
use cabinet_configurator::{
    config::{ConfiguratorConfig, SliderRange},
    configurator::View,
    data_structures::material::MaterialPreset,
    geometry::layout::Dimensions,
};

#[test]
fn should_provide_defaults() {
    let config = ConfiguratorConfig::default();
    assert_eq!(config.wall_thickness, 0.05);
    assert_eq!(
        config.slider,
        SliderRange {
            min: 0.5,
            max: 5.0,
            step: 0.1
        }
    );
    assert_eq!(config.initial_dimensions, Dimensions::new(1.0, 2.0, 0.5));
    assert_eq!(config.initial_view, View::Cabinet);
    assert_eq!(config.material, MaterialPreset::Oak);
    assert_eq!(config.export_dir, PathBuf::from("exports"));
    assert_eq!(config.cabinet_origin, [0.0, 0.0, 0.0]);
    assert!(config.validate().is_ok());
}

#[test]
fn should_read_partial_toml() {
    assert_eq!(
        ConfiguratorConfig::from_toml_str("").unwrap(),
        ConfiguratorConfig::default()
    );

    let config = ConfiguratorConfig::from_toml_str(
        r#"
        material = "steel"
        initial_view = "chair"
        sun_hour = 17.5

        [slider]
        max = 3.0

        [initial_dimensions]
        width = 2.0
        height = 1.0
        depth = 0.8
        "#,
    )
    .unwrap();
    assert_eq!(config.material, MaterialPreset::Steel);
    assert_eq!(config.initial_view, View::Chair);
    assert_eq!(config.sun_hour, Some(17.5));
    assert_eq!(config.slider.min, 0.5);
    assert_eq!(config.slider.max, 3.0);
    assert_eq!(config.initial_dimensions, Dimensions::new(2.0, 1.0, 0.8));
    assert_eq!(config.wall_thickness, 0.05);
}

#[test]
fn should_reject_unusable_settings() {
    // slider minimum no longer leaves room for two walls
    assert!(ConfiguratorConfig::from_toml_str("wall_thickness = 0.3").is_err());
    assert!(ConfiguratorConfig::from_toml_str("wall_thickness = -1.0").is_err());
    assert!(ConfiguratorConfig::from_toml_str("initial_view = \"sofa\"").is_err());
    assert!(ConfiguratorConfig::from_toml_str("[slider]\nstep = 0.0").is_err());
    assert!(ConfiguratorConfig::from_toml_str("[slider]\nmin = 6.0").is_err());
    assert!(ConfiguratorConfig::from_toml_str("sun_hour = 24.0").is_err());
}

#[test]
fn should_load_config_file() {
    let path = std::env::temp_dir().join(format!(
        "cabinet-configurator-test-{}.toml",
        std::process::id()
    ));
    std::fs::write(&path, "export_dir = \"out\"\ncabinet_origin = [1.0, 0.0, -2.0]\n").unwrap();

    let config = ConfiguratorConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.export_dir, PathBuf::from("out"));
    assert_eq!(config.cabinet_origin, [1.0, 0.0, -2.0]);
    assert!(ConfiguratorConfig::from_file(&path).is_err());
}

#[test]
fn should_snap_slider_values() {
    let slider = SliderRange::default();
    assert_eq!(slider.snap(0.2), Some(0.5));
    assert_eq!(slider.snap(9.0), Some(5.0));
    assert_relative_eq!(slider.snap(1.26).unwrap(), 1.3, epsilon = 1e-5);
    assert_relative_eq!(slider.nudge(1.0, 3).unwrap(), 1.3, epsilon = 1e-5);
    assert_relative_eq!(slider.nudge(0.5, -1).unwrap(), 0.5);
    assert_eq!(slider.snap(f32::NAN), None);
    assert!(slider.same_step(1.0, 1.04));
    assert!(!slider.same_step(1.0, 1.1));
}
