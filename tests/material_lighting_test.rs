use approx::assert_relative_eq;
use cabinet_configurator::{
    camera::CameraUniform,
    data_structures::{
        instance::InstanceRaw,
        material::{MaterialParams, MaterialPreset, MaterialUniform, srgb_to_linear},
    },
    lighting::{DAYLIGHT_INTENSITY, LightUniform, LightingMode, sun_at, wrap_hours},
};

#[test]
fn should_decode_hex_colours() {
    let params = MaterialParams::from_hex(0x8b5a2b, 0.7, 0.1);
    assert_relative_eq!(params.color[0], 139.0 / 255.0);
    assert_relative_eq!(params.color[1], 90.0 / 255.0);
    assert_relative_eq!(params.color[2], 43.0 / 255.0);
}

#[test]
fn should_offer_oak_and_steel() {
    assert_eq!(MaterialPreset::default(), MaterialPreset::Oak);
    assert_eq!(
        MaterialPreset::Oak.params(),
        MaterialParams::from_hex(0x8b5a2b, 0.7, 0.1)
    );
    assert_eq!(
        MaterialPreset::Steel.params(),
        MaterialParams::from_hex(0xaaaaaa, 0.2, 1.0)
    );
    assert_eq!(MaterialPreset::Oak.next(), MaterialPreset::Steel);
    assert_eq!(MaterialPreset::Steel.next(), MaterialPreset::Oak);
    assert_eq!(MaterialPreset::Steel.to_string(), "Steel");
}

#[test]
fn should_convert_srgb_to_linear() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert_relative_eq!(srgb_to_linear(1.0), 1.0, epsilon = 1e-6);
    assert_relative_eq!(srgb_to_linear(0.5), 0.214_041, epsilon = 1e-5);
}

#[test]
fn should_keep_uniforms_16_byte_aligned() {
    assert_eq!(std::mem::size_of::<MaterialUniform>(), 32);
    assert_eq!(std::mem::size_of::<LightUniform>(), 32);
    assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 100);
}

#[test]
fn should_put_the_sun_overhead_at_noon() {
    let sun = sun_at(12.0);
    assert_relative_eq!(sun.position.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(sun.position.y, 10.0, epsilon = 1e-5);
    assert_relative_eq!(sun.position.z, 3.0);
    assert_eq!(sun.color, [1.0, 1.0, 1.0]);
    assert_eq!(sun.intensity, DAYLIGHT_INTENSITY);
}

#[test]
fn should_colour_the_sun_orange_at_dawn_and_dusk() {
    let orange = [1.0, srgb_to_linear(165.0 / 255.0), 0.0];

    let dawn = sun_at(6.0);
    assert_relative_eq!(dawn.position.x, 10.0, epsilon = 1e-5);
    assert_relative_eq!(dawn.position.y, 0.0, epsilon = 1e-5);
    for (c, o) in dawn.color.iter().zip(orange) {
        assert_relative_eq!(*c, o, epsilon = 1e-6);
    }
    // the day starts strictly after six
    assert_eq!(dawn.intensity, 0.0);

    let dusk = sun_at(18.0);
    assert_relative_eq!(dusk.position.x, -10.0, epsilon = 1e-5);
    assert_eq!(dusk.intensity, DAYLIGHT_INTENSITY);
    for (c, o) in dusk.color.iter().zip(orange) {
        assert_relative_eq!(*c, o, epsilon = 1e-6);
    }

    let morning = sun_at(9.0);
    assert_relative_eq!(morning.color[1], 1.0 + (orange[1] - 1.0) * 0.5, epsilon = 1e-6);
}

#[test]
fn should_switch_the_sun_off_at_night() {
    for hour in [0.0, 3.0, 5.9, 20.0, 23.5] {
        assert_eq!(sun_at(hour).intensity, 0.0, "hour {}", hour);
    }
}

#[test]
fn should_wrap_manual_hours() {
    assert_relative_eq!(wrap_hours(25.0), 1.0);
    assert_relative_eq!(wrap_hours(-0.5), 23.5);
    assert_eq!(
        LightingMode::Manual(23.5).shifted(1.0),
        LightingMode::Manual(0.5)
    );
    assert_eq!(
        LightingMode::Manual(0.0).shifted(-0.5),
        LightingMode::Manual(23.5)
    );
    match LightingMode::Clock.shifted(0.5) {
        LightingMode::Manual(hours) => assert!((0.0..24.0).contains(&hours)),
        LightingMode::Clock => panic!("shifting the sun leaves clock mode"),
    }
}
