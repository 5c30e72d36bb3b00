use approx::assert_relative_eq;
use cabinet_configurator::{
    error::{Axis, DimensionError, InvariantViolation},
    geometry::layout::{DEFAULT_WALL_THICKNESS, Dimensions, PanelName, layout},
};

const T: f32 = DEFAULT_WALL_THICKNESS;

fn assert_vec(actual: cabinet_configurator::cgmath::Vector3<f32>, expected: [f32; 3]) {
    assert_relative_eq!(actual.x, expected[0], epsilon = 1e-6);
    assert_relative_eq!(actual.y, expected[1], epsilon = 1e-6);
    assert_relative_eq!(actual.z, expected[2], epsilon = 1e-6);
}

#[test]
fn should_place_panels_of_reference_cabinet() {
    let panels = layout(Dimensions::new(1.0, 2.0, 0.5), T).expect("valid dimensions");

    assert_vec(panels[PanelName::Left].extent, [0.05, 2.0, 0.5]);
    assert_vec(panels[PanelName::Left].position, [-0.475, 1.0, 0.0]);
    assert_vec(panels[PanelName::Right].extent, [0.05, 2.0, 0.5]);
    assert_vec(panels[PanelName::Right].position, [0.475, 1.0, 0.0]);
    assert_vec(panels[PanelName::Top].extent, [0.9, 0.05, 0.5]);
    // height - t/2 = 2.0 - 0.025
    assert_vec(panels[PanelName::Top].position, [0.0, 1.975, 0.0]);
    assert_vec(panels[PanelName::Bottom].extent, [0.9, 0.05, 0.5]);
    assert_vec(panels[PanelName::Bottom].position, [0.0, 0.025, 0.0]);
    assert_vec(panels[PanelName::Back].extent, [0.9, 1.9, 0.05]);
    assert_vec(panels[PanelName::Back].position, [0.0, 1.0, -0.225]);
}

#[test]
fn should_be_deterministic() {
    let dims = Dimensions::new(3.7, 1.3, 0.9);
    assert_eq!(layout(dims, T), layout(dims, T));
}

#[test]
fn should_keep_panels_adjacent() {
    for (w, h, d) in [(0.5, 0.5, 0.5), (1.0, 2.0, 0.5), (5.0, 4.2, 1.7), (2.3, 5.0, 5.0)] {
        let panels = layout(Dimensions::new(w, h, d), T).unwrap();
        let inner_width = w - 2.0 * T;

        assert_relative_eq!(panels[PanelName::Top].extent.x, inner_width, epsilon = 1e-6);
        assert_relative_eq!(panels[PanelName::Bottom].extent.x, inner_width, epsilon = 1e-6);
        assert_relative_eq!(panels[PanelName::Back].extent.x, inner_width, epsilon = 1e-6);
        assert_relative_eq!(panels[PanelName::Back].extent.y, h - 2.0 * T, epsilon = 1e-6);

        // Top and bottom end exactly where the side panels begin.
        let left = &panels[PanelName::Left];
        let top = &panels[PanelName::Top];
        assert_relative_eq!(
            left.position.x + left.extent.x / 2.0,
            top.position.x - top.extent.x / 2.0,
            epsilon = 1e-5
        );
        // The back panel sits flush with the rear face.
        let back = &panels[PanelName::Back];
        assert_relative_eq!(back.position.z - back.extent.z / 2.0, -d / 2.0, epsilon = 1e-6);
    }
}

#[test]
fn should_mirror_side_panels() {
    let panels = layout(Dimensions::new(2.4, 1.1, 0.6), T).unwrap();
    assert_eq!(
        panels[PanelName::Left].position.x,
        -panels[PanelName::Right].position.x
    );
    assert_eq!(panels[PanelName::Left].extent, panels[PanelName::Right].extent);
}

#[test]
fn should_reject_dimensions_at_twice_the_thickness() {
    // Deliberately stricter than passing degenerate extents to the renderer.
    let err = layout(Dimensions::new(0.1, 2.0, 0.5), T).unwrap_err();
    assert!(matches!(err, DimensionError::TooSmall { axis: Axis::Width, .. }));

    let err = layout(Dimensions::new(1.0, 2.0, 0.05), T).unwrap_err();
    assert!(matches!(err, DimensionError::TooSmall { axis: Axis::Depth, .. }));

    assert!(layout(Dimensions::new(0.11, 0.11, 0.11), T).is_ok());
}

#[test]
fn should_reject_non_finite_dimensions_and_thickness() {
    let err = layout(Dimensions::new(1.0, f32::NAN, 0.5), T).unwrap_err();
    assert!(matches!(err, DimensionError::NonFinite { axis: Axis::Height, .. }));

    let err = layout(Dimensions::new(f32::INFINITY, 1.0, 0.5), T).unwrap_err();
    assert!(matches!(err, DimensionError::NonFinite { axis: Axis::Width, .. }));

    assert_eq!(
        layout(Dimensions::new(1.0, 1.0, 1.0), 0.0),
        Err(DimensionError::InvalidThickness(0.0))
    );
}

#[test]
fn should_parse_only_known_panel_names() {
    for name in PanelName::ALL {
        assert_eq!(name.as_str().parse::<PanelName>(), Ok(name));
    }
    assert_eq!(
        "door".parse::<PanelName>(),
        Err(InvariantViolation("door".to_string()))
    );
}
