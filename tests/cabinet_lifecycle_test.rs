use std::rc::Rc;

use approx::assert_relative_eq;
use cabinet_configurator::{
    cgmath::Vector3,
    data_structures::cabinet::Cabinet,
    error::{CabinetError, DimensionError, ResourceError},
    geometry::layout::{Dimensions, PanelName, layout},
};

use crate::common::test_utils::{CountingBackend, MockMaterial};

mod common;

fn new_cabinet(backend: &mut CountingBackend) -> (Cabinet<CountingBackend>, Rc<MockMaterial>) {
    let material = Rc::new(MockMaterial("oak"));
    let cabinet = Cabinet::new(backend, Rc::clone(&material)).expect("cabinet is created");
    (cabinet, material)
}

#[test]
fn should_create_five_placeholder_panels() {
    let mut backend = CountingBackend::new();
    let (cabinet, material) = new_cabinet(&mut backend);

    assert_eq!(backend.allocations, 5);
    assert_eq!(backend.live_count(), 5);
    assert_eq!(cabinet.dimensions(), None);
    for name in PanelName::ALL {
        let panel = cabinet.panel(name);
        assert_eq!(panel.label(), name.as_str());
        assert_eq!(panel.extent(), Vector3::new(1.0, 1.0, 1.0));
        assert!(Rc::ptr_eq(panel.material(), &material));
    }
    assert_eq!(cabinet.group().members().values().count(), 5);
}

#[test]
fn should_release_and_allocate_exactly_five_per_update() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, _) = new_cabinet(&mut backend);

    for dims in [
        Dimensions::new(1.0, 2.0, 0.5),
        Dimensions::new(1.5, 2.0, 0.5),
        Dimensions::new(4.0, 0.7, 3.3),
        Dimensions::new(1.0, 2.0, 0.5),
    ] {
        backend.reset_counters();
        cabinet.update(&mut backend, dims).unwrap();
        assert_eq!(backend.releases, 5);
        assert_eq!(backend.allocations, 5);
        assert_eq!(backend.live_count(), 5);
    }
}

#[test]
fn should_leave_no_residue_from_previous_update() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, _) = new_cabinet(&mut backend);

    cabinet.update(&mut backend, Dimensions::new(1.0, 2.0, 0.5)).unwrap();
    cabinet.update(&mut backend, Dimensions::new(2.0, 2.0, 0.5)).unwrap();

    let expected = layout(Dimensions::new(2.0, 2.0, 0.5), cabinet.thickness()).unwrap();
    assert_eq!(cabinet.placements(), expected);
    assert_relative_eq!(cabinet.panel(PanelName::Top).extent().x, 1.9, epsilon = 1e-6);
    for name in PanelName::ALL {
        let geometry = cabinet.panel(name).geometry().expect("panel has geometry");
        let extent = cabinet.panel(name).extent();
        assert_eq!(geometry.size, vec![extent.x, extent.y, extent.z]);
    }
    assert_eq!(backend.live_count(), 5);
}

#[test]
fn should_reject_too_narrow_cabinet_without_touching_panels() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, _) = new_cabinet(&mut backend);
    cabinet.update(&mut backend, Dimensions::new(1.0, 2.0, 0.5)).unwrap();
    let before = cabinet.placements();
    backend.reset_counters();

    let err = cabinet
        .update(&mut backend, Dimensions::new(0.05, 2.0, 0.5))
        .unwrap_err();

    assert!(matches!(
        err,
        CabinetError::Dimension(DimensionError::TooSmall { .. })
    ));
    assert_eq!(cabinet.placements(), before);
    assert_eq!(cabinet.dimensions(), Some(Dimensions::new(1.0, 2.0, 0.5)));
    assert_eq!(backend.releases, 0);
    assert_eq!(backend.allocations, 0);
}

#[test]
fn should_keep_drawable_identity_across_updates() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, material) = new_cabinet(&mut backend);
    let before: Vec<*const _> = cabinet
        .group()
        .members()
        .values()
        .map(|panel| panel as *const _)
        .collect();

    cabinet.update(&mut backend, Dimensions::new(3.0, 3.0, 3.0)).unwrap();

    let after: Vec<*const _> = cabinet
        .group()
        .members()
        .values()
        .map(|panel| panel as *const _)
        .collect();
    assert_eq!(before, after);
    // the cabinet holds one loan per panel
    assert_eq!(Rc::strong_count(&material), 6);
}

#[test]
fn should_replace_all_panels_when_one_release_fails() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, _) = new_cabinet(&mut backend);
    backend.fail_release_for = Some("top".to_string());
    backend.reset_counters();

    let err = cabinet
        .update(&mut backend, Dimensions::new(1.0, 2.0, 0.5))
        .unwrap_err();

    assert!(matches!(
        err,
        CabinetError::Resource(ResourceError::Release { ref label, .. }) if label == "top"
    ));
    assert_eq!(backend.releases, 5);
    assert_eq!(backend.allocations, 5);
    assert_eq!(backend.live_count(), 5);
    assert_eq!(
        cabinet.placements(),
        layout(Dimensions::new(1.0, 2.0, 0.5), cabinet.thickness()).unwrap()
    );
    assert_eq!(cabinet.dimensions(), Some(Dimensions::new(1.0, 2.0, 0.5)));
}

#[test]
fn should_keep_panel_in_place_when_its_new_geometry_fails() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, _) = new_cabinet(&mut backend);
    cabinet
        .update(&mut backend, Dimensions::new(1.0, 2.0, 0.5))
        .unwrap();
    let old_top = cabinet.placements()[PanelName::Top];

    backend.fail_allocation_for = Some("top".to_string());
    let resized = Dimensions::new(3.0, 3.0, 1.0);
    let err = cabinet.update(&mut backend, resized).unwrap_err();

    assert!(matches!(
        err,
        CabinetError::Resource(ResourceError::Allocate { ref label, .. }) if label == "top"
    ));
    assert_eq!(cabinet.dimensions(), None);
    assert_eq!(backend.live_count(), 4);
    assert!(cabinet.panel(PanelName::Top).geometry().is_none());
    assert_eq!(cabinet.placements()[PanelName::Top], old_top);

    let expected = layout(resized, cabinet.thickness()).unwrap();
    for name in [
        PanelName::Left,
        PanelName::Right,
        PanelName::Bottom,
        PanelName::Back,
    ] {
        assert_eq!(cabinet.placements()[name], expected[name]);
        assert!(cabinet.panel(name).geometry().is_some());
    }

    backend.fail_allocation_for = None;
    cabinet.update(&mut backend, resized).unwrap();
    assert_eq!(cabinet.dimensions(), Some(resized));
    assert_eq!(backend.live_count(), 5);
    assert_eq!(cabinet.placements(), expected);
}

#[test]
fn should_roll_back_when_construction_fails() {
    let mut backend = CountingBackend::new();
    backend.fail_allocation_for = Some("bottom".to_string());

    let result = Cabinet::new(&mut backend, Rc::new(MockMaterial("oak")));

    assert!(matches!(
        result,
        Err(CabinetError::Resource(ResourceError::Allocate { .. }))
    ));
    assert_eq!(backend.live_count(), 0);
}

#[test]
fn should_reject_invalid_thickness() {
    let mut backend = CountingBackend::new();
    let result = Cabinet::with_thickness(&mut backend, Rc::new(MockMaterial("oak")), -0.1);
    assert!(matches!(
        result,
        Err(CabinetError::Dimension(DimensionError::InvalidThickness(_)))
    ));
    assert_eq!(backend.allocations, 0);
}

#[test]
fn should_release_everything_but_the_material_on_dispose() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, material) = new_cabinet(&mut backend);
    cabinet.update(&mut backend, Dimensions::new(1.0, 2.0, 0.5)).unwrap();

    cabinet.dispose(&mut backend).unwrap();

    assert_eq!(backend.live_count(), 0);
    assert_eq!(Rc::strong_count(&material), 1);
    assert_eq!(*material, MockMaterial("oak"));
}

#[test]
fn should_upload_panel_transforms_relative_to_the_origin() {
    let mut backend = CountingBackend::new();
    let (mut cabinet, _) = new_cabinet(&mut backend);
    cabinet.set_origin(Vector3::new(2.0, 0.0, -1.0));
    cabinet.update(&mut backend, Dimensions::new(1.0, 2.0, 0.5)).unwrap();
    backend.reset_counters();

    cabinet.write_to_buffers(&mut backend).unwrap();

    assert_eq!(backend.uploads.len(), 5);
    let (label, left) = &backend.uploads[0];
    assert_eq!(label, "left");
    assert_relative_eq!(left.position.x, 2.0 - 0.475, epsilon = 1e-6);
    assert_relative_eq!(left.position.y, 1.0, epsilon = 1e-6);
    assert_relative_eq!(left.position.z, -1.0, epsilon = 1e-6);
}

#[test]
fn should_look_up_panels_by_name() {
    let mut backend = CountingBackend::new();
    let (cabinet, _) = new_cabinet(&mut backend);

    assert_eq!(cabinet.panel_named("back").unwrap().label(), "back");
    assert!(cabinet.panel_named("shelf").is_err());
}
