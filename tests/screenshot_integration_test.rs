#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_save_a_screenshot_of_the_cabinet() {
    use cabinet_configurator::{
        config::ConfiguratorConfig,
        configurator::{ConfiguratorFlow, ConfiguratorState},
        context::InitContext,
        flow::{FlowConstructor, GraphicsFlow, run_with_state},
        lighting::LightingMode,
    };

    use crate::common::test_utils::window::CaptureThenExit;

    let dir = std::env::temp_dir().join(format!("cabinet-screenshot-test-{}", std::process::id()));
    let path = dir.join("cabinet.png");

    let config = ConfiguratorConfig {
        sun_hour: Some(12.0),
        export_dir: dir.clone(),
        ..Default::default()
    };
    let state = ConfiguratorState::from_config(&config);
    assert_eq!(state.lighting, LightingMode::Manual(12.0));

    let screenshot = Some(path.clone());
    let constructor: FlowConstructor<ConfiguratorState> = Box::new(move |ctx: InitContext| {
        Box::pin(async move {
            let flow = ConfiguratorFlow::new(ctx, &config, None)?;
            assert!(flow.cabinet().is_some());
            Ok(Box::new(CaptureThenExit {
                inner: flow,
                screenshot,
                frames_left: 5,
            }) as Box<dyn GraphicsFlow<ConfiguratorState>>)
        })
    });

    run_with_state(state, vec![constructor]).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert!(image.width() > 0 && image.height() > 0);
    assert!(image.pixels().all(|px| px.0[3] == 255));
    std::fs::remove_dir_all(&dir).unwrap();
}
