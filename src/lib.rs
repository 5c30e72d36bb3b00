//! cabinet-configurator
//!
//! An interactive 3D product configurator running natively and in the
//! browser. A showroom displays either a host supplied chair or a parametric
//! cabinet whose five panels are regenerated whenever one of its three
//! dimensions changes. The surface material and a daylight rig can be
//! adjusted, and the result exported as a screenshot or a spec sheet.
//!
//! High-level modules
//! - `geometry`: the pure cabinet layout and procedural box meshes
//! - `data_structures`: drawables, the cabinet, the showroom, materials and meshes
//! - `resources`: the wgpu backend that allocates and frees drawable geometry
//! - `configurator`: configurator state, key bindings and the configurator flow
//! - `lighting`: the sun and its uniform
//! - `camera`: the fixed showroom camera
//! - `context`: central GPU and window context that owns device, queue and pipeline
//! - `flow`: the event loop and the flow abstraction
//! - `render`: render composition
//! - `export`: spec sheets and screenshots
//! - `config`: defaults and the optional TOML configuration
//!

pub mod camera;
pub mod config;
pub mod configurator;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod export;
pub mod flow;
pub mod geometry;
pub mod lighting;
pub mod pipelines;
pub mod render;
pub mod resources;

pub use cgmath;
pub use winit::event::WindowEvent;

use crate::{
    config::ConfiguratorConfig,
    configurator::{ConfiguratorFlow, ConfiguratorState},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Runs the configurator with the given settings and no chair model.
pub fn run_configurator(config: ConfiguratorConfig) -> anyhow::Result<()> {
    let state = ConfiguratorState::from_config(&config);
    flow::run_with_state(state, vec![ConfiguratorFlow::constructor(config, None)])
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    run_configurator(ConfiguratorConfig::default()).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}
