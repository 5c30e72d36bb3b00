//! Engine data structures: meshes, materials, drawables and the scene content.
//!
//! - `model` contains vertex layouts, GPU meshes and the draw call helper
//! - `material` holds material presets and the shared GPU material
//! - `texture` is the depth texture wrapper
//! - `instance` holds per-instance transformation data
//! - `drawable` is the resizable drawable and the backend it allocates from
//! - `cabinet` is the five-panel parametric cabinet
//! - `showroom` is the static backdrop

pub mod cabinet;
pub mod drawable;
pub mod instance;
pub mod material;
pub mod model;
pub mod showroom;
pub mod texture;
