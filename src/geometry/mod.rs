//! Backend-free geometry: the cabinet panel layout and procedural meshes.
//!
//! - `layout` turns outer dimensions into five panel placements
//! - `box_mesh` builds triangle meshes for boxes and planes

pub mod box_mesh;
pub mod layout;
