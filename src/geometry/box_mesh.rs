//! Procedural triangle meshes for boxes and planes.
//!
//! Every box face gets its own four vertices so normals stay flat. Faces are
//! wound counter-clockwise when looked at from outside.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::model::ModelVertex;

/// CPU side of a mesh, ready to be uploaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    fn with_capacity(faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(faces * 4),
            indices: Vec::with_capacity(faces * 6),
        }
    }

    /// Adds a quad centred at `center` spanning `±du` and `±dv`.
    ///
    /// `du × dv` must point along `normal` for the quad to face outwards.
    fn push_quad(
        &mut self,
        center: Vector3<f32>,
        du: Vector3<f32>,
        dv: Vector3<f32>,
        normal: Vector3<f32>,
    ) {
        let base = self.vertices.len() as u32;
        let corners = [
            (center - du - dv, [0.0, 1.0]),
            (center + du - dv, [1.0, 1.0]),
            (center + du + dv, [1.0, 0.0]),
            (center - du + dv, [0.0, 0.0]),
        ];
        for (position, tex_coords) in corners {
            self.vertices.push(ModelVertex {
                position: position.into(),
                tex_coords,
                normal: normal.into(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Outward normal and in-face "up" direction of each box face.
const BOX_FACES: [([f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
];

/// A box of the given extent centred on the origin: 24 vertices, 12 triangles.
pub fn box_mesh(extent: Vector3<f32>) -> MeshData {
    let half = extent / 2.0;
    let scale = |axis: Vector3<f32>| Vector3::new(axis.x * half.x, axis.y * half.y, axis.z * half.z);

    let mut mesh = MeshData::with_capacity(BOX_FACES.len());
    for (normal, up) in BOX_FACES {
        let normal: Vector3<f32> = normal.into();
        let v: Vector3<f32> = up.into();
        // (v × n) × v == n for orthonormal axes
        let u = v.cross(normal);
        mesh.push_quad(scale(normal), scale(u), scale(v), normal.normalize());
    }
    mesh
}

/// A plane in the xy-plane facing +z, centred on the origin.
pub fn plane_mesh(width: f32, height: f32) -> MeshData {
    let mut mesh = MeshData::with_capacity(1);
    mesh.push_quad(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(width / 2.0, 0.0, 0.0),
        Vector3::new(0.0, height / 2.0, 0.0),
        Vector3::unit_z(),
    );
    mesh
}
