use wgpu::util::DeviceExt;

use crate::{data_structures::model, geometry::box_mesh::MeshData};

/**
 * Uploads a procedurally built mesh into fresh vertex and index buffers.
 *
 * The buffers belong to the returned mesh; call `Mesh::destroy` to free them
 * before the mesh is replaced.
 */
pub fn upload_mesh(device: &wgpu::Device, name: &str, data: &MeshData) -> model::Mesh {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(&data.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(&data.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    model::Mesh {
        name: name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: data.indices.len() as u32,
    }
}
