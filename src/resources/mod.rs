//! GPU resources behind drawables.
//!
//! [`GpuBackend`] implements [`GeometryBackend`] on top of wgpu: every geometry
//! is a vertex buffer, an index buffer and a one-element instance buffer.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        drawable::GeometryBackend,
        instance::Instance,
        material::SurfaceMaterial,
        model::Mesh,
    },
    error::ResourceError,
    geometry::box_mesh::{box_mesh, plane_mesh, MeshData},
};

pub mod mesh;

#[derive(Debug)]
pub struct GpuGeometry {
    pub mesh: Mesh,
    pub instance_buffer: wgpu::Buffer,
}

#[derive(Debug)]
pub struct GpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    live: usize,
}

impl GpuBackend {
    /// Device and queue are reference counted, cloning them only clones the handle.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            live: 0,
        }
    }

    /// Uploads a ready-made mesh, for instance a model supplied by the host.
    ///
    /// The geometry is released like any other through [`GeometryBackend::release`].
    pub fn allocate_mesh(&mut self, label: &str, data: &MeshData) -> GpuGeometry {
        let mesh = mesh::upload_mesh(&self.device, label, data);
        let instance_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Instance Buffer", label)),
                contents: bytemuck::cast_slice(&[Instance::default().to_raw()]),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            });
        self.live += 1;
        GpuGeometry {
            mesh,
            instance_buffer,
        }
    }
}

fn degenerate(label: &str, size: &[f32]) -> Option<ResourceError> {
    size.iter()
        .any(|v| !(v.is_finite() && *v > 0.0))
        .then(|| ResourceError::Allocate {
            label: label.to_string(),
            reason: format!("degenerate size {:?}", size),
        })
}

impl GeometryBackend for GpuBackend {
    type Geometry = GpuGeometry;
    type Material = SurfaceMaterial;

    fn allocate_box(
        &mut self,
        label: &str,
        extent: Vector3<f32>,
    ) -> Result<Self::Geometry, ResourceError> {
        if let Some(e) = degenerate(label, &[extent.x, extent.y, extent.z]) {
            return Err(e);
        }
        Ok(self.allocate_mesh(label, &box_mesh(extent)))
    }

    fn allocate_plane(
        &mut self,
        label: &str,
        width: f32,
        height: f32,
    ) -> Result<Self::Geometry, ResourceError> {
        if let Some(e) = degenerate(label, &[width, height]) {
            return Err(e);
        }
        Ok(self.allocate_mesh(label, &plane_mesh(width, height)))
    }

    fn release(&mut self, label: &str, geometry: Self::Geometry) -> Result<(), ResourceError> {
        geometry.mesh.destroy();
        geometry.instance_buffer.destroy();
        self.live = self.live.saturating_sub(1);
        log::trace!("Released geometry of {}, {} still live", label, self.live);
        Ok(())
    }

    fn upload_transform(
        &mut self,
        geometry: &Self::Geometry,
        transform: &Instance,
    ) -> Result<(), ResourceError> {
        self.queue.write_buffer(
            &geometry.instance_buffer,
            0,
            bytemuck::cast_slice(&[transform.to_raw()]),
        );
        Ok(())
    }
}
