//! Surface materials.
//!
//! A [`SurfaceMaterial`] is created once by the host and shared by reference
//! with every panel that uses it. Switching between presets rewrites its
//! uniform buffer in place, so the panels never have to be rebuilt.

use std::fmt;

use serde::Deserialize;
use wgpu::util::DeviceExt;

/// Colour and finish of a surface. `color` is in sRGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub color: [f32; 3],
    pub roughness: f32,
    pub metalness: f32,
}

impl MaterialParams {
    /// Builds parameters from a `0xRRGGBB` colour.
    pub fn from_hex(hex: u32, roughness: f32, metalness: f32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            color: [channel(16), channel(8), channel(0)],
            roughness,
            metalness,
        }
    }

    pub fn to_uniform(&self) -> MaterialUniform {
        let [r, g, b] = self.color;
        MaterialUniform {
            base_color: [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0],
            roughness: self.roughness,
            metalness: self.metalness,
            _padding: [0.0; 2],
        }
    }
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The finishes offered for the showcased furniture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    #[default]
    Oak,
    Steel,
}

impl MaterialPreset {
    pub fn params(self) -> MaterialParams {
        match self {
            MaterialPreset::Oak => MaterialParams::from_hex(0x8b5a2b, 0.7, 0.1),
            MaterialPreset::Steel => MaterialParams::from_hex(0xaaaaaa, 0.2, 1.0),
        }
    }

    pub fn next(self) -> Self {
        match self {
            MaterialPreset::Oak => MaterialPreset::Steel,
            MaterialPreset::Steel => MaterialPreset::Oak,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialPreset::Oak => "Oak",
            MaterialPreset::Steel => "Steel",
        }
    }
}

impl fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    base_color: [f32; 4],
    roughness: f32,
    metalness: f32,
    // Uniforms require 16 byte spacing
    _padding: [f32; 2],
}

pub fn material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("material_bind_group_layout"),
    })
}

/// A material living on the GPU.
#[derive(Debug)]
pub struct SurfaceMaterial {
    pub name: String,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl SurfaceMaterial {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        name: &str,
        params: MaterialParams,
    ) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Material Buffer", name)),
            contents: bytemuck::cast_slice(&[params.to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some(&format!("{} Material Bind Group", name)),
        });
        Self {
            name: name.to_string(),
            buffer,
            bind_group,
        }
    }

    /// Changes the look of every mesh drawn with this material.
    pub fn apply(&self, queue: &wgpu::Queue, params: MaterialParams) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[params.to_uniform()]));
    }
}
