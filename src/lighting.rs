//! Daylight rig.
//!
//! A single directional sun circles the showroom once a day. Its height,
//! colour and brightness follow the hour, either taken from the local clock or
//! set by hand.

use std::f32::consts::PI;

use cgmath::Vector3;
use chrono::Timelike;
use wgpu::util::DeviceExt;

use crate::data_structures::material::srgb_to_linear;

/// Distance of the sun from the origin.
pub const SUN_RADIUS: f32 = 10.0;
/// Constant fill light standing in for the studio environment.
pub const AMBIENT: f32 = 0.25;
pub const DAYLIGHT_INTENSITY: f32 = 1.5;

const DUSK_COLOR: u32 = 0xffa500;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunState {
    pub position: Vector3<f32>,
    /// Linear RGB.
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Sun placement for an hour of the day in `[0, 24)`.
///
/// The sun rises in +x at 6:00, peaks at noon and turns orange towards dawn
/// and dusk. It is switched off outside of 6:00 to 20:00.
pub fn sun_at(hours: f32) -> SunState {
    let angle = (hours - 6.0) * (PI / 12.0);
    let position = Vector3::new(angle.cos() * SUN_RADIUS, angle.sin() * SUN_RADIUS, 3.0);

    let noon_distance = ((12.0 - hours).abs() / 6.0).min(1.0);
    let dusk = [
        srgb_to_linear(((DUSK_COLOR >> 16) & 0xff) as f32 / 255.0),
        srgb_to_linear(((DUSK_COLOR >> 8) & 0xff) as f32 / 255.0),
        srgb_to_linear((DUSK_COLOR & 0xff) as f32 / 255.0),
    ];
    let color = dusk.map(|c| 1.0 + (c - 1.0) * noon_distance);

    let intensity = if hours > 6.0 && hours < 20.0 {
        DAYLIGHT_INTENSITY
    } else {
        0.0
    };

    SunState {
        position,
        color,
        intensity,
    }
}

pub fn wrap_hours(hours: f32) -> f32 {
    hours.rem_euclid(24.0)
}

/// Current local time as fractional hours.
pub fn local_hours() -> f32 {
    let now = chrono::Local::now();
    now.hour() as f32 + now.minute() as f32 / 60.0
}

/// Where the sun takes its hour from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LightingMode {
    #[default]
    Clock,
    Manual(f32),
}

impl LightingMode {
    pub fn hours(&self) -> f32 {
        match self {
            LightingMode::Clock => local_hours(),
            LightingMode::Manual(hours) => *hours,
        }
    }

    /// Switches to manual mode, moving the sun by `delta` hours.
    pub fn shifted(self, delta: f32) -> Self {
        LightingMode::Manual(wrap_hours(self.hours() + delta))
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    position: [f32; 3],
    intensity: f32,
    color: [f32; 3],
    ambient: f32,
}

impl From<SunState> for LightUniform {
    fn from(sun: SunState) -> Self {
        Self {
            position: sun.position.into(),
            intensity: sun.intensity,
            color: sun.color,
            ambient: AMBIENT,
        }
    }
}

#[derive(Debug)]
pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, sun: SunState) -> Self {
        let uniform = LightUniform::from(sun);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("light_bind_group"),
        });
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    pub fn set_sun(&mut self, queue: &wgpu::Queue, sun: SunState) {
        self.uniform = LightUniform::from(sun);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}
