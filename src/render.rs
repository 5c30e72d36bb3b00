//! Render composition.
//!
//! Flows describe what they want drawn with the [`Render`] enum. The engine
//! flattens all renders of a frame into one batch for the lit pipeline.

use crate::{
    data_structures::{
        cabinet::Cabinet, material::SurfaceMaterial, model::Mesh, showroom::Showroom,
    },
    resources::GpuBackend,
};

/// A mesh drawn `amount` times with the transforms in `instance`.
#[derive(Debug, Clone, Copy)]
pub struct Instanced<'a> {
    pub instance: &'a wgpu::Buffer,
    pub mesh: &'a Mesh,
    pub material: &'a SurfaceMaterial,
    pub amount: usize,
}

/// Specifies how a scene object should be rendered.
///
/// - `None` renders nothing
/// - `Default(Instanced)` renders a single instanced object
/// - `Defaults(Vec<Instanced>)` renders a batch of instanced objects
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
#[derive(Debug)]
pub enum Render<'a> {
    None,
    Default(Instanced<'a>),
    Defaults(Vec<Instanced<'a>>),
    Composed(Vec<Render<'a>>),
}

impl<'a> Render<'a> {
    /// Flattens the render tree into `batch` in draw order.
    pub(crate) fn collect(self, batch: &mut Vec<Instanced<'a>>) {
        match self {
            Render::None => (),
            Render::Default(instanced) => batch.push(instanced),
            Render::Defaults(mut vec) => batch.append(&mut vec),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.collect(batch)),
        }
    }
}

impl<'a> From<&'a Cabinet<GpuBackend>> for Render<'a> {
    fn from(cabinet: &'a Cabinet<GpuBackend>) -> Self {
        Render::Defaults(
            cabinet
                .group()
                .members()
                .values()
                .filter_map(|panel| {
                    panel.geometry().map(|geometry| Instanced {
                        instance: &geometry.instance_buffer,
                        mesh: &geometry.mesh,
                        material: panel.material(),
                        amount: 1,
                    })
                })
                .collect(),
        )
    }
}

impl<'a> From<&'a Showroom<GpuBackend>> for Render<'a> {
    fn from(showroom: &'a Showroom<GpuBackend>) -> Self {
        Render::Defaults(
            showroom
                .pieces()
                .iter()
                .map(|piece| Instanced {
                    instance: &piece.geometry.instance_buffer,
                    mesh: &piece.geometry.mesh,
                    material: &piece.material,
                    amount: 1,
                })
                .collect(),
        )
    }
}
