//! Drawables whose geometry can be swapped in place.
//!
//! A [`Drawable`] keeps its identity, material and group membership for its
//! whole life. Only its box geometry and position change. The geometry is a
//! backend resource (GPU buffers for the wgpu backend) and is always handed
//! back to the backend explicitly instead of relying on drop order.

use std::{fmt, rc::Rc};

use cgmath::Vector3;

use crate::{data_structures::instance::Instance, error::ResourceError};

/// Allocates, frees and places the geometry behind drawables.
pub trait GeometryBackend {
    type Geometry;
    type Material;

    fn allocate_box(
        &mut self,
        label: &str,
        extent: Vector3<f32>,
    ) -> Result<Self::Geometry, ResourceError>;

    /// A `width` x `height` plane facing +z.
    fn allocate_plane(
        &mut self,
        label: &str,
        width: f32,
        height: f32,
    ) -> Result<Self::Geometry, ResourceError>;

    fn release(&mut self, label: &str, geometry: Self::Geometry) -> Result<(), ResourceError>;

    fn upload_transform(
        &mut self,
        geometry: &Self::Geometry,
        transform: &Instance,
    ) -> Result<(), ResourceError>;
}

/// A box-shaped renderable with a loaned material.
pub struct Drawable<B: GeometryBackend> {
    label: String,
    geometry: Option<B::Geometry>,
    extent: Vector3<f32>,
    position: Vector3<f32>,
    material: Rc<B::Material>,
}

impl<B: GeometryBackend> Drawable<B> {
    /// A drawable without geometry. [`Drawable::set_extent`] gives it a box.
    pub fn new(label: &str, material: Rc<B::Material>) -> Self {
        Self {
            label: label.to_string(),
            geometry: None,
            extent: Vector3::new(0.0, 0.0, 0.0),
            position: Vector3::new(0.0, 0.0, 0.0),
            material,
        }
    }

    /// Hands the current geometry back to the backend.
    ///
    /// The geometry slot is empty afterwards even if the backend reports a
    /// failure. Releasing an empty drawable is a no-op.
    pub fn release_extent(&mut self, backend: &mut B) -> Result<(), ResourceError> {
        match self.geometry.take() {
            Some(geometry) => backend.release(&self.label, geometry),
            None => Ok(()),
        }
    }

    /// Installs new box geometry of the given size.
    ///
    /// Geometry that is still attached gets released first. If the allocation
    /// fails the drawable is left without geometry and keeps its old extent.
    pub fn set_extent(
        &mut self,
        backend: &mut B,
        extent: Vector3<f32>,
    ) -> Result<(), ResourceError> {
        self.release_extent(backend)?;
        self.geometry = Some(backend.allocate_box(&self.label, extent)?);
        self.extent = extent;
        Ok(())
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.extent
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn geometry(&self) -> Option<&B::Geometry> {
        self.geometry.as_ref()
    }

    pub fn material(&self) -> &Rc<B::Material> {
        &self.material
    }

    pub fn local_transform(&self) -> Instance {
        Instance::from(self.position)
    }

    /// Pushes `parent * local` to the backend.
    pub fn upload_transform(
        &self,
        backend: &mut B,
        parent: &Instance,
    ) -> Result<(), ResourceError> {
        match &self.geometry {
            Some(geometry) => backend.upload_transform(geometry, &(parent * &self.local_transform())),
            None => Ok(()),
        }
    }
}

impl<B: GeometryBackend> fmt::Debug for Drawable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawable")
            .field("label", &self.label)
            .field("extent", &self.extent)
            .field("position", &self.position)
            .field("has_geometry", &self.geometry.is_some())
            .finish()
    }
}

/// Members that are added to and removed from a scene as one unit.
///
/// The group transform places all members at once. Moving the group never
/// touches the members themselves.
#[derive(Debug)]
pub struct Group<M> {
    pub transform: Instance,
    members: M,
}

impl<M> Group<M> {
    pub fn new(members: M) -> Self {
        Self {
            transform: Instance::default(),
            members,
        }
    }

    pub fn members(&self) -> &M {
        &self.members
    }

    pub fn members_mut(&mut self) -> &mut M {
        &mut self.members
    }

    pub fn into_members(self) -> M {
        self.members
    }
}
