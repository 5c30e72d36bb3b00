//! The parametric cabinet: five panels kept in one group.
//!
//! A cabinet is built once with a material loaned by the host. Every
//! [`Cabinet::update`] validates the new dimensions first and only then
//! releases and replaces the geometry of all five panels. The panels
//! themselves (and therefore their material and group membership) are never
//! replaced, so a host that put the group into its scene once sees every resize
//! right away.

use std::rc::Rc;

use cgmath::Vector3;

use crate::{
    data_structures::{
        drawable::{Drawable, GeometryBackend, Group},
        instance::Instance,
    },
    error::{CabinetError, InvariantViolation, ResourceError},
    geometry::layout::{
        layout, validate_thickness, CabinetLayout, Dimensions, PanelName, PanelPlacement, PanelSet,
        DEFAULT_WALL_THICKNESS,
    },
};

pub type PanelGroup<B> = Group<PanelSet<Drawable<B>>>;

pub struct Cabinet<B: GeometryBackend> {
    thickness: f32,
    group: PanelGroup<B>,
    dimensions: Option<Dimensions>,
}

impl<B: GeometryBackend> Cabinet<B> {
    pub fn new(backend: &mut B, material: Rc<B::Material>) -> Result<Self, CabinetError> {
        Self::with_thickness(backend, material, DEFAULT_WALL_THICKNESS)
    }

    /// Creates the five panels with unit placeholder geometry.
    ///
    /// If the backend fails halfway, the panels created so far are released
    /// again before the error is returned.
    pub fn with_thickness(
        backend: &mut B,
        material: Rc<B::Material>,
        thickness: f32,
    ) -> Result<Self, CabinetError> {
        validate_thickness(thickness)?;
        let placeholder = Vector3::new(1.0, 1.0, 1.0);

        let mut panels =
            PanelSet::from_fn(|name| Drawable::new(name.as_str(), Rc::clone(&material)));
        let allocated = panels
            .iter_mut()
            .try_for_each(|(_, panel)| panel.set_extent(backend, placeholder));
        if let Err(e) = allocated {
            for (_, panel) in panels.iter_mut() {
                if let Err(release_err) = panel.release_extent(backend) {
                    log::error!("Could not roll back panel {}: {}", panel.label(), release_err);
                }
            }
            return Err(e.into());
        }

        Ok(Self {
            thickness,
            group: Group::new(panels),
            dimensions: None,
        })
    }

    /// Resizes the cabinet.
    ///
    /// Invalid dimensions are rejected before any panel is touched.
    pub fn update(&mut self, backend: &mut B, dimensions: Dimensions) -> Result<(), CabinetError> {
        let layout = match layout(dimensions, self.thickness) {
            Ok(layout) => layout,
            Err(e) => {
                log::warn!("Rejected cabinet dimensions {:?}: {}", dimensions, e);
                return Err(e.into());
            }
        };
        let applied = self.apply_layout(backend, &layout);
        let complete = self
            .group
            .members()
            .values()
            .all(|panel| panel.geometry().is_some());
        self.dimensions = complete.then_some(dimensions);
        applied?;
        log::debug!(
            "Cabinet resized to {} x {} x {}",
            dimensions.width,
            dimensions.height,
            dimensions.depth
        );
        Ok(())
    }

    /// Moves every panel to its new placement.
    ///
    /// Each panel releases its old geometry before the new one is installed.
    /// A failing panel does not stop the others from being released and
    /// replaced; the first failure is returned. A panel whose new geometry
    /// could not be allocated stays where it was, without geometry.
    pub fn apply_layout(
        &mut self,
        backend: &mut B,
        layout: &CabinetLayout,
    ) -> Result<(), ResourceError> {
        let mut first_error = None;
        for (name, panel) in self.group.members_mut().iter_mut() {
            let placement = &layout[name];
            if let Err(e) = panel.release_extent(backend) {
                log::error!("{}", e);
                first_error.get_or_insert(e);
            }
            match panel.set_extent(backend, placement.extent) {
                Ok(()) => panel.set_position(placement.position),
                Err(e) => {
                    log::error!("{}", e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Uploads the world transform of every panel.
    pub fn write_to_buffers(&self, backend: &mut B) -> Result<(), ResourceError> {
        for panel in self.group.members().values() {
            panel.upload_transform(backend, &self.group.transform)?;
        }
        Ok(())
    }

    /// Releases all panel geometry. The loaned material is left alone.
    pub fn dispose(self, backend: &mut B) -> Result<(), ResourceError> {
        let mut first_error = None;
        for mut panel in self.group.into_members().into_array() {
            if let Err(e) = panel.release_extent(backend) {
                log::error!("{}", e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// The dimensions all five panels currently follow.
    ///
    /// `None` before the first update and after an update that left a panel
    /// without geometry.
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    pub fn group(&self) -> &PanelGroup<B> {
        &self.group
    }

    /// Places the whole cabinet in the scene.
    pub fn set_origin(&mut self, origin: Vector3<f32>) {
        self.group.transform = Instance::from(origin);
    }

    pub fn panel(&self, name: PanelName) -> &Drawable<B> {
        &self.group.members()[name]
    }

    pub fn panel_named(&self, name: &str) -> Result<&Drawable<B>, InvariantViolation> {
        Ok(self.panel(name.parse()?))
    }

    /// Current extent and position of all panels.
    pub fn placements(&self) -> CabinetLayout {
        self.group.members().map(|_, panel| PanelPlacement {
            extent: panel.extent(),
            position: panel.position(),
        })
    }
}
