use std::collections::HashSet;

use cabinet_configurator::{
    cgmath::Vector3,
    data_structures::{drawable::GeometryBackend, instance::Instance},
    error::ResourceError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MockGeometry {
    pub id: u32,
    pub label: String,
    pub size: Vec<f32>,
}

#[derive(Debug, PartialEq)]
pub struct MockMaterial(pub &'static str);

/// In-memory backend that counts every allocation and release.
#[derive(Debug, Default)]
pub struct CountingBackend {
    next_id: u32,
    pub allocations: usize,
    pub releases: usize,
    pub live: HashSet<u32>,
    pub uploads: Vec<(String, Instance)>,
    pub fail_allocation_for: Option<String>,
    pub fail_release_for: Option<String>,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn reset_counters(&mut self) {
        self.allocations = 0;
        self.releases = 0;
        self.uploads.clear();
    }

    fn allocate(&mut self, label: &str, size: Vec<f32>) -> Result<MockGeometry, ResourceError> {
        if self.fail_allocation_for.as_deref() == Some(label) {
            return Err(ResourceError::Allocate {
                label: label.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.next_id += 1;
        self.allocations += 1;
        self.live.insert(self.next_id);
        Ok(MockGeometry {
            id: self.next_id,
            label: label.to_string(),
            size,
        })
    }
}

impl GeometryBackend for CountingBackend {
    type Geometry = MockGeometry;
    type Material = MockMaterial;

    fn allocate_box(
        &mut self,
        label: &str,
        extent: Vector3<f32>,
    ) -> Result<Self::Geometry, ResourceError> {
        self.allocate(label, vec![extent.x, extent.y, extent.z])
    }

    fn allocate_plane(
        &mut self,
        label: &str,
        width: f32,
        height: f32,
    ) -> Result<Self::Geometry, ResourceError> {
        self.allocate(label, vec![width, height])
    }

    /// The geometry is gone afterwards, even when a failure is injected.
    fn release(&mut self, label: &str, geometry: Self::Geometry) -> Result<(), ResourceError> {
        self.releases += 1;
        assert!(
            self.live.remove(&geometry.id),
            "geometry {} of {} released twice",
            geometry.id,
            label
        );
        if self.fail_release_for.as_deref() == Some(label) {
            return Err(ResourceError::Release {
                label: label.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn upload_transform(
        &mut self,
        geometry: &Self::Geometry,
        transform: &Instance,
    ) -> Result<(), ResourceError> {
        self.uploads.push((geometry.label.clone(), transform.clone()));
        Ok(())
    }
}

/// Wraps a flow for window tests: requests a screenshot before the first
/// frame and leaves the event loop after a few frames.
#[cfg(feature = "integration-tests")]
pub mod window {
    use std::path::PathBuf;

    use cabinet_configurator::{
        WindowEvent,
        context::Context,
        flow::{GraphicsFlow, Out},
        render::Render,
    };
    use instant::Duration;

    pub struct CaptureThenExit<F> {
        pub inner: F,
        pub screenshot: Option<PathBuf>,
        pub frames_left: u32,
    }

    impl<S, F: GraphicsFlow<S>> GraphicsFlow<S> for CaptureThenExit<F> {
        fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out {
            if let Some(path) = self.screenshot.take() {
                ctx.request_screenshot(path);
            }
            self.inner.on_init(ctx, state)
        }

        fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration) -> Out {
            self.frames_left = self.frames_left.saturating_sub(1);
            if self.frames_left == 0 {
                return Out::Configure(Box::new(|ctx| ctx.request_exit()));
            }
            self.inner.on_update(ctx, state, dt)
        }

        fn on_tick(&mut self, ctx: &Context, state: &mut S) -> Out {
            self.inner.on_tick(ctx, state)
        }

        fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent) -> Out {
            self.inner.on_window_events(ctx, state, event)
        }

        fn on_render(&self) -> Render<'_> {
            self.inner.on_render()
        }
    }
}
