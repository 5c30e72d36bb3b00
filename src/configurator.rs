//! The product configurator.
//!
//! [`ConfiguratorState`] is the plain state behind the controls: current
//! view, slider values, material and sun. Applying a [`Command`] to it yields
//! at most one [`Effect`] which [`ConfiguratorFlow`] carries out on the GPU
//! resources.

use std::{path::PathBuf, rc::Rc};

use cgmath::Vector3;
use instant::Duration;
use serde::Deserialize;
use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{
    config::{ConfiguratorConfig, SliderRange},
    context::{Context, InitContext},
    data_structures::{
        cabinet::Cabinet,
        drawable::GeometryBackend,
        instance::Instance,
        material::{MaterialPreset, SurfaceMaterial},
        showroom::{Finish, Showroom},
    },
    error::{Axis, CabinetError},
    export,
    flow::{FlowConstructor, GraphicsFlow, Out},
    geometry::{box_mesh::MeshData, layout::Dimensions},
    lighting::{LightingMode, sun_at},
    render::{Instanced, Render},
    resources::{GpuBackend, GpuGeometry},
};

/// Which piece of furniture is on display.
///
/// Starts on the cabinet: the chair is only there when the host supplies a
/// mesh for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Chair,
    #[default]
    Cabinet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    ShowView(View),
    /// Moves a slider by whole steps.
    Nudge { axis: Axis, steps: i32 },
    /// Drags a slider to a value. It is clamped and snapped to the slider.
    SetDimension(Axis, f32),
    CycleMaterial,
    SelectMaterial(MaterialPreset),
    /// Moves the sun by a number of hours and stops following the clock.
    ShiftSun(f32),
    FollowClock,
    Screenshot,
    ExportSpecSheet,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ResizeCabinet(Dimensions),
    Repaint(MaterialPreset),
    Relight(LightingMode),
    ExportSpecSheet,
    Screenshot,
    ViewChanged(View),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfiguratorState {
    pub view: View,
    pub dimensions: Dimensions,
    pub material: MaterialPreset,
    pub lighting: LightingMode,
    pub slider: SliderRange,
}

impl Default for ConfiguratorState {
    fn default() -> Self {
        Self::from_config(&ConfiguratorConfig::default())
    }
}

impl ConfiguratorState {
    pub fn from_config(config: &ConfiguratorConfig) -> Self {
        Self {
            view: config.initial_view,
            dimensions: config.initial_dimensions,
            material: config.material,
            lighting: config
                .sun_hour
                .map_or(LightingMode::Clock, LightingMode::Manual),
            slider: config.slider,
        }
    }

    pub fn apply(&mut self, command: Command) -> Option<Effect> {
        match command {
            Command::ShowView(view) => {
                self.view = view;
                Some(Effect::ViewChanged(view))
            }
            Command::Nudge { axis, steps } => {
                let value = self.slider.nudge(self.dimensions.get(axis), steps)?;
                self.set_dimension(axis, value)
            }
            Command::SetDimension(axis, value) => {
                let value = self.slider.snap(value)?;
                self.set_dimension(axis, value)
            }
            Command::CycleMaterial => {
                self.material = self.material.next();
                Some(Effect::Repaint(self.material))
            }
            Command::SelectMaterial(preset) => {
                self.material = preset;
                Some(Effect::Repaint(preset))
            }
            Command::ShiftSun(hours) => {
                self.lighting = self.lighting.shifted(hours);
                Some(Effect::Relight(self.lighting))
            }
            Command::FollowClock => {
                self.lighting = LightingMode::Clock;
                Some(Effect::Relight(self.lighting))
            }
            Command::Screenshot => Some(Effect::Screenshot),
            Command::ExportSpecSheet => Some(Effect::ExportSpecSheet),
        }
    }

    /// The cabinet only follows the sliders while it is on display.
    fn set_dimension(&mut self, axis: Axis, value: f32) -> Option<Effect> {
        if self.slider.same_step(self.dimensions.get(axis), value) {
            return None;
        }
        self.dimensions = self.dimensions.with(axis, value);
        match self.view {
            View::Cabinet => Some(Effect::ResizeCabinet(self.dimensions)),
            View::Chair => None,
        }
    }
}

pub fn command_for_key(code: KeyCode) -> Option<Command> {
    let nudge = |axis, steps| Some(Command::Nudge { axis, steps });
    match code {
        KeyCode::Digit1 => Some(Command::ShowView(View::Chair)),
        KeyCode::Digit2 => Some(Command::ShowView(View::Cabinet)),
        KeyCode::KeyQ => nudge(Axis::Width, 1),
        KeyCode::KeyA => nudge(Axis::Width, -1),
        KeyCode::KeyW => nudge(Axis::Height, 1),
        KeyCode::KeyS => nudge(Axis::Height, -1),
        KeyCode::KeyE => nudge(Axis::Depth, 1),
        KeyCode::KeyD => nudge(Axis::Depth, -1),
        KeyCode::KeyM => Some(Command::CycleMaterial),
        KeyCode::KeyO => Some(Command::SelectMaterial(MaterialPreset::Oak)),
        KeyCode::KeyT => Some(Command::SelectMaterial(MaterialPreset::Steel)),
        KeyCode::BracketLeft => Some(Command::ShiftSun(-0.5)),
        KeyCode::BracketRight => Some(Command::ShiftSun(0.5)),
        KeyCode::KeyC => Some(Command::FollowClock),
        KeyCode::KeyP => Some(Command::Screenshot),
        KeyCode::KeyX => Some(Command::ExportSpecSheet),
        _ => None,
    }
}

/// Where a host supplied chair model is shown.
pub fn chair_transform() -> Instance {
    Instance {
        position: Vector3::new(0.0, -1.0, 0.0),
        scale: Vector3::new(3.0, 3.0, 3.0),
        ..Instance::new()
    }
}

/// Draws the cabinet or a chair inside the showroom.
pub struct ConfiguratorFlow {
    backend: GpuBackend,
    material: Rc<SurfaceMaterial>,
    cabinet: Option<Cabinet<GpuBackend>>,
    showroom: Option<Showroom<GpuBackend>>,
    chair: Option<GpuGeometry>,
    view: View,
    export_dir: PathBuf,
}

impl ConfiguratorFlow {
    /// Creates the GPU resources.
    ///
    /// `chair` is a mesh the host has already loaded. Without it the chair
    /// view only shows the empty showroom.
    pub fn new(
        ctx: InitContext,
        config: &ConfiguratorConfig,
        chair: Option<MeshData>,
    ) -> anyhow::Result<Self> {
        let mut backend = GpuBackend::new(ctx.device.clone(), ctx.queue.clone());
        let material = Rc::new(SurfaceMaterial::new(
            &ctx.device,
            &ctx.material_layout,
            "Furniture",
            config.material.params(),
        ));
        let wall = Rc::new(SurfaceMaterial::new(
            &ctx.device,
            &ctx.material_layout,
            "Wall",
            Finish::Wall.params(),
        ));
        let floor = Rc::new(SurfaceMaterial::new(
            &ctx.device,
            &ctx.material_layout,
            "Floor",
            Finish::Floor.params(),
        ));

        let showroom = Showroom::new(&mut backend, wall, floor)?;
        let mut cabinet =
            match Cabinet::with_thickness(&mut backend, Rc::clone(&material), config.wall_thickness) {
                Ok(cabinet) => cabinet,
                Err(e) => {
                    showroom.dispose(&mut backend);
                    return Err(e.into());
                }
            };
        cabinet.set_origin(config.cabinet_origin.into());

        let mut flow = Self {
            backend,
            material,
            cabinet: Some(cabinet),
            showroom: Some(showroom),
            chair: None,
            view: config.initial_view,
            export_dir: config.export_dir.clone(),
        };
        if let Some(mesh) = chair {
            flow.set_chair(&mesh)?;
        }
        Ok(flow)
    }

    /// Replaces the model shown in the chair view.
    pub fn set_chair(&mut self, mesh: &MeshData) -> anyhow::Result<()> {
        if let Some(old) = self.chair.take() {
            self.backend.release("chair", old)?;
        }
        let geometry = self.backend.allocate_mesh("chair", mesh);
        if let Err(e) = self.backend.upload_transform(&geometry, &chair_transform()) {
            self.backend.release("chair", geometry)?;
            return Err(e.into());
        }
        self.chair = Some(geometry);
        Ok(())
    }

    /// Wraps [`ConfiguratorFlow::new`] for [`crate::flow::run_with_state`].
    pub fn constructor(
        config: ConfiguratorConfig,
        chair: Option<MeshData>,
    ) -> FlowConstructor<ConfiguratorState> {
        Box::new(move |ctx| {
            Box::pin(async move {
                let flow = ConfiguratorFlow::new(ctx, &config, chair)?;
                Ok(Box::new(flow) as Box<dyn GraphicsFlow<ConfiguratorState>>)
            })
        })
    }

    pub fn cabinet(&self) -> Option<&Cabinet<GpuBackend>> {
        self.cabinet.as_ref()
    }

    fn resize_cabinet(&mut self, dimensions: Dimensions) {
        let Some(cabinet) = self.cabinet.as_mut() else {
            return;
        };
        match cabinet.update(&mut self.backend, dimensions) {
            // Already reported by the cabinet, the old panels stay in place.
            Err(CabinetError::Dimension(_)) => return,
            Err(e) => log::error!("Cabinet could not be resized: {}", e),
            Ok(()) => (),
        }
        if let Err(e) = cabinet.write_to_buffers(&mut self.backend) {
            log::error!("{}", e);
        }
    }

    fn handle(&mut self, ctx: &Context, state: &ConfiguratorState, effect: Effect) -> Out {
        match effect {
            Effect::ResizeCabinet(dimensions) => {
                self.resize_cabinet(dimensions);
                Out::Empty
            }
            Effect::ViewChanged(view) => {
                self.view = view;
                log::info!("Showing the {:?}", view);
                if view == View::Cabinet {
                    self.resize_cabinet(state.dimensions);
                }
                Out::Empty
            }
            Effect::Repaint(preset) => {
                self.material.apply(&ctx.queue, preset.params());
                log::debug!("Material changed to {}", preset);
                Out::Empty
            }
            Effect::Relight(mode) => {
                let sun = sun_at(mode.hours());
                Out::Configure(Box::new(move |ctx| ctx.set_sun(sun)))
            }
            Effect::ExportSpecSheet => {
                match export::write_spec_sheet(&self.export_dir, state.dimensions, state.material) {
                    Ok(path) => log::info!("Spec sheet written to {}", path.display()),
                    Err(e) => log::error!("{:#}", e),
                }
                Out::Empty
            }
            Effect::Screenshot => {
                let path = export::timestamped_path(&self.export_dir, "screenshot", "png");
                Out::Configure(Box::new(move |ctx| ctx.request_screenshot(path)))
            }
        }
    }
}

impl GraphicsFlow<ConfiguratorState> for ConfiguratorFlow {
    fn on_init(&mut self, ctx: &mut Context, state: &mut ConfiguratorState) -> Out {
        ctx.set_sun(sun_at(state.lighting.hours()));
        self.view = state.view;
        if state.view == View::Cabinet {
            self.resize_cabinet(state.dimensions);
        }
        Out::Empty
    }

    fn on_update(&mut self, _: &Context, _: &mut ConfiguratorState, _: Duration) -> Out {
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, state: &mut ConfiguratorState) -> Out {
        match state.lighting {
            LightingMode::Clock => {
                let sun = sun_at(state.lighting.hours());
                Out::Configure(Box::new(move |ctx| ctx.set_sun(sun)))
            }
            LightingMode::Manual(_) => Out::Empty,
        }
    }

    fn on_window_events(
        &mut self,
        ctx: &Context,
        state: &mut ConfiguratorState,
        event: &WindowEvent,
    ) -> Out {
        let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } = event
        else {
            return Out::Empty;
        };
        match command_for_key(*code).and_then(|command| state.apply(command)) {
            Some(effect) => self.handle(ctx, state, effect),
            None => Out::Empty,
        }
    }

    fn on_render(&self) -> Render<'_> {
        let showroom = self
            .showroom
            .as_ref()
            .map_or(Render::None, Render::from);
        let furniture = match self.view {
            View::Cabinet => self.cabinet.as_ref().map_or(Render::None, Render::from),
            View::Chair => self.chair.as_ref().map_or(Render::None, |chair| {
                Render::Default(Instanced {
                    instance: &chair.instance_buffer,
                    mesh: &chair.mesh,
                    material: &self.material,
                    amount: 1,
                })
            }),
        };
        Render::Composed(vec![showroom, furniture])
    }
}

impl Drop for ConfiguratorFlow {
    fn drop(&mut self) {
        if let Some(cabinet) = self.cabinet.take() {
            if let Err(e) = cabinet.dispose(&mut self.backend) {
                log::error!("{}", e);
            }
        }
        if let Some(showroom) = self.showroom.take() {
            showroom.dispose(&mut self.backend);
        }
        if let Some(chair) = self.chair.take() {
            if let Err(e) = self.backend.release("chair", chair) {
                log::error!("{}", e);
            }
        }
    }
}
