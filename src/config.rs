//! Configuration loader.
//!
//! Every setting has a default. A TOML file named by the
//! `CABINET_CONFIGURATOR_CONFIG` environment variable may override any subset
//! of them:
//!
//! ```toml
//! wall_thickness = 0.05
//! initial_view = "cabinet"
//! material = "steel"
//! export_dir = "exports"
//! cabinet_origin = [0.0, 0.0, 0.0]
//!
//! [slider]
//! min = 0.5
//! max = 5.0
//! step = 0.1
//!
//! [initial_dimensions]
//! width = 1.0
//! height = 2.0
//! depth = 0.5
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::{
    configurator::View,
    data_structures::material::MaterialPreset,
    geometry::layout::{DEFAULT_WALL_THICKNESS, Dimensions, validate_thickness},
};

pub const CONFIG_ENV_VAR: &str = "CABINET_CONFIGURATOR_CONFIG";

/// Range and granularity of a dimension slider.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for SliderRange {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 5.0,
            step: 0.1,
        }
    }
}

impl SliderRange {
    /// Clamps `value` into the range and snaps it to the nearest step.
    ///
    /// Returns `None` for values that are not finite.
    pub fn snap(&self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let value = value.clamp(self.min, self.max);
        let steps = ((value - self.min) / self.step).round();
        Some((self.min + steps * self.step).clamp(self.min, self.max))
    }

    /// Moves `value` by a number of steps, staying inside the range.
    pub fn nudge(&self, value: f32, steps: i32) -> Option<f32> {
        self.snap(value + steps as f32 * self.step)
    }

    /// Whether two slider values land on the same step.
    pub fn same_step(&self, a: f32, b: f32) -> bool {
        (a - b).abs() < self.step / 2.0
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub wall_thickness: f32,
    pub slider: SliderRange,
    pub initial_dimensions: Dimensions,
    pub initial_view: View,
    pub material: MaterialPreset,
    pub export_dir: PathBuf,
    pub cabinet_origin: [f32; 3],
    /// Fixed hour for the sun. The local clock is followed when absent.
    pub sun_hour: Option<f32>,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            wall_thickness: DEFAULT_WALL_THICKNESS,
            slider: SliderRange::default(),
            initial_dimensions: Dimensions::new(1.0, 2.0, 0.5),
            initial_view: View::Cabinet,
            material: MaterialPreset::Oak,
            export_dir: PathBuf::from("exports"),
            cabinet_origin: [0.0, 0.0, 0.0],
            sun_hour: None,
        }
    }
}

impl ConfiguratorConfig {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse the configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`], or the defaults if it is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                log::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Rejects settings the cabinet could never be built with.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_thickness(self.wall_thickness)?;
        let SliderRange { min, max, step } = self.slider;
        if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || min > max {
            bail!("Invalid slider range {}..={} with step {}", min, max, step);
        }
        if min <= 2.0 * self.wall_thickness {
            bail!(
                "Slider minimum {} must exceed twice the wall thickness {}",
                min,
                self.wall_thickness
            );
        }
        self.initial_dimensions.validate(self.wall_thickness)?;
        if let Some(hour) = self.sun_hour {
            if !(0.0..24.0).contains(&hour) {
                bail!("Sun hour {} is outside of 0..24", hour);
            }
        }
        Ok(())
    }
}
