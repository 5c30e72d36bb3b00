//! Panel layout of the open-front cabinet shell.
//!
//! The cabinet is made of five slabs. The side panels run the full height and
//! depth and sit flush with the outer width. Top and bottom are squeezed in
//! between the sides, and the back panel closes the cavity on the negative-z
//! side. All placements are box centres in the cabinet frame: x is centred on
//! the vertical midline, y starts at the outer bottom face and z is centred
//! between front and back.

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use cgmath::Vector3;
use serde::Deserialize;

use crate::error::{Axis, DimensionError, InvariantViolation};

/// Wall thickness used when nothing else is configured.
pub const DEFAULT_WALL_THICKNESS: f32 = 0.05;

/// The fixed set of panels a cabinet is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelName {
    Left,
    Right,
    Top,
    Bottom,
    Back,
}

impl PanelName {
    pub const COUNT: usize = 5;
    pub const ALL: [PanelName; Self::COUNT] = [
        PanelName::Left,
        PanelName::Right,
        PanelName::Top,
        PanelName::Bottom,
        PanelName::Back,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelName::Left => "left",
            PanelName::Right => "right",
            PanelName::Top => "top",
            PanelName::Bottom => "bottom",
            PanelName::Back => "back",
        }
    }
}

impl fmt::Display for PanelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelName {
    type Err = InvariantViolation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| InvariantViolation(s.to_string()))
    }
}

/// A value per panel, indexed by [`PanelName`].
///
/// Names and count never change after construction, so this is a plain array
/// rather than a map.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelSet<T>([T; PanelName::COUNT]);

impl<T> PanelSet<T> {
    /// Values must be ordered like [`PanelName::ALL`].
    pub fn new(values: [T; PanelName::COUNT]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(PanelName) -> T) -> Self {
        Self(std::array::from_fn(|i| f(PanelName::ALL[i])))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelName, &T)> {
        PanelName::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PanelName, &mut T)> {
        PanelName::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(PanelName, &T) -> U) -> PanelSet<U> {
        PanelSet::from_fn(|name| f(name, &self[name]))
    }

    pub fn into_array(self) -> [T; PanelName::COUNT] {
        self.0
    }
}

impl<T> Index<PanelName> for PanelSet<T> {
    type Output = T;

    fn index(&self, name: PanelName) -> &Self::Output {
        &self.0[name.index()]
    }
}

impl<T> IndexMut<PanelName> for PanelSet<T> {
    fn index_mut(&mut self, name: PanelName) -> &mut Self::Output {
        &mut self.0[name.index()]
    }
}

/// Outer size of the cabinet in length units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimensions {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
            Axis::Depth => self.depth,
        }
    }

    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
            Axis::Depth => self.depth = value,
        }
        self
    }

    /// Checks that every dimension leaves room for two walls.
    pub fn validate(&self, thickness: f32) -> Result<(), DimensionError> {
        validate_thickness(thickness)?;
        let minimum = 2.0 * thickness;
        for axis in Axis::ALL {
            let value = self.get(axis);
            if !value.is_finite() {
                return Err(DimensionError::NonFinite { axis, value });
            }
            if value <= minimum {
                return Err(DimensionError::TooSmall {
                    axis,
                    value,
                    minimum,
                });
            }
        }
        Ok(())
    }
}

pub fn validate_thickness(thickness: f32) -> Result<(), DimensionError> {
    if thickness.is_finite() && thickness > 0.0 {
        Ok(())
    } else {
        Err(DimensionError::InvalidThickness(thickness))
    }
}

/// Size and centre of one panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelPlacement {
    pub extent: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl PanelPlacement {
    fn new(extent: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            extent: extent.into(),
            position: position.into(),
        }
    }
}

pub type CabinetLayout = PanelSet<PanelPlacement>;

/// Computes the placement of all five panels.
///
/// This is a pure function of its inputs. Dimensions at or below twice the
/// wall thickness are rejected instead of producing empty or inverted panels.
pub fn layout(dimensions: Dimensions, thickness: f32) -> Result<CabinetLayout, DimensionError> {
    dimensions.validate(thickness)?;
    let Dimensions {
        width,
        height,
        depth,
    } = dimensions;
    let t = thickness;

    let inner_width = width - 2.0 * t;
    let inner_height = height - 2.0 * t;

    Ok(PanelSet::new([
        PanelPlacement::new([t, height, depth], [-width / 2.0 + t / 2.0, height / 2.0, 0.0]),
        PanelPlacement::new([t, height, depth], [width / 2.0 - t / 2.0, height / 2.0, 0.0]),
        PanelPlacement::new([inner_width, t, depth], [0.0, height - t / 2.0, 0.0]),
        PanelPlacement::new([inner_width, t, depth], [0.0, t / 2.0, 0.0]),
        PanelPlacement::new(
            [inner_width, inner_height, t],
            [0.0, height / 2.0, -depth / 2.0 + t / 2.0],
        ),
    ]))
}
