//! View state shared between the input surface and the renderer.
//!
//! The renderer owns a [`ViewConfig`] and polls it once per frame; input
//! handlers never touch it directly, they only emit [`ParamChange`]s.

use glam::{Mat4, Quat, Vec3};

use crate::geometry::Quality;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;

pub const CAMERA_DISTANCE: f32 = 8.5626;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles,
    Wireframe,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            DrawMode::Triangles => DrawMode::Wireframe,
            DrawMode::Wireframe => DrawMode::Triangles,
        }
    }
}

/// Rotation rates in radians per millisecond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationRates {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationRates {
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    fn get_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// A single user-driven value update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamChange {
    RotationRate(Axis, f32),
    Zoom(f32),
    PanX(f32),
    PanY(f32),
    DrawMode(DrawMode),
    Quality(Quality),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub quality: Quality,
    pub draw_mode: DrawMode,
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
    pub rotation: RotationRates,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            draw_mode: DrawMode::Triangles,
            zoom: 1.25,
            pan_x: 0.0,
            pan_y: 0.0,
            rotation: RotationRates {
                x: 0.0001,
                y: 0.00005,
                z: 0.0,
            },
        }
    }
}

impl ViewConfig {
    pub fn apply(&mut self, change: ParamChange) {
        match change {
            ParamChange::RotationRate(axis, rate) => *self.rotation.get_mut(axis) = rate,
            ParamChange::Zoom(zoom) => self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ParamChange::PanX(x) => self.pan_x = x,
            ParamChange::PanY(y) => self.pan_y = y,
            ParamChange::DrawMode(mode) => self.draw_mode = mode,
            ParamChange::Quality(quality) => self.quality = quality,
        }
        log::trace!("view config updated: {:?}", change);
    }

    /// Rotation accumulated over `dt_ms` milliseconds, each axis turning at
    /// its own rate.
    pub fn rotation_step(&self, dt_ms: f32) -> Quat {
        Axis::ALL
            .iter()
            .filter(|&&axis| self.rotation.get(axis) != 0.0)
            .fold(Quat::IDENTITY, |acc, &axis| {
                Quat::from_axis_angle(axis.unit(), self.rotation.get(axis) * dt_ms) * acc
            })
    }

    pub fn pan(&self) -> Vec3 {
        Vec3::new(self.pan_x, self.pan_y, 0.0)
    }

    /// Scales the scene by the zoom factor, then pushes it away from the
    /// camera along -Z.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -CAMERA_DISTANCE))
            * Mat4::from_scale(Vec3::splat(self.zoom))
    }
}
