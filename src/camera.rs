use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{Button, Controller};
use crate::math::{direction_from_angles, look_at, WORLD_UP};

pub const MOUSE_SENSITIVITY: f32 = 0.4;
pub const CAMERA_SPEED: f32 = 10.0;
pub const MIN_PITCH: f32 = -89.0;
pub const MAX_PITCH: f32 = 10.1;

/// Tunables for the free-look camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Degrees of rotation per pixel of mouse motion
    pub sensitivity: f32,
    /// World units per second
    pub speed: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub initial_position: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            sensitivity: MOUSE_SENSITIVITY,
            speed: CAMERA_SPEED,
            min_pitch: MIN_PITCH,
            max_pitch: MAX_PITCH,
            initial_position: Vec3::new(0.0, 0.0, 5.0),
        }
    }
}

/// Movement keys held this frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementState {
    pub fn from_controller(controller: &dyn Controller) -> Self {
        Self {
            forward: controller.is_down(Button::KeyW),
            left: controller.is_down(Button::KeyA),
            backward: controller.is_down(Button::KeyS),
            right: controller.is_down(Button::KeyD),
        }
    }
}

/// Look angles in degrees
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl Orientation {
    pub fn direction(&self) -> Vec3 {
        direction_from_angles(self.yaw, self.pitch)
    }
}

/// First-person free-look camera
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub orientation: Orientation,
    settings: CameraSettings,
}

impl Camera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            position: settings.initial_position,
            orientation: Orientation::default(),
            settings,
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation.direction()
    }

    /// Lateral axis, left of `forward`. Not normalized: its length is `cos(pitch)`.
    pub fn right(&self) -> Vec3 {
        WORLD_UP.cross(self.forward())
    }

    /// Apply one frame of mouse motion, then move along the new axes.
    ///
    /// Held keys add up, so diagonal movement is faster than moving along one axis.
    pub fn update(&mut self, mouse_delta: Vec2, dt: f32, movement: MovementState) {
        self.rotate(mouse_delta);

        let forward = self.forward();
        let right = WORLD_UP.cross(forward);
        let speed = self.settings.speed * dt;

        if movement.forward {
            self.position += forward * speed;
        }
        if movement.left {
            self.position += right * speed;
        }
        if movement.backward {
            self.position -= forward * speed;
        }
        if movement.right {
            self.position -= right * speed;
        }
    }

    /// Screen-space mouse motion to yaw/pitch. Moving the mouse down looks down.
    pub fn rotate(&mut self, mouse_delta: Vec2) {
        let sensitivity = self.settings.sensitivity;
        self.orientation.yaw += mouse_delta.x * sensitivity;
        self.orientation.pitch = (self.orientation.pitch - mouse_delta.y * sensitivity)
            .clamp(self.settings.min_pitch, self.settings.max_pitch);
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position, self.position + self.forward(), WORLD_UP)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}
