mod look_at;
mod orientation;

pub use look_at::{look_at, Basis};
pub use orientation::direction_from_angles;

/// World vertical axis shared by the camera and the view transform
pub const WORLD_UP: glam::Vec3 = glam::Vec3::Y;
