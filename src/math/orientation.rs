use glam::Vec3;

/// Unit look direction for yaw/pitch given in degrees.
///
/// Yaw turns about world +Y starting from +X, pitch tilts away from the horizontal plane.
pub fn direction_from_angles(yaw: f32, pitch: f32) -> Vec3 {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());

    Vec3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}
