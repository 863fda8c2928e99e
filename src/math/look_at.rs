use glam::{Mat4, Vec3};

/// Camera-local axes derived from an eye/target pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Basis {
    /// Build the basis looking from `eye` towards `target`.
    ///
    /// `world_up` must not be parallel to `target - eye`, and `target` must differ from
    /// `eye`; both cases normalize a zero vector.
    pub fn new(eye: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(world_up).normalize();
        let up = right.cross(forward);

        Self { right, up, forward }
    }
}

/// World space to view space transform.
///
/// Rows of the matrix in `e[row][col]` terms are `right`, `up`, `-forward` and the eye
/// position with `w = 1`. That memory is handed to the GPU unchanged, which reads it
/// column-major, so each of those rows is a column of the returned `Mat4`.
pub fn look_at(eye: Vec3, target: Vec3, world_up: Vec3) -> Mat4 {
    let basis = Basis::new(eye, target, world_up);

    Mat4::from_cols(
        basis.right.extend(0.0),
        basis.up.extend(0.0),
        (-basis.forward).extend(0.0),
        eye.extend(1.0),
    )
}
