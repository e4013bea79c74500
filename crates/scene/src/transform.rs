use foundation::math::{Mat4, Vec3};

/// Position plus X/Y Euler rotation (no roll), with derived matrices.
///
/// The matrices are recomputed by an explicit [`Transform::update`];
/// consumers must call it before reading matrices that depend on state
/// mutated this frame; they are never implicitly refreshed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians; only x (pitch) and y (yaw) are used.
    pub rotation: Vec3,
    pub position_matrix: Mat4,
    pub rotation_matrix: Mat4,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            position_matrix: Mat4::IDENTITY,
            rotation_matrix: Mat4::IDENTITY,
        }
    }

    pub fn at(position: Vec3) -> Self {
        let mut t = Self::identity();
        t.position = position;
        t.update();
        t
    }

    /// Recomputes both derived matrices from position/rotation.
    pub fn update(&mut self) {
        self.position_matrix = Mat4::translation(self.position);
        self.rotation_matrix =
            Mat4::rotation_y(self.rotation.y).mul(Mat4::rotation_x(self.rotation.x));
    }
}
