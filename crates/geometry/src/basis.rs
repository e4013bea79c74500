use foundation::math::Vec3;

const WORLD_UP: Vec3 = Vec3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

/// Fallback reference axis when the source direction is nearly parallel
/// to the world up axis and the cross product would collapse.
const FALLBACK_AXIS: Vec3 = Vec3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

const PARALLEL_COS_THRESHOLD: f32 = 0.999;

/// A right-handed orthonormal frame built around a direction.
///
/// `vector` keeps the original non-unit direction so callers can recover
/// its length (e.g. a line's endpoints).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Basis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
    pub vector: Vec3,
}

impl Basis {
    pub fn from_direction(direction: Vec3) -> Self {
        let z = direction.normalized();

        let reference = if z.dot(WORLD_UP).abs() > PARALLEL_COS_THRESHOLD {
            FALLBACK_AXIS
        } else {
            WORLD_UP
        };

        let x = reference.cross(z).normalized();
        let y = z.cross(x);

        Self {
            x,
            y,
            z,
            vector: direction,
        }
    }

    /// Frame along `b - a`.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::from_direction(b - a)
    }

    /// Maps frame-local coordinates into the parent space.
    pub fn local_to_world(&self, local: Vec3) -> Vec3 {
        self.x * local.x + self.y * local.y + self.z * local.z
    }
}
