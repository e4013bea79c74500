#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns the zero vector when the input has no length.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len <= 0.0 { Self::ZERO } else { self * (1.0 / len) }
    }

    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }

    /// Great-circle interpolation between two directions.
    ///
    /// Both inputs are treated as unit direction vectors; the cosine is
    /// clamped against numerical error at the ±1 boundary.
    pub fn slerp(a: Self, b: Self, t: f32) -> Self {
        let cos_theta = a.dot(b).clamp(-1.0, 1.0);
        let theta = cos_theta.acos() * t;

        // Unit vector in the plane of a/b, perpendicular to a.
        let relative = (b - a * cos_theta).normalized();

        a * theta.cos() + relative * theta.sin()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, s: f32) -> Self::Output {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A homogeneous point (w = 1).
    pub fn from_point(p: Vec3) -> Self {
        Self::new(p.x, p.y, p.z, 1.0)
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::{Vec3, Vec4};

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn add_sub_dot() {
        let a = Vec3::new(1.0, 2.0, -1.0);
        let b = Vec3::new(0.5, -2.0, 3.0);
        assert_eq!(a + b, Vec3::new(1.5, 0.0, 2.0));
        assert_eq!(a - b, Vec3::new(0.5, 4.0, -4.0));
        assert_eq!(a.dot(b), -6.5);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        assert!((Vec3::new(3.0, 4.0, 0.0).normalized().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, -4.0, 6.0);
        assert_eq!(Vec3::lerp(a, b, 0.5), Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn slerp_half_angle_between_axes() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);
        let mid = Vec3::slerp(x, z, 0.5);
        let inv_sqrt2 = 1.0 / 2.0_f32.sqrt();
        assert_close(mid, Vec3::new(inv_sqrt2, 0.0, inv_sqrt2));
        // Stays on the unit sphere.
        assert!((mid.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn slerp_endpoints_are_exact_enough() {
        let a = Vec3::new(0.0, 1.0, 0.0);
        let b = Vec3::new(0.0, 0.0, -1.0);
        assert_close(Vec3::slerp(a, b, 0.0), a);
        assert_close(Vec3::slerp(a, b, 1.0), b);
    }

    #[test]
    fn slerp_parallel_inputs_do_not_produce_nan() {
        let a = Vec3::new(0.0, 1.0, 0.0);
        let out = Vec3::slerp(a, a, 0.5);
        assert!(out.is_finite());
        assert_close(out, a);
    }

    #[test]
    fn vec4_point_has_unit_w() {
        let p = Vec4::from_point(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.w, 1.0);
        assert_eq!(p.xyz(), Vec3::new(1.0, 2.0, 3.0));
    }
}
