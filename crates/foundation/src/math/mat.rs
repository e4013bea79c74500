use crate::math::{Vec3, Vec4};

/// Column-major 4x4 matrix, stored as four columns.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub fn translation(t: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.0[3] = [t.x, t.y, t.z, 1.0];
        m
    }

    pub fn rotation_x(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Mat4([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle_rad: f32) -> Self {
        let (s, c) = angle_rad.sin_cos();
        Mat4([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection with WebGL clip depth [-1, 1].
    pub fn perspective(fov_y_rad: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (0.5 * fov_y_rad).tan();
        let nf = 1.0 / (near - far);
        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) * nf, -1.0],
            [0.0, 0.0, 2.0 * far * near * nf, 0.0],
        ])
    }

    /// Matrix product `self * other`.
    pub fn mul(self, other: Self) -> Self {
        let a = &self.0;
        let b = &other.0;
        let mut c = [[0.0f32; 4]; 4];
        for col in 0..4 {
            for row in 0..4 {
                c[col][row] = a[0][row] * b[col][0]
                    + a[1][row] * b[col][1]
                    + a[2][row] * b[col][2]
                    + a[3][row] * b[col][3];
            }
        }
        Mat4(c)
    }

    pub fn transform(self, v: Vec4) -> Vec4 {
        let m = &self.0;
        Vec4::new(
            m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
            m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
            m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
            m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
        )
    }

    /// Transforms a point (w = 1), dropping the homogeneous coordinate.
    pub fn transform_point(self, p: Vec3) -> Vec3 {
        self.transform(Vec4::from_point(p)).xyz()
    }

    /// Transforms a direction (w = 0): rotation and scale only.
    pub fn transform_dir(self, d: Vec3) -> Vec3 {
        self.transform(Vec4::new(d.x, d.y, d.z, 0.0)).xyz()
    }

    /// General inverse; `None` when the matrix is singular.
    pub fn inverted(self) -> Option<Self> {
        let m = &self.0;
        let (a00, a01, a02, a03) = (m[0][0], m[0][1], m[0][2], m[0][3]);
        let (a10, a11, a12, a13) = (m[1][0], m[1][1], m[1][2], m[1][3]);
        let (a20, a21, a22, a23) = (m[2][0], m[2][1], m[2][2], m[2][3]);
        let (a30, a31, a32, a33) = (m[3][0], m[3][1], m[3][2], m[3][3]);

        let b00 = a00 * a11 - a01 * a10;
        let b01 = a00 * a12 - a02 * a10;
        let b02 = a00 * a13 - a03 * a10;
        let b03 = a01 * a12 - a02 * a11;
        let b04 = a01 * a13 - a03 * a11;
        let b05 = a02 * a13 - a03 * a12;
        let b06 = a20 * a31 - a21 * a30;
        let b07 = a20 * a32 - a22 * a30;
        let b08 = a20 * a33 - a23 * a30;
        let b09 = a21 * a32 - a22 * a31;
        let b10 = a21 * a33 - a23 * a31;
        let b11 = a22 * a33 - a23 * a32;

        let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
        if det == 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;

        Some(Mat4([
            [
                (a11 * b11 - a12 * b10 + a13 * b09) * inv_det,
                (a02 * b10 - a01 * b11 - a03 * b09) * inv_det,
                (a31 * b05 - a32 * b04 + a33 * b03) * inv_det,
                (a22 * b04 - a21 * b05 - a23 * b03) * inv_det,
            ],
            [
                (a12 * b08 - a10 * b11 - a13 * b07) * inv_det,
                (a00 * b11 - a02 * b08 + a03 * b07) * inv_det,
                (a32 * b02 - a30 * b05 - a33 * b01) * inv_det,
                (a20 * b05 - a22 * b02 + a23 * b01) * inv_det,
            ],
            [
                (a10 * b10 - a11 * b08 + a13 * b06) * inv_det,
                (a01 * b08 - a00 * b10 - a03 * b06) * inv_det,
                (a30 * b04 - a31 * b02 + a33 * b00) * inv_det,
                (a21 * b02 - a20 * b04 - a23 * b00) * inv_det,
            ],
            [
                (a11 * b07 - a10 * b09 - a12 * b06) * inv_det,
                (a00 * b09 - a01 * b07 + a02 * b06) * inv_det,
                (a31 * b01 - a30 * b03 - a32 * b00) * inv_det,
                (a20 * b03 - a21 * b01 + a22 * b00) * inv_det,
            ],
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::Mat4;
    use crate::math::{Vec3, Vec4};

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn identity_round_trip() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(Mat4::IDENTITY.transform_point(p), p);
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(m.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            m.transform_dir(Vec3::new(0.0, 0.0, -1.0)),
            Vec3::new(0.0, 0.0, -1.0)
        );
    }

    #[test]
    fn rotation_y_quarter_turn() {
        let m = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        assert_close(
            m.transform_dir(Vec3::new(0.0, 0.0, -1.0)),
            Vec3::new(-1.0, 0.0, 0.0),
        );
    }

    #[test]
    fn rotation_x_quarter_turn() {
        let m = Mat4::rotation_x(std::f32::consts::FRAC_PI_2);
        assert_close(
            m.transform_dir(Vec3::new(0.0, 1.0, 0.0)),
            Vec3::new(0.0, 0.0, 1.0),
        );
    }

    #[test]
    fn mul_composes_left_to_right() {
        let t = Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        let r = Mat4::rotation_y(std::f32::consts::FRAC_PI_2);
        // translate-then-rotate vs rotate-then-translate differ.
        let p = Vec3::new(0.0, 0.0, -1.0);
        assert_close(
            t.mul(r).transform_point(p),
            Vec3::new(0.0, 0.0, 0.0), // rotate first, then translate
        );
        assert_close(r.mul(t).transform_point(p), Vec3::new(-1.0, 0.0, -1.0));
    }

    #[test]
    fn inverse_of_rigid_transform() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0)).mul(Mat4::rotation_y(0.7));
        let inv = m.inverted().unwrap();
        let p = Vec3::new(0.3, -0.4, 0.5);
        assert_close(inv.transform_point(m.transform_point(p)), p);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let m = Mat4([[0.0; 4]; 4]);
        assert!(m.inverted().is_none());
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let m = Mat4::perspective(45f32.to_radians(), 1.0, 0.1, 100.0);
        let clip = m.transform(Vec4::new(0.0, 0.0, -0.1, 1.0));
        assert!((clip.z / clip.w + 1.0).abs() < 1e-4);
        let clip_far = m.transform(Vec4::new(0.0, 0.0, -100.0, 1.0));
        assert!((clip_far.z / clip_far.w - 1.0).abs() < 1e-4);
    }
}
