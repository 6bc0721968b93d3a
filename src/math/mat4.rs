//! 4x4 transformation matrix using row-vector convention.
//!
//! # Convention
//! - Vectors are **row vectors** on the left: `Vec4 * Mat4`
//! - Translation is stored in the **last row**
//! - Transforms chain **left-to-right**: `v * A * B` applies A first, then B
//!
//! # Example
//! ```ignore
//! let transform = scale * rotation;  // scale applied first, then rotation
//! let result = vertex * transform;   // transform the vertex
//! ```

use std::ops::Mul;

use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last row (row-vector convention).
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis, pivoting on the origin.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis, pivoting on the origin.
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis, pivoting on the origin.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the X axis about an arbitrary center point, folded
    /// into one matrix as translate(-center), rotate, translate(+center).
    /// A point sitting at `center` is unmoved.
    pub fn rotation_x_about(angle: f32, center: Vec4) -> Self {
        Self::about(Self::rotation_x(angle), center)
    }

    /// Rotation around the Y axis about an arbitrary center point.
    pub fn rotation_y_about(angle: f32, center: Vec4) -> Self {
        Self::about(Self::rotation_y(angle), center)
    }

    /// Rotation around the Z axis about an arbitrary center point.
    pub fn rotation_z_about(angle: f32, center: Vec4) -> Self {
        Self::about(Self::rotation_z(angle), center)
    }

    fn about(rotation: Mat4, center: Vec4) -> Self {
        Mat4::translation(-center.x, -center.y, -center.z)
            * rotation
            * Mat4::translation(center.x, center.y, center.z)
    }

    /// Creates the perspective projection matrix.
    ///
    /// With `tangent = 1/tan(fov/2)` and `q = far/(far - near)`, the only
    /// non-zero entries are `[0][0] = aspect_ratio * tangent`,
    /// `[1][1] = tangent`, `[2][2] = q`, `[3][2] = -q * near` and
    /// `[2][3] = 1`. Under row-vector multiplication the last sets
    /// `w' = z`, the raw view-space depth used for the perspective divide.
    pub fn projection(z_near: f32, z_far: f32, fov: f32, aspect_ratio: f32) -> Self {
        let tangent = 1.0 / (fov / 2.0).tan();
        let q = z_far / (z_far - z_near);
        Mat4::new([
            [aspect_ratio * tangent, 0.0, 0.0, 0.0],
            [0.0, tangent, 0.0, 0.0],
            [0.0, 0.0, q, 1.0],
            [0.0, 0.0, -q * z_near, 0.0],
        ])
    }

    /// Projects a point: multiply by this matrix, then divide x and y by w
    /// when w is non-zero.
    ///
    /// z is deliberately left undivided; the depth sort wants the raw
    /// view-space-projected z, not normalized device z. When w is zero the
    /// raw coordinates pass through unchanged. That is a defined (not
    /// exceptional) outcome, but the screen position is meaningless; such
    /// points sit on the camera plane and would ideally have been clipped.
    pub fn project(&self, point: Vec4) -> Vec4 {
        let mut res = point * *self;
        if res.w != 0.0 {
            res.x /= res.w;
            res.y /= res.w;
        }
        res
    }

    /// Builds the camera-to-world placement matrix for a camera at `eye`
    /// looking toward `target`.
    ///
    /// The rows are the camera basis vectors {right, up, forward} with `eye`
    /// in the translation row. `up` is corrected by removing its component
    /// parallel to the forward direction before orthonormalizing.
    pub fn point_at(eye: Vec4, target: Vec4, up: Vec4) -> Self {
        let forward = (target - eye).normalize();
        let new_up = (up - forward * forward.dot(up)).normalize();
        let right = new_up.cross(forward);

        Mat4::new([
            [right.x, right.y, right.z, 0.0],
            [new_up.x, new_up.y, new_up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [eye.x, eye.y, eye.z, 1.0],
        ])
    }

    /// Closed-form inverse of a rigid (orthonormal rotation + translation)
    /// matrix: the 3x3 block is transposed and the translation row becomes
    /// the negated dot products with the original rotation rows.
    ///
    /// # Precondition
    ///
    /// The matrix must be a pure rotation + translation, as produced by
    /// [`Mat4::point_at`]. Feeding anything else (scale, shear, projection)
    /// silently yields a wrong result; there is no general elimination here
    /// on purpose.
    pub fn rigid_inverse(&self) -> Self {
        let m = &self.data;
        let a = Vec4::direction(m[0][0], m[0][1], m[0][2]);
        let b = Vec4::direction(m[1][0], m[1][1], m[1][2]);
        let c = Vec4::direction(m[2][0], m[2][1], m[2][2]);
        let t = Vec4::direction(m[3][0], m[3][1], m[3][2]);

        Mat4::new([
            [m[0][0], m[1][0], m[2][0], 0.0],
            [m[0][1], m[1][1], m[2][1], 0.0],
            [m[0][2], m[1][2], m[2][2], 0.0],
            [-t.dot(a), -t.dot(b), -t.dot(c), 1.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For row-vector convention, `v * A * B` applies A first, then B.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Vec4 * Mat4 (row vector on the left).
impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, m: Mat4) -> Self::Output {
        Vec4::new(
            self.x * m.data[0][0]
                + self.y * m.data[1][0]
                + self.z * m.data[2][0]
                + self.w * m.data[3][0],
            self.x * m.data[0][1]
                + self.y * m.data[1][1]
                + self.z * m.data[2][1]
                + self.w * m.data[3][1],
            self.x * m.data[0][2]
                + self.y * m.data[1][2]
                + self.z * m.data[2][2]
                + self.w * m.data[3][2],
            self.x * m.data[0][3]
                + self.y * m.data[1][3]
                + self.z * m.data[2][3]
                + self.w * m.data[3][3],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn assert_vec4_eq(a: Vec4, b: Vec4) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
        assert_relative_eq!(a.w, b.w, epsilon = 1e-5);
    }

    #[test]
    fn translation_moves_point() {
        let p = Vec4::point(1.0, 2.0, 3.0) * Mat4::translation(10.0, -5.0, 0.5);
        assert_vec4_eq(p, Vec4::point(11.0, -3.0, 3.5));
    }

    #[test]
    fn translation_leaves_affine_last_column() {
        let m = Mat4::translation(4.0, 5.0, 6.0);
        for row in 0..3 {
            assert_relative_eq!(m.get(row, 3), 0.0);
        }
        assert_relative_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn rotation_z_quarter_turn() {
        let p = Vec4::point(1.0, 0.0, 0.0) * Mat4::rotation_z(FRAC_PI_2);
        assert_vec4_eq(p, Vec4::point(0.0, 1.0, 0.0));
    }

    #[test]
    fn rotation_about_own_center_is_identity() {
        let center = Vec4::point(3.0, -2.0, 7.0);
        for m in [
            Mat4::rotation_x_about(1.3, center),
            Mat4::rotation_y_about(-0.7, center),
            Mat4::rotation_z_about(PI, center),
        ] {
            assert_vec4_eq(center * m, center);
        }
    }

    #[test]
    fn rotation_about_center_orbits_other_points() {
        let center = Vec4::point(1.0, 0.0, 0.0);
        let p = Vec4::point(2.0, 0.0, 0.0) * Mat4::rotation_z_about(FRAC_PI_2, center);
        assert_vec4_eq(p, Vec4::point(1.0, 1.0, 0.0));
    }

    #[test]
    fn chained_transforms_apply_left_to_right() {
        let m = Mat4::rotation_z(FRAC_PI_2) * Mat4::translation(5.0, 0.0, 0.0);
        // Rotate (1,0,0) to (0,1,0) first, then translate.
        let p = Vec4::point(1.0, 0.0, 0.0) * m;
        assert_vec4_eq(p, Vec4::point(5.0, 1.0, 0.0));
    }

    #[test]
    fn projection_sets_w_to_view_z() {
        let m = Mat4::projection(0.1, 100.0, FRAC_PI_2, 1.0);
        let clip = Vec4::point(1.0, 2.0, 42.0) * m;
        assert_relative_eq!(clip.w, 42.0, epsilon = 1e-4);
    }

    #[test]
    fn on_axis_point_projects_to_center() {
        let m = Mat4::projection(0.1, 100.0, FRAC_PI_2, 9.0 / 16.0);
        for d in [0.5, 1.0, 10.0, 99.0] {
            let p = m.project(Vec4::point(0.0, 0.0, d));
            assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
            assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn project_guards_zero_w() {
        let m = Mat4::projection(0.1, 100.0, FRAC_PI_2, 1.0);
        // z = 0 lands on the camera plane, so w' = 0 and the raw
        // coordinates pass through undivided.
        let p = m.project(Vec4::point(3.0, 4.0, 0.0));
        assert_relative_eq!(p.w, 0.0);
        assert_relative_eq!(p.x, 3.0 * m.get(0, 0));
    }

    #[test]
    fn point_at_rows_are_orthonormal() {
        let m = Mat4::point_at(
            Vec4::point(1.0, 2.0, 3.0),
            Vec4::point(4.0, -1.0, 0.0),
            Vec4::point(0.0, 1.0, 0.0),
        );
        let rows: Vec<Vec4> = (0..3)
            .map(|r| Vec4::direction(m.get(r, 0), m.get(r, 1), m.get(r, 2)))
            .collect();
        for row in &rows {
            assert_relative_eq!(row.length(), 1.0, epsilon = 1e-5);
        }
        assert_relative_eq!(rows[0].dot(rows[1]), 0.0, epsilon = 1e-5);
        assert_relative_eq!(rows[1].dot(rows[2]), 0.0, epsilon = 1e-5);
        assert_relative_eq!(rows[0].dot(rows[2]), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn rigid_inverse_undoes_point_at() {
        let m = Mat4::point_at(
            Vec4::point(5.0, 1.0, -2.0),
            Vec4::point(0.0, 0.0, 10.0),
            Vec4::point(0.0, 1.0, 0.0),
        );
        let round_trip = m * m.rigid_inverse();
        let id = Mat4::identity();
        for row in 0..4 {
            for col in 0..4 {
                assert_relative_eq!(round_trip.get(row, col), id.get(row, col), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn view_matrix_brings_target_in_front_of_camera() {
        let eye = Vec4::point(0.0, 0.0, -5.0);
        let target = Vec4::point(0.0, 0.0, 0.0);
        let view = Mat4::point_at(eye, target, Vec4::point(0.0, 1.0, 0.0)).rigid_inverse();
        let in_view = target * view;
        assert_relative_eq!(in_view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(in_view.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn rotation_forward_then_back_is_identity() {
        let p = Vec4::point(2.0, 3.0, 4.0);
        let angle = FRAC_PI_4 * 1.7;
        let restored = p * Mat4::rotation_y(angle) * Mat4::rotation_y(-angle);
        assert_vec4_eq(restored, p);
    }
}
