//! 4x4 homogeneous transform matrix: projection, view and rotation builders.
use std::ops::{Mul, MulAssign};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::error::{LinalgError, LinalgResult};
use crate::projection::Frustum;
use crate::vector3::Vector3;

/// A 4x4 `f32` matrix acting on column vectors `(x, y, z, w)`.
///
/// Entries are named column first, row second: `m32` is column 3, row 2
/// (the z translation of an affine transform). Fields are declared
/// column-major, so the in-memory layout matches [`Matrix4::copy`].
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix4 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m03: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m30: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
}

impl Matrix4 {
    pub fn identity() -> Self {
        let mut m = Self::zeroed();
        m.eye();
        m
    }

    pub fn new_translation(t: &Vector3) -> Self {
        let mut m = Self::identity();
        m.m30 = t.x;
        m.m31 = t.y;
        m.m32 = t.z;
        m
    }

    pub fn new_frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = Self::identity();
        m.frustum(left, right, bottom, top, near, far);
        m
    }

    pub fn new_projection(view_angle: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        let mut m = Self::identity();
        m.projection(view_angle, width, height, near, far);
        m
    }

    pub fn new_rotation(angle: f32, axis: &Vector3) -> Self {
        let mut m = Self::identity();
        m.rotation(angle, axis);
        m
    }

    pub fn new_look_at(eye: &Vector3, center: &Vector3, up: &Vector3) -> Self {
        let mut m = Self::identity();
        m.look_at(eye, center, up);
        m
    }

    /// Reset to identity.
    pub fn eye(&mut self) {
        self.m00 = 1.0;
        self.m01 = 0.0;
        self.m02 = 0.0;
        self.m03 = 0.0;
        self.m10 = 0.0;
        self.m11 = 1.0;
        self.m12 = 0.0;
        self.m13 = 0.0;
        self.m20 = 0.0;
        self.m21 = 0.0;
        self.m22 = 1.0;
        self.m23 = 0.0;
        self.m30 = 0.0;
        self.m31 = 0.0;
        self.m32 = 0.0;
        self.m33 = 1.0;
    }

    /// Overwrite row `index` (0..=3). Any other index leaves the matrix untouched.
    pub fn row(&mut self, index: usize, x: f32, y: f32, z: f32, w: f32) {
        let (c0, c1, c2, c3) = match index {
            0 => (&mut self.m00, &mut self.m10, &mut self.m20, &mut self.m30),
            1 => (&mut self.m01, &mut self.m11, &mut self.m21, &mut self.m31),
            2 => (&mut self.m02, &mut self.m12, &mut self.m22, &mut self.m32),
            3 => (&mut self.m03, &mut self.m13, &mut self.m23, &mut self.m33),
            _ => return,
        };
        *c0 = x;
        *c1 = y;
        *c2 = z;
        *c3 = w;
    }

    /// OpenGL-style perspective projection from six clip planes.
    ///
    /// `right == left`, `top == bottom` or `far == near` produce Inf/NaN entries.
    pub fn frustum(&mut self, left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) {
        self.eye();

        self.m00 = (2.0 * near) / (right - left);
        self.m20 = (right + left) / (right - left);

        self.m11 = (2.0 * near) / (top - bottom);
        self.m21 = (top + bottom) / (top - bottom);

        self.m22 = -(far + near) / (far - near);
        self.m32 = -2.0 * (far * near) / (far - near);

        self.m23 = -1.0;
        self.m33 = 0.0;
    }

    /// Symmetric perspective projection from a vertical view angle in degrees
    /// and the viewport size.
    pub fn projection(&mut self, view_angle: f32, width: f32, height: f32, near: f32, far: f32) {
        let bounds = Frustum::from_view_angle(view_angle, width, height, near, far);
        log::trace!("projection bounds: {bounds:?}");

        self.frustum(
            bounds.left,
            bounds.right,
            bounds.bottom,
            bounds.top,
            bounds.near,
            bounds.far,
        );
    }

    /// Rotation of `angle` radians about a unit `axis` (Rodrigues' formula).
    pub fn rotation(&mut self, angle: f32, axis: &Vector3) {
        self.eye();

        let (c, s) = (angle.cos(), angle.sin());
        let t = 1.0 - c;
        let Vector3 { x, y, z } = *axis;

        self.m00 = t * x * x + c;
        self.m10 = t * x * y - z * s;
        self.m20 = t * x * z + y * s;

        self.m01 = t * y * x + z * s;
        self.m11 = t * y * y + c;
        self.m21 = t * y * z - x * s;

        self.m02 = t * z * x - y * s;
        self.m12 = t * z * y + x * s;
        self.m22 = t * z * z + c;
    }

    /// World-to-view transform for a camera at `eye` looking at `center`.
    ///
    /// `up` parallel to the viewing direction leaves the basis undefined and
    /// the result full of NaN.
    pub fn look_at(&mut self, eye: &Vector3, center: &Vector3, up: &Vector3) {
        // w points from the target back to the eye
        let mut w = *eye;
        w -= *center;
        w.normalize();

        let mut u = *up;
        u.cross_assign(&w);
        u.normalize();

        let mut v = w;
        v.cross_assign(&u);
        v.normalize();

        log::trace!("look_at basis: u={u:?} v={v:?} w={w:?}");

        self.eye();
        self.row(0, u.x, u.y, u.z, 0.0);
        self.row(1, v.x, v.y, v.z, 0.0);
        self.row(2, w.x, w.y, w.z, 0.0);

        self.mult_assign(&Matrix4::new_translation(&-*eye));
    }

    /// `self = self * that`.
    pub fn mult_assign(&mut self, that: &Matrix4) {
        *self = *self * *that;
    }

    /// Write all sixteen entries column-major, ready for a uniform upload.
    pub fn copy(&self, out: &mut [f32; 16]) {
        *out = self.to_cols_array();
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        [
            self.m00, self.m01, self.m02, self.m03, //
            self.m10, self.m11, self.m12, self.m13, //
            self.m20, self.m21, self.m22, self.m23, //
            self.m30, self.m31, self.m32, self.m33,
        ]
    }

    /// Transform `(v, w)` and keep x, y, z. The resulting w is never computed,
    /// so no perspective divide happens here; see [`Matrix4::project_point3`].
    pub fn mult_vector3(&self, v: &Vector3, w: f32) -> Vector3 {
        Vector3::new(
            v.x * self.m00 + v.y * self.m10 + v.z * self.m20 + w * self.m30,
            v.x * self.m01 + v.y * self.m11 + v.z * self.m21 + w * self.m31,
            v.x * self.m02 + v.y * self.m12 + v.z * self.m22 + w * self.m32,
        )
    }

    pub fn mult_vector3_write_back(&self, v: &mut Vector3, w: f32) {
        *v = self.mult_vector3(v, w);
    }

    /// Transform the point `(v, 1)` and divide by the resulting w.
    pub fn project_point3(&self, v: &Vector3) -> Vector3 {
        let w = v.x * self.m03 + v.y * self.m13 + v.z * self.m23 + self.m33;
        self.mult_vector3(v, 1.0) / w
    }

    pub fn is_finite(&self) -> bool {
        self.to_cols_array().iter().all(|e| e.is_finite())
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Column-major import, the inverse of [`Matrix4::copy`].
impl TryFrom<&[f32]> for Matrix4 {
    type Error = LinalgError;

    fn try_from(values: &[f32]) -> LinalgResult<Self> {
        let cols: &[f32; 16] = values.try_into().map_err(|_| LinalgError::BufferLength {
            expected: 16,
            actual: values.len(),
        })?;
        Ok(bytemuck::cast(*cols))
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, that: Self) -> Self {
        let (s, t) = (&self, &that);
        Self {
            m00: s.m00 * t.m00 + s.m10 * t.m01 + s.m20 * t.m02 + s.m30 * t.m03,
            m01: s.m01 * t.m00 + s.m11 * t.m01 + s.m21 * t.m02 + s.m31 * t.m03,
            m02: s.m02 * t.m00 + s.m12 * t.m01 + s.m22 * t.m02 + s.m32 * t.m03,
            m03: s.m03 * t.m00 + s.m13 * t.m01 + s.m23 * t.m02 + s.m33 * t.m03,

            m10: s.m00 * t.m10 + s.m10 * t.m11 + s.m20 * t.m12 + s.m30 * t.m13,
            m11: s.m01 * t.m10 + s.m11 * t.m11 + s.m21 * t.m12 + s.m31 * t.m13,
            m12: s.m02 * t.m10 + s.m12 * t.m11 + s.m22 * t.m12 + s.m32 * t.m13,
            m13: s.m03 * t.m10 + s.m13 * t.m11 + s.m23 * t.m12 + s.m33 * t.m13,

            m20: s.m00 * t.m20 + s.m10 * t.m21 + s.m20 * t.m22 + s.m30 * t.m23,
            m21: s.m01 * t.m20 + s.m11 * t.m21 + s.m21 * t.m22 + s.m31 * t.m23,
            m22: s.m02 * t.m20 + s.m12 * t.m21 + s.m22 * t.m22 + s.m32 * t.m23,
            m23: s.m03 * t.m20 + s.m13 * t.m21 + s.m23 * t.m22 + s.m33 * t.m23,

            m30: s.m00 * t.m30 + s.m10 * t.m31 + s.m20 * t.m32 + s.m30 * t.m33,
            m31: s.m01 * t.m30 + s.m11 * t.m31 + s.m21 * t.m32 + s.m31 * t.m33,
            m32: s.m02 * t.m30 + s.m12 * t.m31 + s.m22 * t.m32 + s.m32 * t.m33,
            m33: s.m03 * t.m30 + s.m13 * t.m31 + s.m23 * t.m32 + s.m33 * t.m33,
        }
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, that: Self) {
        self.mult_assign(&that);
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.to_cols_array()
            .iter()
            .zip(other.to_cols_array().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.to_cols_array()
            .iter()
            .zip(other.to_cols_array().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PI32;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn row_of(m: &Matrix4, index: usize) -> Vector3 {
        let cols = m.to_cols_array();
        Vector3::new(cols[index], cols[4 + index], cols[8 + index])
    }

    #[test]
    fn test_identity() {
        let m = Matrix4::default();
        let mut out = [0.0; 16];
        m.copy(&mut out);
        assert_eq!(
            out,
            [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_mult_vector3_write_back() {
        let mut v = Vector3::new(1.0, 3.0, 7.0);
        let m = Matrix4::identity();
        m.mult_vector3_write_back(&mut v, 1.0);
        assert_eq!(v, Vector3::new(1.0, 3.0, 7.0));
    }

    #[test]
    fn test_mult_vector3() {
        let v = Vector3::new(1.0, 3.0, 7.0);
        let m = Matrix4::identity();
        let k = m.mult_vector3(&v, 1.0);
        assert_eq!(k, Vector3::new(1.0, 3.0, 7.0));
        assert_eq!(v, Vector3::new(1.0, 3.0, 7.0));
    }

    #[test]
    fn test_row() {
        let mut m = Matrix4::identity();
        m.row(1, 5.0, 6.0, 7.0, 8.0);
        assert_eq!((m.m01, m.m11, m.m21, m.m31), (5.0, 6.0, 7.0, 8.0));
        assert_eq!(m.m00, 1.0);
        assert_eq!(m.m22, 1.0);
    }

    #[test]
    fn test_row_out_of_range_is_noop() {
        let mut m = Matrix4::identity();
        m.row(4, 5.0, 6.0, 7.0, 8.0);
        assert_eq!(m, Matrix4::identity());
    }

    #[test]
    fn test_frustum_entries() {
        let m = Matrix4::new_frustum(-1.0, 3.0, -2.0, 2.0, 1.0, 3.0);
        assert_eq!(m.m00, 0.5);
        assert_eq!(m.m20, 0.5);
        assert_eq!(m.m11, 0.5);
        assert_eq!(m.m21, 0.0);
        assert_eq!(m.m22, -2.0);
        assert_eq!(m.m32, -3.0);
        assert_eq!(m.m23, -1.0);
        assert_eq!(m.m33, 0.0);
        assert_eq!(m.m30, 0.0);
        assert_eq!(m.m31, 0.0);
    }

    #[test]
    fn test_frustum_degenerate_planes() {
        let m = Matrix4::new_frustum(1.0, 1.0, -1.0, 1.0, 0.1, 10.0);
        assert!(!m.is_finite());
    }

    #[test]
    fn test_projection_is_symmetric() {
        let m = Matrix4::new_projection(90.0, 16.0, 9.0, 0.1, 100.0);
        // right + left and top + bottom both vanish
        assert_eq!(m.m20, 0.0);
        assert_eq!(m.m21, 0.0);
        assert_abs_diff_eq!(m.m11, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(m.m00, 9.0 / 16.0, epsilon = 1e-5);
    }

    #[test]
    fn test_projection_matches_nalgebra() {
        let m = Matrix4::new_projection(60.0, 800.0, 600.0, 0.5, 50.0);
        let expected =
            nalgebra::Matrix4::new_perspective(800.0 / 600.0, 60.0 * PI32 / 180.0, 0.5, 50.0);
        assert_relative_eq!(m, Matrix4::from(expected), epsilon = 1e-5, max_relative = 1e-5);
    }

    #[test]
    fn test_rotation_about_z() {
        let m = Matrix4::new_rotation(PI32 / 2.0, &Vector3::new(0.0, 0.0, 1.0));
        let rotated = m.mult_vector3(&Vector3::new(1.0, 0.0, 0.0), 1.0);
        assert_abs_diff_eq!(rotated, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_keeps_homogeneous_row_and_column() {
        let mut m = Matrix4::identity();
        m.m30 = 9.0;
        m.m03 = 9.0;
        m.rotation(0.7, &Vector3::new(0.0, 0.6, 0.8));
        assert_eq!((m.m30, m.m31, m.m32, m.m33), (0.0, 0.0, 0.0, 1.0));
        assert_eq!((m.m03, m.m13, m.m23), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_rotation_matches_nalgebra() {
        let axis = Vector3::new(1.0, 2.0, -2.0).normalized();
        let m = Matrix4::new_rotation(1.2, &axis);
        let expected = nalgebra::Matrix4::from_axis_angle(
            &nalgebra::Unit::new_normalize(nalgebra::Vector3::from(axis)),
            1.2,
        );
        assert_abs_diff_eq!(m, Matrix4::from(expected), epsilon = 1e-5);
    }

    #[test]
    fn test_look_at_down_negative_z() {
        let m = Matrix4::new_look_at(
            &Vector3::new(0.0, 0.0, 5.0),
            &Vector3::zeros(),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        assert_abs_diff_eq!(m, Matrix4::new_translation(&Vector3::new(0.0, 0.0, -5.0)));

        let target = m.mult_vector3(&Vector3::zeros(), 1.0);
        assert_abs_diff_eq!(target, Vector3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn test_look_at_matches_nalgebra() {
        let eye = Vector3::new(4.0, 3.0, -2.0);
        let center = Vector3::new(-1.0, 0.5, 1.0);
        let up = Vector3::new(0.0, 1.0, 0.0);

        let m = Matrix4::new_look_at(&eye, &center, &up);
        let expected = nalgebra::Matrix4::look_at_rh(
            &nalgebra::Point3::from(eye),
            &nalgebra::Point3::from(center),
            &nalgebra::Vector3::from(up),
        );
        assert_abs_diff_eq!(m, Matrix4::from(expected), epsilon = 1e-4);
    }

    #[test]
    fn test_look_at_basis_is_orthonormal() {
        let m = Matrix4::new_look_at(
            &Vector3::new(2.0, 7.0, 1.0),
            &Vector3::new(0.0, 0.0, -3.0),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        let (u, v, w) = (row_of(&m, 0), row_of(&m, 1), row_of(&m, 2));

        for axis in [u, v, w] {
            assert_abs_diff_eq!(axis.l2_norm(), 1.0, epsilon = 1e-5);
        }
        assert_abs_diff_eq!(u.dot(&v), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(u.dot(&w), 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(v.dot(&w), 0.0, epsilon = 1e-5);
        assert_eq!((m.m03, m.m13, m.m23, m.m33), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_look_at_parallel_up_propagates_nan() {
        let m = Matrix4::new_look_at(
            &Vector3::new(0.0, 5.0, 0.0),
            &Vector3::zeros(),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        assert!(!m.is_finite());
    }

    #[test]
    fn test_mult_assign_order() {
        let scale = Matrix4::from(nalgebra::Matrix4::new_nonuniform_scaling(
            &nalgebra::Vector3::new(2.0, 3.0, 4.0),
        ));
        let mut m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        m.mult_assign(&scale);

        // scale first, then translate
        let p = m.mult_vector3(&Vector3::new(1.0, 1.0, 1.0), 1.0);
        assert_eq!(p, Vector3::new(3.0, 5.0, 7.0));

        let mut n = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        n *= scale;
        assert_eq!(n, m);
    }

    #[test]
    fn test_mult_assign_matches_nalgebra() {
        let a = Matrix4::new_look_at(
            &Vector3::new(1.0, 2.0, 3.0),
            &Vector3::zeros(),
            &Vector3::new(0.0, 1.0, 0.0),
        );
        let b = Matrix4::new_projection(45.0, 4.0, 3.0, 0.1, 10.0);

        let mut m = b;
        m.mult_assign(&a);

        let expected = nalgebra::Matrix4::from(b) * nalgebra::Matrix4::from(a);
        assert_abs_diff_eq!(m, Matrix4::from(expected), epsilon = 1e-4);
    }

    #[test]
    fn test_copy_layout_is_column_major() {
        let m = Matrix4::new_frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        let mut out = [0.0; 16];
        m.copy(&mut out);

        assert_eq!(out[11], -1.0);
        assert_eq!(out[14], m.m32);
        assert_eq!(out[15], 0.0);
        assert_eq!(bytemuck::bytes_of(&m), bytemuck::cast_slice::<f32, u8>(&out));
        assert_eq!(nalgebra::Matrix4::from(m).as_slice(), &out[..]);
    }

    #[test]
    fn test_mult_vector3_translates_points_not_directions() {
        let m = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));
        let v = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(m.mult_vector3(&v, 1.0), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(m.mult_vector3(&v, 0.0), v);
    }

    #[test]
    fn test_mult_vector3_skips_perspective_divide() {
        let m = Matrix4::new_projection(90.0, 1.0, 1.0, 1.0, 3.0);
        let p = Vector3::new(1.0, 1.0, -2.0);

        let clip = m.mult_vector3(&p, 1.0);
        assert_abs_diff_eq!(clip, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-5);

        // clip w is 2 for a point at z = -2
        let ndc = m.project_point3(&p);
        assert_abs_diff_eq!(ndc, Vector3::new(0.5, 0.5, 0.5), epsilon = 1e-5);
    }

    #[test]
    fn test_try_from_slice() {
        let m = Matrix4::new_rotation(0.3, &Vector3::new(1.0, 0.0, 0.0));
        let values = m.to_cols_array();
        assert_eq!(Matrix4::try_from(&values[..]).unwrap(), m);
        assert_eq!(
            Matrix4::try_from(&values[..12]),
            Err(LinalgError::BufferLength {
                expected: 16,
                actual: 12
            })
        );
    }
}
