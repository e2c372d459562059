//! 3x3 linear-transform matrix.
use std::ops::Mul;

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::error::{LinalgError, LinalgResult};
use crate::matrix4::Matrix4;
use crate::vector3::Vector3;

/// A 3x3 `f32` matrix.
///
/// Entries are named column first, row second: `m21` is column 2, row 1.
/// Fields are laid out column-major.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Matrix3 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
}

impl Matrix3 {
    pub fn identity() -> Self {
        let mut m = Self::zeroed();
        m.eye();
        m
    }

    /// Build from row-major values, `rows[row][col]`.
    pub fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self {
            m00: rows[0][0],
            m01: rows[1][0],
            m02: rows[2][0],
            m10: rows[0][1],
            m11: rows[1][1],
            m12: rows[2][1],
            m20: rows[0][2],
            m21: rows[1][2],
            m22: rows[2][2],
        }
    }

    /// The inverse-transpose of the upper-left 3x3 block of `view`.
    pub fn normal_matrix(view: &Matrix4) -> Self {
        let mut m = Self::identity();
        m.make_normal_matrix(view);
        m
    }

    /// Reset to identity.
    pub fn eye(&mut self) {
        self.m00 = 1.0;
        self.m01 = 0.0;
        self.m02 = 0.0;
        self.m10 = 0.0;
        self.m11 = 1.0;
        self.m12 = 0.0;
        self.m20 = 0.0;
        self.m21 = 0.0;
        self.m22 = 1.0;
    }

    pub fn determinant(&self) -> f32 {
        let (a, b, c) = (self.m00, self.m10, self.m20);
        let (d, e, f) = (self.m01, self.m11, self.m21);
        let (g, h, k) = (self.m02, self.m12, self.m22);

        a * (e * k - f * h) - b * (k * d - f * g) + c * (d * h - e * g)
    }

    /// Swap the off-diagonal pairs in place.
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.m01, &mut self.m10);
        std::mem::swap(&mut self.m02, &mut self.m20);
        std::mem::swap(&mut self.m12, &mut self.m21);
    }

    pub fn transposed(&self) -> Self {
        let mut m = *self;
        m.transpose();
        m
    }

    /// Invert in place as adjugate / determinant.
    ///
    /// A singular matrix is not guarded against and yields Inf/NaN entries.
    pub fn invert(&mut self) {
        let det = self.determinant();

        let (a, b, c) = (self.m00, self.m10, self.m20);
        let (d, e, f) = (self.m01, self.m11, self.m21);
        let (g, h, k) = (self.m02, self.m12, self.m22);

        // cofactor matrix, then transpose into the adjugate
        *self = Self::from_rows([
            [e * k - f * h, -(d * k - f * g), d * h - e * g],
            [-(b * k - c * h), a * k - c * g, -(a * h - b * g)],
            [b * f - c * e, -(a * f - c * d), a * e - b * d],
        ]);
        self.transpose();

        self.m00 /= det;
        self.m01 /= det;
        self.m02 /= det;
        self.m10 /= det;
        self.m11 /= det;
        self.m12 /= det;
        self.m20 /= det;
        self.m21 /= det;
        self.m22 /= det;
    }

    pub fn inverted(&self) -> Self {
        let mut m = *self;
        m.invert();
        m
    }

    /// Load the upper-left block of `view`, then invert and transpose it.
    pub fn make_normal_matrix(&mut self, view: &Matrix4) {
        self.m00 = view.m00;
        self.m10 = view.m10;
        self.m20 = view.m20;

        self.m01 = view.m01;
        self.m11 = view.m11;
        self.m21 = view.m21;

        self.m02 = view.m02;
        self.m12 = view.m12;
        self.m22 = view.m22;

        self.invert();
        self.transpose();
    }

    pub fn mult_vector3(&self, v: &Vector3) -> Vector3 {
        Vector3::new(
            v.x * self.m00 + v.y * self.m10 + v.z * self.m20,
            v.x * self.m01 + v.y * self.m11 + v.z * self.m21,
            v.x * self.m02 + v.y * self.m12 + v.z * self.m22,
        )
    }

    pub fn mult_vector3_write_back(&self, v: &mut Vector3) {
        *v = self.mult_vector3(v);
    }

    /// Column-major copy of the nine entries.
    pub fn to_cols_array(&self) -> [f32; 9] {
        [
            self.m00, self.m01, self.m02, self.m10, self.m11, self.m12, self.m20, self.m21,
            self.m22,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_cols_array().iter().all(|e| e.is_finite())
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Column-major import.
impl TryFrom<&[f32]> for Matrix3 {
    type Error = LinalgError;

    fn try_from(values: &[f32]) -> LinalgResult<Self> {
        let cols: &[f32; 9] = values.try_into().map_err(|_| LinalgError::BufferLength {
            expected: 9,
            actual: values.len(),
        })?;
        Ok(bytemuck::cast(*cols))
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, that: Self) -> Self {
        let (s, t) = (&self, &that);
        Self {
            m00: s.m00 * t.m00 + s.m10 * t.m01 + s.m20 * t.m02,
            m01: s.m01 * t.m00 + s.m11 * t.m01 + s.m21 * t.m02,
            m02: s.m02 * t.m00 + s.m12 * t.m01 + s.m22 * t.m02,

            m10: s.m00 * t.m10 + s.m10 * t.m11 + s.m20 * t.m12,
            m11: s.m01 * t.m10 + s.m11 * t.m11 + s.m21 * t.m12,
            m12: s.m02 * t.m10 + s.m12 * t.m11 + s.m22 * t.m12,

            m20: s.m00 * t.m20 + s.m10 * t.m21 + s.m20 * t.m22,
            m21: s.m01 * t.m20 + s.m11 * t.m21 + s.m21 * t.m22,
            m22: s.m02 * t.m20 + s.m12 * t.m21 + s.m22 * t.m22,
        }
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, v: Vector3) -> Vector3 {
        self.mult_vector3(&v)
    }
}

impl AbsDiffEq for Matrix3 {
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

impl RelativeEq for Matrix3 {
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
