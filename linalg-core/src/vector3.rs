//! Three-component `f32` vector.
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::error::{LinalgError, LinalgResult};

/// A 3D vector of `f32` components.
///
/// A unit-length vector is not an invariant of this type; `normalize` is a
/// transient operation and callers may hold vectors of any length.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Copy all components from `v`.
    pub fn set(&mut self, v: &Vector3) {
        self.x = v.x;
        self.y = v.y;
        self.z = v.z;
    }

    pub fn dot(&self, a: &Vector3) -> f32 {
        self.x * a.x + self.y * a.y + self.z * a.z
    }

    /// Right-handed cross product `self × a`.
    pub fn cross(&self, a: &Vector3) -> Vector3 {
        Vector3::new(
            self.y * a.z - self.z * a.y,
            self.z * a.x - self.x * a.z,
            self.x * a.y - self.y * a.x,
        )
    }

    /// In-place `self = self × a`.
    pub fn cross_assign(&mut self, a: &Vector3) {
        // every component reads the old receiver
        *self = self.cross(a);
    }

    /// Component-wise (Hadamard) product.
    pub fn component_mul(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.x * v.x, self.y * v.y, self.z * v.z)
    }

    pub fn component_mul_assign(&mut self, v: &Vector3) {
        self.x *= v.x;
        self.y *= v.y;
        self.z *= v.z;
    }

    /// Component-wise division.
    pub fn component_div(&self, v: &Vector3) -> Vector3 {
        Vector3::new(self.x / v.x, self.y / v.y, self.z / v.z)
    }

    pub fn component_div_assign(&mut self, v: &Vector3) {
        self.x /= v.x;
        self.y /= v.y;
        self.z /= v.z;
    }

    /// Euclidean length.
    pub fn l2_norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Sum of absolute components.
    pub fn l1_norm(&self) -> f32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Scale to unit length in place.
    ///
    /// A zero-length vector is not guarded against: its components become NaN.
    pub fn normalize(&mut self) {
        *self /= self.l2_norm();
    }

    pub fn normalized(&self) -> Vector3 {
        *self / self.l2_norm()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl TryFrom<&[f32]> for Vector3 {
    type Error = LinalgError;

    fn try_from(values: &[f32]) -> LinalgResult<Self> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            _ => Err(LinalgError::BufferLength {
                expected: 3,
                actual: values.len(),
            }),
        }
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(mut self, v: Self) -> Self {
        self += v;
        self
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, v: Self) {
        self.x += v.x;
        self.y += v.y;
        self.z += v.z;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(mut self, v: Self) -> Self {
        self -= v;
        self
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, v: Self) {
        self.x -= v.x;
        self.y -= v.y;
        self.z -= v.z;
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;

    fn mul(mut self, s: f32) -> Self {
        self *= s;
        self
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, s: f32) {
        self.x *= s;
        self.y *= s;
        self.z *= s;
    }
}

impl Div<f32> for Vector3 {
    type Output = Self;

    fn div(mut self, s: f32) -> Self {
        self /= s;
        self
    }
}

impl DivAssign<f32> for Vector3 {
    fn div_assign(&mut self, s: f32) {
        self.x /= s;
        self.y /= s;
        self.z /= s;
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Vector3 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}
