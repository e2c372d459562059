//! Conversions to and from `nalgebra`.
//!
//! `m{col}{row}` maps to nalgebra's `(row, col)` index, so a converted matrix
//! transforms column vectors exactly as the unconverted one does.
use crate::{Matrix3, Matrix4, Vector3};

impl From<Vector3> for nalgebra::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Vector3<f32>> for Vector3 {
    fn from(v: nalgebra::Vector3<f32>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Point3<f32> {
    fn from(v: Vector3) -> Self {
        nalgebra::Point3::new(v.x, v.y, v.z)
    }
}

impl From<nalgebra::Point3<f32>> for Vector3 {
    fn from(p: nalgebra::Point3<f32>) -> Self {
        Vector3::new(p.x, p.y, p.z)
    }
}

impl From<Matrix3> for nalgebra::Matrix3<f32> {
    fn from(m: Matrix3) -> Self {
        nalgebra::Matrix3::from_column_slice(&m.to_cols_array())
    }
}

impl From<nalgebra::Matrix3<f32>> for Matrix3 {
    fn from(m: nalgebra::Matrix3<f32>) -> Self {
        let mut cols = [0.0; 9];
        cols.copy_from_slice(m.as_slice());
        bytemuck::cast(cols)
    }
}

impl From<Matrix4> for nalgebra::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        nalgebra::Matrix4::from_column_slice(&m.to_cols_array())
    }
}

impl From<nalgebra::Matrix4<f32>> for Matrix4 {
    fn from(m: nalgebra::Matrix4<f32>) -> Self {
        let mut cols = [0.0; 16];
        cols.copy_from_slice(m.as_slice());
        bytemuck::cast(cols)
    }
}
