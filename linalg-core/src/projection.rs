//! Perspective frustum bounds.
use crate::PI32;

/// The six clip-plane distances of a perspective view volume.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Symmetric bounds from a vertical view angle in degrees and a
    /// `width / height` aspect ratio.
    pub fn from_view_angle(view_angle: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        let radians = view_angle * PI32 / 180.0;
        let half_height = (radians / 2.0).tan() * near;
        let half_width = half_height * (width / height);

        Self::new(-half_width, half_width, -half_height, half_height, near, far)
    }

    pub fn aspect_ratio(&self) -> f32 {
        (self.right - self.left) / (self.top - self.bottom)
    }
}
