//! Scene lights

use super::Color;
use crate::foundation::math::Vec3;

/// Directional light shining from `position` toward the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Light position; the direction is from here toward the origin
    pub position: Vec3,
    /// Intensity multiplier
    pub intensity: f32,
    /// Light color
    pub color: Color,
}

impl DirectionalLight {
    /// White directional light
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
            color: Color::WHITE,
        }
    }

    /// Normalized direction the light travels in
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize()
    }
}
