//! Material descriptions handed to the renderer

use serde::{Deserialize, Serialize};

/// Linear RGB color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0 to 1.0)
    pub r: f32,
    /// Green channel (0.0 to 1.0)
    pub g: f32,
    /// Blue channel (0.0 to 1.0)
    pub b: f32,
}

impl Color {
    /// White
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Red
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Yellow
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);

    /// Create a color from channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Physically based surface material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    /// Base color
    pub color: Color,
    /// Surface roughness (0.0 to 1.0)
    pub roughness: f32,
    /// Metalness (0.0 to 1.0)
    pub metalness: f32,
    /// Opacity, only honored when `transparent` is set
    pub opacity: f32,
    /// Whether the material is alpha blended
    pub transparent: bool,
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            transparent: false,
        }
    }
}

impl StandardMaterial {
    /// Opaque material with default roughness/metalness
    pub fn colored(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Builder pattern: Set roughness and metalness
    #[must_use]
    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Make translucent
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.transparent = true;
        self
    }
}

/// Point sprite material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsMaterial {
    /// Sprite size in world units (or pixels when attenuation is off)
    pub size: f32,
    /// Whether sprites shrink with distance
    pub size_attenuation: bool,
    /// Sprite color
    pub color: Color,
    /// Whether scene fog applies
    pub fog: bool,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            size: 1.0,
            size_attenuation: true,
            color: Color::WHITE,
            fog: true,
        }
    }
}
