//! Math utilities and types
//!
//! Provides the vector and matrix aliases used by the scene graph, plus the
//! node [`Transform`].

pub use nalgebra::{Vector3, Matrix4, Rotation3, Point3 as NPoint3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = NPoint3<f32>;

/// Node transform: position, Euler rotation and scale.
///
/// Rotation is stored as Euler angles (radians, applied X then Y then Z) so
/// animated nodes can spin by plain addition on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position relative to the parent node
    pub position: Vec3,

    /// Euler rotation in radians
    pub rotation: Vec3,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set uniform scale
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder pattern: Set Euler rotation
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Convert to a transformation matrix (TRS order)
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::new_translation(&self.position)
            * rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_matrix() {
        assert_relative_eq!(Transform::identity().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_translation_and_scale() {
        let transform = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_uniform_scale(0.5);
        let point = transform.transform_point(Point3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(point, Point3::new(2.0, 3.0, 4.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_about_y() {
        let transform = Transform::identity().with_rotation(Vec3::new(0.0, constants::PI * 0.5, 0.0));
        let point = transform.transform_point(Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }
}
