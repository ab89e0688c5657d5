//! # Camera
//!
//! Perspective camera and optional orbit controls. Matrix construction is
//! delegated to nalgebra.

use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// Perspective camera looking at a target
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector (typically +Y)
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height)
    /// * `near` - Distance to near clipping plane
    /// * `far` - Distance to far clipping plane
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update aspect ratio from surface dimensions
    ///
    /// A zero-area viewport (for example a minimized window) keeps the
    /// previous aspect ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
            log::trace!("Camera aspect updated to {}", self.aspect);
        }
    }

    /// World-to-view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.position), &Point3::from(self.target), &self.up)
    }

    /// View-to-clip matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit controls with clamped azimuth and polar angles
///
/// Angles are measured around the camera target: azimuth about +Y starting
/// from +Z, polar from +Y.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Whether distance changes are accepted
    pub enable_zoom: bool,
    /// Minimum azimuth angle in radians
    pub min_azimuth: f32,
    /// Maximum azimuth angle in radians
    pub max_azimuth: f32,
    /// Minimum polar angle in radians
    pub min_polar: f32,
    /// Maximum polar angle in radians
    pub max_polar: f32,
}

impl OrbitControls {
    /// Clamp a requested orbit and move the camera onto it
    ///
    /// Returns the applied `(azimuth, polar, distance)`.
    pub fn apply(&self, camera: &mut Camera, azimuth: f32, polar: f32, distance: f32) -> (f32, f32, f32) {
        let azimuth = azimuth.clamp(self.min_azimuth, self.max_azimuth);
        let polar = polar.clamp(self.min_polar, self.max_polar);
        let current_distance = (camera.position - camera.target).magnitude();
        let distance = if self.enable_zoom { distance } else { current_distance };

        let offset = Vec3::new(
            distance * polar.sin() * azimuth.sin(),
            distance * polar.cos(),
            distance * polar.sin() * azimuth.cos(),
        );
        camera.position = camera.target + offset;
        (azimuth, polar, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{PI, QUARTER_PI};
    use approx::assert_relative_eq;

    fn scene_camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 0.0, 10.0), 40.0, 16.0 / 9.0, 0.1, 10000.0)
    }

    #[test]
    fn test_perspective_defaults() {
        let camera = scene_camera();
        assert_relative_eq!(camera.fov, 40.0_f32.to_radians(), epsilon = 1e-6);
        assert_eq!(camera.target, Vec3::zeros());
        assert_eq!(camera.far, 10000.0);
    }

    #[test]
    fn test_view_matrix_moves_target_in_front() {
        let camera = scene_camera();
        let view = camera.view_matrix();
        let origin = view.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(0.0, 0.0, -10.0), epsilon = 1e-5);
    }

    #[test]
    fn test_set_viewport_ignores_zero_area() {
        let mut camera = scene_camera();
        camera.set_viewport(800, 0);
        assert_relative_eq!(camera.aspect, 16.0 / 9.0);
        camera.set_viewport(0, 720);
        assert_relative_eq!(camera.aspect, 16.0 / 9.0);
        assert!(camera.view_projection().iter().all(|v| v.is_finite()));
        camera.set_viewport(800, 400);
        assert_relative_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_orbit_clamps_azimuth_and_keeps_distance() {
        let controls = OrbitControls {
            enable_zoom: false,
            min_azimuth: -QUARTER_PI,
            max_azimuth: QUARTER_PI,
            min_polar: 0.0,
            max_polar: PI,
        };
        let mut camera = scene_camera();

        let (azimuth, polar, distance) = controls.apply(&mut camera, PI, PI * 0.5, 50.0);

        assert_relative_eq!(azimuth, QUARTER_PI);
        assert_relative_eq!(polar, PI * 0.5);
        assert_relative_eq!(distance, 10.0, epsilon = 1e-5);
        assert_relative_eq!((camera.position - camera.target).magnitude(), 10.0, epsilon = 1e-4);
        assert!(camera.position.x > 0.0);
    }
}
