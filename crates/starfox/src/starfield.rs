//! Background starfield
//!
//! Stars sit near a large sphere around the scene, jittered so the shell looks
//! like a loose cloud. The point buffer is generated once per star count and
//! shared; the enclosing group slowly turns about +Y.

use crate::config::StarfieldConfig;
use rand::Rng;
use starfox_engine::foundation::math::constants::TAU;
use starfox_engine::prelude::*;
use std::sync::Arc;

/// Shape of the star cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarShell {
    /// Sphere radius
    pub radius: f32,
    /// X/Y jitter half-range
    pub jitter_xy: f32,
    /// Z jitter half-range
    pub jitter_z: f32,
}

impl Default for StarShell {
    fn default() -> Self {
        let config = StarfieldConfig::default();
        Self {
            radius: config.radius,
            jitter_xy: config.jitter_xy,
            jitter_z: config.jitter_z,
        }
    }
}

impl StarShell {
    /// Sample `count` star positions
    ///
    /// Directions are uniform over the sphere (`theta = 2π·u`,
    /// `phi = acos(2v - 1)`), then each axis is jittered.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<PointVertex> {
        (0..count)
            .map(|_| {
                let theta = TAU * rng.gen::<f32>();
                let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
                let x = self.radius * theta.cos() * phi.sin() + symmetric(rng, self.jitter_xy);
                let y = self.radius * theta.sin() * phi.sin() + symmetric(rng, self.jitter_xy);
                let z = self.radius * phi.cos() + symmetric(rng, self.jitter_z);
                PointVertex::new(x, y, z)
            })
            .collect()
    }

    /// Whether a point lies inside the jittered shell's bounding box
    pub fn contains(&self, point: &PointVertex) -> bool {
        let [x, y, z] = point.position;
        let xy = self.radius + self.jitter_xy;
        let depth = self.radius + self.jitter_z;
        x.abs() <= xy && y.abs() <= xy && z.abs() <= depth
    }
}

/// Uniform sample from `[-half, half)`, zero for an empty range
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

/// Starfield state: memoized point buffer plus group rotation
#[derive(Debug)]
pub struct Starfield<R> {
    shell: StarShell,
    material: PointsMaterial,
    drift_per_tick: f32,
    rotation_y: f32,
    cached: Option<(usize, Arc<[PointVertex]>)>,
    rng: R,
}

impl<R: Rng> Starfield<R> {
    /// Starfield with default shell, material and drift
    pub fn new(rng: R) -> Self {
        Self::from_config(&StarfieldConfig::default(), rng)
    }

    /// Starfield from configuration
    pub fn from_config(config: &StarfieldConfig, rng: R) -> Self {
        Self {
            shell: StarShell {
                radius: config.radius,
                jitter_xy: config.jitter_xy,
                jitter_z: config.jitter_z,
            },
            material: PointsMaterial {
                size: config.point_size,
                size_attenuation: true,
                color: Color::WHITE,
                fog: false,
            },
            drift_per_tick: config.drift_per_tick,
            rotation_y: 0.0,
            cached: None,
            rng,
        }
    }

    /// Point buffer for `count` stars
    ///
    /// The same count returns the same shared buffer; a different count
    /// regenerates and replaces it.
    pub fn points(&mut self, count: usize) -> Arc<[PointVertex]> {
        if let Some((cached_count, points)) = &self.cached {
            if *cached_count == count {
                return Arc::clone(points);
            }
        }

        let points: Arc<[PointVertex]> = self.shell.generate(count, &mut self.rng).into();
        log::debug!("Generated {} stars", count);
        self.cached = Some((count, Arc::clone(&points)));
        points
    }

    /// Advance the group rotation by one tick
    pub fn tick(&mut self) {
        self.rotation_y += self.drift_per_tick;
    }

    /// Current group rotation about +Y, in radians
    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Group transform for the current rotation
    pub fn transform(&self) -> Transform {
        Transform::identity().with_rotation(Vec3::new(0.0, self.rotation_y, 0.0))
    }

    /// Star sprite material
    pub fn material(&self) -> PointsMaterial {
        self.material
    }

    /// Cloud shape
    pub fn shell(&self) -> &StarShell {
        &self.shell
    }
}
