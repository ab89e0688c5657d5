//! Meteors drifting toward the camera
//!
//! Each meteor travels from a fixed origin toward +Z while spinning and
//! sliding diagonally. Once it passes the reset depth it jumps back to its
//! origin with a fresh sideways speed. Meteors are never destroyed.

use crate::config::MeteorConfig;
use rand::Rng;
use starfox_engine::prelude::*;

/// Meteor geometry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorShape {
    /// Red cube, side 0.5
    Box,
    /// Yellow sphere, radius 0.25
    Sphere,
}

impl MeteorShape {
    /// Shapes alternate by index: even indices are boxes
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Self::Box
        } else {
            Self::Sphere
        }
    }

    /// Mesh geometry for this shape
    pub fn geometry(self) -> Geometry {
        match self {
            Self::Box => Geometry::cube(0.5),
            Self::Sphere => Geometry::sphere(0.25, 32, 32),
        }
    }

    /// Surface material for this shape
    pub fn material(self) -> StandardMaterial {
        match self {
            Self::Box => StandardMaterial::colored(Color::RED),
            Self::Sphere => StandardMaterial::colored(Color::YELLOW),
        }
    }
}

/// Per-tick motion constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorMotion {
    /// +Z movement per tick
    pub forward_step: f32,
    /// X/Y rotation per tick
    pub spin_step: f32,
    /// Bound of the sideways speed range
    pub max_drift_speed: f32,
    /// Depth at which a meteor returns to its origin
    pub reset_depth: f32,
    /// Optional X/Y distance from the origin that also forces a reset
    pub xy_drift_limit: Option<f32>,
}

impl Default for MeteorMotion {
    fn default() -> Self {
        Self::from_config(&MeteorConfig::default())
    }
}

impl MeteorMotion {
    /// Motion constants from configuration
    pub fn from_config(config: &MeteorConfig) -> Self {
        Self {
            forward_step: config.forward_step,
            spin_step: config.spin_step,
            max_drift_speed: config.max_drift_speed,
            reset_depth: config.reset_depth,
            xy_drift_limit: config.xy_drift_limit,
        }
    }

    /// Sample a sideways speed from `[-max_drift_speed, max_drift_speed)`
    pub fn sample_drift<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max_drift_speed > 0.0 {
            rng.gen_range(-self.max_drift_speed..self.max_drift_speed)
        } else {
            0.0
        }
    }

    /// Advance a meteor by one tick
    ///
    /// Returns the next state and whether the meteor went back to `origin`.
    /// The RNG is only consulted on reset.
    pub fn step<R: Rng + ?Sized>(&self, state: &MeteorState, origin: Vec3, rng: &mut R) -> (MeteorState, bool) {
        let mut next = *state;
        next.rotation.x += self.spin_step;
        next.rotation.y += self.spin_step;
        next.position.x += state.velocity_xy;
        next.position.y += state.velocity_xy;
        next.position.z += self.forward_step;

        let past_depth = next.position.z >= self.reset_depth;
        let past_drift = self.xy_drift_limit.is_some_and(|limit| {
            (next.position.x - origin.x).abs() > limit || (next.position.y - origin.y).abs() > limit
        });

        if past_depth || past_drift {
            next.position = origin;
            next.velocity_xy = self.sample_drift(rng);
            (next, true)
        } else {
            (next, false)
        }
    }
}

/// Animated state of one meteor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeteorState {
    /// Current position
    pub position: Vec3,
    /// Euler rotation, X and Y advance together
    pub rotation: Vec3,
    /// Speed applied to both X and Y each tick
    pub velocity_xy: f32,
}

/// A single meteor
#[derive(Debug, Clone, PartialEq)]
pub struct MeteorUnit {
    shape: MeteorShape,
    origin: Vec3,
    state: MeteorState,
}

impl MeteorUnit {
    /// Create a meteor at its origin with a sampled sideways speed
    pub fn new<R: Rng + ?Sized>(shape: MeteorShape, origin: Vec3, motion: &MeteorMotion, rng: &mut R) -> Self {
        Self {
            shape,
            origin,
            state: MeteorState {
                position: origin,
                rotation: Vec3::zeros(),
                velocity_xy: motion.sample_drift(rng),
            },
        }
    }

    /// Advance in place, returning `true` if the meteor reset
    pub fn tick<R: Rng + ?Sized>(&mut self, motion: &MeteorMotion, rng: &mut R) -> bool {
        let (next, reset) = motion.step(&self.state, self.origin, rng);
        self.state = next;
        reset
    }

    /// Geometry kind
    pub fn shape(&self) -> MeteorShape {
        self.shape
    }

    /// Position the meteor returns to
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Current animated state
    pub fn state(&self) -> &MeteorState {
        &self.state
    }

    /// Scene transform for the current state
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.state.position).with_rotation(self.state.rotation)
    }
}

/// Origin sampling area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnArea {
    /// X/Y half-extent
    pub extent: f32,
    /// Origin Z
    pub depth: f32,
}

impl Default for SpawnArea {
    fn default() -> Self {
        let config = MeteorConfig::default();
        Self {
            extent: config.spawn_extent,
            depth: config.spawn_depth,
        }
    }
}

impl SpawnArea {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let mut axis = || {
            if self.extent > 0.0 {
                rng.gen_range(-self.extent..self.extent)
            } else {
                0.0
            }
        };
        let x = axis();
        let y = axis();
        Vec3::new(x, y, self.depth)
    }
}

/// A fixed set of meteors sharing one motion and one RNG
#[derive(Debug)]
pub struct MeteorField<R> {
    units: Vec<MeteorUnit>,
    motion: MeteorMotion,
    rng: R,
    resets: u64,
}

impl<R: Rng> MeteorField<R> {
    /// Spawn `count` meteors with default area and motion
    pub fn spawn(count: usize, rng: R) -> Self {
        Self::spawn_with(count, SpawnArea::default(), MeteorMotion::default(), rng)
    }

    /// Spawn from configuration
    pub fn from_config(config: &MeteorConfig, rng: R) -> Self {
        let area = SpawnArea {
            extent: config.spawn_extent,
            depth: config.spawn_depth,
        };
        Self::spawn_with(config.count, area, MeteorMotion::from_config(config), rng)
    }

    /// Spawn `count` meteors; shapes alternate by index
    pub fn spawn_with(count: usize, area: SpawnArea, motion: MeteorMotion, mut rng: R) -> Self {
        let units = (0..count)
            .map(|index| {
                let origin = area.sample(&mut rng);
                MeteorUnit::new(MeteorShape::for_index(index), origin, &motion, &mut rng)
            })
            .collect();
        log::debug!("Spawned {} meteors", count);

        Self {
            units,
            motion,
            rng,
            resets: 0,
        }
    }

    /// Advance every meteor, returning how many reset this tick
    pub fn tick(&mut self) -> usize {
        let mut resets = 0;
        for (index, unit) in self.units.iter_mut().enumerate() {
            if unit.tick(&self.motion, &mut self.rng) {
                log::debug!("Meteor {} reset to {:?}", index, unit.origin());
                resets += 1;
            }
        }
        self.resets += resets as u64;
        resets
    }

    /// All meteors in spawn order
    pub fn units(&self) -> &[MeteorUnit] {
        &self.units
    }

    /// Motion constants
    pub fn motion(&self) -> &MeteorMotion {
        &self.motion
    }

    /// Total resets since spawning
    pub fn total_resets(&self) -> u64 {
        self.resets
    }

    /// Number of meteors
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the field is empty
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
