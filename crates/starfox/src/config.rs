//! Game configuration
//!
//! Every tunable constant of the scene lives here. Missing sections or fields
//! fall back to the defaults below, so a partial `starfox.toml` is valid.

use serde::{Deserialize, Serialize};
use starfox_engine::config::Config;

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Meteor field settings
    pub meteors: MeteorConfig,

    /// Background starfield settings
    pub starfield: StarfieldConfig,

    /// Pointer mapping settings
    pub pointer: PointerConfig,

    /// Player craft settings
    pub player: PlayerConfig,

    /// Camera settings
    pub camera: CameraConfig,

    /// Headless run settings
    pub simulation: SimulationConfig,
}

impl Config for GameConfig {}

/// Meteor field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    /// Number of meteors
    pub count: usize,

    /// Origins are sampled from `[-spawn_extent, spawn_extent)` on X and Y
    pub spawn_extent: f32,

    /// Origin depth (Z)
    pub spawn_depth: f32,

    /// A meteor returns to its origin once Z reaches this depth
    pub reset_depth: f32,

    /// Forward (+Z) movement per tick
    pub forward_step: f32,

    /// Rotation about X and Y per tick, in radians
    pub spin_step: f32,

    /// Sideways speed is sampled from `[-max_drift_speed, max_drift_speed)`
    pub max_drift_speed: f32,

    /// Optional bound on X/Y distance from the origin before a forced reset
    pub xy_drift_limit: Option<f32>,
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            count: 100,
            spawn_extent: 5.0,
            spawn_depth: -50.0,
            reset_depth: 10.0,
            forward_step: 0.01,
            spin_step: 0.01,
            max_drift_speed: 0.005,
            xy_drift_limit: None,
        }
    }
}

/// Starfield configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of stars
    pub count: usize,

    /// Radius of the sphere stars are placed on
    pub radius: f32,

    /// X/Y jitter half-range
    pub jitter_xy: f32,

    /// Z jitter half-range
    pub jitter_z: f32,

    /// Rotation about Y per tick, in radians (negative turns clockwise)
    pub drift_per_tick: f32,

    /// Point sprite size
    pub point_size: f32,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 8000,
            radius: 4000.0,
            jitter_xy: 2000.0,
            jitter_z: 1000.0,
            drift_per_tick: -0.0001,
            point_size: 12.5,
        }
    }
}

/// Pointer-to-scene mapping: `coord / extent * scale - offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Scene units spanned by the full surface
    pub scale: f32,

    /// Subtracted after scaling so the surface centre maps to zero
    pub offset: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self { scale: 4.0, offset: 2.0 }
    }
}

/// Player craft configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Model file, resolved through the asset search paths
    pub model_path: String,

    /// Name of the model node holding the craft mesh
    pub node_name: String,

    /// Uniform scale applied to the loaded mesh
    pub scale: f32,

    /// Container position before the first pointer event
    pub start_position: [f32; 3],
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            model_path: "models/arwing.glb".to_string(),
            node_name: "Default".to_string(),
            scale: 0.5,
            start_position: [1.0, 0.0, 0.0],
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position
    pub position: [f32; 3],

    /// Vertical field of view in degrees
    pub fov: f32,

    /// Near clipping plane
    pub near: f32,

    /// Far clipping plane
    pub far: f32,

    /// Enable clamped orbit controls
    pub orbit_controls: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
            fov: 40.0,
            near: 0.1,
            far: 10000.0,
            orbit_controls: false,
        }
    }
}

/// Headless run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames to run before exiting; `None` runs until closed
    pub frames: Option<u64>,

    /// Seed for all random sampling; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: Some(600),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("starfox_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults_match_scene() {
        let config = GameConfig::default();
        assert_eq!(config.meteors.count, 100);
        assert_eq!(config.starfield.count, 8000);
        assert_eq!(config.player.node_name, "Default");
        assert_eq!(config.camera.position, [0.0, 0.0, 10.0]);
        assert!(!config.camera.orbit_controls);
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("round_trip.toml");
        let mut config = GameConfig::default();
        config.meteors.xy_drift_limit = Some(3.0);
        config.simulation.seed = Some(42);

        config.save_to_file(&path).expect("save");
        let loaded = GameConfig::load_from_file(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial.toml");
        std::fs::write(&path, "[meteors]\ncount = 12\n").expect("write");
        let loaded = GameConfig::load_from_file(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.meteors.count, 12);
        assert_eq!(loaded.meteors.reset_depth, 10.0);
        assert_eq!(loaded.starfield, StarfieldConfig::default());
    }
}
