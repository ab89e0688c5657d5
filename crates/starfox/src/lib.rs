//! # Starfox
//!
//! A small space scene: a slowly turning starfield, a player craft that
//! follows the pointer, and a field of meteors drifting toward the camera.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::cast_possible_truncation)]

pub mod config;
pub mod meteor;
pub mod player;
pub mod pointer;
pub mod scene;
pub mod starfield;

pub use config::GameConfig;
pub use scene::StarfoxScene;
