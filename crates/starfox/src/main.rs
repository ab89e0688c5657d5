//! Headless starfox runner
//!
//! Runs the scene against a headless surface with a scripted pointer sweep.
//! Settings come from `starfox.toml` when present.

use starfox::{GameConfig, StarfoxScene};
use starfox_engine::config::ConfigError;
use starfox_engine::foundation::logging;
use starfox_engine::prelude::*;
use std::rc::Rc;
use thiserror::Error;

const CONFIG_PATH: &str = "starfox.toml";
const SURFACE_SIZE: (u32, u32) = (1280, 720);

#[derive(Error, Debug)]
enum RunError {
    #[error("Logging setup failed: {0}")]
    Logging(#[from] log::SetLoggerError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Moves the pointer around an ellipse inside the surface, one step per frame
struct PointerSweep {
    width: f64,
    height: f64,
    frames_per_turn: f64,
}

impl EventSource for PointerSweep {
    fn poll_events(&mut self, frame: u64) -> Vec<AppEvent> {
        let angle = std::f64::consts::TAU * (frame as f64 / self.frames_per_turn);
        vec![AppEvent::MouseMoved {
            x: self.width * (0.5 + 0.4 * angle.cos()),
            y: self.height * (0.5 + 0.4 * angle.sin()),
        }]
    }
}

fn run() -> Result<(), RunError> {
    logging::init()?;
    log::info!("Starting starfox");

    let config = GameConfig::load_or_default(CONFIG_PATH)?;
    let engine_config = EngineConfig {
        max_frames: config.simulation.frames,
        ..EngineConfig::default()
    };

    let (width, height) = SURFACE_SIZE;
    let surface = Rc::new(HeadlessSurface::new(width, height));
    let mut engine = Engine::new(engine_config, surface, Box::new(HeadlessRenderer::new()));

    let mut scene = StarfoxScene::new(config);
    let mut pointer = PointerSweep {
        width: f64::from(width),
        height: f64::from(height),
        frames_per_turn: 240.0,
    };
    engine.run(&mut scene, &mut pointer)?;

    if let Some(stats) = scene.last_stats() {
        log::info!(
            "Last frame {}: {} opaque, {} transparent, {} stars",
            stats.frame,
            stats.opaque,
            stats.transparent,
            stats.point_vertices
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match run() {
        Ok(()) => {
            log::info!("Starfox finished");
            Ok(())
        }
        Err(e) => {
            log::error!("Starfox failed: {:?}", e);
            Err(e.into())
        }
    }
}
