//! Application trait and lifecycle management

use crate::assets::AssetError;
use crate::engine::{Engine, EngineError};
use crate::foundation::time::FrameTick;
use crate::render::RenderError;
use crate::scene::SceneError;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to describe a scene driven by the engine loop.
pub trait Application {
    /// Mount the application
    ///
    /// Called once before the first frame. Build the scene graph, register
    /// frame subscribers and input listeners here.
    fn mount(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame after the frame loop subscribers have run.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `tick` - The frame being produced
    fn update(&mut self, engine: &mut Engine, tick: &FrameTick) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update. The default implementation renders nothing.
    fn render(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Handle application events
    ///
    /// Called for every event pulled from the event source, before the frame ticks.
    fn handle_event(&mut self, engine: &mut Engine, event: &AppEvent) -> Result<(), AppError> {
        engine.handle_event(event);
        Ok(())
    }

    /// Unmount the application
    ///
    /// Called when the loop stops. Release listeners and subscriptions here.
    fn unmount(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Asset loading error
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Scene graph error
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Rendering error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Window was resized
    WindowResized {
        /// New window width
        width: u32,
        /// New window height
        height: u32,
    },

    /// Window close requested
    WindowCloseRequested,

    /// Pointer movement, in pixels relative to the viewport
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },
}
