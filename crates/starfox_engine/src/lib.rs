//! # Starfox Engine
//!
//! Frame loop, scene graph and asset plumbing for small interactive 3D scenes.
//!
//! ## Features
//!
//! - **Frame Loop**: Per-frame tick subscribers held by scoped guards
//! - **Event Target**: Global input listeners with swappable handlers
//! - **Scene Graph**: Retained node tree collected into a render queue every frame
//! - **Asset Slots**: Background glTF loading polled from the frame loop
//! - **Render Boundary**: Camera, lights, surface and renderer traits with headless backends
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use starfox_engine::prelude::*;
//!
//! struct MyScene;
//!
//! impl Application for MyScene {
//!     fn mount(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, tick: &FrameTick) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn unmount(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let surface = std::rc::Rc::new(HeadlessSurface::new(1280, 720));
//!     let mut engine = Engine::new(EngineConfig::default(), surface, Box::new(HeadlessRenderer::new()));
//!     engine.run(&mut MyScene, &mut NoEvents)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod frame;
pub mod assets;
pub mod scene;
pub mod render;

mod application;
mod engine;

pub use application::{Application, AppError, AppEvent};
pub use engine::{Engine, EngineConfig, EngineError, EventSource, NoEvents};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        Engine, EngineConfig, EngineError, EventSource, NoEvents,
        foundation::{
            math::{Vec3, Mat4, Transform},
            time::{FrameTick, Timer},
        },
        config::{Config, ConfigError},
        events::{EventKind, EventTarget, HandlerCell, ListenerGuard},
        frame::{FrameLoop, FrameSubscription},
        assets::{Asset, AssetError, AssetManager, AssetSlot, ModelAsset},
        scene::{SceneGraph, SceneError, Node, NodeContent, NodeId, Geometry},
        render::{
            Camera, Color, DirectionalLight, StandardMaterial, PointsMaterial, PointVertex,
            RenderSurface, HeadlessSurface, Renderer, HeadlessRenderer, RenderQueue, RenderError,
        },
    };
}
