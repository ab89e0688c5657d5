//! Core engine implementation

use crate::{
    application::{Application, AppEvent},
    assets::{AssetConfig, AssetManager},
    events::EventTarget,
    foundation::time::{FrameTick, Timer},
    frame::FrameLoop,
    render::{Camera, DirectionalLight, Frame, FrameStats, RenderError, RenderQueue, RenderSurface, Renderer},
};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Stop after this many frames; `None` runs until close is requested
    pub max_frames: Option<u64>,

    /// Fixed frame step in seconds; `None` uses wall-clock deltas
    pub fixed_delta: Option<f32>,

    /// Asset loading configuration
    pub assets: AssetConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_frames: None,
            fixed_delta: Some(1.0 / 60.0),
            assets: AssetConfig::default(),
        }
    }
}

/// Source of input events, polled once per frame
pub trait EventSource {
    /// Events that arrived since the previous frame
    fn poll_events(&mut self, frame: u64) -> Vec<AppEvent>;
}

/// Event source that never produces anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl EventSource for NoEvents {
    fn poll_events(&mut self, _frame: u64) -> Vec<AppEvent> {
        Vec::new()
    }
}

/// Main engine struct
///
/// The engine owns the frame clock, the global event target, the rendering
/// surface and backend, and drives the main loop.
pub struct Engine {
    /// Per-frame subscribers
    pub frame_loop: FrameLoop,

    /// Global input target (the "window")
    pub window: EventTarget,

    /// Asset management system
    pub assets: AssetManager,

    surface: Rc<dyn RenderSurface>,
    renderer: Box<dyn Renderer>,
    timer: Timer,
    config: EngineConfig,
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, surface: Rc<dyn RenderSurface>, renderer: Box<dyn Renderer>) -> Self {
        log::info!("Initializing engine...");
        Self {
            frame_loop: FrameLoop::new(),
            window: EventTarget::new("window"),
            assets: AssetManager::new(config.assets.clone()),
            surface,
            renderer,
            timer: Timer::new(),
            config,
            running: true,
        }
    }

    /// Run the main loop with the given application and event source
    ///
    /// Per frame: deliver pending events, run frame subscribers, update the
    /// application, render. The application is unmounted on every exit path.
    pub fn run<T: Application, S: EventSource>(&mut self, app: &mut T, events: &mut S) -> Result<(), EngineError> {
        self.running = true;
        app.mount(self)
            .map_err(|e| EngineError::ApplicationError(format!("App mount: {e}")))?;

        log::info!("Starting main loop...");
        let result = self.main_loop(app, events);

        app.unmount(self);
        match &result {
            Ok(()) => log::info!(
                "Engine shutdown complete after {} frames ({:.2}s)",
                self.timer.frame_count(),
                self.timer.total_time()
            ),
            Err(e) => log::error!("Engine stopped: {}", e),
        }
        result
    }

    fn main_loop<T: Application, S: EventSource>(&mut self, app: &mut T, events: &mut S) -> Result<(), EngineError> {
        while self.running {
            if self
                .config
                .max_frames
                .is_some_and(|max| self.timer.frame_count() >= max)
            {
                break;
            }

            for event in events.poll_events(self.timer.frame_count()) {
                app.handle_event(self, &event)
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {e}")))?;
            }

            let tick = self.next_tick();
            self.frame_loop.run(&tick);

            app.update(self, &tick)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;
            app.render(self)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {e}")))?;
        }
        Ok(())
    }

    fn next_tick(&mut self) -> FrameTick {
        match self.config.fixed_delta {
            Some(delta) => self.timer.step(delta),
            None => self.timer.update(),
        }
    }

    /// Deliver an event to the global target
    pub fn handle_event(&mut self, event: &AppEvent) {
        if matches!(event, AppEvent::WindowCloseRequested) {
            self.quit();
        }
        let delivered = self.window.dispatch(event);
        log::trace!("{:?} delivered to {} listener(s)", event.kind(), delivered);
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Shared handle to the rendering surface
    pub fn surface(&self) -> Rc<dyn RenderSurface> {
        Rc::clone(&self.surface)
    }

    /// Hand a built frame to the rendering backend
    ///
    /// Fails with [`RenderError::SurfaceLost`] when the surface is detached or
    /// has zero area.
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        lights: &[DirectionalLight],
        queue: &RenderQueue,
    ) -> Result<FrameStats, RenderError> {
        match self.surface.size() {
            Some((width, height)) if width > 0 && height > 0 => {}
            _ => return Err(RenderError::SurfaceLost),
        }
        let frame = Frame {
            index: self.timer.frame_count().saturating_sub(1),
            camera,
            lights,
            queue,
        };
        self.renderer.render(&frame)
    }

    /// Frame timing
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::events::EventKind;
    use crate::render::{HeadlessRenderer, HeadlessSurface};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<String>>>,
        guards: Vec<crate::frame::FrameSubscription>,
        listener: Option<crate::events::ListenerGuard>,
    }

    impl Application for Recorder {
        fn mount(&mut self, engine: &mut Engine) -> Result<(), AppError> {
            let log = Rc::clone(&self.log);
            self.guards.push(engine.frame_loop.subscribe("recorder", move |tick| {
                log.borrow_mut().push(format!("tick {}", tick.frame));
            }));
            let log = Rc::clone(&self.log);
            self.listener = Some(engine.window.add_listener(EventKind::MouseMove, move |event| {
                log.borrow_mut().push(format!("{event:?}"));
            }));
            self.log.borrow_mut().push("mount".to_string());
            Ok(())
        }

        fn update(&mut self, _engine: &mut Engine, tick: &FrameTick) -> Result<(), AppError> {
            self.log.borrow_mut().push(format!("update {}", tick.frame));
            Ok(())
        }

        fn unmount(&mut self, engine: &mut Engine) {
            self.guards.clear();
            self.listener = None;
            assert!(engine.frame_loop.is_empty());
            self.log.borrow_mut().push("unmount".to_string());
        }
    }

    struct OneMove;

    impl EventSource for OneMove {
        fn poll_events(&mut self, frame: u64) -> Vec<AppEvent> {
            if frame == 1 {
                vec![AppEvent::MouseMoved { x: 3.0, y: 4.0 }]
            } else {
                Vec::new()
            }
        }
    }

    fn engine(max_frames: u64) -> Engine {
        let config = EngineConfig {
            max_frames: Some(max_frames),
            ..Default::default()
        };
        Engine::new(config, Rc::new(HeadlessSurface::new(800, 600)), Box::new(HeadlessRenderer::new()))
    }

    #[test]
    fn test_loop_order_and_teardown() {
        let mut engine = engine(2);
        let mut app = Recorder::default();
        engine.run(&mut app, &mut OneMove).expect("run");

        let log = app.log.borrow();
        assert_eq!(
            *log,
            vec![
                "mount".to_string(),
                "tick 0".to_string(),
                "update 0".to_string(),
                "MouseMoved { x: 3.0, y: 4.0 }".to_string(),
                "tick 1".to_string(),
                "update 1".to_string(),
                "unmount".to_string(),
            ]
        );
        assert_eq!(engine.window.listener_count(EventKind::MouseMove), 0);
    }

    struct CloseImmediately;

    impl EventSource for CloseImmediately {
        fn poll_events(&mut self, _frame: u64) -> Vec<AppEvent> {
            vec![AppEvent::WindowCloseRequested]
        }
    }

    #[test]
    fn test_render_frame_requires_surface() {
        let surface = Rc::new(HeadlessSurface::new(800, 600));
        let mut engine = Engine::new(
            EngineConfig::default(),
            Rc::clone(&surface) as Rc<dyn RenderSurface>,
            Box::new(HeadlessRenderer::new()),
        );
        let camera = Camera::perspective(crate::foundation::math::Vec3::new(0.0, 0.0, 10.0), 40.0, 1.0, 0.1, 100.0);
        let lights = [DirectionalLight::new(crate::foundation::math::Vec3::new(1.0, 1.0, 1.0), 0.5)];

        let stats = engine.render_frame(&camera, &lights, &RenderQueue::new()).expect("render");
        assert_eq!(stats.lights, 1);

        surface.detach();
        assert!(matches!(
            engine.render_frame(&camera, &lights, &RenderQueue::new()),
            Err(RenderError::SurfaceLost)
        ));
    }

    #[test]
    fn test_render_frame_rejects_zero_area_surface() {
        let surface = Rc::new(HeadlessSurface::new(800, 600));
        let mut engine = Engine::new(
            EngineConfig::default(),
            Rc::clone(&surface) as Rc<dyn RenderSurface>,
            Box::new(HeadlessRenderer::new()),
        );
        let camera = Camera::perspective(crate::foundation::math::Vec3::new(0.0, 0.0, 10.0), 40.0, 1.0, 0.1, 100.0);

        surface.resize(0, 600);
        assert!(matches!(
            engine.render_frame(&camera, &[], &RenderQueue::new()),
            Err(RenderError::SurfaceLost)
        ));

        surface.resize(800, 0);
        assert!(matches!(
            engine.render_frame(&camera, &[], &RenderQueue::new()),
            Err(RenderError::SurfaceLost)
        ));
    }

    #[test]
    fn test_close_request_stops_loop() {
        let mut engine = engine(100);
        let mut app = Recorder::default();
        engine.run(&mut app, &mut CloseImmediately).expect("run");
        // The frame that saw the close still completes
        assert_eq!(engine.timer().frame_count(), 1);
    }
}
