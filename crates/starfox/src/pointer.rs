//! Pointer-to-scene mapping
//!
//! Pointer pixels are mapped into a small square of scene units centred on
//! the origin and written into the player craft's container position.

use crate::config::PointerConfig;
use starfox_engine::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

/// Map a pointer position in pixels to scene units
///
/// `coord / extent * scale - offset` per axis, `z = 0`. A zero-sized surface
/// yields non-finite coordinates.
pub fn to_scene(client_x: f64, client_y: f64, width: u32, height: u32, config: &PointerConfig) -> Vec3 {
    let map = |coord: f64, extent: u32| (coord / f64::from(extent)) as f32 * config.scale - config.offset;
    Vec3::new(map(client_x, width), map(client_y, height), 0.0)
}

/// Keeps a scene position in sync with the pointer
///
/// Registers one listener on mount. The listener forwards to a
/// [`HandlerCell`], so the mapping can be swapped while mounted.
pub struct PointerMapper {
    handler: HandlerCell<AppEvent>,
    guard: Option<ListenerGuard>,
}

impl PointerMapper {
    /// Mapper writing into `target` using the size of `surface`
    pub fn new(surface: Rc<dyn RenderSurface>, target: Rc<Cell<Vec3>>, config: PointerConfig) -> Self {
        Self {
            handler: HandlerCell::new(scene_handler(surface, target, config)),
            guard: None,
        }
    }

    /// Start listening on `events`
    pub fn mount(&mut self, events: &EventTarget) {
        if self.guard.is_some() {
            log::warn!("Pointer mapper already mounted");
            return;
        }
        let handler = self.handler.clone();
        self.guard = Some(events.add_listener(EventKind::MouseMove, move |event| handler.call(event)));
        log::debug!("Pointer mapper listening on '{}'", events.name());
    }

    /// Stop listening
    pub fn unmount(&mut self) {
        if self.guard.take().is_some() {
            log::debug!("Pointer mapper detached");
        }
    }

    /// Whether a listener is registered
    pub fn is_mounted(&self) -> bool {
        self.guard.is_some()
    }

    /// Replace the mapping logic without re-registering the listener
    pub fn set_handler(&self, handler: impl Fn(&AppEvent) + 'static) {
        self.handler.replace(handler);
    }
}

fn scene_handler(
    surface: Rc<dyn RenderSurface>,
    target: Rc<Cell<Vec3>>,
    config: PointerConfig,
) -> impl Fn(&AppEvent) + 'static {
    move |event: &AppEvent| {
        let AppEvent::MouseMoved { x, y } = *event else {
            return;
        };
        match surface.size() {
            Some((width, height)) => target.set(to_scene(x, y, width, height, &config)),
            None => log::debug!("Pointer move ignored: no surface"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fixture(surface: HeadlessSurface) -> (Rc<HeadlessSurface>, Rc<Cell<Vec3>>, PointerMapper) {
        let surface = Rc::new(surface);
        let target = Rc::new(Cell::new(Vec3::new(1.0, 0.0, 0.0)));
        let mapper = PointerMapper::new(
            Rc::clone(&surface) as Rc<dyn RenderSurface>,
            Rc::clone(&target),
            PointerConfig::default(),
        );
        (surface, target, mapper)
    }

    #[test]
    fn test_mapping_centre_and_corners() {
        let config = PointerConfig::default();
        assert_relative_eq!(to_scene(400.0, 300.0, 800, 600, &config), Vec3::zeros());
        assert_relative_eq!(to_scene(0.0, 0.0, 800, 600, &config), Vec3::new(-2.0, -2.0, 0.0));
        assert_relative_eq!(to_scene(800.0, 600.0, 800, 600, &config), Vec3::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_zero_size_is_not_finite() {
        let mapped = to_scene(10.0, 10.0, 0, 0, &PointerConfig::default());
        assert!(!mapped.x.is_finite());
        assert!(!mapped.y.is_finite());
    }

    #[test]
    fn test_mounted_mapper_moves_target() {
        let (_surface, target, mut mapper) = fixture(HeadlessSurface::new(800, 600));
        let window = EventTarget::new("window");
        mapper.mount(&window);

        window.dispatch(&AppEvent::MouseMoved { x: 200.0, y: 450.0 });
        assert_relative_eq!(target.get(), Vec3::new(-1.0, 1.0, 0.0));
    }

    #[test]
    fn test_no_surface_is_noop() {
        let (_surface, target, mut mapper) = fixture(HeadlessSurface::detached());
        let window = EventTarget::new("window");
        mapper.mount(&window);

        window.dispatch(&AppEvent::MouseMoved { x: 200.0, y: 450.0 });
        assert_eq!(target.get(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_unmount_removes_listener() {
        let (_surface, target, mut mapper) = fixture(HeadlessSurface::new(800, 600));
        let window = EventTarget::new("window");
        mapper.mount(&window);
        mapper.mount(&window);
        assert_eq!(window.listener_count(EventKind::MouseMove), 1);

        mapper.unmount();
        assert!(!mapper.is_mounted());
        assert_eq!(window.listener_count(EventKind::MouseMove), 0);

        window.dispatch(&AppEvent::MouseMoved { x: 0.0, y: 0.0 });
        assert_eq!(target.get(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_swapped_handler_keeps_registration() {
        let (_surface, target, mut mapper) = fixture(HeadlessSurface::new(800, 600));
        let window = EventTarget::new("window");
        mapper.mount(&window);

        let swapped = Rc::clone(&target);
        mapper.set_handler(move |_| swapped.set(Vec3::new(9.0, 9.0, 0.0)));

        assert_eq!(window.listener_count(EventKind::MouseMove), 1);
        window.dispatch(&AppEvent::MouseMoved { x: 0.0, y: 0.0 });
        assert_eq!(target.get(), Vec3::new(9.0, 9.0, 0.0));
    }
}
