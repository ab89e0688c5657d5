//! Drawing surface boundary

use std::cell::Cell;

/// A canvas-like drawing surface owned by the rendering backend
pub trait RenderSurface {
    /// Current size in pixels, or `None` before first paint / after teardown
    fn size(&self) -> Option<(u32, u32)>;
}

/// Surface with no window behind it, used by the headless runner and tests
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: Cell<Option<(u32, u32)>>,
}

impl HeadlessSurface {
    /// Create an attached surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Cell::new(Some((width, height))),
        }
    }

    /// Create a surface that has not been presented yet
    pub fn detached() -> Self {
        Self::default()
    }

    /// Change the pixel size (attaching the surface if needed)
    pub fn resize(&self, width: u32, height: u32) {
        self.size.set(Some((width, height)));
    }

    /// Tear the surface down
    pub fn detach(&self) {
        self.size.set(None);
    }
}

impl RenderSurface for HeadlessSurface {
    fn size(&self) -> Option<(u32, u32)> {
        self.size.get()
    }
}
