//! Per-frame callback scheduling
//!
//! Subscribers run once per frame in registration order. Each subscription is
//! held by a [`FrameSubscription`] guard; dropping the guard stops the callback.

use crate::foundation::time::FrameTick;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = Rc<RefCell<dyn FnMut(&FrameTick)>>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, &'static str, Callback)>,
}

/// The shared frame clock every animated entity subscribes to
#[derive(Clone, Default)]
pub struct FrameLoop {
    subscribers: Rc<RefCell<Subscribers>>,
}

impl FrameLoop {
    /// Create an empty frame loop
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a per-frame callback
    #[must_use = "dropping the subscription stops the callback immediately"]
    pub fn subscribe(&self, label: &'static str, callback: impl FnMut(&FrameTick) + 'static) -> FrameSubscription {
        let mut subscribers = self.subscribers.borrow_mut();
        let id = subscribers.next_id;
        subscribers.next_id += 1;
        let callback: Callback = Rc::new(RefCell::new(callback));
        subscribers.entries.push((id, label, callback));
        log::debug!("Frame subscriber '{}' registered", label);

        FrameSubscription {
            subscribers: Rc::downgrade(&self.subscribers),
            id,
            label,
        }
    }

    /// Run every subscriber for one frame
    pub fn run(&self, tick: &FrameTick) {
        let snapshot: Vec<Callback> = self
            .subscribers
            .borrow()
            .entries
            .iter()
            .map(|(_, _, callback)| Rc::clone(callback))
            .collect();

        for callback in snapshot {
            (callback.borrow_mut())(tick);
        }
    }

    /// Number of active subscribers
    pub fn len(&self) -> usize {
        self.subscribers.borrow().entries.len()
    }

    /// Whether no subscriber is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keeps a frame callback registered; unregisters on drop
pub struct FrameSubscription {
    subscribers: Weak<RefCell<Subscribers>>,
    id: u64,
    label: &'static str,
}

impl FrameSubscription {
    /// Label given at registration
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().entries.retain(|(id, _, _)| *id != self.id);
            log::debug!("Frame subscriber '{}' released", self.label);
        }
    }
}
