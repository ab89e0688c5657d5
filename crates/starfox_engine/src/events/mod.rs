//! Event targets with scoped listeners
//!
//! Key principles:
//! - Listeners are registered per event kind and removed when their guard drops
//! - Dispatch snapshots the listener list, so a listener may add or remove
//!   listeners while it runs
//! - [`HandlerCell`] lets a single registered listener forward to logic that
//!   can be replaced at any time without re-registering

use crate::application::AppEvent;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Event type identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved
    MouseMove,
    /// Surface resized
    Resize,
    /// Close requested
    Close,
}

impl AppEvent {
    /// The kind listeners register for
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MouseMoved { .. } => EventKind::MouseMove,
            Self::WindowResized { .. } => EventKind::Resize,
            Self::WindowCloseRequested => EventKind::Close,
        }
    }
}

/// Listener callback stored by an [`EventTarget`]
pub type Listener = Rc<dyn Fn(&AppEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, Listener)>,
}

/// An element that input listeners attach to (for example the global window)
#[derive(Clone, Default)]
pub struct EventTarget {
    name: &'static str,
    listeners: Rc<RefCell<Listeners>>,
}

impl EventTarget {
    /// Create a named event target
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    /// Name used in log output
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a listener for an event kind
    ///
    /// The listener stays attached until the returned guard is dropped.
    #[must_use = "dropping the guard removes the listener immediately"]
    pub fn add_listener(&self, kind: EventKind, listener: impl Fn(&AppEvent) + 'static) -> ListenerGuard {
        let mut listeners = self.listeners.borrow_mut();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        let listener: Listener = Rc::new(listener);
        listeners.entries.push((id, kind, listener));
        log::debug!("Attached {:?} listener {} to {}", kind, id.0, self.name);

        ListenerGuard {
            target: Rc::downgrade(&self.listeners),
            id,
            kind,
        }
    }

    /// Deliver an event to every listener registered for its kind
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &AppEvent) -> usize {
        let kind = event.kind();
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();

        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }
}

/// Keeps a listener attached; removes it on drop
pub struct ListenerGuard {
    target: Weak<RefCell<Listeners>>,
    id: ListenerId,
    kind: EventKind,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(listeners) = self.target.upgrade() {
            listeners.borrow_mut().entries.retain(|(id, _, _)| *id != self.id);
            log::debug!("Detached {:?} listener {}", self.kind, self.id.0);
        }
    }
}

/// Swappable handler reference
///
/// Register one persistent listener that calls [`HandlerCell::call`]; later
/// calls to [`HandlerCell::replace`] change what the listener does without
/// touching the registration. A handler may replace itself while running;
/// the replacement takes effect on the next call.
pub struct HandlerCell<E> {
    handler: Rc<RefCell<Rc<dyn Fn(&E)>>>,
}

impl<E> Clone for HandlerCell<E> {
    fn clone(&self) -> Self {
        Self {
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<E> HandlerCell<E> {
    /// Create a cell holding the initial handler
    pub fn new(handler: impl Fn(&E) + 'static) -> Self {
        let handler: Rc<dyn Fn(&E)> = Rc::new(handler);
        Self {
            handler: Rc::new(RefCell::new(handler)),
        }
    }

    /// Swap in the latest handler
    pub fn replace(&self, handler: impl Fn(&E) + 'static) {
        *self.handler.borrow_mut() = Rc::new(handler);
    }

    /// Invoke the current handler
    pub fn call(&self, event: &E) {
        let handler = Rc::clone(&*self.handler.borrow());
        handler(event);
    }
}
