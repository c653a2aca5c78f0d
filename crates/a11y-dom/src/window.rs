//! Window - global key-down event target

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::KeyboardEvent;

/// Handle identifying one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type KeydownListener = Rc<dyn Fn(&KeyboardEvent)>;

/// Process-wide event target for key-down events.
///
/// Shared through `Rc`; listeners are plain closures.
#[derive(Default)]
pub struct Window {
    listeners: RefCell<Vec<(ListenerId, KeydownListener)>>,
    next_id: Cell<u32>,
}

impl Window {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// `window.addEventListener('keydown', f)`
    pub fn add_keydown_listener(&self, listener: impl Fn(&KeyboardEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        tracing::debug!(?id, "keydown listener added");
        id
    }

    /// Returns false if the listener was already gone
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::debug!(?id, "keydown listener removed");
        }
        removed
    }

    /// Deliver an event to every listener registered at the time of the call.
    /// Returns the number of listeners invoked.
    pub fn dispatch_keydown(&self, event: &KeyboardEvent) -> usize {
        let snapshot: Vec<KeydownListener> = self.listeners.borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in &snapshot {
            listener(event);
        }
        snapshot.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
