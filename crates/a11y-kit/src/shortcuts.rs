//! Keyboard Shortcuts
//!
//! Maps key strings to callbacks and dispatches debounced global key-downs.
//!
//! ```rust,ignore
//! let shortcuts = KeyboardShortcuts::new();
//! shortcuts.register_shortcut("Escape", move || close_modal());
//! let _subscription = shortcuts.bind_keydown_listener(&window);
//!
//! // host event loop
//! if let Some(due) = shortcuts.next_deadline() {
//!     sleep_until(due);
//!     shortcuts.poll(Instant::now());
//! }
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use a11y_dom::{KeyboardEvent, ListenerId, Window};

use crate::Debouncer;

/// Shortcut dispatcher configuration
#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    /// Quiet window before the last key-down of a burst fires
    pub debounce: Duration,
}

impl ShortcutConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self { debounce: Duration::from_millis(100) }
    }
}

type Callback = Rc<RefCell<dyn FnMut()>>;

struct Registry {
    shortcuts: HashMap<String, Callback>,
    pending: Debouncer<KeyboardEvent>,
    /// Key-downs whose quiet window elapsed before a newer one arrived
    ready: VecDeque<(KeyboardEvent, Instant)>,
    binding: Option<(Weak<Window>, ListenerId)>,
}

impl Registry {
    fn key_down(&mut self, event: &KeyboardEvent) {
        if let Some(due) = self.pending.push(event.clone(), event.timestamp) {
            self.ready.push_back(due);
        }
    }

    fn take_due(&mut self, now: Instant) -> Option<KeyboardEvent> {
        match self.ready.pop_front() {
            Some((event, _)) => Some(event),
            None => self.pending.poll(now),
        }
    }

    fn release_binding(&mut self) -> Option<(Weak<Window>, ListenerId)> {
        self.pending.cancel();
        self.ready.clear();
        self.binding.take()
    }
}

/// Debounced keyboard-shortcut dispatcher.
///
/// Never reports errors: unknown keys are ignored.
pub struct KeyboardShortcuts {
    registry: Rc<RefCell<Registry>>,
}

impl KeyboardShortcuts {
    pub fn new() -> Self {
        Self::with_config(ShortcutConfig::default())
    }

    pub fn with_config(config: ShortcutConfig) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                shortcuts: HashMap::new(),
                pending: Debouncer::new(config.debounce),
                ready: VecDeque::new(),
                binding: None,
            })),
        }
    }

    /// Install or replace the handler for `key`.
    pub fn register_shortcut(&self, key: &str, callback: impl FnMut() + 'static) {
        let previous = self.registry.borrow_mut()
            .shortcuts
            .insert(key.to_string(), Rc::new(RefCell::new(callback)));
        tracing::debug!(key, replaced = previous.is_some(), "shortcut registered");
    }

    pub fn unregister_shortcut(&self, key: &str) -> bool {
        self.registry.borrow_mut().shortcuts.remove(key).is_some()
    }

    pub fn has_shortcut(&self, key: &str) -> bool {
        self.registry.borrow().shortcuts.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Attach the global key-down listener.
    ///
    /// A dispatcher owns at most one listener: binding again replaces the
    /// previous one, whose handle then becomes inert.
    pub fn bind_keydown_listener(&self, window: &Rc<Window>) -> KeydownSubscription {
        self.unbind_keydown_listener();

        let registry = Rc::downgrade(&self.registry);
        let id = window.add_keydown_listener(move |event| {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().key_down(event);
            }
        });
        self.registry.borrow_mut().binding = Some((Rc::downgrade(window), id));

        KeydownSubscription {
            registry: Rc::downgrade(&self.registry),
            window: Rc::downgrade(window),
            id,
        }
    }

    /// Detach the bound listener and drop any pending key-down.
    /// Returns false if nothing was bound.
    pub fn unbind_keydown_listener(&self) -> bool {
        let binding = self.registry.borrow_mut().release_binding();
        match binding {
            Some((window, id)) => {
                if let Some(window) = window.upgrade() {
                    window.remove_listener(id);
                }
                true
            }
            None => false,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.registry.borrow().binding.is_some()
    }

    /// Feed a key-down directly, bypassing the window listener.
    pub fn handle_key_down(&self, event: &KeyboardEvent) {
        self.registry.borrow_mut().key_down(event);
    }

    /// When the next key-down becomes due
    pub fn next_deadline(&self) -> Option<Instant> {
        let registry = self.registry.borrow();
        match registry.ready.front() {
            Some((_, due)) => Some(*due),
            None => registry.pending.deadline(),
        }
    }

    /// Fire every key-down whose quiet window elapsed by `now`, oldest first.
    ///
    /// Returns true when a callback ran.
    pub fn poll(&self, now: Instant) -> bool {
        let mut fired = false;
        loop {
            let Some(event) = self.registry.borrow_mut().take_due(now) else {
                break;
            };
            let key = event.key_string();
            let callback = self.registry.borrow().shortcuts.get(&key).cloned();
            match callback {
                // Registry borrow released: callbacks may register shortcuts
                Some(callback) => {
                    let mut run = callback.borrow_mut();
                    (*run)();
                    fired = true;
                }
                None => tracing::trace!(key, "no shortcut for key"),
            }
        }
        fired
    }
}

impl Default for KeyboardShortcuts {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyboardShortcuts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.registry.borrow();
        let mut keys: Vec<&String> = registry.shortcuts.keys().collect();
        keys.sort();
        f.debug_struct("KeyboardShortcuts")
            .field("keys", &keys)
            .field("bound", &registry.binding.is_some())
            .field("pending", &registry.pending.is_pending())
            .finish()
    }
}

/// Handle for a bound key-down listener. Dropping it unbinds.
#[must_use = "dropping the subscription unbinds the listener"]
#[derive(Debug)]
pub struct KeydownSubscription {
    registry: Weak<RefCell<Registry>>,
    window: Weak<Window>,
    id: ListenerId,
}

impl KeydownSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn dispose(self) {}
}

impl Drop for KeydownSubscription {
    fn drop(&mut self) {
        if let Some(window) = self.window.upgrade() {
            window.remove_listener(self.id);
        }
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.borrow_mut();
            if registry.binding.as_ref().is_some_and(|(_, id)| *id == self.id) {
                registry.release_binding();
            }
        }
    }
}
