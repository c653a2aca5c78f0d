//! a11y-kit
//!
//! Accessibility helpers over the `a11y-dom` host platform.
//!
//! Features:
//! - ARIA role, property and live-region directives
//! - Focus save/restore and sequential tab navigation
//! - Focus trap for dialogs and sidebars
//! - Live announcements for screen readers
//! - Debounced global keyboard shortcuts

pub mod aria;
pub mod directives;
pub mod focus;
pub mod focus_trap;
pub mod live_announcer;
pub mod debounce;
pub mod shortcuts;

pub use aria::{AriaRole, LiveRegionMode};
pub use directives::{AriaRoleDirective, AriaPropertyDirective, LiveRegionDirective};
pub use focus::{FocusService, is_focusable, tab_order, focus_next, focus_previous};
pub use focus_trap::{FocusTrap, FOCUSED_CLASS};
pub use live_announcer::{Announcer, Politeness, LiveAnnouncerService, LiveRegionAnnouncer, DocumentAnnouncer};
pub use debounce::Debouncer;
pub use shortcuts::{KeyboardShortcuts, KeydownSubscription, ShortcutConfig};

/// Accessibility error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum A11yError {
    #[error("Focus trap used before init")]
    NotInitialized,

    #[error("Host element not found: {0:?}")]
    HostNotFound(a11y_dom::NodeId),

    #[error("DOM error: {0}")]
    Dom(#[from] a11y_dom::DomError),
}
