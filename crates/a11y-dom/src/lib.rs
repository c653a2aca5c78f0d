//! a11y DOM - Document Object Model
//!
//! Arena-based DOM tree used as the host platform for the a11y toolkit.
//!
//! Features:
//! - Element and text nodes with sibling links
//! - Attributes with cached `id` and class list
//! - Document focus model with focus-in/focus-out events
//! - Keyboard events and a global key-down event target

mod node;
mod tree;
mod document;
mod events;
mod window;

pub use node::{Node, NodeData, ElementData, TextData, Attribute};
pub use tree::{DomTree, Children, Descendants};
pub use document::Document;
pub use events::{Key, KeyModifiers, KeyboardEvent, FocusEvent, FocusEventKind};
pub use window::{Window, ListenerId};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("Node is not a child of its claimed parent")]
    NotAChild,
}
