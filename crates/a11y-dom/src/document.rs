//! Document - High-level document API and focus model

use crate::{DomError, DomResult, DomTree, FocusEvent, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Element holding focus, if any
    focused: Option<NodeId>,
}

impl Document {
    /// Create a new document with `html > head + body`
    pub fn new(url: &str) -> Self {
        let mut doc = Self::empty(url);
        let tree = &mut doc.tree;

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes under an element root cannot fail to link
        let root = tree.root();
        let linked = tree.append_child(root, html)
            .and_then(|_| tree.append_child(html, head))
            .and_then(|_| tree.append_child(html, body));
        debug_assert!(linked.is_ok());

        doc.head_element = head;
        doc.body_element = body;
        doc
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            focused: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn head(&self) -> NodeId {
        self.head_element
    }

    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get connected element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.tree.root();
        self.tree.descendants(root).find(|&node| {
            self.tree.element(node).is_some_and(|el| el.id.as_deref() == Some(id))
        })
    }

    /// Create an element and append it under `parent`
    pub fn create_element_in(&mut self, parent: NodeId, tag: &str) -> DomResult<NodeId> {
        let el = self.tree.create_element(tag);
        self.tree.append_child(parent, el)
    }

    /// `Element.setAttribute`
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        let el = self.element_mut(node)?;
        el.set_attr(name, value);
        tracing::trace!(?node, name, value, "set attribute");
        Ok(())
    }

    /// `Element.getAttribute`
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.element(node).and_then(|el| el.get_attr(name))
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.element_mut(node)?.remove_attr(name))
    }

    fn element_mut(&mut self, node: NodeId) -> DomResult<&mut crate::ElementData> {
        let n = self.tree.get_mut(node).ok_or(DomError::NotFound(node))?;
        n.as_element_mut().ok_or(DomError::NotAnElement(node))
    }

    /// Detach a subtree. Focus inside it is dropped without a focus-out event.
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        let parent = self.tree.get(node).ok_or(DomError::NotFound(node))?.parent;
        if !parent.is_valid() {
            return Ok(());
        }
        if self.focused.is_some_and(|f| self.tree.contains(node, f)) {
            tracing::debug!(?node, "focused element removed from document");
            self.focused = None;
        }
        self.tree.remove_child(parent, node)?;
        Ok(())
    }

    // ===== Focus =====

    /// `document.activeElement`: the focused element, or `<body>`
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused.or_else(|| self.body_element.is_valid().then_some(self.body_element))
    }

    /// Explicitly focused element only
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Focus an element.
    ///
    /// Disconnected or already focused elements are ignored and produce no
    /// events. Otherwise returns the focus-out (if any) and focus-in events
    /// in the order the platform fires them.
    pub fn focus(&mut self, node: NodeId) -> DomResult<Vec<FocusEvent>> {
        let n = self.tree.get(node).ok_or(DomError::NotFound(node))?;
        if !n.is_element() {
            return Err(DomError::NotAnElement(node));
        }
        if self.focused == Some(node) || !self.tree.is_connected(node) {
            return Ok(Vec::new());
        }

        let mut events = Vec::with_capacity(2);
        if let Some(old) = self.focused.replace(node) {
            events.push(FocusEvent::focus_out(old));
        }
        events.push(FocusEvent::focus_in(node));
        tracing::trace!(?node, "focus moved");
        Ok(events)
    }

    /// Drop focus back to the body
    pub fn blur(&mut self) -> Option<FocusEvent> {
        self.focused.take().map(FocusEvent::focus_out)
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FocusEventKind;

    #[test]
    fn test_structure() {
        let doc = Document::new("about:blank");
        assert!(doc.body().is_valid());
        assert_eq!(doc.active_element(), Some(doc.body()));
        assert!(doc.focused().is_none());
    }

    #[test]
    fn test_focus_events_order() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = doc.create_element_in(body, "button").unwrap();
        let b = doc.create_element_in(body, "button").unwrap();

        let events = doc.focus(a).unwrap();
        assert_eq!(events, vec![FocusEvent::focus_in(a)]);

        let events = doc.focus(b).unwrap();
        assert_eq!(events[0].kind, FocusEventKind::FocusOut);
        assert_eq!(events[0].target, a);
        assert_eq!(events[1], FocusEvent::focus_in(b));

        assert!(doc.focus(b).unwrap().is_empty());
    }

    #[test]
    fn test_focus_detached_is_noop() {
        let mut doc = Document::default();
        let loose = doc.tree.create_element("button");
        assert!(doc.focus(loose).unwrap().is_empty());
        assert_eq!(doc.focused(), None);

        let text = doc.tree.create_text("x");
        assert_eq!(doc.focus(text), Err(DomError::NotAnElement(text)));
    }

    #[test]
    fn test_remove_drops_focus() {
        let mut doc = Document::default();
        let body = doc.body();
        let dialog = doc.create_element_in(body, "div").unwrap();
        let button = doc.create_element_in(dialog, "button").unwrap();
        doc.focus(button).unwrap();

        doc.remove(dialog).unwrap();
        assert_eq!(doc.focused(), None);
        assert!(!doc.tree.is_connected(button));
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::default();
        let body = doc.body();
        let main = doc.create_element_in(body, "main").unwrap();
        doc.set_attribute(main, "id", "main-content").unwrap();

        assert_eq!(doc.get_element_by_id("main-content"), Some(main));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }
}
