//! Focus Trap
//!
//! Keeps Tab / Shift+Tab cycling inside a container such as a dialog.

use a11y_dom::{Document, FocusEvent, FocusEventKind, Key, KeyboardEvent, NodeId};

use crate::{A11yError, focus::tab_order};

/// Class toggled on the host while focus is inside it
pub const FOCUSED_CLASS: &str = "focused";

/// Focus trap bound to one host element.
///
/// The focusable set is captured by [`FocusTrap::init`] and not re-scanned
/// when the subtree changes; call [`FocusTrap::refresh`] after mutations.
#[derive(Debug)]
pub struct FocusTrap {
    host: NodeId,
    focusable: Option<Vec<NodeId>>,
    is_focused: bool,
}

impl FocusTrap {
    pub fn new(host: NodeId) -> Self {
        Self { host, focusable: None, is_focused: false }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn is_active(&self) -> bool {
        self.focusable.is_some()
    }

    /// Capture the focusable descendants of the host.
    pub fn init(&mut self, doc: &Document) -> Result<(), A11yError> {
        if doc.tree().element(self.host).is_none() {
            return Err(A11yError::HostNotFound(self.host));
        }
        let elements = tab_order(doc, self.host);
        tracing::debug!(host = ?self.host, count = elements.len(), "focus trap armed");
        self.focusable = Some(elements);
        Ok(())
    }

    /// Re-scan after the host subtree changed.
    pub fn refresh(&mut self, doc: &Document) -> Result<(), A11yError> {
        self.init(doc)
    }

    pub fn focusable_elements(&self) -> Result<&[NodeId], A11yError> {
        self.focusable.as_deref().ok_or(A11yError::NotInitialized)
    }

    /// Handle a key-down delivered to the host.
    ///
    /// Returns true when focus was wrapped and the default prevented.
    pub fn handle_key_down(&self, doc: &mut Document, event: &mut KeyboardEvent) -> Result<bool, A11yError> {
        let elements = self.focusable_elements()?;
        if event.key != Key::Tab {
            return Ok(false);
        }
        let (Some(&first), Some(&last)) = (elements.first(), elements.last()) else {
            return Ok(false);
        };

        let active = doc.active_element();
        let target = if event.modifiers.shift {
            (active == Some(first)).then_some(last)
        } else {
            (active == Some(last)).then_some(first)
        };

        match target {
            Some(target) => {
                doc.focus(target)?;
                event.prevent_default();
                tracing::trace!(
                    host = ?self.host,
                    ?target,
                    shift = event.modifiers.shift,
                    "tab wrapped inside focus trap"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Focus the first captured element, typically when a dialog opens.
    pub fn focus_first_element(&self, doc: &mut Document) -> Result<bool, A11yError> {
        match self.focusable_elements()?.first() {
            Some(&first) => {
                doc.focus(first)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Track focus entering or leaving the host and mirror it as a CSS class.
    pub fn handle_focus_event(&mut self, doc: &mut Document, event: &FocusEvent) -> Result<(), A11yError> {
        if !doc.tree().contains(self.host, event.target) {
            return Ok(());
        }
        self.is_focused = event.kind == FocusEventKind::FocusIn;

        let host = doc.tree_mut().element_mut(self.host).ok_or(A11yError::HostNotFound(self.host))?;
        if self.is_focused {
            host.add_class(FOCUSED_CLASS);
        } else {
            host.remove_class(FOCUSED_CLASS);
        }
        Ok(())
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_dom::KeyModifiers;

    fn tab() -> KeyboardEvent {
        KeyboardEvent::new(Key::Tab)
    }

    fn shift_tab() -> KeyboardEvent {
        KeyboardEvent::new(Key::Tab).with_modifiers(KeyModifiers::shift())
    }

    fn dialog() -> (Document, FocusTrap, [NodeId; 3]) {
        let mut doc = Document::default();
        let body = doc.body();
        let host = doc.create_element_in(body, "div").unwrap();
        let a = doc.create_element_in(host, "button").unwrap();
        let b = doc.create_element_in(host, "textarea").unwrap();
        let c = doc.create_element_in(host, "button").unwrap();
        let mut trap = FocusTrap::new(host);
        trap.init(&doc).unwrap();
        (doc, trap, [a, b, c])
    }

    #[test]
    fn test_tab_on_last_wraps_to_first() {
        let (mut doc, trap, [a, _, c]) = dialog();
        doc.focus(c).unwrap();
        let mut event = tab();
        assert!(trap.handle_key_down(&mut doc, &mut event).unwrap());
        assert!(event.is_default_prevented());
        assert_eq!(doc.focused(), Some(a));
    }

    #[test]
    fn test_shift_tab_on_first_wraps_to_last() {
        let (mut doc, trap, [a, _, c]) = dialog();
        doc.focus(a).unwrap();
        let mut event = shift_tab();
        assert!(trap.handle_key_down(&mut doc, &mut event).unwrap());
        assert_eq!(doc.focused(), Some(c));
    }

    #[test]
    fn test_middle_element_passes_through() {
        let (mut doc, trap, [_, b, _]) = dialog();
        doc.focus(b).unwrap();
        for mut event in [tab(), shift_tab()] {
            assert!(!trap.handle_key_down(&mut doc, &mut event).unwrap());
            assert!(!event.is_default_prevented());
            assert_eq!(doc.focused(), Some(b));
        }
    }

    #[test]
    fn test_non_tab_ignored() {
        let (mut doc, trap, [_, _, c]) = dialog();
        doc.focus(c).unwrap();
        let mut event = KeyboardEvent::new(Key::Enter);
        assert!(!trap.handle_key_down(&mut doc, &mut event).unwrap());
        assert_eq!(doc.focused(), Some(c));
    }

    #[test]
    fn test_empty_trap_is_noop() {
        let mut doc = Document::default();
        let body = doc.body();
        let host = doc.create_element_in(body, "div").unwrap();
        let mut trap = FocusTrap::new(host);
        trap.init(&doc).unwrap();

        assert!(!trap.focus_first_element(&mut doc).unwrap());
        assert!(!trap.handle_key_down(&mut doc, &mut tab()).unwrap());
        assert!(!trap.handle_key_down(&mut doc, &mut shift_tab()).unwrap());
    }

    #[test]
    fn test_use_before_init_is_reported() {
        let mut doc = Document::default();
        let trap = FocusTrap::new(doc.body());
        assert_eq!(trap.focusable_elements().unwrap_err(), A11yError::NotInitialized);
        assert_eq!(trap.focus_first_element(&mut doc), Err(A11yError::NotInitialized));
        assert_eq!(trap.handle_key_down(&mut doc, &mut tab()), Err(A11yError::NotInitialized));
    }

    #[test]
    fn test_init_rejects_missing_host() {
        let doc = Document::default();
        let mut trap = FocusTrap::new(NodeId::NONE);
        assert_eq!(trap.init(&doc), Err(A11yError::HostNotFound(NodeId::NONE)));
    }

    #[test]
    fn test_focused_class_follows_focus() {
        let (mut doc, mut trap, [a, _, _]) = dialog();
        let host = trap.host();
        let body = doc.body();
        let outside = doc.create_element_in(body, "button").unwrap();

        for event in doc.focus(a).unwrap() {
            trap.handle_focus_event(&mut doc, &event).unwrap();
        }
        assert!(trap.is_focused());
        assert!(doc.tree().element(host).unwrap().has_class(FOCUSED_CLASS));

        for event in doc.focus(outside).unwrap() {
            trap.handle_focus_event(&mut doc, &event).unwrap();
        }
        assert!(!trap.is_focused());
        assert!(!doc.tree().element(host).unwrap().has_class(FOCUSED_CLASS));
    }

    #[test]
    fn test_stale_until_refresh() {
        let (mut doc, mut trap, [_, _, c]) = dialog();
        let host = trap.host();
        let d = doc.create_element_in(host, "button").unwrap();
        assert_eq!(trap.focusable_elements().unwrap().last(), Some(&c));

        trap.refresh(&doc).unwrap();
        assert_eq!(trap.focusable_elements().unwrap().last(), Some(&d));
    }
}
