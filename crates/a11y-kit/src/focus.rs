//! Focus Management
//!
//! Focus save/restore and the sequential (Tab) order of a subtree.

use a11y_dom::{Document, DomResult, ElementData, FocusEvent, NodeId};

/// Tags that only become focusable through an explicit `tabindex`.
const TABINDEX_TAGS: [&str; 9] = ["label", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul"];

/// Input types that take part in tab order
const FOCUSABLE_INPUT_TYPES: [&str; 3] = ["text", "radio", "checkbox"];

/// Whether an element matches the focusable allow-list:
///
/// `a[href]`, `button`, `textarea`, `input[type=text|radio|checkbox]`,
/// `select`, `[tabindex]:not([tabindex="-1"])`, and `label`, `h1`-`h6`,
/// `li`, `ul` carrying `tabindex`.
pub fn is_focusable(el: &ElementData) -> bool {
    let tag_match = match el.tag.as_str() {
        "a" => el.has_attr("href"),
        "button" | "textarea" | "select" => true,
        "input" => el.get_attr("type").is_some_and(|t| {
            FOCUSABLE_INPUT_TYPES.iter().any(|ft| t.eq_ignore_ascii_case(ft))
        }),
        _ => false,
    };
    if tag_match {
        return true;
    }

    match el.get_attr("tabindex") {
        Some(idx) if idx != "-1" => true,
        Some(_) => TABINDEX_TAGS.contains(&el.tag.as_str()),
        None => false,
    }
}

/// Focusable descendants of `scope` in document order (scope excluded)
pub fn tab_order(doc: &Document, scope: NodeId) -> Vec<NodeId> {
    let tree = doc.tree();
    tree.descendants(scope)
        .filter(|&id| tree.element(id).is_some_and(is_focusable))
        .collect()
}

/// Move focus to the next element of `scope`'s tab order, wrapping at the end.
pub fn focus_next(doc: &mut Document, scope: NodeId) -> DomResult<Option<NodeId>> {
    let order = tab_order(doc, scope);
    if order.is_empty() {
        return Ok(None);
    }

    let next = match doc.focused().and_then(|cur| order.iter().position(|&id| id == cur)) {
        Some(p) if p + 1 < order.len() => order[p + 1],
        _ => order[0], // Wrap around
    };
    doc.focus(next)?;
    Ok(Some(next))
}

/// Move focus to the previous element of `scope`'s tab order, wrapping at the start.
pub fn focus_previous(doc: &mut Document, scope: NodeId) -> DomResult<Option<NodeId>> {
    let order = tab_order(doc, scope);
    let Some(&last) = order.last() else {
        return Ok(None);
    };

    let prev = match doc.focused().and_then(|cur| order.iter().position(|&id| id == cur)) {
        Some(0) | None => last,
        Some(p) => order[p - 1],
    };
    doc.focus(prev)?;
    Ok(Some(prev))
}

/// Remembers one previously focused element.
#[derive(Debug, Default)]
pub struct FocusService {
    previous_focus: Option<NodeId>,
}

impl FocusService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `document.activeElement`, overwriting any earlier save.
    pub fn save_focus(&mut self, doc: &Document) {
        self.previous_focus = doc.active_element();
        tracing::debug!(saved = ?self.previous_focus, "focus saved");
    }

    /// Re-focuses the saved element.
    ///
    /// Attachment is not checked here: a saved element that has since left
    /// the document is handed to the platform, which ignores focus on
    /// disconnected nodes.
    pub fn restore_focus(&self, doc: &mut Document) -> DomResult<Vec<FocusEvent>> {
        match self.previous_focus {
            Some(node) => {
                tracing::debug!(?node, "restoring focus");
                doc.focus(node)
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn saved(&self) -> Option<NodeId> {
        self.previous_focus
    }
}
