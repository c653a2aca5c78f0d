//! Page
//!
//! Shared document handle for the demo views.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use a11y_dom::{Document, DomResult, FocusEvent, NodeId};

/// The demo document plus the focus last reported to the views
#[derive(Debug)]
pub struct Page {
    doc: RefCell<Document>,
    last_focus: Cell<Option<NodeId>>,
}

impl Page {
    pub fn new(url: &str) -> Rc<Self> {
        Rc::new(Self {
            doc: RefCell::new(Document::new(url)),
            last_focus: Cell::new(None),
        })
    }

    pub fn doc(&self) -> Ref<'_, Document> {
        self.doc.borrow()
    }

    pub fn doc_mut(&self) -> RefMut<'_, Document> {
        self.doc.borrow_mut()
    }

    /// Focus events since the previous call.
    ///
    /// Helpers such as traps and the focus service move focus without
    /// handing events back, so the page diffs the focused element instead.
    pub fn focus_changes(&self) -> Vec<FocusEvent> {
        let current = self.doc.borrow().focused();
        let previous = self.last_focus.replace(current);
        if current == previous {
            return Vec::new();
        }
        previous.map(FocusEvent::focus_out)
            .into_iter()
            .chain(current.map(FocusEvent::focus_in))
            .collect()
    }

    /// Focus the element with `id`. Returns false when there is none.
    pub fn focus_by_id(&self, id: &str) -> DomResult<bool> {
        let mut doc = self.doc.borrow_mut();
        match doc.get_element_by_id(id) {
            Some(node) => {
                doc.focus(node)?;
                Ok(true)
            }
            None => {
                tracing::debug!(id, "no element to focus");
                Ok(false)
            }
        }
    }

    /// Short label such as `button#save "Save"`
    pub fn describe(&self, node: NodeId) -> String {
        let doc = self.doc.borrow();
        let Some(el) = doc.tree().element(node) else {
            return format!("{node:?}");
        };
        let mut label = el.tag.clone();
        if let Some(id) = el.get_attr("id") {
            label.push('#');
            label.push_str(id);
        }
        let text = doc.tree().text_content(node);
        let text = text.trim();
        if !text.is_empty() {
            let short: String = text.chars().take(24).collect();
            label.push_str(&format!(" \"{short}\""));
        }
        label
    }

    /// Create `<tag>` under `parent` with the given text
    pub fn append(&self, parent: NodeId, tag: &str, text: &str) -> DomResult<NodeId> {
        let mut doc = self.doc.borrow_mut();
        let node = doc.create_element_in(parent, tag)?;
        if !text.is_empty() {
            let tree = doc.tree_mut();
            let text_node = tree.create_text(text);
            tree.append_child(node, text_node)?;
        }
        Ok(node)
    }
}
