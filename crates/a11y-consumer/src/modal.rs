//! Modal Dialog
//!
//! A "New task" dialog that traps focus while open.

use a11y_dom::{FocusEvent, KeyboardEvent, NodeId};
use a11y_kit::{
    A11yError, AriaPropertyDirective, AriaRole, AriaRoleDirective, FocusService, FocusTrap,
};

use crate::page::Page;

pub const MODAL_TITLE_ID: &str = "modal-title";

/// An open dialog. Dropping it without [`Modal::close`] leaves the markup in place.
#[derive(Debug)]
pub struct Modal {
    host: NodeId,
    name_input: NodeId,
    save_button: NodeId,
    close_button: NodeId,
    trap: FocusTrap,
}

impl Modal {
    /// Save the current focus, render the dialog under `parent` and move
    /// focus to its first control.
    pub fn open(page: &Page, parent: NodeId, focus: &mut FocusService) -> Result<Self, A11yError> {
        focus.save_focus(&page.doc());

        let host = page.append(parent, "div", "")?;
        {
            let mut doc = page.doc_mut();
            AriaRoleDirective::with_role(host, AriaRole::Dialog).apply(&mut doc)?;
            AriaPropertyDirective::new(host, "aria-modal", "true").apply(&mut doc)?;
            AriaPropertyDirective::new(host, "aria-labelledby", MODAL_TITLE_ID).apply(&mut doc)?;
        }

        let title = page.append(host, "h2", "New task")?;
        page.doc_mut().set_attribute(title, "id", MODAL_TITLE_ID)?;

        let name_input = page.append(host, "input", "")?;
        {
            let mut doc = page.doc_mut();
            doc.set_attribute(name_input, "type", "text")?;
            AriaPropertyDirective::new(name_input, "aria-label", "Task name").apply(&mut doc)?;
        }
        let save_button = page.append(host, "button", "Save")?;
        let close_button = page.append(host, "button", "\u{00d7}")?;
        AriaPropertyDirective::new(close_button, "aria-label", "Close").apply(&mut page.doc_mut())?;

        let mut trap = FocusTrap::new(host);
        trap.init(&page.doc())?;
        trap.focus_first_element(&mut page.doc_mut())?;
        tracing::debug!(?host, "modal opened");

        Ok(Self { host, name_input, save_button, close_button, trap })
    }

    /// Remove the dialog and return focus to where it was before opening.
    pub fn close(self, page: &Page, focus: &FocusService) -> Result<Vec<FocusEvent>, A11yError> {
        let mut doc = page.doc_mut();
        doc.remove(self.host)?;
        let events = focus.restore_focus(&mut doc)?;
        tracing::debug!(host = ?self.host, "modal closed");
        Ok(events)
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn name_input(&self) -> NodeId {
        self.name_input
    }

    pub fn save_button(&self) -> NodeId {
        self.save_button
    }

    pub fn close_button(&self) -> NodeId {
        self.close_button
    }

    pub fn contains_focus(&self, page: &Page) -> bool {
        let doc = page.doc();
        doc.focused().is_some_and(|f| doc.tree().contains(self.host, f))
    }

    pub fn handle_key_down(&self, page: &Page, event: &mut KeyboardEvent) -> Result<bool, A11yError> {
        self.trap.handle_key_down(&mut page.doc_mut(), event)
    }

    pub fn handle_focus_event(&mut self, page: &Page, event: &FocusEvent) -> Result<(), A11yError> {
        self.trap.handle_focus_event(&mut page.doc_mut(), event)
    }

    pub fn is_focused(&self) -> bool {
        self.trap.is_focused()
    }
}
