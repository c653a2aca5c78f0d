//! App Shell
//!
//! Page landmarks, the sidebar focus trap and the landmark shortcuts.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use a11y_dom::{FocusEvent, KeyboardEvent, NodeId, Window};
use a11y_kit::{
    A11yError, AriaPropertyDirective, AriaRole, AriaRoleDirective, FocusTrap, KeyboardShortcuts,
    KeydownSubscription, ShortcutConfig,
};

use crate::page::Page;

/// Landmark shortcuts: key → element id
pub const LANDMARK_SHORTCUTS: [(&str, &str); 4] = [
    ("1", "header"),
    ("2", "aside"),
    ("3", "main-content"),
    ("4", "footer"),
];

/// Header, sidebar, main area and footer of the demo page
#[derive(Debug)]
pub struct AppShell {
    page: Rc<Page>,
    header: NodeId,
    aside: NodeId,
    main: NodeId,
    footer: NodeId,
    sidebar_trap: RefCell<FocusTrap>,
    shortcuts: KeyboardShortcuts,
    subscription: RefCell<Option<KeydownSubscription>>,
}

impl AppShell {
    pub fn new(page: &Rc<Page>, config: ShortcutConfig) -> Result<Rc<Self>, A11yError> {
        let body = page.doc().body();

        let header = landmark(page, body, "header", "header", AriaRole::Banner)?;
        page.append(header, "h1", "Tasks")?;

        let aside = landmark(page, body, "aside", "aside", AriaRole::Complementary)?;
        let nav = page.append(aside, "nav", "")?;
        {
            let mut doc = page.doc_mut();
            AriaPropertyDirective::new(nav, "aria-label", "Lists").apply(&mut doc)?;
        }
        for (href, label) in [("#task-list", "All tasks"), ("#footer", "About")] {
            let link = page.append(nav, "a", label)?;
            page.doc_mut().set_attribute(link, "href", href)?;
        }
        page.append(aside, "button", "New list")?;

        let main = landmark(page, body, "main", "main-content", AriaRole::Main)?;
        let footer = landmark(page, body, "footer", "footer", AriaRole::ContentInfo)?;
        page.append(footer, "p", "Press 1-4 to jump between regions")?;

        let mut sidebar_trap = FocusTrap::new(aside);
        sidebar_trap.init(&page.doc())?;

        Ok(Rc::new(Self {
            page: Rc::clone(page),
            header,
            aside,
            main,
            footer,
            sidebar_trap: RefCell::new(sidebar_trap),
            shortcuts: KeyboardShortcuts::with_config(config),
            subscription: RefCell::new(None),
        }))
    }

    /// Register the landmark shortcuts and listen on `window`
    pub fn init(&self, window: &Rc<Window>) {
        for (key, id) in LANDMARK_SHORTCUTS {
            let page = Rc::clone(&self.page);
            self.shortcuts.register_shortcut(key, move || {
                if let Err(err) = page.focus_by_id(id) {
                    tracing::warn!(%err, id, "landmark shortcut failed");
                }
            });
        }
        let subscription = self.shortcuts.bind_keydown_listener(window);
        *self.subscription.borrow_mut() = Some(subscription);
    }

    pub fn header(&self) -> NodeId {
        self.header
    }

    pub fn aside(&self) -> NodeId {
        self.aside
    }

    pub fn main(&self) -> NodeId {
        self.main
    }

    pub fn footer(&self) -> NodeId {
        self.footer
    }

    pub fn shortcuts(&self) -> &KeyboardShortcuts {
        &self.shortcuts
    }

    /// Run due shortcuts
    pub fn poll(&self, now: Instant) -> bool {
        self.shortcuts.poll(now)
    }

    pub fn focus_in_sidebar(&self) -> bool {
        let doc = self.page.doc();
        doc.focused().is_some_and(|f| doc.tree().contains(self.aside, f))
    }

    /// Key-down while focus is inside the sidebar
    pub fn handle_sidebar_key(&self, event: &mut KeyboardEvent) -> Result<bool, A11yError> {
        if !self.focus_in_sidebar() {
            return Ok(false);
        }
        let trap = self.sidebar_trap.borrow();
        trap.handle_key_down(&mut self.page.doc_mut(), event)
    }

    pub fn handle_focus_event(&self, event: &FocusEvent) -> Result<(), A11yError> {
        self.sidebar_trap.borrow_mut().handle_focus_event(&mut self.page.doc_mut(), event)
    }

    pub fn sidebar_focused(&self) -> bool {
        self.sidebar_trap.borrow().is_focused()
    }
}

fn landmark(page: &Page, parent: NodeId, tag: &str, id: &str, role: AriaRole) -> Result<NodeId, A11yError> {
    let node = page.append(parent, tag, "")?;
    let mut doc = page.doc_mut();
    doc.set_attribute(node, "id", id)?;
    doc.set_attribute(node, "tabindex", "-1")?;
    AriaRoleDirective::with_role(node, role).apply(&mut doc)?;
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use a11y_dom::Key;
    use std::time::Duration;

    fn shell() -> (Rc<Page>, Rc<AppShell>) {
        let page = Page::new("app://tasks");
        let shell = AppShell::new(&page, ShortcutConfig::default()).unwrap();
        (page, shell)
    }

    #[test]
    fn test_landmark_roles() {
        let (page, shell) = shell();
        let doc = page.doc();
        assert_eq!(doc.get_attribute(shell.header(), "role"), Some("banner"));
        assert_eq!(doc.get_attribute(shell.aside(), "role"), Some("complementary"));
        assert_eq!(doc.get_attribute(shell.main(), "role"), Some("main"));
        assert_eq!(doc.get_attribute(shell.footer(), "role"), Some("contentinfo"));
        for node in [shell.header(), shell.aside(), shell.main(), shell.footer()] {
            let role = doc.get_attribute(node, "role").and_then(AriaRole::parse);
            assert!(role.is_some_and(|r| r.is_landmark() && !r.is_widget()));
        }
        assert_eq!(doc.get_element_by_id("main-content"), Some(shell.main()));
    }

    #[test]
    fn test_number_keys_jump_to_landmarks() {
        let (page, shell) = shell();
        let window = Window::new();
        shell.init(&window);
        let t0 = Instant::now();

        window.dispatch_keydown(&KeyboardEvent::new(Key::Character('3')).at(t0));
        assert!(shell.poll(t0 + Duration::from_millis(100)));
        assert_eq!(page.doc().focused(), Some(shell.main()));

        window.dispatch_keydown(&KeyboardEvent::new(Key::Character('2')).at(t0));
        window.dispatch_keydown(&KeyboardEvent::new(Key::Character('4')).at(t0 + Duration::from_millis(20)));
        assert!(shell.poll(t0 + Duration::from_millis(120)));
        assert_eq!(page.doc().focused(), Some(shell.footer()));
    }

    #[test]
    fn test_sidebar_trap_wraps() {
        let (page, shell) = shell();
        let last = *shell.sidebar_trap.borrow().focusable_elements().unwrap().last().unwrap();
        page.doc_mut().focus(last).unwrap();

        let mut tab = KeyboardEvent::new(Key::Tab);
        assert!(shell.handle_sidebar_key(&mut tab).unwrap());
        assert!(tab.is_default_prevented());
        let first = page.doc().focused().unwrap();
        assert_eq!(page.doc().tree().element(first).unwrap().tag, "a");

        shell.handle_focus_event(&FocusEvent::focus_in(first)).unwrap();
        assert!(shell.sidebar_focused());
        assert!(page.doc().tree().element(shell.aside()).unwrap().has_class("focused"));
    }
}
