//! Comprehensive tests for a11y-kit
//!
//! Global listener binding, debounced dispatch and dialog focus handling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use a11y_dom::{Document, Key, KeyModifiers, KeyboardEvent, NodeId, Window};
use a11y_kit::{
    AriaPropertyDirective, AriaRoleDirective, FocusService, FocusTrap, KeyboardShortcuts,
    LiveRegionDirective, LiveRegionMode, focus_next,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn press(window: &Window, key: &str, at: Instant) {
    window.dispatch_keydown(&KeyboardEvent::new(Key::parse(key)).at(at));
}

#[test]
fn test_bound_listener_dispatches_through_window() {
    let t0 = Instant::now();
    let window = Window::new();
    let shortcuts = KeyboardShortcuts::new();
    let opened = Rc::new(Cell::new(0));
    let o = Rc::clone(&opened);
    shortcuts.register_shortcut("Enter", move || o.set(o.get() + 1));

    let subscription = shortcuts.bind_keydown_listener(&window);
    assert!(shortcuts.is_bound());
    assert_eq!(window.listener_count(), 1);

    press(&window, "Enter", t0);
    assert!(shortcuts.poll(t0 + ms(100)));
    assert_eq!(opened.get(), 1);

    drop(subscription);
    assert!(!shortcuts.is_bound());
    assert_eq!(window.listener_count(), 0);

    press(&window, "Enter", t0 + ms(500));
    assert!(!shortcuts.poll(t0 + ms(700)));
    assert_eq!(opened.get(), 1);
}

#[test]
fn test_rebinding_keeps_single_listener() {
    let t0 = Instant::now();
    let window = Window::new();
    let shortcuts = KeyboardShortcuts::new();
    let hits = Rc::new(Cell::new(0));
    let h = Rc::clone(&hits);
    shortcuts.register_shortcut("1", move || h.set(h.get() + 1));

    let first = shortcuts.bind_keydown_listener(&window);
    let second = shortcuts.bind_keydown_listener(&window);
    assert_eq!(window.listener_count(), 1);
    assert_ne!(first.id(), second.id());

    // The stale handle must not tear down the live binding
    first.dispose();
    assert!(shortcuts.is_bound());
    assert_eq!(window.listener_count(), 1);

    press(&window, "1", t0);
    assert!(shortcuts.poll(t0 + ms(100)));
    assert_eq!(hits.get(), 1);

    second.dispose();
    assert_eq!(window.listener_count(), 0);
}

#[test]
fn test_unbind_cancels_pending_and_detaches() {
    let t0 = Instant::now();
    let window = Window::new();
    let shortcuts = KeyboardShortcuts::new();
    let hit = Rc::new(Cell::new(false));
    let h = Rc::clone(&hit);
    shortcuts.register_shortcut("Escape", move || h.set(true));

    let _subscription = shortcuts.bind_keydown_listener(&window);
    press(&window, "Escape", t0);
    assert!(shortcuts.next_deadline().is_some());

    assert!(shortcuts.unbind_keydown_listener());
    assert!(!shortcuts.unbind_keydown_listener());
    assert_eq!(window.listener_count(), 0);
    assert!(!shortcuts.poll(t0 + ms(200)));
    assert!(!hit.get());
}

#[test]
fn test_two_dispatchers_share_window() {
    let t0 = Instant::now();
    let window = Window::new();
    let shell = KeyboardShortcuts::new();
    let list = KeyboardShortcuts::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    shell.register_shortcut("3", move || l.borrow_mut().push("main"));
    let l = Rc::clone(&log);
    list.register_shortcut("Escape", move || l.borrow_mut().push("close"));

    let _a = shell.bind_keydown_listener(&window);
    let _b = list.bind_keydown_listener(&window);

    press(&window, "3", t0);
    let now = t0 + ms(100);
    assert!(shell.poll(now));
    assert!(!list.poll(now));
    assert_eq!(*log.borrow(), vec!["main"]);
}

#[test]
fn test_rapid_burst_only_last_fires() {
    let t0 = Instant::now();
    let window = Window::new();
    let shortcuts = KeyboardShortcuts::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    for key in ["Enter", "Escape"] {
        let l = Rc::clone(&log);
        shortcuts.register_shortcut(key, move || l.borrow_mut().push(key));
    }
    let _sub = shortcuts.bind_keydown_listener(&window);

    press(&window, "Enter", t0);
    press(&window, "Escape", t0 + ms(99));
    assert!(!shortcuts.poll(t0 + ms(150)));
    assert!(shortcuts.poll(t0 + ms(199)));
    assert_eq!(*log.borrow(), vec!["Escape"]);
}

fn dialog_page() -> (Document, NodeId, NodeId, [NodeId; 3]) {
    let mut doc = Document::default();
    let body = doc.body();
    let opener = doc.create_element_in(body, "button").unwrap();
    let dialog = doc.create_element_in(body, "div").unwrap();
    let name = doc.create_element_in(dialog, "input").unwrap();
    doc.set_attribute(name, "type", "text").unwrap();
    let link = doc.create_element_in(dialog, "a").unwrap();
    doc.set_attribute(link, "href", "#details").unwrap();
    let close = doc.create_element_in(dialog, "button").unwrap();
    (doc, opener, dialog, [name, link, close])
}

#[test]
fn test_dialog_open_trap_close_restore() {
    let (mut doc, opener, dialog, [name, _, close]) = dialog_page();
    doc.focus(opener).unwrap();

    let mut focus = FocusService::new();
    focus.save_focus(&doc);

    AriaRoleDirective::new(dialog, "dialog").apply(&mut doc).unwrap();
    AriaPropertyDirective::new(dialog, "aria-modal", "true").apply(&mut doc).unwrap();
    let mut trap = FocusTrap::new(dialog);
    trap.init(&doc).unwrap();
    assert!(trap.focus_first_element(&mut doc).unwrap());
    assert_eq!(doc.focused(), Some(name));

    // Walk forward to the last element, then wrap
    focus_next(&mut doc, dialog).unwrap();
    focus_next(&mut doc, dialog).unwrap();
    assert_eq!(doc.focused(), Some(close));
    let mut tab = KeyboardEvent::new(Key::Tab);
    assert!(trap.handle_key_down(&mut doc, &mut tab).unwrap());
    assert_eq!(doc.focused(), Some(name));

    let mut back = KeyboardEvent::new(Key::Tab).with_modifiers(KeyModifiers::shift());
    assert!(trap.handle_key_down(&mut doc, &mut back).unwrap());
    assert_eq!(doc.focused(), Some(close));

    doc.remove(dialog).unwrap();
    focus.restore_focus(&mut doc).unwrap();
    assert_eq!(doc.focused(), Some(opener));
    assert_eq!(doc.get_attribute(dialog, "role"), Some("dialog"));
}

#[test]
fn test_restore_to_detached_element_is_ignored() {
    let (mut doc, _, dialog, [name, _, _]) = dialog_page();
    doc.focus(name).unwrap();
    let mut focus = FocusService::new();
    focus.save_focus(&doc);

    doc.remove(dialog).unwrap();
    assert!(focus.restore_focus(&mut doc).unwrap().is_empty());
    assert_eq!(focus.saved(), Some(name));
    assert_eq!(doc.focused(), None);
}

#[test]
fn test_live_region_directive_modes() {
    let mut doc = Document::default();
    let body = doc.body();
    let status = doc.create_element_in(body, "div").unwrap();

    LiveRegionDirective::with_mode(status, LiveRegionMode::Assertive).apply(&mut doc).unwrap();
    assert_eq!(doc.get_attribute(status, "aria-live"), Some("assertive"));

    let mut directive = LiveRegionDirective::new(status, "polite");
    directive.apply(&mut doc).unwrap();
    directive.set_aria_live("off");
    directive.apply(&mut doc).unwrap();
    assert_eq!(doc.get_attribute(status, "aria-live"), Some("off"));
}
