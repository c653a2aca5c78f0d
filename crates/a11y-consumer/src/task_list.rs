//! Task List View
//!
//! Category lists, the details toggle, the status message and the task modal.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use a11y_dom::{FocusEvent, KeyboardEvent, NodeId, Window};
use a11y_kit::{
    A11yError, AriaPropertyDirective, DocumentAnnouncer, FocusService, KeyboardShortcuts,
    KeydownSubscription, LiveAnnouncerService, LiveRegionAnnouncer, LiveRegionDirective,
    LiveRegionMode, Politeness, ShortcutConfig,
};
use rand::Rng;
use smol::stream::StreamExt;

use crate::modal::Modal;
use crate::models::Category;
use crate::page::Page;
use crate::task_service::TaskStore;

pub const INITIAL_MESSAGE: &str = "Initial message";
pub const UPDATED_MESSAGE: &str = "Updated message";
pub const SAVE_ANNOUNCEMENT: &str = "Testing Assertive Announce";

/// The task list section inside the main landmark
#[derive(Debug)]
pub struct TaskListView {
    page: Rc<Page>,
    section: NodeId,
    lists: NodeId,
    toggle_button: NodeId,
    message_el: NodeId,
    expanded: Cell<bool>,
    aria_expanded: RefCell<AriaPropertyDirective>,
    message: RefCell<String>,
    modal: RefCell<Option<Modal>>,
    focus: RefCell<FocusService>,
    announcer: RefCell<LiveRegionAnnouncer>,
    store: RefCell<TaskStore>,
    shortcuts: KeyboardShortcuts,
    subscription: RefCell<Option<KeydownSubscription>>,
    refresh: RefCell<Option<smol::Task<()>>>,
}

impl TaskListView {
    pub fn new(page: &Rc<Page>, parent: NodeId, config: ShortcutConfig) -> Result<Rc<Self>, A11yError> {
        let section = page.append(parent, "section", "")?;
        page.doc_mut().set_attribute(section, "id", "task-list")?;
        let heading = page.append(section, "h2", "My tasks")?;
        page.doc_mut().set_attribute(heading, "tabindex", "0")?;

        let toggle_button = page.append(section, "button", "Details")?;
        let aria_expanded = AriaPropertyDirective::new(toggle_button, "aria-expanded", "false");
        aria_expanded.apply(&mut page.doc_mut())?;

        let lists = page.append(section, "div", "")?;
        page.doc_mut().set_attribute(lists, "class", "categories")?;

        let message_el = page.append(section, "div", INITIAL_MESSAGE)?;
        LiveRegionDirective::with_mode(message_el, LiveRegionMode::Polite).apply(&mut page.doc_mut())?;

        Ok(Rc::new(Self {
            page: Rc::clone(page),
            section,
            lists,
            toggle_button,
            message_el,
            expanded: Cell::new(false),
            aria_expanded: RefCell::new(aria_expanded),
            message: RefCell::new(INITIAL_MESSAGE.to_string()),
            modal: RefCell::new(None),
            focus: RefCell::new(FocusService::new()),
            announcer: RefCell::new(LiveRegionAnnouncer::new()),
            store: RefCell::new(TaskStore::default()),
            shortcuts: KeyboardShortcuts::with_config(config),
            subscription: RefCell::new(None),
            refresh: RefCell::new(None),
        }))
    }

    /// Register `Escape` / `Enter` and listen on `window`
    pub fn init(self: &Rc<Self>, window: &Rc<Window>) {
        let view = Rc::downgrade(self);
        self.shortcuts.register_shortcut("Escape", move || {
            with_view(&view, |v| v.close_modal().map(drop));
        });
        let view = Rc::downgrade(self);
        self.shortcuts.register_shortcut("Enter", move || {
            with_view(&view, |v| v.open_modal().map(drop));
        });
        let subscription = self.shortcuts.bind_keydown_listener(window);
        *self.subscription.borrow_mut() = Some(subscription);
    }

    pub fn section(&self) -> NodeId {
        self.section
    }

    pub fn toggle_button(&self) -> NodeId {
        self.toggle_button
    }

    pub fn message_element(&self) -> NodeId {
        self.message_el
    }

    pub fn shortcuts(&self) -> &KeyboardShortcuts {
        &self.shortcuts
    }

    pub fn poll(&self, now: Instant) -> bool {
        self.shortcuts.poll(now)
    }

    // ===== Modal =====

    /// Open the task modal. Returns false when it is already open.
    pub fn open_modal(&self) -> Result<bool, A11yError> {
        let mut modal = self.modal.borrow_mut();
        if modal.is_some() {
            return Ok(false);
        }
        *modal = Some(Modal::open(&self.page, self.section, &mut self.focus.borrow_mut())?);
        Ok(true)
    }

    /// Close the task modal. Returns false when none is open.
    pub fn close_modal(&self) -> Result<bool, A11yError> {
        let Some(modal) = self.modal.borrow_mut().take() else {
            return Ok(false);
        };
        modal.close(&self.page, &self.focus.borrow())?;
        Ok(true)
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.borrow().is_some()
    }

    pub fn modal(&self) -> Ref<'_, Option<Modal>> {
        self.modal.borrow()
    }

    pub fn modal_contains_focus(&self) -> bool {
        self.modal.borrow().as_ref().is_some_and(|m| m.contains_focus(&self.page))
    }

    /// Key-down while focus is inside the open modal
    pub fn handle_modal_key(&self, event: &mut KeyboardEvent) -> Result<bool, A11yError> {
        match self.modal.borrow().as_ref() {
            Some(modal) if modal.contains_focus(&self.page) => modal.handle_key_down(&self.page, event),
            _ => Ok(false),
        }
    }

    pub fn handle_focus_event(&self, event: &FocusEvent) -> Result<(), A11yError> {
        match self.modal.borrow_mut().as_mut() {
            Some(modal) => modal.handle_focus_event(&self.page, event),
            None => Ok(()),
        }
    }

    // ===== Actions =====

    pub fn save(&self) {
        let mut doc = self.page.doc_mut();
        let mut region = self.announcer.borrow_mut();
        let mut live = LiveAnnouncerService::new(DocumentAnnouncer { doc: &mut doc, region: &mut region });
        live.announce_assertive(SAVE_ANNOUNCEMENT);
    }

    pub fn last_announcement(&self) -> Option<(String, Politeness)> {
        self.announcer.borrow().last().map(|(m, p)| (m.to_string(), p))
    }

    /// Flip the details toggle and mirror it in `aria-expanded`
    pub fn toggle(&self) -> Result<bool, A11yError> {
        let expanded = !self.expanded.get();
        self.expanded.set(expanded);
        let mut directive = self.aria_expanded.borrow_mut();
        directive.set_value(expanded.to_string());
        directive.apply(&mut self.page.doc_mut())?;
        Ok(expanded)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded.get()
    }

    pub fn update_message(&self) -> Result<(), A11yError> {
        self.set_message(UPDATED_MESSAGE)
    }

    pub fn set_message(&self, text: &str) -> Result<(), A11yError> {
        *self.message.borrow_mut() = text.to_string();
        self.page.doc_mut().tree_mut().set_text_content(self.message_el, text)?;
        Ok(())
    }

    pub fn message(&self) -> String {
        self.message.borrow().clone()
    }

    /// Activate `node` as if it were clicked. Returns false when nothing reacts.
    pub fn activate(&self, node: NodeId) -> Result<bool, A11yError> {
        if node == self.toggle_button {
            self.toggle()?;
            return Ok(true);
        }
        let (save, close) = match self.modal.borrow().as_ref() {
            Some(modal) => (modal.save_button(), modal.close_button()),
            None => return Ok(false),
        };
        if node == save {
            self.save();
            Ok(true)
        } else if node == close {
            self.close_modal()
        } else {
            Ok(false)
        }
    }

    // ===== Tasks =====

    pub fn store(&self) -> Ref<'_, TaskStore> {
        self.store.borrow()
    }

    pub fn set_categories(&self, categories: Vec<Category>) -> Result<(), A11yError> {
        self.store.borrow_mut().replace(categories);
        self.render()
    }

    /// Rebuild the category lists from the store
    pub fn render(&self) -> Result<(), A11yError> {
        let stale: Vec<NodeId> = {
            let doc = self.page.doc();
            doc.tree().children(self.lists).map(|(child, _)| child).collect()
        };
        for child in stale {
            self.page.doc_mut().remove(child)?;
        }

        let store = self.store.borrow();
        for category in store.categories() {
            let group = self.page.append(self.lists, "div", "")?;
            let title = self.page.append(group, "h2", &category.name)?;
            self.page.doc_mut().set_attribute(title, "tabindex", "0")?;

            let list = self.page.append(group, "ul", "")?;
            for task in &category.tasks {
                let label = if task.completed {
                    format!("{} (done)", task.name)
                } else {
                    format!("{} (due {})", task.name, task.due_date.format("%Y-%m-%d"))
                };
                let item = self.page.append(list, "li", &label)?;
                self.page.doc_mut().set_attribute(item, "tabindex", "0")?;
            }
        }
        tracing::debug!(categories = store.categories().len(), tasks = store.task_count(), "task list rendered");
        Ok(())
    }

    // ===== Message refresh =====

    /// Replace the message with a random word every `every`.
    ///
    /// The timer is owned by the view and stops when the view is dropped.
    pub fn start_message_refresh(self: &Rc<Self>, ex: &smol::LocalExecutor<'_>, every: Duration) {
        let view = Rc::downgrade(self);
        let task = ex.spawn(async move {
            let mut ticks = smol::Timer::interval(every);
            while ticks.next().await.is_some() {
                let Some(view) = view.upgrade() else { break };
                let word = random_word(&mut rand::thread_rng());
                tracing::debug!(%word, "message refreshed");
                if let Err(err) = view.set_message(&word) {
                    tracing::warn!(%err, "message refresh failed");
                }
            }
        });
        *self.refresh.borrow_mut() = Some(task);
    }

    /// Cancel the refresh timer. Returns false when none was running.
    pub fn stop_message_refresh(&self) -> bool {
        self.refresh.borrow_mut().take().is_some()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.borrow().is_some()
    }
}

fn with_view(view: &Weak<TaskListView>, f: impl FnOnce(&TaskListView) -> Result<(), A11yError>) {
    if let Some(view) = view.upgrade() {
        if let Err(err) = f(&view) {
            tracing::warn!(%err, "task list shortcut failed");
        }
    }
}

/// Five random lowercase letters
pub fn random_word(rng: &mut impl Rng) -> String {
    (0..5).map(|_| char::from(rng.gen_range(b'a'..=b'z'))).collect()
}
