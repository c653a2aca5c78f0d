//! Demo Application
//!
//! Wires the page, the shell and the task list, and routes input to them.

use std::rc::Rc;
use std::time::Instant;

use a11y_dom::{Key, KeyboardEvent, Window};
use a11y_kit::{A11yError, ShortcutConfig, focus_next, focus_previous};

use crate::config::DemoConfig;
use crate::page::Page;
use crate::shell::AppShell;
use crate::task_list::TaskListView;

pub const HELP: &str = "keys: Tab, Shift+Tab, Enter, Escape, 1-4 | commands: click, save, toggle, update, tasks, help, quit";

/// Outcome of one line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    page: Rc<Page>,
    window: Rc<Window>,
    shell: Rc<AppShell>,
    tasks: Rc<TaskListView>,
}

impl App {
    pub fn build(config: &DemoConfig) -> Result<Self, A11yError> {
        let shortcuts = ShortcutConfig::default().with_debounce(config.debounce);
        let page = Page::new("app://tasks");
        let window = Window::new();

        let shell = AppShell::new(&page, shortcuts.clone())?;
        shell.init(&window);
        let tasks = TaskListView::new(&page, shell.main(), shortcuts)?;
        tasks.init(&window);

        tracing::info!(debounce_ms = config.debounce.as_millis() as u64, "demo page ready");
        Ok(Self { page, window, shell, tasks })
    }

    pub fn page(&self) -> &Rc<Page> {
        &self.page
    }

    pub fn window(&self) -> &Rc<Window> {
        &self.window
    }

    pub fn shell(&self) -> &Rc<AppShell> {
        &self.shell
    }

    pub fn tasks(&self) -> &Rc<TaskListView> {
        &self.tasks
    }

    /// Deliver a key-down the way the browser would.
    ///
    /// Shortcuts already due by the event's timestamp run first. Focus traps
    /// then see Tab; an unprevented Tab moves focus in document order;
    /// finally the event reaches the window listeners.
    pub fn key_down(&self, mut event: KeyboardEvent) -> Result<(), A11yError> {
        self.poll(event.timestamp)?;

        if self.tasks.modal_contains_focus() {
            self.tasks.handle_modal_key(&mut event)?;
        } else {
            self.shell.handle_sidebar_key(&mut event)?;
        }

        if event.key == Key::Tab && !event.is_default_prevented() {
            let mut doc = self.page.doc_mut();
            let body = doc.body();
            if event.modifiers.shift {
                focus_previous(&mut doc, body)?;
            } else {
                focus_next(&mut doc, body)?;
            }
        }

        let listeners = self.window.dispatch_keydown(&event);
        tracing::trace!(key = %event.key_string(), listeners, "key down dispatched");
        self.route_focus()
    }

    /// Run shortcuts whose quiet window has elapsed
    pub fn poll(&self, now: Instant) -> Result<bool, A11yError> {
        let shell = self.shell.poll(now);
        let tasks = self.tasks.poll(now);
        self.route_focus()?;
        Ok(shell || tasks)
    }

    /// Earliest pending shortcut deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.shell.shortcuts().next_deadline(), self.tasks.shortcuts().next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    fn route_focus(&self) -> Result<(), A11yError> {
        for event in self.page.focus_changes() {
            self.shell.handle_focus_event(&event)?;
            self.tasks.handle_focus_event(&event)?;
        }
        Ok(())
    }

    /// Handle one line typed at the prompt
    pub fn handle_input(&self, line: &str, now: Instant) -> Result<Flow, A11yError> {
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "exit" => return Ok(Flow::Quit),
            "help" => println!("{HELP}"),
            "save" => self.tasks.save(),
            "toggle" => {
                self.tasks.toggle()?;
            }
            "update" => self.tasks.update_message()?,
            "tasks" => self.print_tasks(),
            "click" => {
                let focused = self.page.doc().focused();
                let handled = match focused {
                    Some(node) => self.tasks.activate(node)?,
                    None => false,
                };
                if !handled {
                    tracing::debug!("nothing to click");
                }
                self.route_focus()?;
            }
            chord => match KeyboardEvent::parse_chord(chord) {
                Some(event) => self.key_down(event.at(now))?,
                None => tracing::warn!(input = chord, "unrecognised input"),
            },
        }
        Ok(Flow::Continue)
    }

    fn print_tasks(&self) {
        let store = self.tasks.store();
        if store.categories().is_empty() {
            println!("(no tasks loaded)");
        }
        for category in store.categories() {
            println!("{} [{}]", category.name, category.tasks.len());
            for task in &category.tasks {
                let mark = if task.completed { 'x' } else { ' ' };
                println!("  [{mark}] {} (p{}, due {})", task.name, task.priority, task.due_date.format("%Y-%m-%d"));
            }
        }
    }

    /// One-line summary printed after every step
    pub fn status_line(&self) -> String {
        let focus = match self.page.doc().focused() {
            Some(node) => self.page.describe(node),
            None => "body".to_string(),
        };
        let modal = if self.tasks.is_modal_open() { "open" } else { "closed" };
        let announced = match self.tasks.last_announcement() {
            Some((message, politeness)) => format!("{}: {message}", politeness.as_str()),
            None => "-".to_string(),
        };
        format!(
            "focus={focus} | modal={modal} | message=\"{}\" | announced={announced}",
            self.tasks.message()
        )
    }
}
