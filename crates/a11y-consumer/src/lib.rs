//! a11y-consumer
//!
//! Task-list demo built on `a11y-kit`: landmark shortcuts, a trapped
//! modal dialog, live announcements and a task list fetched over HTTP.

pub mod config;
pub mod models;
pub mod task_service;
pub mod page;
pub mod shell;
pub mod modal;
pub mod task_list;
pub mod app;

pub use config::DemoConfig;
pub use models::{Category, Task};
pub use task_service::{TaskError, TaskService, TaskStore};
pub use page::Page;
pub use shell::AppShell;
pub use modal::Modal;
pub use task_list::TaskListView;
pub use app::{App, Flow};

/// Demo version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
