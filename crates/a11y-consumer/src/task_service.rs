//! Task Service
//!
//! Loads categories from the backend and keeps a local working copy.

use std::time::Duration;

use url::Url;

use crate::models::{Category, Task};

const USER_AGENT: &str = concat!("a11y-consumer/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Task service errors
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Category {0} not found")]
    CategoryNotFound(u64),

    #[error("Task {0} not found")]
    TaskNotFound(u64),

    #[error("Task {0} already exists")]
    DuplicateTask(u64),
}

/// HTTP front for the task backend
#[derive(Debug, Clone)]
pub struct TaskService {
    api_url: Url,
    client: reqwest::blocking::Client,
}

impl TaskService {
    pub fn new(api_url: &str) -> Result<Self, TaskError> {
        let mut api_url = Url::parse(api_url)?;
        // `join` replaces the last segment unless the base ends with '/'
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { api_url, client })
    }

    pub fn categories_url(&self) -> Result<Url, TaskError> {
        Ok(self.api_url.join("categories")?)
    }

    /// `GET {api_url}/categories`, run on smol's blocking pool
    pub async fn get_all_tasks(&self) -> Result<Vec<Category>, TaskError> {
        let url = self.categories_url()?;
        let client = self.client.clone();
        tracing::debug!(%url, "fetching categories");

        let categories = smol::unblock(move || -> Result<Vec<Category>, reqwest::Error> {
            client.get(url).send()?.error_for_status()?.json()
        })
        .await?;

        tracing::info!(count = categories.len(), "categories loaded");
        Ok(categories)
    }
}

/// Local working copy of the categories
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    categories: Vec<Category>,
}

impl TaskStore {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn replace(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Tasks of one category; empty for an unknown id
    pub fn tasks_by_category(&self, category_id: u64) -> &[Task] {
        self.categories.iter()
            .find(|c| c.id == category_id)
            .map(|c| c.tasks.as_slice())
            .unwrap_or(&[])
    }

    pub fn task_count(&self) -> usize {
        self.categories.iter().map(|c| c.tasks.len()).sum()
    }

    fn find_task(&self, task_id: u64) -> Option<(usize, usize)> {
        self.categories.iter().enumerate().find_map(|(ci, c)| {
            c.tasks.iter().position(|t| t.id == task_id).map(|ti| (ci, ti))
        })
    }

    pub fn add_task(&mut self, category_id: u64, task: Task) -> Result<(), TaskError> {
        if self.find_task(task.id).is_some() {
            return Err(TaskError::DuplicateTask(task.id));
        }
        let category = self.categories.iter_mut()
            .find(|c| c.id == category_id)
            .ok_or(TaskError::CategoryNotFound(category_id))?;
        category.tasks.push(task);
        Ok(())
    }

    /// Replace the stored task with the same id
    pub fn edit_task(&mut self, task: Task) -> Result<(), TaskError> {
        let (ci, ti) = self.find_task(task.id).ok_or(TaskError::TaskNotFound(task.id))?;
        self.categories[ci].tasks[ti] = task;
        Ok(())
    }

    pub fn delete_task(&mut self, task_id: u64) -> Result<Task, TaskError> {
        let (ci, ti) = self.find_task(task_id).ok_or(TaskError::TaskNotFound(task_id))?;
        Ok(self.categories[ci].tasks.remove(ti))
    }

    /// Move a task to the end of another category
    pub fn move_task(&mut self, task_id: u64, category_id: u64) -> Result<(), TaskError> {
        let target = self.categories.iter()
            .position(|c| c.id == category_id)
            .ok_or(TaskError::CategoryNotFound(category_id))?;
        let (ci, ti) = self.find_task(task_id).ok_or(TaskError::TaskNotFound(task_id))?;
        if ci == target {
            return Ok(());
        }
        let task = self.categories[ci].tasks.remove(ti);
        self.categories[target].tasks.push(task);
        Ok(())
    }
}
