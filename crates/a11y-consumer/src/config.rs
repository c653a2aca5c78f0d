//! Demo Configuration

use std::time::Duration;

/// Backend used when `A11Y_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Demo configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    /// Base URL of the task backend
    pub api_url: String,

    /// Keyboard shortcut quiet window
    pub debounce: Duration,

    /// Interval between random message refreshes
    pub message_refresh: Duration,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(100),
            message_refresh: Duration::from_secs(6),
        }
    }
}

impl DemoConfig {
    /// Read `A11Y_API_URL`, `A11Y_DEBOUNCE_MS` and `A11Y_MESSAGE_REFRESH_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("A11Y_API_URL").filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(ms) = parse_var(&lookup, "A11Y_DEBOUNCE_MS") {
            config.debounce = Duration::from_millis(ms);
        }
        match parse_var(&lookup, "A11Y_MESSAGE_REFRESH_SECS") {
            Some(0) => tracing::warn!("A11Y_MESSAGE_REFRESH_SECS must be positive, keeping default"),
            Some(secs) => config.message_refresh = Duration::from_secs(secs),
            None => {}
        }

        config
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring invalid setting");
            None
        }
    }
}
