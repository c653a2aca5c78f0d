//! Attribute Directives
//!
//! Each directive holds its inputs and a host element and writes a single
//! attribute when `apply` runs. Nothing reacts to input changes on its own;
//! call `apply` again after a setter to push the new value.

use a11y_dom::{Document, DomResult, NodeId};

use crate::{AriaRole, LiveRegionMode};

/// Sets the `role` attribute on its host.
#[derive(Debug, Clone)]
pub struct AriaRoleDirective {
    host: NodeId,
    role: String,
}

impl AriaRoleDirective {
    pub fn new(host: NodeId, role: impl Into<String>) -> Self {
        Self { host, role: role.into() }
    }

    pub fn with_role(host: NodeId, role: AriaRole) -> Self {
        Self::new(host, role.as_str())
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
    }

    /// Writes `role` unconditionally, the empty string included.
    pub fn apply(&self, doc: &mut Document) -> DomResult<bool> {
        match AriaRole::parse(&self.role) {
            Some(role) => tracing::debug!(
                host = ?self.host,
                role = role.as_str(),
                landmark = role.is_landmark(),
                widget = role.is_widget(),
                "role applied"
            ),
            None => tracing::warn!(host = ?self.host, role = %self.role, "unknown or empty ARIA role"),
        }
        doc.set_attribute(self.host, "role", &self.role)?;
        Ok(true)
    }
}

/// Sets an arbitrary ARIA property/value pair on its host.
#[derive(Debug, Clone)]
pub struct AriaPropertyDirective {
    host: NodeId,
    property: String,
    value: String,
}

impl AriaPropertyDirective {
    pub fn new(host: NodeId, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self { host, property: property.into(), value: value.into() }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_property(&mut self, property: impl Into<String>) {
        self.property = property.into();
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Writes the attribute only when both property and value are non-empty.
    pub fn apply(&self, doc: &mut Document) -> DomResult<bool> {
        if self.property.is_empty() || self.value.is_empty() {
            tracing::debug!(host = ?self.host, property = %self.property, "skipping empty ARIA property");
            return Ok(false);
        }
        doc.set_attribute(self.host, &self.property, &self.value)?;
        Ok(true)
    }
}

/// Sets `aria-live` on its host.
#[derive(Debug, Clone)]
pub struct LiveRegionDirective {
    host: NodeId,
    aria_live: String,
}

impl LiveRegionDirective {
    pub fn new(host: NodeId, aria_live: impl Into<String>) -> Self {
        Self { host, aria_live: aria_live.into() }
    }

    pub fn with_mode(host: NodeId, mode: LiveRegionMode) -> Self {
        Self::new(host, mode.as_str())
    }

    pub fn aria_live(&self) -> &str {
        &self.aria_live
    }

    pub fn set_aria_live(&mut self, aria_live: impl Into<String>) {
        self.aria_live = aria_live.into();
    }

    /// Writes `aria-live` unconditionally, the empty string included.
    pub fn apply(&self, doc: &mut Document) -> DomResult<bool> {
        if LiveRegionMode::parse(&self.aria_live).is_none() {
            tracing::warn!(host = ?self.host, value = %self.aria_live, "unknown or empty aria-live value");
        }
        doc.set_attribute(self.host, "aria-live", &self.aria_live)?;
        Ok(true)
    }
}
