//! Live Announcements
//!
//! Forwards messages to the assistive-technology announcement channel.

use a11y_dom::{Document, DomResult, NodeId};

/// Live region politeness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness { Polite, Assertive }

impl Politeness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Assistive-technology announcement channel
pub trait Announcer {
    fn announce(&mut self, message: &str, politeness: Politeness);
}

/// Thin front for an [`Announcer`]. Every call is forwarded immediately.
#[derive(Debug, Default)]
pub struct LiveAnnouncerService<A> {
    announcer: A,
}

impl<A: Announcer> LiveAnnouncerService<A> {
    pub fn new(announcer: A) -> Self {
        Self { announcer }
    }

    pub fn announce_polite(&mut self, message: &str) {
        self.announcer.announce(message, Politeness::Polite);
    }

    pub fn announce_assertive(&mut self, message: &str) {
        self.announcer.announce(message, Politeness::Assertive);
    }

    pub fn announcer(&self) -> &A {
        &self.announcer
    }

    pub fn announcer_mut(&mut self) -> &mut A {
        &mut self.announcer
    }
}

/// Class of the hidden element used as the announcement region
pub const LIVE_ANNOUNCER_CLASS: &str = "a11y-live-announcer";

/// Announces by rewriting a visually hidden live region under `<body>`.
///
/// The region is created on first use. Screen readers pick up the text
/// change and read it with the current `aria-live` politeness.
#[derive(Debug, Default)]
pub struct LiveRegionAnnouncer {
    region: Option<NodeId>,
    last: Option<(String, Politeness)>,
}

impl LiveRegionAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_region(&mut self, doc: &mut Document) -> DomResult<NodeId> {
        if let Some(region) = self.region.filter(|&r| doc.tree().is_connected(r)) {
            return Ok(region);
        }
        let body = doc.body();
        let region = doc.create_element_in(body, "div")?;
        doc.set_attribute(region, "class", LIVE_ANNOUNCER_CLASS)?;
        doc.set_attribute(region, "aria-atomic", "true")?;
        doc.set_attribute(region, "aria-live", Politeness::Polite.as_str())?;
        self.region = Some(region);
        Ok(region)
    }

    /// Write `message` into the region with the given politeness.
    pub fn announce_in(&mut self, doc: &mut Document, message: &str, politeness: Politeness) -> DomResult<NodeId> {
        let region = self.ensure_region(doc)?;
        doc.set_attribute(region, "aria-live", politeness.as_str())?;
        doc.tree_mut().set_text_content(region, message)?;
        tracing::info!(politeness = politeness.as_str(), message, "announce");
        self.last = Some((message.to_string(), politeness));
        Ok(region)
    }

    pub fn region(&self) -> Option<NodeId> {
        self.region
    }

    /// Most recent announcement
    pub fn last(&self) -> Option<(&str, Politeness)> {
        self.last.as_ref().map(|(m, p)| (m.as_str(), *p))
    }
}

/// A [`LiveRegionAnnouncer`] paired with the document it writes into.
pub struct DocumentAnnouncer<'a> {
    pub doc: &'a mut Document,
    pub region: &'a mut LiveRegionAnnouncer,
}

impl Announcer for DocumentAnnouncer<'_> {
    fn announce(&mut self, message: &str, politeness: Politeness) {
        if let Err(err) = self.region.announce_in(self.doc, message, politeness) {
            tracing::warn!(%err, "live announcement dropped");
        }
    }
}
