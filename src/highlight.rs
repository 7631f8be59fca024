//! Active-section tracking for the in-page navigation bar.
//!
//! The DOM layer feeds intersection-observer batches into
//! [`SectionTracker::observe`]; the tracker keeps the last visibility ratio
//! per section and picks the most visible one. At most one link is active.

#[cfg(test)]
#[path = "highlight_test.rs"]
mod highlight_test;

/// One intersection-observer entry, reduced to what the tracker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: String,
    pub ratio: f64,
    pub intersecting: bool,
}

impl Observation {
    #[must_use]
    pub fn new(id: impl Into<String>, ratio: f64, intersecting: bool) -> Self {
        Self { id: id.into(), ratio, intersecting }
    }
}

#[derive(Debug, Clone)]
struct SectionRatio {
    id: String,
    ratio: f64,
    /// Sequence number of the last update; breaks ratio ties.
    updated: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    /// Fragment ids of every `#`-link in the nav.
    links: Vec<String>,
    /// Sections present in the page, in link order.
    sections: Vec<SectionRatio>,
    seq: u64,
    active: Option<String>,
}

impl SectionTracker {
    /// `links` are the nav fragment ids; `present` says whether a section
    /// element with that id exists.
    #[must_use]
    pub fn new(links: Vec<String>, mut present: impl FnMut(&str) -> bool) -> Self {
        let links: Vec<String> = links.into_iter().filter(|id| !id.is_empty()).collect();
        let mut sections: Vec<SectionRatio> = Vec::new();
        for id in &links {
            if present(id) && !sections.iter().any(|s| &s.id == id) {
                sections.push(SectionRatio { id: id.clone(), ratio: 0.0, updated: 0 });
            }
        }
        Self { links, sections, seq: 0, active: None }
    }

    /// Ids of the sections to observe.
    #[must_use]
    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    #[must_use]
    pub fn knows(&self, id: &str) -> bool {
        self.links.iter().any(|l| l == id)
    }

    /// Apply an observer batch. Returns the newly active id when it changed.
    pub fn observe(&mut self, batch: &[Observation]) -> Option<&str> {
        for entry in batch {
            self.seq += 1;
            let seq = self.seq;
            if let Some(section) = self.sections.iter_mut().find(|s| s.id == entry.id) {
                section.ratio = if entry.intersecting { entry.ratio } else { 0.0 };
                section.updated = seq;
            }
        }

        let best = self
            .sections
            .iter()
            .filter(|s| s.ratio > 0.0)
            .max_by(|a, b| a.ratio.total_cmp(&b.ratio).then(a.updated.cmp(&b.updated)))?
            .id
            .clone();
        self.set(best)
    }

    /// Mark a link active directly (click or hash change).
    pub fn activate(&mut self, id: &str) -> Option<&str> {
        if !self.knows(id) {
            return None;
        }
        self.set(id.to_owned())
    }

    /// Handle a `location.hash` value such as `"#chapter-2"`.
    pub fn on_hash(&mut self, hash: &str) -> Option<&str> {
        let id = hash.strip_prefix('#').unwrap_or(hash);
        if id.is_empty() {
            return None;
        }
        self.activate(id)
    }

    fn set(&mut self, id: String) -> Option<&str> {
        if self.active.as_deref() == Some(id.as_str()) {
            return None;
        }
        self.active = Some(id);
        self.active.as_deref()
    }
}

/// One entry per fragment id, in first-seen order. A later link with the
/// same id replaces the earlier one, so only the last anchor is marked.
#[must_use]
pub fn unique_links<T>(links: Vec<(String, T)>) -> Vec<(String, T)> {
    let mut unique: Vec<(String, T)> = Vec::with_capacity(links.len());
    for (id, link) in links {
        match unique.iter_mut().find(|(seen, _)| *seen == id) {
            Some(slot) => slot.1 = link,
            None => unique.push((id, link)),
        }
    }
    unique
}

/// Fragment id of a nav `href` (`"#about"` → `"about"`).
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Whether the nav bar should carry the `scrolled` class.
#[must_use]
pub fn is_scrolled(scroll_y: f64, offset_px: f64) -> bool {
    scroll_y > offset_px
}

/// Observer root margin that clears the fixed nav bar at the top and
/// ignores the bottom `bottom_percent` of the viewport.
#[must_use]
pub fn root_margin(nav_height: f64, pad_px: f64, bottom_percent: f64) -> String {
    let top = nav_height.max(0.0) + pad_px;
    format!("-{top}px 0px -{bottom_percent}% 0px")
}
