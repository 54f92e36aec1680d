//! Gallery view state and its transitions.
//!
//! [`GalleryState`] is the single source of truth for what the gallery shows.
//! It only changes through the four operations below, each of which keeps
//! `offset <= total_count` and a roster holding exactly one id per item.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::models::{AttachmentId, DisplayAttachment};

/// Items visible before the "more" affordance appears on first load.
pub const DEFAULT_MORE_THRESHOLD: usize = 3;

/// Label used in the gallery title, e.g. `Files (3+)`.
pub const DEFAULT_TITLE_LABEL: &str = "Files";

/// Ordered ids of the visible attachments, used for preview navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster(Vec<AttachmentId>);

impl Roster {
    pub fn ids(&self) -> &[AttachmentId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &AttachmentId) -> bool {
        self.0.contains(id)
    }

    pub fn position(&self, id: &AttachmentId) -> Option<usize> {
        self.0.iter().position(|candidate| candidate == id)
    }

    /// Comma-joined form handed to the preview navigator.
    pub fn to_delimited(&self) -> String {
        self.to_string()
    }

    /// Parse a comma-joined roster, ignoring blank segments.
    pub fn parse(value: &str) -> Result<Self> {
        value
            .split(',')
            .filter(|segment| !segment.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, id) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(id.as_str())?;
        }
        Ok(())
    }
}

/// The attachment list plus its pagination counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    items: Vec<DisplayAttachment>,
    offset: usize,
    total_count: usize,
    more_available: bool,
    roster: Roster,
    busy: bool,
    page_size: Option<usize>,
    more_threshold: usize,
    title_label: String,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new(DEFAULT_MORE_THRESHOLD, DEFAULT_TITLE_LABEL)
    }
}

impl GalleryState {
    /// Empty state as created on mount.
    ///
    /// The gallery starts busy: nothing is interactive until the first load
    /// resolves.
    pub fn new(more_threshold: usize, title_label: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            total_count: 0,
            more_available: false,
            roster: Roster::default(),
            busy: true,
            page_size: None,
            more_threshold,
            title_label: title_label.into(),
        }
    }

    pub fn items(&self) -> &[DisplayAttachment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records consumed from the paged window.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    pub const fn more_available(&self) -> bool {
        self.more_available
    }

    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Title with count, e.g. `Files (2)` or `Files (3+)`.
    pub fn title(&self) -> String {
        let count = match self.page_size {
            Some(page_size) if self.total_count > page_size => format!("{page_size}+"),
            _ => self.items.len().to_string(),
        };
        format!("{} ({count})", self.title_label)
    }

    /// Discard the list and start over from a fresh first page.
    pub fn replace_all(
        &mut self,
        records: Vec<DisplayAttachment>,
        total_count: usize,
        page_size: Option<usize>,
    ) {
        self.items.clear();
        self.roster = Roster::default();
        for record in records {
            self.push_unique(record);
        }

        self.total_count = total_count;
        self.page_size = page_size;
        self.offset = page_size.unwrap_or(self.items.len()).min(total_count);
        self.more_available = total_count > self.more_threshold;
        self.busy = false;

        tracing::debug!(
            items = self.items.len(),
            offset = self.offset,
            total = self.total_count,
            "Replaced gallery list"
        );
    }

    /// Add the next page at the tail.
    ///
    /// The offset is a position in the service's window: it advances by every
    /// received record, including ones already shown.
    pub fn append(&mut self, records: Vec<DisplayAttachment>) {
        let received = records.len();
        let mut accepted = 0usize;
        for record in records {
            if self.push_unique(record) {
                accepted += 1;
            }
        }

        let next_offset = self.offset + received;
        if next_offset > self.total_count {
            tracing::warn!(
                offset = next_offset,
                total = self.total_count,
                "Paged fetch overran the reported total, clamping offset"
            );
        }
        self.offset = next_offset.min(self.total_count);
        self.recompute_counters();

        tracing::debug!(
            received,
            accepted,
            offset = self.offset,
            total = self.total_count,
            "Appended gallery page"
        );
    }

    /// Insert freshly uploaded records at the head, one at a time, so the
    /// last received record ends up first.
    ///
    /// Uploads sit outside the paged window, so the offset is unchanged.
    pub fn prepend(&mut self, records: Vec<DisplayAttachment>) {
        let mut head: Vec<DisplayAttachment> = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id();
            if self.roster.contains(id) || head.iter().any(|item| item.id() == id) {
                tracing::warn!(id = %id, "Skipping duplicate attachment");
                continue;
            }
            head.push(record);
        }
        head.reverse();

        let accepted = head.len();
        let mut roster: Vec<AttachmentId> = head.iter().map(|item| item.id().clone()).collect();
        roster.append(&mut self.roster.0);
        self.roster = Roster(roster);

        head.append(&mut self.items);
        self.items = head;

        self.total_count += accepted;
        self.recompute_counters();

        tracing::debug!(
            accepted,
            offset = self.offset,
            total = self.total_count,
            "Prepended uploaded attachments"
        );
    }

    /// Re-derive `more_available` from the pagination counters.
    pub fn recompute_counters(&mut self) {
        self.more_available = self.offset < self.total_count;
    }

    fn push_unique(&mut self, record: DisplayAttachment) -> bool {
        if self.roster.contains(record.id()) {
            tracing::warn!(id = %record.id(), "Skipping duplicate attachment");
            return false;
        }
        self.roster.0.push(record.id().clone());
        self.items.push(record);
        true
    }
}
