//! Timeline assembly.

use crate::render::{audit_entry, status_entry, RenderOptions};
use crate::{EntryCategory, TimelineEntry, TimelineFilter};
use casebook_history_types::{AuditLogEvent, CaseEvent, StatusChangeEvent};
use serde::Serialize;
use tracing::debug;

/// Merges status history and audit log records into one timeline.
#[derive(Debug, Clone, Default)]
pub struct TimelineBuilder {
    options: RenderOptions,
}

impl TimelineBuilder {
    /// Create a builder with the default rendering text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom rendering text.
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Rendering text in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a single record.
    pub fn entry_for(&self, event: &CaseEvent) -> TimelineEntry {
        match event {
            CaseEvent::Status(e) => status_entry(e, &self.options),
            CaseEvent::Audit(e) => audit_entry(e, &self.options),
        }
    }

    /// All records as entries, newest first, unfiltered.
    ///
    /// Entries with equal timestamps keep their input order, with status
    /// records ahead of audit records.
    pub fn merge(
        &self,
        status_events: &[StatusChangeEvent],
        audit_events: &[AuditLogEvent],
    ) -> Vec<TimelineEntry> {
        let entries = status_events
            .iter()
            .map(|e| status_entry(e, &self.options))
            .chain(audit_events.iter().map(|e| audit_entry(e, &self.options)))
            .collect();
        newest_first(entries)
    }

    /// Like [`merge`](Self::merge), for a feed that already mixes both kinds.
    /// Ties keep feed order.
    pub fn merge_events(&self, events: &[CaseEvent]) -> Vec<TimelineEntry> {
        newest_first(events.iter().map(|e| self.entry_for(e)).collect())
    }

    /// Merge, sort and filter.
    pub fn build(
        &self,
        status_events: &[StatusChangeEvent],
        audit_events: &[AuditLogEvent],
        filter: TimelineFilter,
    ) -> Timeline {
        debug!(
            status = status_events.len(),
            audit = audit_events.len(),
            "building case timeline"
        );
        finish(self.merge(status_events, audit_events), filter)
    }

    /// Like [`build`](Self::build), for a feed that already mixes both kinds.
    pub fn build_events(&self, events: &[CaseEvent], filter: TimelineFilter) -> Timeline {
        debug!(events = events.len(), "building case timeline");
        finish(self.merge_events(events), filter)
    }
}

fn finish(merged: Vec<TimelineEntry>, filter: TimelineFilter) -> Timeline {
    let total = merged.len();
    let entries = filter.apply(merged);
    debug!(%filter, kept = entries.len(), dropped = total - entries.len(), "filtered timeline");
    Timeline::from_entries(entries)
}

fn newest_first(mut entries: Vec<TimelineEntry>) -> Vec<TimelineEntry> {
    // sort_by is stable, which is what keeps ties in input order.
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    entries
}

/// The outcome of building a timeline.
///
/// `Empty` means the records were available and nothing matched. Whether the
/// records are still loading is for the caller to track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "entries", rename_all = "snake_case")]
pub enum Timeline {
    /// No entries to show.
    Empty,
    /// At least one entry, newest first.
    Entries(Vec<TimelineEntry>),
}

impl Timeline {
    /// Wrap entries, mapping an empty list to [`Timeline::Empty`].
    pub fn from_entries(entries: Vec<TimelineEntry>) -> Self {
        if entries.is_empty() {
            Self::Empty
        } else {
            Self::Entries(entries)
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[TimelineEntry] {
        match self {
            Self::Empty => &[],
            Self::Entries(entries) => entries,
        }
    }

    /// Take the entries out.
    pub fn into_entries(self) -> Vec<TimelineEntry> {
        match self {
            Self::Empty => Vec::new(),
            Self::Entries(entries) => entries,
        }
    }
}

/// Entry counts per category, e.g. for labelling filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimelineSummary {
    pub total: usize,
    pub status: usize,
    pub update: usize,
    pub view: usize,
    pub create: usize,
    pub unknown: usize,
}

impl TimelineSummary {
    /// Count the entries.
    pub fn from_entries(entries: &[TimelineEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut summary, entry| {
            summary.total += 1;
            match entry.category {
                EntryCategory::Status => summary.status += 1,
                EntryCategory::Update => summary.update += 1,
                EntryCategory::View => summary.view += 1,
                EntryCategory::Create => summary.create += 1,
                EntryCategory::Unknown => summary.unknown += 1,
            }
            summary
        })
    }

    /// How many entries a filter would keep.
    pub fn count_for(&self, filter: TimelineFilter) -> usize {
        match filter {
            TimelineFilter::All => self.total,
            TimelineFilter::Status => self.status,
            TimelineFilter::Edit => self.update,
            TimelineFilter::View => self.view,
        }
    }
}
