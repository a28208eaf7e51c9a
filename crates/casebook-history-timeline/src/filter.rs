//! Timeline filters.

use crate::{EntryCategory, TimelineEntry};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

/// Which entries a user wants to see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TimelineFilter {
    /// Everything.
    #[default]
    All,
    /// Status transitions only.
    Status,
    /// Field edits only.
    Edit,
    /// Case views only.
    View,
}

/// An unrecognised filter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown timeline filter '{0}' (expected one of: all, status, edit, view)")]
pub struct FilterParseError(pub String);

impl TimelineFilter {
    /// All filters, in tab order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Whether an entry of this category passes the filter.
    ///
    /// `create` and `unknown` entries pass only [`TimelineFilter::All`].
    pub fn matches(&self, category: EntryCategory) -> bool {
        match self {
            Self::All => true,
            Self::Status => category == EntryCategory::Status,
            Self::Edit => category == EntryCategory::Update,
            Self::View => category == EntryCategory::View,
        }
    }

    /// Keep only matching entries, preserving order.
    pub fn apply(&self, entries: Vec<TimelineEntry>) -> Vec<TimelineEntry> {
        if *self == Self::All {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| self.matches(entry.category))
            .collect()
    }
}

impl FromStr for TimelineFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::iter()
            .find(|filter| filter.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FilterParseError(s.to_string()))
    }
}
