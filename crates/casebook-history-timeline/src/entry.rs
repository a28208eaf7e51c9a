//! Renderable timeline entries.

use casebook_history_types::{EventId, Timestamp};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// What kind of thing a timeline entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryCategory {
    /// A status transition.
    Status,
    /// A field edit.
    Update,
    /// A case view.
    View,
    /// Creation of the case record.
    Create,
    /// An audit action this build does not recognise.
    Unknown,
}

/// Icon shown next to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Alert,
    Edit,
    Eye,
    Document,
}

/// Colour accent of an entry's icon badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Blue,
    Amber,
    Gray,
}

impl EntryCategory {
    /// All categories.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    /// Icon for this category.
    pub fn icon(&self) -> Icon {
        match self {
            Self::Status => Icon::Alert,
            Self::Update => Icon::Edit,
            Self::View => Icon::Eye,
            Self::Create | Self::Unknown => Icon::Document,
        }
    }

    /// Badge colour for this category.
    pub fn accent(&self) -> Accent {
        match self {
            Self::Status => Accent::Blue,
            Self::Update => Accent::Amber,
            Self::View | Self::Create | Self::Unknown => Accent::Gray,
        }
    }
}

/// One line of a case timeline, ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Identifier of the source record.
    pub id: EventId,
    /// When the source event happened.
    pub timestamp: Timestamp,
    /// Kind of event.
    pub category: EntryCategory,
    /// Who did it.
    pub actor_name: String,
    /// Human-readable description. May span several lines.
    pub rendered_message: String,
}

impl TimelineEntry {
    /// Icon for this entry.
    pub fn icon(&self) -> Icon {
        self.category.icon()
    }

    /// Badge colour for this entry.
    pub fn accent(&self) -> Accent {
        self.category.accent()
    }

    /// First line of the message.
    pub fn headline(&self) -> &str {
        self.rendered_message.lines().next().unwrap_or_default()
    }
}
