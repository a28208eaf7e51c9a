//! Case history records.

use crate::AuditAction;
use casebook_common_core::{CaseStatus, EventId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

/// A transition of a case from one status to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeEvent {
    /// Unique record identifier.
    pub id: EventId,
    /// When the transition happened.
    pub timestamp: Timestamp,
    /// Status before the change.
    pub previous_status: CaseStatus,
    /// Status after the change.
    pub new_status: CaseStatus,
    /// Free-text annotation entered with the change.
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Display name of the user who made the change.
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub changed_by_name: Option<String>,
}

impl StatusChangeEvent {
    /// Create a status change record.
    pub fn new(
        id: EventId,
        timestamp: Timestamp,
        previous_status: impl Into<CaseStatus>,
        new_status: impl Into<CaseStatus>,
    ) -> Self {
        Self {
            id,
            timestamp,
            previous_status: previous_status.into(),
            new_status: new_status.into(),
            notes: None,
            changed_by_name: None,
        }
    }

    /// Attach notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the acting user's display name.
    pub fn changed_by(mut self, name: impl Into<String>) -> Self {
        self.changed_by_name = Some(name.into());
        self
    }
}

/// A value recorded on either side of a field edit.
///
/// The API stores whatever the form submitted, so this is any JSON value.
/// Strings display as-is, everything else as compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(serde_json::Value);

impl FieldValue {
    /// Wrap a JSON value.
    pub fn new(value: impl Into<serde_json::Value>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw JSON value.
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self(serde_json::Value::String(s.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self(serde_json::Value::String(s))
    }
}

/// A user action recorded against a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEvent {
    /// Unique record identifier.
    pub id: EventId,
    /// When the action happened.
    pub timestamp: Timestamp,
    /// What was done.
    pub action: AuditAction,
    /// Edited field name (updates only).
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Value before the edit (updates only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_value: Option<FieldValue>,
    /// Value after the edit (updates only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<FieldValue>,
    /// Display name of the acting user.
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub performed_by_name: Option<String>,
}

impl AuditLogEvent {
    /// Create an audit log record.
    pub fn new(id: EventId, timestamp: Timestamp, action: impl Into<AuditAction>) -> Self {
        Self {
            id,
            timestamp,
            action: action.into(),
            field: None,
            previous_value: None,
            new_value: None,
            performed_by_name: None,
        }
    }

    /// Record a field edit.
    pub fn with_change(
        mut self,
        field: impl Into<String>,
        previous: impl Into<FieldValue>,
        new: impl Into<FieldValue>,
    ) -> Self {
        self.field = Some(field.into());
        self.previous_value = Some(previous.into());
        self.new_value = Some(new.into());
        self
    }

    /// Set the acting user's display name.
    pub fn performed_by(mut self, name: impl Into<String>) -> Self {
        self.performed_by_name = Some(name.into());
        self
    }
}

/// Optional text that tolerates a value of the wrong type.
///
/// Anything other than a string reads as absent, so the record still ingests
/// and renders with its fallback text.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Null => Ok(None),
        other => {
            warn!(found = %other, "ignoring non-text value in optional field");
            Ok(None)
        }
    }
}

/// Either kind of case history record.
///
/// The kind is fixed when the record is ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseEvent {
    /// A status transition.
    Status(StatusChangeEvent),
    /// An audit log entry.
    Audit(AuditLogEvent),
}

impl CaseEvent {
    /// Record identifier.
    pub fn id(&self) -> &EventId {
        match self {
            Self::Status(e) => &e.id,
            Self::Audit(e) => &e.id,
        }
    }

    /// When the event happened.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Status(e) => e.timestamp,
            Self::Audit(e) => e.timestamp,
        }
    }

    /// Display name of whoever caused the event, if recorded.
    pub fn actor_name(&self) -> Option<&str> {
        match self {
            Self::Status(e) => e.changed_by_name.as_deref(),
            Self::Audit(e) => e.performed_by_name.as_deref(),
        }
    }
}

impl From<StatusChangeEvent> for CaseEvent {
    fn from(event: StatusChangeEvent) -> Self {
        Self::Status(event)
    }
}

impl From<AuditLogEvent> for CaseEvent {
    fn from(event: AuditLogEvent) -> Self {
        Self::Audit(event)
    }
}
