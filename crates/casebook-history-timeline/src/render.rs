//! Message rendering for timeline entries.

use crate::{EntryCategory, TimelineEntry};
use casebook_history_types::{AuditAction, AuditLogEvent, StatusChangeEvent};
use tracing::warn;

pub(crate) const VIEWED: &str = "Viewed case details";
pub(crate) const CREATED: &str = "Created case record";
pub(crate) const UNKNOWN_EVENT: &str = "Unknown event";
pub(crate) const UPDATE_FALLBACK: &str = "Updated case record";

/// Text used when rendering entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Actor name shown when a record does not carry one.
    pub unknown_actor: String,
    /// Prefix of the note line under a status change.
    pub note_prefix: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            unknown_actor: "Unknown".to_string(),
            note_prefix: "Note: ".to_string(),
        }
    }
}

impl RenderOptions {
    fn actor(&self, name: Option<&str>) -> String {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.unknown_actor.clone(),
        }
    }
}

pub(crate) fn status_entry(event: &StatusChangeEvent, options: &RenderOptions) -> TimelineEntry {
    let mut message = format!(
        "Status changed from {} to {}",
        event.previous_status, event.new_status
    );
    if let Some(notes) = event.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        message.push('\n');
        message.push_str(&options.note_prefix);
        message.push_str(notes);
    }

    TimelineEntry {
        id: event.id.clone(),
        timestamp: event.timestamp,
        category: EntryCategory::Status,
        actor_name: options.actor(event.changed_by_name.as_deref()),
        rendered_message: message,
    }
}

pub(crate) fn audit_entry(event: &AuditLogEvent, options: &RenderOptions) -> TimelineEntry {
    let (category, message) = match &event.action {
        AuditAction::Update => (EntryCategory::Update, update_message(event)),
        AuditAction::View => (EntryCategory::View, VIEWED.to_string()),
        AuditAction::Create => (EntryCategory::Create, CREATED.to_string()),
        AuditAction::Other(action) => {
            warn!(id = %event.id, %action, "unrecognised audit action");
            (EntryCategory::Unknown, UNKNOWN_EVENT.to_string())
        }
    };

    TimelineEntry {
        id: event.id.clone(),
        timestamp: event.timestamp,
        category,
        actor_name: options.actor(event.performed_by_name.as_deref()),
        rendered_message: message,
    }
}

fn update_message(event: &AuditLogEvent) -> String {
    match (&event.field, &event.previous_value, &event.new_value) {
        (Some(field), Some(previous), Some(new)) if !field.trim().is_empty() => {
            format!("Updated {} from \"{}\" to \"{}\"", field, previous, new)
        }
        _ => {
            warn!(id = %event.id, "update record is missing field details");
            UPDATE_FALLBACK.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_history_types::{EventId, Timestamp};

    fn ts() -> Timestamp {
        Timestamp::parse("2024-03-01T10:00:00Z").unwrap()
    }

    fn id(s: &str) -> EventId {
        EventId::parse(s).unwrap()
    }

    #[test]
    fn test_status_message_without_notes() {
        let event = StatusChangeEvent::new(id("s1"), ts(), "active", "arrested");
        let entry = status_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, "Status changed from active to arrested");
        assert_eq!(entry.category, EntryCategory::Status);
        assert_eq!(entry.actor_name, "Unknown");
    }

    #[test]
    fn test_status_message_with_notes() {
        let event = StatusChangeEvent::new(id("s1"), ts(), "active", "arrested")
            .with_notes("Picked up at checkpoint")
            .changed_by("Insp. Rao");
        let entry = status_entry(&event, &RenderOptions::default());
        assert_eq!(
            entry.rendered_message,
            "Status changed from active to arrested\nNote: Picked up at checkpoint"
        );
        assert_eq!(entry.actor_name, "Insp. Rao");
    }

    #[test]
    fn test_blank_notes_are_ignored() {
        let event = StatusChangeEvent::new(id("s1"), ts(), "active", "closed").with_notes("   ");
        let entry = status_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, "Status changed from active to closed");
    }

    #[test]
    fn test_same_status_transition_renders() {
        let event = StatusChangeEvent::new(id("s1"), ts(), "arrested", "arrested");
        let entry = status_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, "Status changed from arrested to arrested");
    }

    #[test]
    fn test_update_message() {
        let event = AuditLogEvent::new(id("a1"), ts(), "update").with_change("district", "A", "B");
        let entry = audit_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, r#"Updated district from "A" to "B""#);
        assert_eq!(entry.category, EntryCategory::Update);
    }

    #[test]
    fn test_update_without_details_falls_back() {
        let mut event = AuditLogEvent::new(id("a1"), ts(), "update").with_change("district", "A", "B");
        event.new_value = None;
        let entry = audit_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, UPDATE_FALLBACK);
        assert_eq!(entry.category, EntryCategory::Update);
    }

    #[test]
    fn test_blank_values_render_as_empty_quotes() {
        let event = AuditLogEvent::new(id("a1"), ts(), "update").with_change("alias", "", "Bablu");
        let entry = audit_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, r#"Updated alias from "" to "Bablu""#);

        let event = AuditLogEvent::new(id("a2"), ts(), "update").with_change("  ", "A", "B");
        let entry = audit_entry(&event, &RenderOptions::default());
        assert_eq!(entry.rendered_message, UPDATE_FALLBACK);
    }

    #[test]
    fn test_fixed_messages() {
        let options = RenderOptions::default();
        let view = audit_entry(&AuditLogEvent::new(id("a1"), ts(), "view"), &options);
        let create = audit_entry(&AuditLogEvent::new(id("a2"), ts(), "create"), &options);
        let other = audit_entry(&AuditLogEvent::new(id("a3"), ts(), "archive"), &options);
        assert_eq!(view.rendered_message, "Viewed case details");
        assert_eq!(create.rendered_message, "Created case record");
        assert_eq!(other.rendered_message, "Unknown event");
        assert_eq!(other.category, EntryCategory::Unknown);
    }

    #[test]
    fn test_custom_options() {
        let options = RenderOptions {
            unknown_actor: "System".into(),
            note_prefix: "Remark: ".into(),
        };
        let event = StatusChangeEvent::new(id("s1"), ts(), "active", "arrested")
            .with_notes("ok")
            .changed_by("  ");
        let entry = status_entry(&event, &options);
        assert_eq!(entry.actor_name, "System");
        assert!(entry.rendered_message.ends_with("\nRemark: ok"));
    }
}
