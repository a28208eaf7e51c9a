//! Case history fixtures.
//!
//! All helpers panic on bad input; they are for tests only.

use casebook_history_types::{AuditLogEvent, EventId, StatusChangeEvent, Timestamp};
use serde_json::{json, Value};

/// Parse an RFC 3339 timestamp.
pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).expect("fixture timestamp")
}

/// Parse an event id.
pub fn event_id(s: &str) -> EventId {
    EventId::parse(s).expect("fixture id")
}

/// A status change without notes or actor.
pub fn status_change(id: &str, at: &str, previous: &str, new: &str) -> StatusChangeEvent {
    StatusChangeEvent::new(event_id(id), ts(at), previous, new)
}

/// An audit log record without field details or actor.
pub fn audit_event(id: &str, at: &str, action: &str) -> AuditLogEvent {
    AuditLogEvent::new(event_id(id), ts(at), action)
}

/// Status history as the case API returns it.
pub fn status_history_json() -> Value {
    json!([
        {
            "id": "sc-1",
            "timestamp": "2024-03-01T08:00:00Z",
            "previousStatus": "active",
            "newStatus": "under_investigation",
            "changedByName": "Insp. Rao"
        },
        {
            "id": "sc-2",
            "timestamp": "2024-03-04T17:45:00Z",
            "previousStatus": "under_investigation",
            "newStatus": "arrested",
            "notes": "Picked up at the district checkpoint",
            "changedByName": "SI Kulkarni"
        }
    ])
}

/// Audit log as the case API returns it.
pub fn audit_log_json() -> Value {
    json!([
        {
            "id": "al-1",
            "timestamp": "2024-02-28T11:00:00Z",
            "action": "create",
            "performedByName": "Records Clerk"
        },
        {
            "id": "al-2",
            "timestamp": "2024-03-02T09:30:00Z",
            "action": "update",
            "field": "district",
            "previousValue": "Pune",
            "newValue": "Satara",
            "performedByName": "Insp. Rao"
        },
        {
            "id": "al-3",
            "timestamp": "2024-03-05T10:15:00Z",
            "action": "view"
        },
        {
            "id": "al-4",
            "timestamp": "2024-03-06T12:00:00Z",
            "action": "archive",
            "performedByName": "Admin"
        }
    ])
}
