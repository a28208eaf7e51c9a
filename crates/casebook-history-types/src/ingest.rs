//! Turning API payloads into typed history records.
//!
//! A payload is accepted only as a whole: if the document is not an array of
//! records, or any element cannot be read as the expected record kind, the
//! call fails and nothing is returned. Missing or wrongly typed *optional*
//! fields are not an error here; they read as absent and are handled where
//! the records are rendered.

use crate::{AuditLogEvent, CaseEvent, StatusChangeEvent};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Which history collection a payload was supposed to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Status change records.
    StatusHistory,
    /// Audit log records.
    AuditLog,
    /// A feed mixing both kinds.
    CaseEvents,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StatusHistory => "status history",
            Self::AuditLog => "audit log",
            Self::CaseEvents => "case events",
        })
    }
}

/// A history payload that does not have the expected shape.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{collection} is not valid JSON: {source}")]
    Json {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("{collection} must be a JSON array, found {found}")]
    NotAnArray {
        collection: Collection,
        found: &'static str,
    },

    #[error("{collection}[{index}] is not a valid record: {reason}")]
    InvalidRecord {
        collection: Collection,
        index: usize,
        reason: String,
    },
}

impl IngestError {
    /// The collection the failing payload was meant to be.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Json { collection, .. }
            | Self::NotAnArray { collection, .. }
            | Self::InvalidRecord { collection, .. } => *collection,
        }
    }
}

/// Parse a status history document.
pub fn status_history_from_json(json: &str) -> Result<Vec<StatusChangeEvent>, IngestError> {
    status_history_from_value(parse(json, Collection::StatusHistory)?)
}

/// Read status history records from an already-parsed document.
pub fn status_history_from_value(value: Value) -> Result<Vec<StatusChangeEvent>, IngestError> {
    records_from_value(value, Collection::StatusHistory)
}

/// Parse an audit log document.
pub fn audit_log_from_json(json: &str) -> Result<Vec<AuditLogEvent>, IngestError> {
    audit_log_from_value(parse(json, Collection::AuditLog)?)
}

/// Read audit log records from an already-parsed document.
pub fn audit_log_from_value(value: Value) -> Result<Vec<AuditLogEvent>, IngestError> {
    records_from_value(value, Collection::AuditLog)
}

/// Parse a feed that mixes both record kinds.
pub fn case_events_from_json(json: &str) -> Result<Vec<CaseEvent>, IngestError> {
    case_events_from_value(parse(json, Collection::CaseEvents)?)
}

/// Read a mixed feed, deciding each element's kind from its fields.
///
/// Records carrying `previousStatus` or `newStatus` are status changes;
/// records carrying `action` are audit entries.
pub fn case_events_from_value(value: Value) -> Result<Vec<CaseEvent>, IngestError> {
    let collection = Collection::CaseEvents;
    let items = into_array(value, collection)?;
    let mut events = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let object = item.as_object().ok_or_else(|| IngestError::InvalidRecord {
            collection,
            index,
            reason: format!("expected an object, found {}", json_kind(&item)),
        })?;

        let event = if object.contains_key("previousStatus") || object.contains_key("newStatus") {
            CaseEvent::Status(record(item, collection, index)?)
        } else if object.contains_key("action") {
            CaseEvent::Audit(record(item, collection, index)?)
        } else {
            return Err(IngestError::InvalidRecord {
                collection,
                index,
                reason: "neither a status change nor an audit log record".to_string(),
            });
        };
        events.push(event);
    }

    debug!(%collection, count = events.len(), "ingested records");
    Ok(events)
}

fn parse(json: &str, collection: Collection) -> Result<Value, IngestError> {
    serde_json::from_str(json).map_err(|source| IngestError::Json { collection, source })
}

fn records_from_value<T: DeserializeOwned>(
    value: Value,
    collection: Collection,
) -> Result<Vec<T>, IngestError> {
    let items = into_array(value, collection)?;
    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(IngestError::InvalidRecord {
                    collection,
                    index,
                    reason: format!("expected an object, found {}", json_kind(&item)),
                });
            }
            record(item, collection, index)
        })
        .collect::<Result<Vec<T>, _>>()?;

    debug!(%collection, count = records.len(), "ingested records");
    Ok(records)
}

fn into_array(value: Value, collection: Collection) -> Result<Vec<Value>, IngestError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(IngestError::NotAnArray {
            collection,
            found: json_kind(&other),
        }),
    }
}

fn record<T: DeserializeOwned>(
    item: Value,
    collection: Collection,
    index: usize,
) -> Result<T, IngestError> {
    serde_json::from_value(item).map_err(|e| IngestError::InvalidRecord {
        collection,
        index,
        reason: e.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AuditAction;
    use serde_json::json;

    #[test]
    fn test_status_history_parses() {
        let events = status_history_from_json(
            r#"[
                {"id":"s1","timestamp":"2024-03-01T10:00:00Z","previousStatus":"active","newStatus":"arrested"},
                {"id":"s2","timestamp":"2024-03-02T10:00:00Z","previousStatus":"arrested","newStatus":"closed","notes":"Convicted"}
            ]"#,
        )
        .unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].notes.as_deref(), Some("Convicted"));
    }

    #[test]
    fn test_empty_array_is_fine() {
        assert!(audit_log_from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_object_instead_of_array_rejected() {
        let err = status_history_from_value(json!({"items": []})).unwrap_err();
        assert!(matches!(
            err,
            IngestError::NotAnArray { collection: Collection::StatusHistory, found: "an object" }
        ));
        assert_eq!(err.to_string(), "status history must be a JSON array, found an object");
    }

    #[test]
    fn test_null_document_rejected() {
        let err = audit_log_from_value(Value::Null).unwrap_err();
        assert!(matches!(err, IngestError::NotAnArray { found: "null", .. }));
    }

    #[test]
    fn test_non_object_element_rejected_with_index() {
        let err = audit_log_from_value(json!([
            {"id":"a1","timestamp":"2024-03-01T10:00:00Z","action":"view"},
            "oops"
        ]))
        .unwrap_err();
        match err {
            IngestError::InvalidRecord { index, reason, .. } => {
                assert_eq!(index, 1);
                assert!(reason.contains("a string"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_timestamp_rejected() {
        let err = status_history_from_value(json!([
            {"id":"s1","previousStatus":"active","newStatus":"arrested"}
        ]))
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { index: 0, .. }));
    }

    #[test]
    fn test_bad_optional_fields_keep_every_record() {
        let audit = audit_log_from_value(json!([
            {"id":"a1","timestamp":"2024-03-01T10:00:00Z","action":"view"},
            {"id":"a2","timestamp":"2024-03-01T11:00:00Z","action":"update","field":5,"previousValue":"A","newValue":"B"},
            {"id":"a3","timestamp":"2024-03-01T12:00:00Z","action":"view","performedByName":{"first":"Asha"}}
        ]))
        .unwrap();
        assert_eq!(audit.len(), 3);
        assert!(audit[1].field.is_none());
        assert!(audit[2].performed_by_name.is_none());

        let status = status_history_from_value(json!([
            {"id":"s1","timestamp":"2024-03-01T10:00:00Z","previousStatus":"active","newStatus":"arrested","notes":42}
        ]))
        .unwrap();
        assert_eq!(status.len(), 1);
        assert!(status[0].notes.is_none());
    }

    #[test]
    fn test_invalid_json_reported() {
        let err = audit_log_from_json("[{").unwrap_err();
        assert!(matches!(err, IngestError::Json { .. }));
        assert_eq!(err.collection(), Collection::AuditLog);
    }

    #[test]
    fn test_unknown_action_ingests() {
        let events = audit_log_from_value(json!([
            {"id":"a1","timestamp":"2024-03-01T10:00:00Z","action":"archive"}
        ]))
        .unwrap();
        assert_eq!(events[0].action, AuditAction::Other("archive".into()));
    }

    #[test]
    fn test_mixed_feed_is_classified_once() {
        let events = case_events_from_value(json!([
            {"id":"s1","timestamp":"2024-03-01T10:00:00Z","previousStatus":"active","newStatus":"arrested"},
            {"id":"a1","timestamp":"2024-03-01T09:00:00Z","action":"update","field":"district","previousValue":"A","newValue":"B"}
        ]))
        .unwrap();
        assert!(matches!(events[0], CaseEvent::Status(_)));
        assert!(matches!(events[1], CaseEvent::Audit(_)));
    }

    #[test]
    fn test_mixed_feed_rejects_unclassifiable_record() {
        let err = case_events_from_value(json!([
            {"id":"x1","timestamp":"2024-03-01T10:00:00Z"}
        ]))
        .unwrap_err();
        assert!(matches!(err, IngestError::InvalidRecord { index: 0, .. }));
    }
}
