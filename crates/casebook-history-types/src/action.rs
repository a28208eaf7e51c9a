//! Audit log actions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User action recorded in a case's audit log.
///
/// The API may add actions over time; anything unrecognised is kept as
/// [`AuditAction::Other`] instead of failing ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuditAction {
    /// The case record was created.
    Create,
    /// A field of the case record was edited.
    Update,
    /// Someone opened the case details.
    View,
    /// Any other action string.
    Other(String),
}

impl AuditAction {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::View => "view",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AuditAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "create" => Self::Create,
            "update" => Self::Update,
            "view" => Self::View,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for AuditAction {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<AuditAction> for String {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_actions() {
        assert_eq!(AuditAction::from("create"), AuditAction::Create);
        assert_eq!(AuditAction::from("update"), AuditAction::Update);
        assert_eq!(AuditAction::from("view"), AuditAction::View);
    }

    #[test]
    fn test_unknown_action_is_kept() {
        let action = AuditAction::from("archive");
        assert_eq!(action, AuditAction::Other("archive".into()));
        assert_eq!(String::from(action), "archive");
    }

    #[test]
    fn test_action_converts_from_str() {
        let action: AuditAction = "view".into();
        assert_eq!(action, AuditAction::View);
        assert_eq!(AuditAction::View.to_string(), "view");
    }

    #[test]
    fn test_action_matching_is_case_sensitive() {
        assert_eq!(AuditAction::from("Update"), AuditAction::Other("Update".into()));
    }

    #[test]
    fn test_action_serde() {
        let json = serde_json::to_string(&AuditAction::Update).unwrap();
        assert_eq!(json, "\"update\"");
        let parsed: AuditAction = serde_json::from_str("\"export\"").unwrap();
        assert_eq!(parsed, AuditAction::Other("export".into()));
    }
}
