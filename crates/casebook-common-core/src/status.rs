//! Case lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a case.
///
/// The case API owns the full enumeration; values this build does not know
/// about are preserved verbatim in [`CaseStatus::Other`] so they can still be
/// displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaseStatus {
    /// Subject is at large.
    Active,
    /// Case is being actively worked.
    UnderInvestigation,
    /// Subject has been taken into custody.
    Arrested,
    /// Case is closed.
    Closed,
    /// A status not known to this build.
    Other(String),
}

impl CaseStatus {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::UnderInvestigation => "under_investigation",
            Self::Arrested => "arrested",
            Self::Closed => "closed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for CaseStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "under_investigation" => Self::UnderInvestigation,
            "arrested" => Self::Arrested,
            "closed" => Self::Closed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for CaseStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_parse() {
        assert_eq!(CaseStatus::from("active"), CaseStatus::Active);
        assert_eq!(CaseStatus::from("arrested"), CaseStatus::Arrested);
        assert_eq!(
            CaseStatus::from("under_investigation"),
            CaseStatus::UnderInvestigation
        );
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status = CaseStatus::from("transferred");
        assert_eq!(status, CaseStatus::Other("transferred".into()));
        assert_eq!(status.to_string(), "transferred");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&CaseStatus::UnderInvestigation).unwrap();
        assert_eq!(json, "\"under_investigation\"");

        let status: CaseStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(status, CaseStatus::Closed);
    }
}
