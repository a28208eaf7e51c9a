//! Strongly-typed identifiers.
//!
//! Record identifiers are issued by the case API and are opaque to us, so
//! they wrap a string rather than a UUID. The only rule enforced locally is
//! that an identifier is never blank.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed opaque ID wrapper.
macro_rules! define_id {
    ($name:ident, $what:literal) => {
        #[doc = concat!("Opaque identifier of ", $what, ".")]
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse from a string, rejecting blank values.
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(IdParseError::Blank);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdParseError;
            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(&s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Error parsing an ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// The ID is empty or whitespace.
    #[error("identifier must not be blank")]
    Blank,
}

define_id!(EventId, "a status change or audit log record");
define_id!(CaseId, "a case record");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = EventId::parse("  sc-101 ").unwrap();
        assert_eq!(id.as_str(), "sc-101");
        assert_eq!(id.to_string(), "sc-101");
    }

    #[test]
    fn test_blank_id_rejected() {
        assert_eq!(CaseId::parse(""), Err(IdParseError::Blank));
        assert_eq!(CaseId::parse("   "), Err(IdParseError::Blank));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = CaseId::parse("64f1c2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"64f1c2\"");
        let back: CaseId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_blank_id_fails_deserialization() {
        let result: Result<EventId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_names_the_kind() {
        let id = CaseId::parse("abc").unwrap();
        assert_eq!(format!("{:?}", id), "CaseId(abc)");
    }
}
