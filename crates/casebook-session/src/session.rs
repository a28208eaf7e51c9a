//! Sessions built from bearer tokens.

use crate::{Permission, Role};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors from reading a token or checking a permission.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token must have three dot-separated segments, found {0}")]
    Segments(usize),

    #[error("token payload is not base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token payload is not valid claims: {0}")]
    Claims(#[from] serde_json::Error),

    #[error("token expired at {0}")]
    Expired(DateTime<Utc>),

    #[error("role '{role}' is not allowed to {permission}")]
    Forbidden { role: Role, permission: Permission },
}

/// User details carried in a token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub police_station: Option<String>,
    /// Expiry, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Expiry as a timestamp, if the token has one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// A signed-in user and the token that proves it.
///
/// The token is only decoded, never verified. The case API checks the
/// signature on every request.
#[derive(Clone)]
pub struct Session {
    token: String,
    claims: Claims,
}

impl Session {
    /// Decode a token, rejecting it if it has expired.
    pub fn from_token(token: &str) -> Result<Self, SessionError> {
        Self::from_token_at(token, Utc::now())
    }

    /// Decode a token, judging expiry against `now`.
    pub fn from_token_at(token: &str, now: DateTime<Utc>) -> Result<Self, SessionError> {
        let token = token.trim();
        let token = token.strip_prefix("Bearer ").unwrap_or(token);

        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(SessionError::Segments(segments.len()));
        }

        let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
        let claims: Claims = serde_json::from_slice(&payload)?;

        if let Some(expires_at) = claims.expires_at() {
            if expires_at <= now {
                return Err(SessionError::Expired(expires_at));
            }
        }

        debug!(user = %claims.id, role = %claims.role, "session opened");
        Ok(Self {
            token: token.to_string(),
            claims,
        })
    }

    /// The decoded user details.
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }

    /// Raw token for the `Authorization` header.
    pub fn bearer_token(&self) -> &str {
        &self.token
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.claims.role.allows(permission)
    }

    pub fn can_change_status(&self) -> bool {
        self.can(Permission::ChangeStatus)
    }

    pub fn can_edit_case(&self) -> bool {
        self.can(Permission::EditCase)
    }

    pub fn can_view_history(&self) -> bool {
        self.can(Permission::ViewHistory)
    }

    pub fn can_manage_users(&self) -> bool {
        self.can(Permission::ManageUsers)
    }

    /// Fail with [`SessionError::Forbidden`] unless the role grants `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), SessionError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(SessionError::Forbidden {
                role: self.claims.role,
                permission,
            })
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("claims", &self.claims)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_for(payload: &serde_json::Value) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.c2ln",
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    fn investigator() -> serde_json::Value {
        serde_json::json!({
            "id": "u-7",
            "name": "Meera Joshi",
            "email": "meera@example.org",
            "role": "investigator",
            "district": "Pune",
            "policeStation": "Shivajinagar"
        })
    }

    #[test]
    fn test_decode_claims() {
        let session = Session::from_token(&token_for(&investigator())).unwrap();
        let claims = session.claims();
        assert_eq!(claims.id, "u-7");
        assert_eq!(claims.role, Role::Investigator);
        assert_eq!(claims.police_station.as_deref(), Some("Shivajinagar"));
        assert_eq!(claims.state, None);
        assert!(session.can_change_status());
        assert!(!session.can_manage_users());
    }

    #[test]
    fn test_bearer_prefix_and_padding_accepted() {
        let token = token_for(&investigator());
        let session = Session::from_token(&format!("Bearer {token}")).unwrap();
        assert_eq!(session.bearer_token(), token);

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        assert!(Session::from_token(&parts.join(".")).is_ok());
    }

    #[test]
    fn test_wrong_segment_count() {
        assert!(matches!(
            Session::from_token("only.two"),
            Err(SessionError::Segments(2))
        ));
    }

    #[test]
    fn test_bad_payload() {
        assert!(matches!(
            Session::from_token("a.!!!.c"),
            Err(SessionError::Encoding(_))
        ));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(matches!(
            Session::from_token(&not_json),
            Err(SessionError::Claims(_))
        ));
    }

    #[test]
    fn test_missing_claim() {
        let mut payload = investigator();
        payload.as_object_mut().unwrap().remove("email");
        assert!(matches!(
            Session::from_token(&token_for(&payload)),
            Err(SessionError::Claims(_))
        ));
    }

    #[test]
    fn test_expiry() {
        let mut payload = investigator();
        payload["exp"] = serde_json::json!(1_700_000_000);
        let token = token_for(&payload);

        let before = DateTime::from_timestamp(1_699_999_000, 0).unwrap();
        assert!(Session::from_token_at(&token, before).is_ok());

        let after = DateTime::from_timestamp(1_700_000_001, 0).unwrap();
        assert!(matches!(
            Session::from_token_at(&token, after),
            Err(SessionError::Expired(_))
        ));
    }

    #[test]
    fn test_require() {
        let mut payload = investigator();
        payload["role"] = serde_json::json!("viewer");
        let session = Session::from_token(&token_for(&payload)).unwrap();

        assert!(session.require(Permission::ViewHistory).is_ok());
        let err = session.require(Permission::EditCase).unwrap_err();
        assert_eq!(err.to_string(), "role 'viewer' is not allowed to edit_case");
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = token_for(&investigator());
        let session = Session::from_token(&token).unwrap();
        assert!(!format!("{session:?}").contains(&token));
    }
}
