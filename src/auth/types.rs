// Authentication types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials posted to the auth endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Response body of the auth endpoint.
///
/// The API has shipped two shapes over time: `{token, expires_at}` and
/// `{id, expires}`. Both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "id")]
    pub token: String,
    #[serde(alias = "expires")]
    pub expires_at: DateTime<Utc>,
}

/// Token state held by the manager.
///
/// Token and expiry always travel together: a session either holds both
/// or neither.
#[derive(Debug, Clone)]
pub enum TokenState {
    Unauthenticated,
    Valid {
        token: String,
        expires_at: DateTime<Utc>,
    },
}

impl TokenState {
    /// A token is valid strictly before its expiry instant; at the
    /// instant itself it already counts as expired.
    pub fn valid_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        match self {
            TokenState::Valid { token, expires_at } if now < *expires_at => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_unauthenticated_has_no_token() {
        assert!(TokenState::Unauthenticated.valid_token_at(Utc::now()).is_none());
    }

    #[test]
    fn test_token_valid_before_expiry() {
        let now = Utc::now();
        let state = TokenState::Valid {
            token: "tok".to_string(),
            expires_at: now + Duration::seconds(60),
        };
        assert_eq!(state.valid_token_at(now), Some("tok"));
    }

    #[test]
    fn test_token_expired_at_exact_expiry_instant() {
        let now = Utc::now();
        let state = TokenState::Valid {
            token: "tok".to_string(),
            expires_at: now,
        };
        assert!(state.valid_token_at(now).is_none());
    }

    #[test]
    fn test_token_expired_after_expiry() {
        let now = Utc::now();
        let state = TokenState::Valid {
            token: "tok".to_string(),
            expires_at: now - Duration::seconds(1),
        };
        assert!(state.valid_token_at(now).is_none());
    }

    #[test]
    fn test_auth_response_accepts_both_field_spellings() {
        let current: AuthResponse =
            serde_json::from_str(r#"{"token": "t1", "expires_at": "2999-01-01T00:00:00Z"}"#)
                .unwrap();
        let legacy: AuthResponse =
            serde_json::from_str(r#"{"id": "t1", "expires": "2999-01-01T00:00:00Z"}"#).unwrap();

        assert_eq!(current.token, legacy.token);
        assert_eq!(current.expires_at, legacy.expires_at);
    }
}
