//! Participant identity resolution.
//!
//! A participant is either an anonymous browser session or a logged-in
//! user acting within one. The session token is client-generated, scoped
//! to one browser tab, and is ALWAYS the storage uniqueness key: a
//! logged-in user gets attribution, not a different key. Changing the key
//! to the account would change observable behavior (one vote per account
//! across devices), so the narrower session scope is kept deliberately.

use lawhear_common::id::MIN_SESSION_TOKEN_LEN;
use lawhear_common::{AppError, AppResult};

/// The identity a response row is recorded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantIdentity {
    /// Anonymous browser session.
    Anonymous {
        /// Client-generated session token.
        session_token: String,
    },
    /// Logged-in user acting within a browser session.
    Authenticated {
        /// Client-generated session token. Still the uniqueness key.
        session_token: String,
        /// User id attached for attribution.
        user_id: String,
    },
}

impl ParticipantIdentity {
    /// Resolve an identity from request context.
    ///
    /// Fails with [`AppError::InvalidSession`] when the session token is
    /// missing or shorter than the minimum. This is a precondition check;
    /// callers must reject the action before touching storage.
    pub fn resolve(session_token: &str, user_id: Option<&str>) -> AppResult<Self> {
        let token = session_token.trim();
        if token.len() < MIN_SESSION_TOKEN_LEN {
            return Err(AppError::InvalidSession);
        }

        Ok(match user_id {
            Some(uid) => Self::Authenticated {
                session_token: token.to_string(),
                user_id: uid.to_string(),
            },
            None => Self::Anonymous {
                session_token: token.to_string(),
            },
        })
    }

    /// The storage uniqueness key.
    #[must_use]
    pub fn session_token(&self) -> &str {
        match self {
            Self::Anonymous { session_token } | Self::Authenticated { session_token, .. } => {
                session_token
            }
        }
    }

    /// Attribution user id, if the participant was logged in.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Anonymous { .. } => None,
            Self::Authenticated { user_id, .. } => Some(user_id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_anonymous() {
        let identity = ParticipantIdentity::resolve("abc1234567", None).unwrap();
        assert_eq!(identity.session_token(), "abc1234567");
        assert_eq!(identity.user_id(), None);
    }

    #[test]
    fn test_resolve_authenticated_keeps_session_key() {
        let identity = ParticipantIdentity::resolve("abc1234567", Some("u1")).unwrap();
        assert_eq!(identity.session_token(), "abc1234567");
        assert_eq!(identity.user_id(), Some("u1"));
    }

    #[test]
    fn test_resolve_rejects_short_token() {
        let result = ParticipantIdentity::resolve("short", None);
        assert!(matches!(result, Err(AppError::InvalidSession)));
    }

    #[test]
    fn test_resolve_rejects_empty_token() {
        let result = ParticipantIdentity::resolve("", Some("u1"));
        assert!(matches!(result, Err(AppError::InvalidSession)));
    }

    #[test]
    fn test_resolve_rejects_whitespace_padding() {
        // Nine characters plus a space must not sneak past the minimum
        let result = ParticipantIdentity::resolve("abc123456 ", None);
        assert!(matches!(result, Err(AppError::InvalidSession)));
    }

    #[test]
    fn test_resolve_accepts_uuid_length_token() {
        let result = ParticipantIdentity::resolve("550e8400-e29b-41d4-a716-446655440000", None);
        assert!(result.is_ok());
    }
}
