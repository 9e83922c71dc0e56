// --- File: crates/webinarsync_attendance/src/auth.rs ---

use constant_time_eq::constant_time_eq;
use tracing::warn;
use webinarsync_config::env_vars::SECRET_MARKER;

use crate::error::AttendanceError;

/// Checks the verification token Zoom sends with every notification.
#[derive(Clone)]
pub struct TokenVerifier {
    expected: Option<String>,
}

impl TokenVerifier {
    pub fn new(expected: Option<String>) -> Self {
        Self { expected }
    }

    pub fn verify(&self, received: &str) -> Result<(), AttendanceError> {
        verify_token(received, self.expected.as_deref())
    }
}

// Never print the token itself.
impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("configured", &self.expected.as_deref().is_some_and(|t| !t.is_empty()))
            .finish()
    }
}

/// Timing-safe comparison of `received` against `expected`.
///
/// An unset, empty or unresolved (`"secret_from_env"`) expected token
/// rejects everything.
pub fn verify_token(received: &str, expected: Option<&str>) -> Result<(), AttendanceError> {
    let Some(expected) = expected.filter(|t| !t.is_empty() && *t != SECRET_MARKER) else {
        warn!("Zoom verification token is not configured; rejecting request");
        return Err(AttendanceError::Unauthorized);
    };

    if constant_time_eq(received.as_bytes(), expected.as_bytes()) {
        Ok(())
    } else {
        warn!("Zoom webhook: invalid verification token");
        Err(AttendanceError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_token() {
        assert!(verify_token("abc", Some("abc")).is_ok());
        assert!(TokenVerifier::new(Some("abc".into())).verify("abc").is_ok());
    }

    #[test]
    fn test_mismatch() {
        assert!(matches!(
            verify_token("abc", Some("xyz")),
            Err(AttendanceError::Unauthorized)
        ));
        assert!(verify_token("ab", Some("abc")).is_err());
        assert!(verify_token("", Some("abc")).is_err());
    }

    #[test]
    fn test_fails_closed_without_expected_token() {
        assert!(verify_token("", None).is_err());
        assert!(verify_token("", Some("")).is_err());
        assert!(TokenVerifier::new(None).verify("anything").is_err());
    }

    #[test]
    fn test_unresolved_marker_is_not_a_token() {
        assert!(verify_token(SECRET_MARKER, Some(SECRET_MARKER)).is_err());
        assert!(TokenVerifier::new(Some(SECRET_MARKER.into()))
            .verify(SECRET_MARKER)
            .is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let verifier = TokenVerifier::new(Some("hunter2".into()));
        let printed = format!("{verifier:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("configured: true"));
    }
}
