//! Session token.

use std::fmt;

use zeroize::Zeroize;

/// Opaque credential identifying the logged-in user to the backend.
///
/// The client never interprets the value; it only stores it and forwards it in
/// the `token` header.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a token string as given. A blank value yields `None`.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let mut value = value.into();

        if value.trim().is_empty() {
            value.zeroize();
            return None;
        }

        Some(Self(value))
    }

    /// Returns the raw token for the request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_rejected() {
        assert!(SessionToken::new("").is_none());
        assert!(SessionToken::new("   ").is_none());
    }

    #[test]
    fn token_is_kept_verbatim() {
        let token = SessionToken::new(" tok123 ");

        assert_eq!(token.as_ref().map(SessionToken::expose), Some(" tok123 "));
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = SessionToken::new("tok123");

        assert_eq!(
            format!("{token:?}"),
            "Some(SessionToken(**redacted**))",
            "debug output must not leak the token"
        );
    }
}
