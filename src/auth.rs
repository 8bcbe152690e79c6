//! The seam between the application and an external identity provider.
//!
//! The application never issues tokens itself. Callers present an opaque
//! bearer token, an [IdentityVerifier] implementation checks it against the
//! provider, and everything downstream only sees the resulting [Identity].

use std::collections::HashMap;

use crate::Error;

/// A verified identity, as reported by the identity provider.
#[derive(Clone, Debug, PartialEq)]
pub struct Identity {
    /// The provider's stable ID for the subject of the token.
    pub subject_id: String,
    /// The remaining claims from the verified token.
    pub claims: HashMap<String, serde_json::Value>,
}

/// Verifies opaque bearer tokens against an identity provider.
pub trait IdentityVerifier {
    /// Verify `token` and return the identity it belongs to.
    ///
    /// # Errors
    /// This function will return an [Error::Unauthenticated] if the token is
    /// invalid, expired or could not be checked.
    fn verify(&self, token: &str) -> Result<Identity, Error>;
}

/// Extract the token from an `Authorization` header value.
///
/// # Errors
/// This function will return an [Error::Unauthenticated] if the header value
/// does not follow the `Bearer <token>` scheme or the token is empty.
pub fn bearer_token(header_value: &str) -> Result<&str, Error> {
    match header_value.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token),
        Some(_) | None => Err(Error::Unauthenticated),
    }
}

#[cfg(test)]
mod auth_tests {
    use crate::Error;

    use super::bearer_token;

    #[test]
    fn bearer_token_strips_scheme() {
        assert_eq!(bearer_token("Bearer abc123"), Ok("abc123"));
    }

    #[test]
    fn bearer_token_rejects_missing_scheme() {
        assert_eq!(bearer_token("abc123"), Err(Error::Unauthenticated));
    }

    #[test]
    fn bearer_token_rejects_empty_token() {
        assert_eq!(bearer_token("Bearer "), Err(Error::Unauthenticated));
    }
}
