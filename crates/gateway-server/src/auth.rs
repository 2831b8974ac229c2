//! Token verification seam.
//!
//! The shipped verifier only checks scheme presence: the gateway's auth is a
//! placeholder by contract, and authorization semantics live downstream.
//! Modeling verification as a trait keeps a real scheme (signed tokens,
//! introspection) substitutable without touching dispatch logic.

/// The authenticated caller, as much of it as the verifier can establish.
#[derive(Debug, Clone, Default)]
pub struct Principal {
    /// Stable subject identifier, when the scheme provides one.
    pub subject: Option<String>,
}

/// Verification failure. Rendered as 401.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The token was rejected.
    #[error("{0}")]
    Rejected(String),
}

/// Verifies a bearer token and produces the calling principal.
pub trait TokenVerifier: Send + Sync {
    /// Verifies the token carried by the `Authorization` header.
    fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Accepts any non-empty token. Scheme-prefix presence is checked by the
/// extractor; nothing else is validated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemeOnlyVerifier;

impl TokenVerifier for SchemeOnlyVerifier {
    fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        if token.trim().is_empty() {
            return Err(AuthError::Rejected("Empty bearer token".to_string()));
        }
        Ok(Principal::default())
    }
}
