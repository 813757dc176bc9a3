//! Access tokens and the credential forms a caller can hand to a controller.

use std::fmt;
use std::sync::Arc;

/// Bearer token sent in the `Authorization` header.
///
/// The token text never appears in `Debug` output so requests can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    ///
    /// Tokens handed out by auth clients usually already carry the `Bearer `
    /// scheme; bare tokens get it prepended.
    pub fn authorization(&self) -> String {
        let token = self.0.trim();
        if token
            .get(..7)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("bearer "))
        {
            token.to_string()
        } else {
            format!("Bearer {}", token)
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

type TokenProvider = dyn Fn() -> Option<AccessToken> + Send + Sync;

/// Credential input of a collection controller.
///
/// A `Provider` is asked for a token right before each request fires, so a
/// signed-out session shows up as a missing credential instead of a 401.
#[derive(Clone)]
pub enum Credential {
    Token(AccessToken),
    Provider(Arc<TokenProvider>),
}

impl Credential {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(AccessToken::new(token))
    }

    pub fn provider<F>(provider: F) -> Self
    where
        F: Fn() -> Option<AccessToken> + Send + Sync + 'static,
    {
        Self::Provider(Arc::new(provider))
    }

    /// Resolve to a usable token. Blank tokens count as absent.
    pub fn resolve(&self) -> Option<AccessToken> {
        let token = match self {
            Credential::Token(token) => Some(token.clone()),
            Credential::Provider(provider) => provider(),
        };
        token.filter(|t| !t.as_str().trim().is_empty())
    }
}

impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Credential::Token(a), Credential::Token(b)) => a == b,
            (Credential::Provider(a), Credential::Provider(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Token(token) => f.debug_tuple("Token").field(token).finish(),
            Credential::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_adds_bearer_scheme() {
        let token = AccessToken::new("abc123");
        assert_eq!(token.authorization(), "Bearer abc123");
    }

    #[test]
    fn test_authorization_keeps_existing_scheme() {
        let token = AccessToken::new("bearer abc123");
        assert_eq!(token.authorization(), "bearer abc123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let credential = Credential::token("secret-value");
        let output = format!("{:?}", credential);
        assert!(!output.contains("secret-value"));
    }

    #[test]
    fn test_blank_token_resolves_to_none() {
        assert!(Credential::token("  ").resolve().is_none());
        assert!(Credential::provider(|| None).resolve().is_none());
    }

    #[test]
    fn test_provider_equality_is_by_identity() {
        let provider = Credential::provider(|| Some(AccessToken::new("t")));
        assert_eq!(provider, provider.clone());
        assert_ne!(provider, Credential::provider(|| Some(AccessToken::new("t"))));
        assert_eq!(Credential::token("a"), Credential::token("a"));
    }
}
