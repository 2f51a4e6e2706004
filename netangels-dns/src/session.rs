//! Credentials and bearer token state.

use crate::utils::log_sanitizer::mask_secret;

/// Account name and API key. Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    account_name: String,
    api_key: String,
}

impl Credentials {
    pub fn new(account_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_name: account_name.into(),
            api_key: api_key.into(),
        }
    }

    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account_name", &self.account_name)
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

/// Bearer token returned by the gateway token endpoint.
///
/// The API does not report an expiry; a token is used until a request fails
/// and the caller authenticates again.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", mask_secret(&self.0))
    }
}

/// Credentials plus the token obtained for them.
///
/// Every client operation borrows the session: `authenticate` needs `&mut`
/// to store the token, all other calls take `&Session`. To share a session
/// across tasks that may re-authenticate, wrap it in a lock.
///
/// A session that was never authenticated still produces requests, with an
/// empty bearer token; the API rejects them.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: Credentials,
    token: Option<Token>,
}

impl Session {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: None,
        }
    }

    /// Resume a session with a token obtained earlier.
    pub fn with_token(credentials: Credentials, token: Token) -> Self {
        Self {
            credentials,
            token: Some(token),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn set_token(&mut self, token: Token) {
        self.token = Some(token);
    }

    /// Token to send as `Authorization: Bearer ...`; empty before authentication.
    pub(crate) fn bearer(&self) -> Token {
        self.token.clone().unwrap_or_default()
    }
}
