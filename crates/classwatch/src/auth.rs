//! Dashboard login gate.
//!
//! Access to the dashboard and the query API is all-or-nothing: one
//! username/password pair unlocks everything, and the session is a single
//! fixed cookie value shared by every logged-in browser. There is no expiry
//! and no server-side revocation; logging out only deletes the client's
//! cookie.
//!
//! Callers only see the [`SessionGate`] trait, so the shared-secret scheme
//! can be replaced by real per-user sessions without touching the handlers.

use crate::config::AuthConfig;

/// Checks credentials and session tokens.
pub trait SessionGate: Send + Sync + std::fmt::Debug {
    /// Name of the cookie carrying the session token.
    fn cookie_name(&self) -> &str;

    /// Exchange credentials for a session token, or `None` if they are wrong.
    fn authenticate(&self, username: &str, password: &str) -> Option<String>;

    /// Whether a presented session token grants access.
    fn authorize(&self, token: Option<&str>) -> bool;
}

/// A gate backed by one configured credential pair and one static token.
#[derive(Debug, Clone)]
pub struct SharedSecretGate {
    username: String,
    password: String,
    token: String,
    cookie_name: String,
}

impl SharedSecretGate {
    /// Create a gate from explicit values.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
        cookie_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: token.into(),
            cookie_name: cookie_name.into(),
        }
    }

    /// Create a gate from the `[auth]` configuration section.
    #[must_use]
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.username.clone(),
            config.password.clone(),
            config.token.clone(),
            config.cookie_name.clone(),
        )
    }
}

impl SessionGate for SharedSecretGate {
    fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn authenticate(&self, username: &str, password: &str) -> Option<String> {
        (username == self.username && password == self.password).then(|| self.token.clone())
    }

    fn authorize(&self, token: Option<&str>) -> bool {
        token == Some(self.token.as_str())
    }
}
