//! Configuration management for classwatch.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::store::DEFAULT_MAX_PER_CLASS;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "classwatch";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CLASSWATCH_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CLASSWATCH_`, sections split on `__`)
/// 2. TOML config file at `~/.config/classwatch/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Login and session configuration.
    pub auth: AuthConfig,
    /// Incident store configuration.
    pub store: StoreConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

/// What a read endpoint answers when the session cookie is missing or wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnauthorizedReads {
    /// Answer `200` with an empty JSON array, indistinguishable from "no data".
    #[default]
    #[serde(alias = "empty")]
    EmptyResult,
    /// Answer `403 Forbidden`.
    Forbidden,
}

/// Login and session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The single accepted username.
    pub username: String,
    /// The single accepted password.
    pub password: String,
    /// Token issued as the session cookie value on successful login.
    pub token: String,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Policy for unauthorized calls to the query API.
    pub unauthorized_reads: UnauthorizedReads,
}

/// Incident store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum incidents kept per class; the oldest are evicted first.
    pub max_per_class: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "123456".to_string(),
            token: "logged_in_secret_key".to_string(),
            cookie_name: "access_token".to_string(),
            unauthorized_reads: UnauthorizedReads::default(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_per_class: DEFAULT_MAX_PER_CLASS,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.store.max_per_class == 0 {
            return Err(Error::config_validation(
                "store.max_per_class must be greater than 0",
            ));
        }

        if self.auth.username.is_empty() {
            return Err(Error::config_validation("auth.username must not be empty"));
        }

        if self.auth.token.is_empty() {
            return Err(Error::config_validation("auth.token must not be empty"));
        }
        if let Some(c) = self.auth.token.chars().find(|c| !is_cookie_value_char(*c)) {
            return Err(Error::config_validation(format!(
                "auth.token contains a character not allowed in a cookie: {c:?}"
            )));
        }

        if self.auth.cookie_name.is_empty() {
            return Err(Error::config_validation(
                "auth.cookie_name must not be empty",
            ));
        }
        if let Some(c) = self
            .auth
            .cookie_name
            .chars()
            .find(|c| !is_cookie_value_char(*c) || *c == '=')
        {
            return Err(Error::config_validation(format!(
                "auth.cookie_name contains a character not allowed in a cookie name: {c:?}"
            )));
        }

        self.socket_addr()?;
        Ok(())
    }

    /// Resolve `server.host` and `server.port` into a socket address.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            Error::config_validation(format!(
                "server.host is not a valid IP address: {}",
                self.server.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Render the configuration as pretty JSON with the password masked.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_masked_json(&self) -> Result<String> {
        let mut shown = self.clone();
        shown.auth.password = mask(&shown.auth.password);
        Ok(serde_json::to_string_pretty(&shown)?)
    }
}

/// Replace a secret with asterisks of the same length.
#[must_use]
pub fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn is_cookie_value_char(c: char) -> bool {
    c.is_ascii_graphic() && !matches!(c, ';' | ',' | '"' | '\\')
}
