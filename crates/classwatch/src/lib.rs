//! `classwatch` - A classroom incident logging dashboard
//!
//! This library provides the incident store, the log filter and risk
//! ranking, the login gate, and the HTTP server that ties them together.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod incident;
pub mod logging;
pub mod query;
pub mod server;
pub mod store;

pub use auth::{SessionGate, SharedSecretGate};
pub use config::Config;
pub use error::{Error, Result};
pub use incident::{Incident, ScanMode};
pub use logging::init_logging;
pub use store::{IncidentStore, StoreStats};
