//! Embedded HTML pages.

/// Dashboard shown to logged-in users at `/`.
pub(super) const DASHBOARD: &str = include_str!("../../assets/dashboard.html");

/// Login form shown at `/login`.
pub(super) const LOGIN: &str = include_str!("../../assets/login.html");
