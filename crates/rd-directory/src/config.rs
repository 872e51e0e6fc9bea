//! Directory configuration records.
//!
//! The cookie settings here are pass-through configuration for an
//! external session-caching layer. The directory core exposes them
//! read-only and implements none of their semantics.

use serde::{Deserialize, Serialize};

/// Configuration for one role directory partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Whether role management is enabled. Every operation fails with
    /// a disabled error when this is false.
    pub enabled: bool,
    /// Application partition name to store and retrieve roles for.
    pub application: String,
    /// Role-cache cookie settings, consumed by an external cookie or
    /// session layer.
    pub cookie: RoleCookieConfig,
}

impl DirectoryConfig {
    /// Creates an enabled configuration for the given application
    /// partition, with default cookie settings.
    #[must_use]
    pub fn new(application: impl Into<String>) -> Self {
        Self {
            enabled: true,
            application: application.into(),
            cookie: RoleCookieConfig::default(),
        }
    }

    /// Disables role management.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Settings for the role-names cookie cache.
///
/// Defaults match the ASP.NET role manager this surface is drop-in
/// compatible with: cookie `.ASPXROLES` at path `/`, 30 minute sliding
/// expiration, session (non-persistent) cookie, at most 25 cached role
/// names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct RoleCookieConfig {
    /// Whether the current user's roles are cached in a cookie.
    pub cache_roles: bool,
    /// Name of the cookie where role names are cached.
    pub name: String,
    /// Path for the cached role names cookie.
    pub path: String,
    /// Domain of the role-names cookie, if restricted.
    pub domain: Option<String>,
    /// How cached role names are protected.
    pub protection: CookieProtection,
    /// Whether SSL is required to return the cookie to the server.
    pub require_ssl: bool,
    /// Whether the cookie expiration is reset periodically.
    pub sliding_expiration: bool,
    /// Number of minutes before the roles cookie expires.
    pub timeout_minutes: u32,
    /// Whether the cookie is persistent rather than session-based.
    pub persistent: bool,
    /// Maximum number of role names to cache for a user.
    pub max_cached_results: usize,
}

impl Default for RoleCookieConfig {
    fn default() -> Self {
        Self {
            cache_roles: true,
            name: ".ASPXROLES".to_string(),
            path: "/".to_string(),
            domain: None,
            protection: CookieProtection::All,
            require_ssl: false,
            sliding_expiration: true,
            timeout_minutes: 30,
            persistent: false,
            max_cached_results: 25,
        }
    }
}

/// How role names cached in a cookie are protected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieProtection {
    /// No protection.
    None,
    /// Tamper detection only.
    Validation,
    /// Encryption only.
    Encryption,
    /// Encryption and tamper detection.
    #[default]
    All,
}
