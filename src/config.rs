//! Configuration for the Tassi API client.
//!
//! This module provides the process-wide client settings: the API
//! credential, the sandbox/live environment selector, an optional
//! base-URL override, and the TLS-verification flag.
//!
//! Settings live in a [`TassiConfig`] value behind a [`SharedConfig`]
//! handle. The handle is cheap to clone and safe to read concurrently
//! with writes, so it can be shared between callers and the transport
//! without re-threading it through every call site. A process-lifetime
//! default instance is available via [`SharedConfig::global`]; tests and
//! multi-tenant callers can construct their own handle instead and pass
//! it to [`Requestor::with_config`](crate::Requestor::with_config).
//!
//! # Example
//!
//! ```rust
//! use tassi_api::{Environment, SharedConfig};
//!
//! let config = SharedConfig::global();
//! config.set_api_key("sk_test_123");
//! config.set_environment(Environment::Sandbox);
//!
//! assert_eq!(config.api_key().as_deref(), Some("sk_test_123"));
//! assert!(config.verify_tls());
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

/// The API environment selecting which base URL is used when no explicit
/// override is configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The sandbox environment. This is the default.
    #[default]
    Sandbox,
    /// The live (production) environment.
    Live,
}

impl Environment {
    /// Returns the lowercase wire name of the environment.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client settings read by every request.
///
/// All fields are optional except the environment and the
/// TLS-verification flag, which default to [`Environment::Sandbox`] and
/// `true`. The struct itself is plain data; shared mutation goes through
/// [`SharedConfig`].
#[derive(Clone, Debug)]
pub struct TassiConfig {
    api_key: Option<String>,
    api_base: Option<String>,
    environment: Environment,
    verify_tls: bool,
}

impl Default for TassiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            environment: Environment::Sandbox,
            verify_tls: true,
        }
    }
}

impl TassiConfig {
    /// Creates a configuration with default settings: no credential, no
    /// base-URL override, sandbox environment, TLS verification enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Sets the API key used as the bearer credential on every request.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = Some(api_key.into());
    }

    /// Returns the base-URL override, if any.
    #[must_use]
    pub fn api_base(&self) -> Option<&str> {
        self.api_base.as_deref()
    }

    /// Sets an explicit base URL, taking precedence over the environment
    /// endpoint constants.
    pub fn set_api_base(&mut self, api_base: impl Into<String>) {
        self.api_base = Some(api_base.into());
    }

    /// Returns the active environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Sets the active environment.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Enables or disables TLS certificate verification.
    ///
    /// Disabling verification is a security-relevant escape hatch for
    /// development against self-signed endpoints; it defaults to enabled.
    pub fn set_verify_tls(&mut self, verify_tls: bool) {
        self.verify_tls = verify_tls;
    }
}

/// A cloneable, thread-safe handle to a [`TassiConfig`].
///
/// Reads are safe concurrently with writes from other threads or tasks.
/// Cloning the handle shares the underlying configuration rather than
/// copying it.
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<TassiConfig>>,
}

// Verify SharedConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SharedConfig>();
};

impl SharedConfig {
    /// Wraps a configuration in a shared handle.
    #[must_use]
    pub fn new(config: TassiConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Returns the process-lifetime default configuration.
    ///
    /// This is the instance a [`Requestor`](crate::Requestor) constructed
    /// with [`Requestor::new`](crate::Requestor::new) reads from.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<SharedConfig> = OnceLock::new();
        GLOBAL.get_or_init(Self::default)
    }

    // Config is plain data, so a writer that panicked mid-update cannot
    // have left it logically torn; recover the guard instead of
    // propagating the poison.
    fn read(&self) -> RwLockReadGuard<'_, TassiConfig> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TassiConfig> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the configured API key, if any.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.read().api_key().map(ToString::to_string)
    }

    /// Sets the API key used as the bearer credential on every request.
    pub fn set_api_key(&self, api_key: impl Into<String>) {
        self.write().set_api_key(api_key);
    }

    /// Returns the base-URL override, if any.
    #[must_use]
    pub fn api_base(&self) -> Option<String> {
        self.read().api_base().map(ToString::to_string)
    }

    /// Sets an explicit base URL, taking precedence over the environment
    /// endpoint constants.
    pub fn set_api_base(&self, api_base: impl Into<String>) {
        self.write().set_api_base(api_base);
    }

    /// Returns the active environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.read().environment()
    }

    /// Sets the active environment.
    pub fn set_environment(&self, environment: Environment) {
        self.write().set_environment(environment);
    }

    /// Returns whether TLS certificates are verified.
    #[must_use]
    pub fn verify_tls(&self) -> bool {
        self.read().verify_tls()
    }

    /// Enables or disables TLS certificate verification.
    pub fn set_verify_tls(&self, verify_tls: bool) {
        self.write().set_verify_tls(verify_tls);
    }

    /// Returns a point-in-time copy of the configuration.
    #[must_use]
    pub fn snapshot(&self) -> TassiConfig {
        self.read().clone()
    }
}
