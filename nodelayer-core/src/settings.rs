//! Deployment environment settings and collection-name derivation.
//!
//! Collection names carry an environment suffix so that tenants and
//! deployment environments stay isolated without caller involvement. The
//! suffix is injected explicitly rather than read from ambient global state;
//! [`StoreSettings::from_env`] exists for binaries that wire it from the
//! process environment at startup.

use crate::node::Node;

/// Name of the environment variable consulted by [`StoreSettings::from_env`].
pub const ENVIRONMENT_VAR_NAME: &str = "ENVIRONMENT";

/// Suffix fallback when the environment variable is unset.
pub const DEFAULT_ENVIRONMENT: &str = "testing";

/// Injected store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    environment: String,
}

impl StoreSettings {
    /// Creates settings with an explicit environment suffix.
    pub fn new(environment: impl Into<String>) -> Self {
        Self { environment: environment.into() }
    }

    /// Creates settings from the `ENVIRONMENT` process variable, falling back
    /// to [`DEFAULT_ENVIRONMENT`]. Intended for binary startup wiring only.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var(ENVIRONMENT_VAR_NAME)
                .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string()),
        )
    }

    /// The configured environment suffix.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Appends the tenant and environment suffix to a base collection name.
    pub fn suffix_collection(&self, base: &str) -> String {
        format!("{base}_bewell_{}", self.environment)
    }

    /// Derives the collection name for a node type: its lower-cased type name
    /// plus the environment suffix.
    pub fn collection_name<N: Node>(&self) -> String {
        self.suffix_collection(&N::type_name().to_lowercase())
    }
}
