//! Bridge configuration

use crate::backend::{dynamic_logging, static_logging, LoggerFactory};
use crate::core::{LoggerError, Result, DEFAULT_ROOT_REALM};
use serde::{Deserialize, Serialize};

/// How backend loggers are bound to realms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Binding {
    /// Bind once; filtering is fixed at bind time
    #[default]
    Static,
    /// Re-resolve per call so live rule changes are honored
    Dynamic,
}

impl Binding {
    pub fn factory(self) -> LoggerFactory {
        match self {
            Binding::Static => static_logging,
            Binding::Dynamic => dynamic_logging,
        }
    }
}

/// What the flat field encoder does with pointer-sized `uintptr` fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UintptrPolicy {
    /// Encode as a `"0x…"` string, same as the structured data encoder
    #[default]
    Hex,
    /// Treat the field as unsupported and panic
    Fault,
}

/// Settings for a root [`FieldEncoder`](crate::encoding::FieldEncoder)
///
/// # Example
///
/// ```
/// use realm_bridge::config::{Binding, BridgeConfig};
///
/// let config: BridgeConfig = serde_json::from_str(r#"{"root_realm":"svc","binding":"dynamic"}"#).unwrap();
/// assert_eq!(config.binding, Binding::Dynamic);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Realm for the unnamed logger and parent of all named ones
    pub root_realm: String,
    pub binding: Binding,
    pub uintptr_policy: UintptrPolicy,
    /// Dedicated pools with this idle capacity; `None` shares the process-wide pools
    pub pool_capacity: Option<usize>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            root_realm: DEFAULT_ROOT_REALM.to_string(),
            binding: Binding::Static,
            uintptr_policy: UintptrPolicy::Hex,
            pool_capacity: None,
        }
    }
}

impl BridgeConfig {
    pub fn builder() -> BridgeConfigBuilder {
        BridgeConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_realm.is_empty() {
            return Err(LoggerError::config("root_realm", "must not be empty"));
        }
        if self.root_realm.contains('.') {
            return Err(LoggerError::config(
                "root_realm",
                format!("'{}' must not contain '.'", self.root_realm),
            ));
        }
        if self.pool_capacity == Some(0) {
            return Err(LoggerError::config("pool_capacity", "must be at least 1"));
        }
        Ok(())
    }
}

/// Fluent builder for [`BridgeConfig`]
#[derive(Debug, Clone, Default)]
pub struct BridgeConfigBuilder {
    config: BridgeConfig,
}

impl BridgeConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_realm(mut self, root: impl Into<String>) -> Self {
        self.config.root_realm = root.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn binding(mut self, binding: Binding) -> Self {
        self.config.binding = binding;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn uintptr_policy(mut self, policy: UintptrPolicy) -> Self {
        self.config.uintptr_policy = policy;
        self
    }

    /// Use dedicated pools instead of the process-wide ones
    #[must_use = "builder methods return a new value"]
    pub fn pool_capacity(mut self, capacity: usize) -> Self {
        self.config.pool_capacity = Some(capacity);
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<BridgeConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
