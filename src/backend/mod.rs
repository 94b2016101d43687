//! Contract with the realm-based backend logging library
//!
//! The bridge only needs two things from a backend: a way to obtain a logger
//! for a realm, and loggers with four severity methods that accept a message
//! and an ordered key/value list. Everything else (rule evaluation, realm
//! registries, sinks) stays on the backend side.

pub mod memory;

use crate::core::{BackendLevel, Realm, Value};
use std::fmt;
use std::sync::Arc;

pub use memory::{MemoryContext, Record};

/// One flattened field as handed to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// A backend logger bound to one realm
pub trait BackendLogger: Send + Sync {
    fn enabled(&self, level: BackendLevel) -> bool;

    fn debug(&self, message: &str, fields: &[KeyValue]);
    fn info(&self, message: &str, fields: &[KeyValue]);
    fn warn(&self, message: &str, fields: &[KeyValue]);
    fn error(&self, message: &str, fields: &[KeyValue]);

    /// Route to the severity method matching `level`
    fn log(&self, level: BackendLevel, message: &str, fields: &[KeyValue]) {
        match level {
            BackendLevel::Debug => self.debug(message, fields),
            BackendLevel::Info => self.info(message, fields),
            BackendLevel::Warn => self.warn(message, fields),
            BackendLevel::Error => self.error(message, fields),
        }
    }
}

/// The backend's logging context
pub trait LoggingContext: Send + Sync {
    /// Logger for `realm`, with filtering decided by the current rules
    fn logger(&self, realm: &Realm) -> Arc<dyn BackendLogger>;

    fn is_level_enabled(&self, realm: &Realm, level: BackendLevel) -> bool {
        self.logger(realm).enabled(level)
    }
}

/// Builds the backend logger cached for a realm
pub type LoggerFactory = fn(&Arc<dyn LoggingContext>, &Realm) -> Arc<dyn BackendLogger>;

/// Bind to the realm immediately; filtering is fixed when the logger is created
pub fn static_logging(ctx: &Arc<dyn LoggingContext>, realm: &Realm) -> Arc<dyn BackendLogger> {
    ctx.logger(realm)
}

/// Re-resolve the realm on every call so rule changes take effect live
pub fn dynamic_logging(ctx: &Arc<dyn LoggingContext>, realm: &Realm) -> Arc<dyn BackendLogger> {
    Arc::new(DynamicLogger::new(Arc::clone(ctx), realm.clone()))
}

/// Logger that looks up its realm logger per call
pub struct DynamicLogger {
    ctx: Arc<dyn LoggingContext>,
    realm: Realm,
}

impl DynamicLogger {
    pub fn new(ctx: Arc<dyn LoggingContext>, realm: Realm) -> Self {
        Self { ctx, realm }
    }

    fn current(&self) -> Arc<dyn BackendLogger> {
        self.ctx.logger(&self.realm)
    }
}

impl BackendLogger for DynamicLogger {
    fn enabled(&self, level: BackendLevel) -> bool {
        self.ctx.is_level_enabled(&self.realm, level)
    }

    fn debug(&self, message: &str, fields: &[KeyValue]) {
        self.current().debug(message, fields);
    }

    fn info(&self, message: &str, fields: &[KeyValue]) {
        self.current().info(message, fields);
    }

    fn warn(&self, message: &str, fields: &[KeyValue]) {
        self.current().warn(message, fields);
    }

    fn error(&self, message: &str, fields: &[KeyValue]) {
        self.current().error(message, fields);
    }
}
