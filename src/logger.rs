//! Front-end logger
//!
//! A cheap-to-clone handle pairing a dot-separated logger name and a level
//! threshold with a [`FieldEncoder`]. Every entry that passes the threshold
//! is encoded and dispatched to the backend realm derived from the name.

use crate::backend::{dynamic_logging, static_logging, LoggerFactory, LoggingContext};
use crate::config::BridgeConfig;
use crate::core::{BackendLevel, Caller, Entry, Field, Level, Realm, Result};
use crate::encoding::{FieldEncoder, Pools};
use std::sync::Arc;

#[derive(Clone)]
pub struct Logger {
    name: String,
    level: Level,
    encoder: FieldEncoder,
}

impl Logger {
    /// Logger whose realm loggers are bound once, on first use
    #[must_use]
    pub fn new_static(ctx: Arc<dyn LoggingContext>, name: &str) -> Self {
        Self::with_factory(ctx, name, static_logging)
    }

    /// Logger whose realm loggers follow rule changes made after creation
    #[must_use]
    pub fn new_dynamic(ctx: Arc<dyn LoggingContext>, name: &str) -> Self {
        Self::with_factory(ctx, name, dynamic_logging)
    }

    #[must_use]
    pub fn with_factory(ctx: Arc<dyn LoggingContext>, name: &str, factory: LoggerFactory) -> Self {
        let encoder = FieldEncoder::with_factory(
            ctx,
            factory,
            &BridgeConfig::default(),
            Arc::clone(Pools::global()),
        );
        Self::with_encoder(encoder, name)
    }

    pub fn from_config(
        ctx: Arc<dyn LoggingContext>,
        name: &str,
        config: &BridgeConfig,
    ) -> Result<Self> {
        let encoder = FieldEncoder::from_config(ctx, config)?;
        Ok(Self::with_encoder(encoder, name))
    }

    /// Wrap an existing encoder
    ///
    /// The threshold is taken once from the root realm: the lowest of
    /// debug, info and warn the backend enables there, otherwise error.
    #[must_use]
    pub fn with_encoder(encoder: FieldEncoder, name: &str) -> Self {
        let level = initial_level(&**encoder.context(), encoder.root_realm());
        tracing::debug!(target: "realm_bridge", logger = name, level = %level, "logger created");
        Self {
            name: name.to_string(),
            level,
            encoder,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn encoder(&self) -> &FieldEncoder {
        &self.encoder
    }

    /// Same logger with a different threshold
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Child logger; names are joined with `.`
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let name = match (self.name.is_empty(), name.is_empty()) {
            (_, true) => self.name.clone(),
            (true, false) => name.to_string(),
            (false, false) => format!("{}.{}", self.name, name),
        };
        Self {
            name,
            level: self.level,
            encoder: self.encoder.clone(),
        }
    }

    /// Child logger that prefixes every entry with `fields`
    #[must_use]
    pub fn with(&self, fields: &[Field]) -> Self {
        if fields.is_empty() {
            return self.clone();
        }
        Self {
            name: self.name.clone(),
            level: self.level,
            encoder: self.encoder.with_fields(fields),
        }
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    pub fn log(&self, level: Level, message: &str, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }
        let entry = Entry::new(level, message).with_logger_name(&self.name);
        self.encoder.encode_entry(&entry, fields);
    }

    pub fn log_with_caller(&self, level: Level, message: &str, caller: Caller<'_>, fields: &[Field]) {
        if !self.enabled(level) {
            return;
        }
        let entry = Entry::new(level, message)
            .with_logger_name(&self.name)
            .with_caller(caller);
        self.encoder.encode_entry(&entry, fields);
    }

    pub fn debug(&self, message: &str, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    pub fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    pub fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    pub fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// Logged at error severity; never panics
    pub fn dpanic(&self, message: &str, fields: &[Field]) {
        self.log(Level::DPanic, message, fields);
    }

    /// Logged at error severity; never panics
    pub fn panic(&self, message: &str, fields: &[Field]) {
        self.log(Level::Panic, message, fields);
    }

    /// Logged at error severity; never exits the process
    pub fn fatal(&self, message: &str, fields: &[Field]) {
        self.log(Level::Fatal, message, fields);
    }
}

fn initial_level(ctx: &dyn LoggingContext, root_realm: &str) -> Level {
    let realm = Realm::new(root_realm);
    if ctx.is_level_enabled(&realm, BackendLevel::Debug) {
        Level::Debug
    } else if ctx.is_level_enabled(&realm, BackendLevel::Info) {
        Level::Info
    } else if ctx.is_level_enabled(&realm, BackendLevel::Warn) {
        Level::Warn
    } else {
        Level::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryContext;
    use crate::core::Value;

    fn context(level: BackendLevel) -> Arc<MemoryContext> {
        Arc::new(MemoryContext::new(level))
    }

    #[test]
    fn test_initial_level_follows_root_realm() {
        for (backend, expected) in [
            (BackendLevel::Debug, Level::Debug),
            (BackendLevel::Info, Level::Info),
            (BackendLevel::Warn, Level::Warn),
            (BackendLevel::Error, Level::Error),
        ] {
            let logger = Logger::new_static(context(backend), "");
            assert_eq!(logger.level(), expected);
        }
    }

    #[test]
    fn test_initial_level_uses_configured_root() {
        let ctx = context(BackendLevel::Error);
        ctx.add_rule(Realm::new("svc"), BackendLevel::Debug);
        let config = BridgeConfig::builder().root_realm("svc").build().unwrap();

        let logger = Logger::from_config(ctx.clone(), "", &config).unwrap();
        assert_eq!(logger.level(), Level::Debug);

        logger.debug("hello", &[]);
        assert_eq!(ctx.take_records()[0].realm, Realm::new("svc"));
    }

    #[test]
    fn test_below_threshold_is_not_encoded() {
        let ctx = context(BackendLevel::Warn);
        let logger = Logger::new_static(ctx.clone(), "");

        logger.info("skipped", &[]);
        logger.warn("kept", &[]);

        let records = ctx.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "kept");
        assert_eq!(logger.encoder().cache().len(), 1);
    }

    #[test]
    fn test_named_joins_with_dots() {
        let ctx = context(BackendLevel::Debug);
        let logger = Logger::new_static(ctx.clone(), "app");
        let child = logger.named("db").named("pool");
        assert_eq!(child.name(), "app.db.pool");
        assert_eq!(logger.named("").name(), "app");
        assert_eq!(Logger::new_static(ctx.clone(), "").named("x").name(), "x");

        child.info("connected", &[]);
        assert_eq!(ctx.take_records()[0].realm, Realm::new("bridge/app/db/pool"));
    }

    #[test]
    fn test_with_fields_are_inherited() {
        let ctx = context(BackendLevel::Debug);
        let logger = Logger::new_static(ctx.clone(), "api").with(&[Field::string("request", "r-1")]);
        let child = logger.named("handler").with(&[Field::u16("status", 200)]);

        child.info("done", &[Field::bool("cached", false)]);

        let record = ctx.take_records().remove(0);
        let keys: Vec<&str> = record.fields.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["request", "status", "cached"]);
        assert_eq!(record.field("status"), Some(&Value::U16(200)));
    }

    #[test]
    fn test_severe_levels_do_not_panic() {
        let ctx = context(BackendLevel::Debug);
        let logger = Logger::new_static(ctx.clone(), "");

        logger.dpanic("dpanic", &[]);
        logger.panic("panic", &[]);
        logger.fatal("fatal", &[]);

        let records = ctx.take_records();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.level == BackendLevel::Error));
    }

    #[test]
    fn test_dynamic_binding_sees_rule_changes() {
        let ctx = context(BackendLevel::Info);
        let logger = Logger::new_dynamic(ctx.clone(), "jobs").with_level(Level::Debug);

        logger.debug("before", &[]);
        ctx.add_rule(Realm::new("bridge/jobs"), BackendLevel::Debug);
        logger.debug("after", &[]);

        let records = ctx.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "after");
    }

    #[test]
    fn test_static_binding_keeps_bind_time_rules() {
        let ctx = context(BackendLevel::Info);
        let logger = Logger::new_static(ctx.clone(), "jobs").with_level(Level::Debug);

        logger.info("bind", &[]);
        ctx.add_rule(Realm::new("bridge/jobs"), BackendLevel::Debug);
        logger.debug("ignored", &[]);

        let records = ctx.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "bind");
    }

    #[test]
    fn test_caller_is_attached() {
        let ctx = context(BackendLevel::Debug);
        let logger = Logger::new_static(ctx.clone(), "");
        logger.log_with_caller(
            Level::Info,
            "here",
            Caller::new("src/lib.rs", 7, "crate::run"),
            &[],
        );

        let record = ctx.take_records().remove(0);
        assert_eq!(record.field("file"), Some(&Value::from("src/lib.rs:7")));
        assert_eq!(record.field("function"), Some(&Value::from("crate::run")));
    }
}
