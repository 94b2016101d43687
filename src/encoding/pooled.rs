//! Pooled flat field encoder and entry dispatcher
//!
//! A [`FieldEncoder`] is a long-lived template: it owns the shared logger
//! cache (through its root) and any context fields added with
//! [`FieldEncoder::with_fields`]. Each log call works on a
//! [`WorkingEncoder`] that borrows the template and draws its field
//! sequence, namespace and JSON scratch buffer from the pools, handing them
//! back when it is dropped.
//!
//! Field keys and string values are written into slots of a recycled
//! [`FieldBuffer`], and nested composites render into the scratch buffer
//! before being copied into their slot. Once a call of a given shape has
//! run, repeating it allocates nothing for scalar, string and array fields.
//! Nested objects still allocate their map nodes.

use super::cache::LoggerCache;
use super::fields::FieldBuffer;
use super::pools::Pools;
use crate::backend::{KeyValue, LoggerFactory, LoggingContext};
use crate::config::{BridgeConfig, UintptrPolicy};
use crate::core::{
    ArrayMarshaler, Caller, Entry, Field, LoggerError, ObjectEncoder, ObjectMarshaler, Pooled,
    Result, Value,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

/// State owned by the root encoder and shared with every clone
struct Shared {
    cache: LoggerCache,
    pools: Arc<Pools>,
    uintptr_policy: UintptrPolicy,
}

/// Template encoder: shared cache and pools plus accumulated context fields
#[derive(Clone)]
pub struct FieldEncoder {
    shared: Arc<Shared>,
    fields: Vec<KeyValue>,
    namespace: String,
}

impl FieldEncoder {
    /// Root encoder with default settings and static realm binding
    pub fn new(context: Arc<dyn LoggingContext>) -> Self {
        let config = BridgeConfig::default();
        Self::with_factory(
            context,
            config.binding.factory(),
            &config,
            Arc::clone(Pools::global()),
        )
    }

    /// Root encoder from a validated configuration
    pub fn from_config(context: Arc<dyn LoggingContext>, config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let pools = match config.pool_capacity {
            Some(capacity) => Arc::new(Pools::new(capacity)),
            None => Arc::clone(Pools::global()),
        };
        Ok(Self::with_factory(
            context,
            config.binding.factory(),
            config,
            pools,
        ))
    }

    /// Root encoder with every collaborator injected
    pub fn with_factory(
        context: Arc<dyn LoggingContext>,
        factory: LoggerFactory,
        config: &BridgeConfig,
        pools: Arc<Pools>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                cache: LoggerCache::with_root(context, factory, config.root_realm.clone()),
                pools,
                uintptr_policy: config.uintptr_policy,
            }),
            fields: Vec::new(),
            namespace: String::new(),
        }
    }

    /// A new template carrying this one's fields plus `fields`
    pub fn with_fields(&self, fields: &[Field]) -> Self {
        let mut work = self.working();
        for field in fields {
            work.add_field(field);
        }
        Self {
            shared: Arc::clone(&self.shared),
            fields: work.fields().to_vec(),
            namespace: work.namespace().to_string(),
        }
    }

    /// Acquire a per-call encoder seeded with this template's fields
    pub fn working(&self) -> WorkingEncoder<'_> {
        let pools: &Pools = &self.shared.pools;
        let mut fields = pools.fields().get();
        fields.extend_from_slice(&self.fields);
        let mut namespace = pools.names().get();
        namespace.push_str(&self.namespace);
        WorkingEncoder {
            pools,
            uintptr_policy: self.shared.uintptr_policy,
            fields,
            text: pools.text().get(),
            namespace,
        }
    }

    /// Encode one entry and dispatch it to the backend
    ///
    /// Resolves the realm from the entry's logger name, encodes every field
    /// (a field that fails to encode is replaced by a `<key>Error` string),
    /// appends caller metadata, and calls the backend method for the entry's
    /// level. All pooled storage is released before returning.
    pub fn encode_entry(&self, entry: &Entry<'_>, fields: &[Field]) {
        let logger = self.shared.cache.for_logger_name(entry.logger_name);

        let mut work = self.working();
        for field in fields {
            work.add_field(field);
        }
        if let Some(caller) = &entry.caller {
            work.add_caller(caller);
        }

        logger.log(entry.level.backend_level(), entry.message, work.fields());
    }

    /// Context fields carried by this template
    pub fn fields(&self) -> &[KeyValue] {
        &self.fields
    }

    pub fn root_realm(&self) -> &str {
        self.shared.cache.root()
    }

    pub fn cache(&self) -> &LoggerCache {
        &self.shared.cache
    }

    pub fn context(&self) -> &Arc<dyn LoggingContext> {
        self.shared.cache.context()
    }

    pub fn pools(&self) -> &Arc<Pools> {
        &self.shared.pools
    }
}

/// Per-call flat encoder
///
/// Never shared between threads or calls; dropping it resets every buffer
/// and parks it in its pool.
pub struct WorkingEncoder<'a> {
    pools: &'a Pools,
    uintptr_policy: UintptrPolicy,
    fields: Pooled<'a, FieldBuffer>,
    text: Pooled<'a, Vec<u8>>,
    namespace: Pooled<'a, String>,
}

impl<'a> WorkingEncoder<'a> {
    /// The accumulated flat field sequence
    pub fn fields(&self) -> &[KeyValue] {
        self.fields.as_slice()
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Add a field, degrading it to a `<key>Error` string if it fails
    pub fn add_field(&mut self, field: &Field) {
        if let Err(err) = field.add_to(self) {
            tracing::debug!(
                target: "realm_bridge",
                key = %field.key,
                error = %err,
                "field encoding failed"
            );
            let key = format!("{}Error", field.key);
            self.add_string(&key, &err.to_string());
        }
    }

    /// Append `file` and `function` for a known call site
    pub fn add_caller(&mut self, caller: &Caller<'_>) {
        if !caller.file.is_empty() {
            let location = self.fields.push_text("", "file");
            let _ = write!(location, "{}:{}", caller.file, caller.line);
        }
        if !caller.function.is_empty() {
            self.fields.push_str("", "function", caller.function);
        }
    }

    fn push(&mut self, key: &str, value: Value) {
        self.fields.push(&self.namespace, key, value);
    }

    /// Serialize `value` as JSON through the scratch buffer into a new slot
    ///
    /// On failure no slot is claimed, so earlier fields are left untouched.
    fn push_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        self.text.clear();
        serde_json::to_writer(&mut *self.text, value)
            .map_err(|source| LoggerError::encode_failed(key, source))?;
        let text = std::str::from_utf8(&self.text)?;
        self.fields.push_str(&self.namespace, key, text);
        Ok(())
    }
}

impl ObjectEncoder for WorkingEncoder<'_> {
    fn add_array(&mut self, key: &str, marshaler: &dyn ArrayMarshaler) -> Result<()> {
        let pools = self.pools;
        let mut data = pools.data().get();
        marshaler.marshal_log_array(&mut *data)?;
        self.push_json(key, data.slice())
    }

    fn add_object(&mut self, key: &str, marshaler: &dyn ObjectMarshaler) -> Result<()> {
        let pools = self.pools;
        let mut data = pools.data().get();
        marshaler.marshal_log_object(&mut *data)?;
        self.push_json(key, data.object())
    }

    fn add_binary(&mut self, key: &str, value: &[u8]) {
        self.fields.push_binary(&self.namespace, key, value);
    }

    fn add_byte_string(&mut self, key: &str, value: &[u8]) {
        self.fields.push_byte_string(&self.namespace, key, value);
    }

    fn add_bool(&mut self, key: &str, value: bool) {
        self.push(key, Value::Bool(value));
    }

    fn add_duration(&mut self, key: &str, value: Duration) {
        self.push(key, Value::Duration(value));
    }

    fn add_f64(&mut self, key: &str, value: f64) {
        self.push(key, Value::F64(value));
    }

    fn add_f32(&mut self, key: &str, value: f32) {
        self.push(key, Value::F32(value));
    }

    fn add_int(&mut self, key: &str, value: isize) {
        self.push(key, Value::Isize(value));
    }

    fn add_i64(&mut self, key: &str, value: i64) {
        self.push(key, Value::I64(value));
    }

    fn add_i32(&mut self, key: &str, value: i32) {
        self.push(key, Value::I32(value));
    }

    fn add_i16(&mut self, key: &str, value: i16) {
        self.push(key, Value::I16(value));
    }

    fn add_i8(&mut self, key: &str, value: i8) {
        self.push(key, Value::I8(value));
    }

    fn add_string(&mut self, key: &str, value: &str) {
        self.fields.push_str(&self.namespace, key, value);
    }

    fn add_time(&mut self, key: &str, value: DateTime<Utc>) {
        self.push(key, Value::Time(value));
    }

    fn add_uint(&mut self, key: &str, value: usize) {
        self.push(key, Value::Usize(value));
    }

    fn add_u64(&mut self, key: &str, value: u64) {
        self.push(key, Value::U64(value));
    }

    fn add_u32(&mut self, key: &str, value: u32) {
        self.push(key, Value::U32(value));
    }

    fn add_u16(&mut self, key: &str, value: u16) {
        self.push(key, Value::U16(value));
    }

    fn add_u8(&mut self, key: &str, value: u8) {
        self.push(key, Value::U8(value));
    }

    fn add_uintptr(&mut self, key: &str, value: usize) {
        match self.uintptr_policy {
            UintptrPolicy::Hex => {
                let text = self.fields.push_text(&self.namespace, key);
                let _ = write!(text, "{:#x}", value);
            }
            UintptrPolicy::Fault => {
                panic!("unsupported field type: uintptr field '{}' cannot be encoded", key)
            }
        }
    }

    fn add_reflected(&mut self, key: &str, value: &serde_json::Value) -> Result<()> {
        self.push(key, Value::Reflected(value.clone()));
        Ok(())
    }

    fn open_namespace(&mut self, key: &str) {
        self.namespace.push_str(key);
        self.namespace.push('/');
    }
}
