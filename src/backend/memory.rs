//! In-memory recording backend
//!
//! A small stand-in for a real realm-based logging library: level rules are
//! keyed by realm prefix, and every emitted record is kept in memory. Useful
//! for tests and for wiring the bridge up before a real backend is chosen.

use super::{BackendLogger, KeyValue, LoggingContext};
use crate::core::{BackendLevel, Realm};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A record captured by [`MemoryContext`]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub realm: Realm,
    pub level: BackendLevel,
    pub message: String,
    pub fields: Vec<KeyValue>,
}

impl Record {
    /// Value of the first field named `key`
    pub fn field(&self, key: &str) -> Option<&crate::core::Value> {
        self.fields.iter().find(|kv| kv.key == key).map(|kv| &kv.value)
    }
}

/// Logging context that records into memory
///
/// Rules are evaluated newest first; the first rule whose realm contains the
/// logger's realm decides its threshold. Without a match the default level
/// applies.
#[derive(Debug)]
pub struct MemoryContext {
    default_level: BackendLevel,
    rules: RwLock<Vec<(Realm, BackendLevel)>>,
    records: Arc<Mutex<Vec<Record>>>,
    bound: AtomicUsize,
}

impl MemoryContext {
    pub fn new(default_level: BackendLevel) -> Self {
        Self {
            default_level,
            rules: RwLock::new(Vec::new()),
            records: Arc::new(Mutex::new(Vec::new())),
            bound: AtomicUsize::new(0),
        }
    }

    /// Set the threshold for `prefix` and every realm below it
    pub fn add_rule(&self, prefix: Realm, level: BackendLevel) {
        self.rules.write().push((prefix, level));
    }

    /// Threshold currently in effect for `realm`
    pub fn level_for(&self, realm: &Realm) -> BackendLevel {
        self.rules
            .read()
            .iter()
            .rev()
            .find(|(prefix, _)| realm.is_within(prefix))
            .map(|(_, level)| *level)
            .unwrap_or(self.default_level)
    }

    /// Snapshot of all captured records
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Drain all captured records
    pub fn take_records(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }

    /// How many realm loggers have been bound so far
    pub fn loggers_bound(&self) -> usize {
        self.bound.load(Ordering::Relaxed)
    }
}

impl Default for MemoryContext {
    fn default() -> Self {
        Self::new(BackendLevel::Info)
    }
}

impl LoggingContext for MemoryContext {
    fn logger(&self, realm: &Realm) -> Arc<dyn BackendLogger> {
        self.bound.fetch_add(1, Ordering::Relaxed);
        Arc::new(MemoryLogger {
            realm: realm.clone(),
            threshold: self.level_for(realm),
            records: Arc::clone(&self.records),
        })
    }

    fn is_level_enabled(&self, realm: &Realm, level: BackendLevel) -> bool {
        level >= self.level_for(realm)
    }
}

/// Realm logger whose threshold was fixed when it was bound
struct MemoryLogger {
    realm: Realm,
    threshold: BackendLevel,
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemoryLogger {
    fn emit(&self, level: BackendLevel, message: &str, fields: &[KeyValue]) {
        if !self.enabled(level) {
            return;
        }
        self.records.lock().push(Record {
            realm: self.realm.clone(),
            level,
            message: message.to_string(),
            fields: fields.to_vec(),
        });
    }
}

impl BackendLogger for MemoryLogger {
    fn enabled(&self, level: BackendLevel) -> bool {
        level >= self.threshold
    }

    fn debug(&self, message: &str, fields: &[KeyValue]) {
        self.emit(BackendLevel::Debug, message, fields);
    }

    fn info(&self, message: &str, fields: &[KeyValue]) {
        self.emit(BackendLevel::Info, message, fields);
    }

    fn warn(&self, message: &str, fields: &[KeyValue]) {
        self.emit(BackendLevel::Warn, message, fields);
    }

    fn error(&self, message: &str, fields: &[KeyValue]) {
        self.emit(BackendLevel::Error, message, fields);
    }
}
