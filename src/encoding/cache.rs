//! Realm → backend logger cache

use crate::backend::{BackendLogger, LoggerFactory, LoggingContext};
use crate::core::{Realm, DEFAULT_ROOT_REALM};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct Bound {
    by_realm: HashMap<String, Arc<dyn BackendLogger>>,
    by_name: HashMap<String, Arc<dyn BackendLogger>>,
}

/// Memoizing lookup of backend loggers by realm
///
/// Owned by the root encoder and shared by everything cloned from it. The
/// lock covers only lookup-or-create, never field encoding or the backend
/// call itself. Entries live as long as the cache.
///
/// Loggers are bound once per realm. Lookups by front-end logger name are
/// memoized too, so a repeated name costs one hash lookup and no realm
/// string is built.
pub struct LoggerCache {
    context: Arc<dyn LoggingContext>,
    factory: LoggerFactory,
    root: String,
    bound: Mutex<Bound>,
}

impl LoggerCache {
    pub fn new(context: Arc<dyn LoggingContext>, factory: LoggerFactory) -> Self {
        Self::with_root(context, factory, DEFAULT_ROOT_REALM)
    }

    /// Cache whose logger names resolve below `root`
    pub fn with_root(
        context: Arc<dyn LoggingContext>,
        factory: LoggerFactory,
        root: impl Into<String>,
    ) -> Self {
        Self {
            context,
            factory,
            root: root.into(),
            bound: Mutex::new(Bound::default()),
        }
    }

    /// Cached logger for `realm`, created through the factory on first use
    pub fn get(&self, realm: &Realm) -> Arc<dyn BackendLogger> {
        let mut bound = self.bound.lock();
        self.bind(&mut bound, realm)
    }

    /// Cached logger for the realm a front-end logger name maps to
    pub fn for_logger_name(&self, logger_name: &str) -> Arc<dyn BackendLogger> {
        let mut bound = self.bound.lock();
        if let Some(logger) = bound.by_name.get(logger_name) {
            return Arc::clone(logger);
        }

        let realm = Realm::for_logger_name(&self.root, logger_name);
        let logger = self.bind(&mut bound, &realm);
        bound
            .by_name
            .insert(logger_name.to_string(), Arc::clone(&logger));
        logger
    }

    fn bind(&self, bound: &mut Bound, realm: &Realm) -> Arc<dyn BackendLogger> {
        if let Some(logger) = bound.by_realm.get(realm.name()) {
            return Arc::clone(logger);
        }

        tracing::debug!(target: "realm_bridge", realm = %realm, "binding backend logger");
        let logger = (self.factory)(&self.context, realm);
        bound
            .by_realm
            .insert(realm.name().to_string(), Arc::clone(&logger));
        logger
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn context(&self) -> &Arc<dyn LoggingContext> {
        &self.context
    }

    /// Number of realms bound so far
    pub fn len(&self) -> usize {
        self.bound.lock().by_realm.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.lock().by_realm.is_empty()
    }
}
