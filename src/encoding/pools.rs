//! The set of pools an encoder draws its scratch storage from

use super::data::DataEncoder;
use super::fields::FieldBuffer;
use crate::core::{Pool, PoolMetrics};
use std::sync::{Arc, OnceLock};

/// Pools for field sequences, text buffers, namespace buffers and data encoders
///
/// Encoders hold an `Arc<Pools>`; most callers share the process-wide
/// [`Pools::global`] instance, tests and embedders can inject their own.
#[derive(Debug)]
pub struct Pools {
    fields: Pool<FieldBuffer>,
    text: Pool<Vec<u8>>,
    names: Pool<String>,
    data: Pool<DataEncoder>,
}

/// Counter snapshot for every pool in a [`Pools`] set
#[derive(Debug, Clone)]
pub struct PoolsMetrics {
    pub fields: PoolMetrics,
    pub text: PoolMetrics,
    pub names: PoolMetrics,
    pub data: PoolMetrics,
}

impl Pools {
    /// Idle items kept per pool unless configured otherwise
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(capacity: usize) -> Self {
        Self {
            fields: Pool::new(capacity),
            text: Pool::new(capacity),
            names: Pool::new(capacity),
            data: Pool::new(capacity),
        }
    }

    /// Process-wide default pools, created on first use
    pub fn global() -> &'static Arc<Pools> {
        static GLOBAL: OnceLock<Arc<Pools>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Pools::new(Self::DEFAULT_CAPACITY)))
    }

    pub fn fields(&self) -> &Pool<FieldBuffer> {
        &self.fields
    }

    pub fn text(&self) -> &Pool<Vec<u8>> {
        &self.text
    }

    /// Namespace prefix buffers
    pub fn names(&self) -> &Pool<String> {
        &self.names
    }

    pub fn data(&self) -> &Pool<DataEncoder> {
        &self.data
    }

    pub fn metrics(&self) -> PoolsMetrics {
        PoolsMetrics {
            fields: self.fields.metrics().clone(),
            text: self.text.metrics().clone(),
            names: self.names.metrics().clone(),
            data: self.data.metrics().clone(),
        }
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
