//! Core types and traits

pub mod encoder;
pub mod entry;
pub mod error;
pub mod field;
pub mod level;
pub mod metrics;
pub mod pool;
pub mod realm;
pub mod value;

pub use encoder::{
    array_fn, object_fn, ArrayEncoder, ArrayMarshaler, ArrayMarshalerFn, ObjectEncoder,
    ObjectMarshaler, ObjectMarshalerFn,
};
pub use entry::{Caller, Entry};
pub use error::{LoggerError, Result};
pub use field::{Field, FieldKind};
pub use level::{BackendLevel, Level};
pub use metrics::PoolMetrics;
pub use pool::{Pool, Pooled, Recycle};
pub use realm::{Realm, DEFAULT_ROOT_REALM};
pub use value::Value;
