//! # Realm Bridge
//!
//! Bridges a structured-logging front-end (typed fields, levels, caller
//! metadata) into a realm-based backend logging library.
//!
//! ## Features
//!
//! - **Typed fields**: every integer width, floats, durations, timestamps,
//!   byte strings, serde values and nested objects/arrays
//! - **Pooled encoding**: field sequences and scratch buffers are reused
//!   across log calls
//! - **Realm routing**: dotted logger names map to `root/a/b` realms, with
//!   backend loggers cached per realm
//! - **Static or dynamic binding**: fix filtering at bind time or follow
//!   rule changes live
//!
//! ## Example
//!
//! ```
//! use realm_bridge::prelude::*;
//! use std::sync::Arc;
//!
//! let ctx = Arc::new(MemoryContext::new(BackendLevel::Info));
//! let logger = Logger::new_static(ctx.clone(), "http").with(&[Field::string("service", "api")]);
//!
//! logger.info("request served", &[Field::u16("status", 200)]);
//!
//! let record = &ctx.records()[0];
//! assert_eq!(record.realm.name(), "bridge/http");
//! assert_eq!(record.fields.len(), 2);
//! ```

pub mod backend;
pub mod config;
pub mod core;
pub mod encoding;
pub mod logger;
pub mod macros;

pub mod prelude {
    pub use crate::backend::{BackendLogger, KeyValue, LoggingContext, MemoryContext, Record};
    pub use crate::config::{Binding, BridgeConfig, UintptrPolicy};
    pub use crate::core::{
        array_fn, object_fn, ArrayEncoder, ArrayMarshaler, BackendLevel, Caller, Entry, Field,
        Level, LoggerError, ObjectEncoder, ObjectMarshaler, Realm, Result, Value,
    };
    pub use crate::encoding::{DataEncoder, FieldEncoder, JsonEncoder};
    pub use crate::logger::Logger;
}

pub use backend::{BackendLogger, KeyValue, LoggingContext, MemoryContext};
pub use config::{Binding, BridgeConfig, UintptrPolicy};
pub use core::{BackendLevel, Field, Level, LoggerError, Realm, Result, Value};
pub use encoding::{
    encode_array_to_text, encode_object_to_text, DataEncoder, FieldEncoder, JsonEncoder,
};
pub use logger::Logger;
