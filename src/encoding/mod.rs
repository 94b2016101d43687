//! Encoders that turn typed fields into backend key/value lists
//!
//! - [`FieldEncoder`] / [`WorkingEncoder`]: the flat, pooled encoder behind
//!   every log call, plus the entry dispatcher
//! - [`DataEncoder`]: builds nested objects and arrays as a value tree
//! - [`JsonEncoder`]: renders a [`DataEncoder`] tree as JSON text
//! - [`LoggerCache`]: logger name and realm to backend logger memoization
//! - [`FieldBuffer`]: the reusable flat field sequence

pub mod cache;
pub mod data;
pub mod fields;
pub mod json;
pub mod pooled;
pub mod pools;

pub use cache::LoggerCache;
pub use data::{
    encode_array_to_text, encode_array_to_text_with, encode_object_to_text,
    encode_object_to_text_with, DataEncoder,
};
pub use fields::FieldBuffer;
pub use json::JsonEncoder;
pub use pooled::{FieldEncoder, WorkingEncoder};
pub use pools::{Pools, PoolsMetrics};
