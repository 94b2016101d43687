//! The typed field-encoding contract
//!
//! `ObjectEncoder` and `ArrayEncoder` are the capability set every encoder in
//! this crate implements. Composite values describe themselves through
//! `ObjectMarshaler` / `ArrayMarshaler`, which receive an encoder and emit
//! their members one typed call at a time.

use super::error::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Encodes keyed fields, optionally under a namespace
pub trait ObjectEncoder {
    fn add_array(&mut self, key: &str, marshaler: &dyn ArrayMarshaler) -> Result<()>;
    fn add_object(&mut self, key: &str, marshaler: &dyn ObjectMarshaler) -> Result<()>;

    fn add_binary(&mut self, key: &str, value: &[u8]);
    fn add_byte_string(&mut self, key: &str, value: &[u8]);
    fn add_bool(&mut self, key: &str, value: bool);
    fn add_duration(&mut self, key: &str, value: Duration);
    fn add_f64(&mut self, key: &str, value: f64);
    fn add_f32(&mut self, key: &str, value: f32);
    fn add_int(&mut self, key: &str, value: isize);
    fn add_i64(&mut self, key: &str, value: i64);
    fn add_i32(&mut self, key: &str, value: i32);
    fn add_i16(&mut self, key: &str, value: i16);
    fn add_i8(&mut self, key: &str, value: i8);
    fn add_string(&mut self, key: &str, value: &str);
    fn add_time(&mut self, key: &str, value: DateTime<Utc>);
    fn add_uint(&mut self, key: &str, value: usize);
    fn add_u64(&mut self, key: &str, value: u64);
    fn add_u32(&mut self, key: &str, value: u32);
    fn add_u16(&mut self, key: &str, value: u16);
    fn add_u8(&mut self, key: &str, value: u8);
    /// Pointer-sized value, rendered as an address rather than a number
    fn add_uintptr(&mut self, key: &str, value: usize);
    fn add_reflected(&mut self, key: &str, value: &serde_json::Value) -> Result<()>;

    /// Prefix every following key with `key/` until the scope ends
    fn open_namespace(&mut self, key: &str);
}

/// Encodes an ordered sequence of unkeyed values
pub trait ArrayEncoder {
    fn append_array(&mut self, marshaler: &dyn ArrayMarshaler) -> Result<()>;
    fn append_object(&mut self, marshaler: &dyn ObjectMarshaler) -> Result<()>;

    fn append_bool(&mut self, value: bool);
    fn append_byte_string(&mut self, value: &[u8]);
    fn append_duration(&mut self, value: Duration);
    fn append_f64(&mut self, value: f64);
    fn append_f32(&mut self, value: f32);
    fn append_int(&mut self, value: isize);
    fn append_i64(&mut self, value: i64);
    fn append_i32(&mut self, value: i32);
    fn append_i16(&mut self, value: i16);
    fn append_i8(&mut self, value: i8);
    fn append_string(&mut self, value: &str);
    fn append_time(&mut self, value: DateTime<Utc>);
    fn append_uint(&mut self, value: usize);
    fn append_u64(&mut self, value: u64);
    fn append_u32(&mut self, value: u32);
    fn append_u16(&mut self, value: u16);
    fn append_u8(&mut self, value: u8);
    fn append_uintptr(&mut self, value: usize);
    fn append_reflected(&mut self, value: &serde_json::Value) -> Result<()>;
}

/// A value that knows how to write itself as an object
pub trait ObjectMarshaler {
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()>;
}

/// A value that knows how to write itself as an array
pub trait ArrayMarshaler {
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()>;
}

/// Adapts a closure into an [`ObjectMarshaler`]
pub struct ObjectMarshalerFn<F>(F);

/// Adapts a closure into an [`ArrayMarshaler`]
pub struct ArrayMarshalerFn<F>(F);

/// Build an object marshaler from a closure
///
/// # Example
///
/// ```
/// use realm_bridge::core::{object_fn, ObjectEncoder};
/// use realm_bridge::encoding::encode_object_to_text;
///
/// let user = object_fn(|enc| {
///     enc.add_string("name", "alice");
///     enc.add_u32("id", 7);
///     Ok(())
/// });
/// let text = encode_object_to_text(&user).unwrap();
/// assert_eq!(text, br#"{"id":7,"name":"alice"}"#);
/// ```
pub fn object_fn<F>(f: F) -> ObjectMarshalerFn<F>
where
    F: Fn(&mut dyn ObjectEncoder) -> Result<()>,
{
    ObjectMarshalerFn(f)
}

/// Build an array marshaler from a closure
pub fn array_fn<F>(f: F) -> ArrayMarshalerFn<F>
where
    F: Fn(&mut dyn ArrayEncoder) -> Result<()>,
{
    ArrayMarshalerFn(f)
}

impl<F> ObjectMarshaler for ObjectMarshalerFn<F>
where
    F: Fn(&mut dyn ObjectEncoder) -> Result<()>,
{
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        (self.0)(enc)
    }
}

impl<F> ArrayMarshaler for ArrayMarshalerFn<F>
where
    F: Fn(&mut dyn ArrayEncoder) -> Result<()>,
{
    fn marshal_log_array(&self, enc: &mut dyn ArrayEncoder) -> Result<()> {
        (self.0)(enc)
    }
}
