//! Typed fields attached to a log entry

use super::encoder::{ArrayMarshaler, ObjectEncoder, ObjectMarshaler};
use super::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// The closed set of field kinds an encoder accepts
#[derive(Clone)]
pub enum FieldKind {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    Uintptr(usize),
    F32(f32),
    F64(f64),
    String(String),
    Binary(Vec<u8>),
    ByteString(Vec<u8>),
    Duration(Duration),
    Time(DateTime<Utc>),
    Reflected(serde_json::Value),
    Array(Arc<dyn ArrayMarshaler + Send + Sync>),
    Object(Arc<dyn ObjectMarshaler + Send + Sync>),
    /// Opens a namespace named after the field key
    Namespace,
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Bool(v) => write!(f, "Bool({:?})", v),
            FieldKind::I8(v) => write!(f, "I8({:?})", v),
            FieldKind::I16(v) => write!(f, "I16({:?})", v),
            FieldKind::I32(v) => write!(f, "I32({:?})", v),
            FieldKind::I64(v) => write!(f, "I64({:?})", v),
            FieldKind::Isize(v) => write!(f, "Isize({:?})", v),
            FieldKind::U8(v) => write!(f, "U8({:?})", v),
            FieldKind::U16(v) => write!(f, "U16({:?})", v),
            FieldKind::U32(v) => write!(f, "U32({:?})", v),
            FieldKind::U64(v) => write!(f, "U64({:?})", v),
            FieldKind::Usize(v) => write!(f, "Usize({:?})", v),
            FieldKind::Uintptr(v) => write!(f, "Uintptr({:#x})", v),
            FieldKind::F32(v) => write!(f, "F32({:?})", v),
            FieldKind::F64(v) => write!(f, "F64({:?})", v),
            FieldKind::String(v) => write!(f, "String({:?})", v),
            FieldKind::Binary(v) => write!(f, "Binary({} bytes)", v.len()),
            FieldKind::ByteString(v) => write!(f, "ByteString({:?})", String::from_utf8_lossy(v)),
            FieldKind::Duration(v) => write!(f, "Duration({:?})", v),
            FieldKind::Time(v) => write!(f, "Time({:?})", v),
            FieldKind::Reflected(v) => write!(f, "Reflected({})", v),
            FieldKind::Array(_) => write!(f, "Array(..)"),
            FieldKind::Object(_) => write!(f, "Object(..)"),
            FieldKind::Namespace => write!(f, "Namespace"),
        }
    }
}

/// A key paired with a typed value
#[derive(Debug, Clone)]
pub struct Field {
    pub key: String,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }

    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, FieldKind::Bool(value))
    }

    pub fn i8(key: impl Into<String>, value: i8) -> Self {
        Self::new(key, FieldKind::I8(value))
    }

    pub fn i16(key: impl Into<String>, value: i16) -> Self {
        Self::new(key, FieldKind::I16(value))
    }

    pub fn i32(key: impl Into<String>, value: i32) -> Self {
        Self::new(key, FieldKind::I32(value))
    }

    pub fn i64(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, FieldKind::I64(value))
    }

    pub fn isize(key: impl Into<String>, value: isize) -> Self {
        Self::new(key, FieldKind::Isize(value))
    }

    pub fn u8(key: impl Into<String>, value: u8) -> Self {
        Self::new(key, FieldKind::U8(value))
    }

    pub fn u16(key: impl Into<String>, value: u16) -> Self {
        Self::new(key, FieldKind::U16(value))
    }

    pub fn u32(key: impl Into<String>, value: u32) -> Self {
        Self::new(key, FieldKind::U32(value))
    }

    pub fn u64(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, FieldKind::U64(value))
    }

    pub fn usize(key: impl Into<String>, value: usize) -> Self {
        Self::new(key, FieldKind::Usize(value))
    }

    pub fn uintptr(key: impl Into<String>, value: usize) -> Self {
        Self::new(key, FieldKind::Uintptr(value))
    }

    pub fn f32(key: impl Into<String>, value: f32) -> Self {
        Self::new(key, FieldKind::F32(value))
    }

    pub fn f64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, FieldKind::F64(value))
    }

    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, FieldKind::String(value.into()))
    }

    pub fn binary(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(key, FieldKind::Binary(value.into()))
    }

    pub fn byte_string(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(key, FieldKind::ByteString(value.into()))
    }

    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, FieldKind::Duration(value))
    }

    pub fn time(key: impl Into<String>, value: DateTime<Utc>) -> Self {
        Self::new(key, FieldKind::Time(value))
    }

    /// Capture any serializable value
    ///
    /// The value is lowered to a serde tree up front, so a value that cannot
    /// be serialized is reported here rather than at logging time.
    pub fn reflect<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Result<Self> {
        let value = serde_json::to_value(value)?;
        Ok(Self::new(key, FieldKind::Reflected(value)))
    }

    pub fn array<M>(key: impl Into<String>, marshaler: M) -> Self
    where
        M: ArrayMarshaler + Send + Sync + 'static,
    {
        Self::new(key, FieldKind::Array(Arc::new(marshaler)))
    }

    pub fn object<M>(key: impl Into<String>, marshaler: M) -> Self
    where
        M: ObjectMarshaler + Send + Sync + 'static,
    {
        Self::new(key, FieldKind::Object(Arc::new(marshaler)))
    }

    pub fn namespace(key: impl Into<String>) -> Self {
        Self::new(key, FieldKind::Namespace)
    }

    /// Feed this field to an encoder through its typed method
    pub fn add_to(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        let key = self.key.as_str();
        match &self.kind {
            FieldKind::Bool(v) => enc.add_bool(key, *v),
            FieldKind::I8(v) => enc.add_i8(key, *v),
            FieldKind::I16(v) => enc.add_i16(key, *v),
            FieldKind::I32(v) => enc.add_i32(key, *v),
            FieldKind::I64(v) => enc.add_i64(key, *v),
            FieldKind::Isize(v) => enc.add_int(key, *v),
            FieldKind::U8(v) => enc.add_u8(key, *v),
            FieldKind::U16(v) => enc.add_u16(key, *v),
            FieldKind::U32(v) => enc.add_u32(key, *v),
            FieldKind::U64(v) => enc.add_u64(key, *v),
            FieldKind::Usize(v) => enc.add_uint(key, *v),
            FieldKind::Uintptr(v) => enc.add_uintptr(key, *v),
            FieldKind::F32(v) => enc.add_f32(key, *v),
            FieldKind::F64(v) => enc.add_f64(key, *v),
            FieldKind::String(v) => enc.add_string(key, v),
            FieldKind::Binary(v) => enc.add_binary(key, v),
            FieldKind::ByteString(v) => enc.add_byte_string(key, v),
            FieldKind::Duration(v) => enc.add_duration(key, *v),
            FieldKind::Time(v) => enc.add_time(key, *v),
            FieldKind::Reflected(v) => return enc.add_reflected(key, v),
            FieldKind::Array(m) => return enc.add_array(key, &**m),
            FieldKind::Object(m) => return enc.add_object(key, &**m),
            FieldKind::Namespace => enc.open_namespace(key),
        }
        Ok(())
    }
}
