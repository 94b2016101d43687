//! Structured data encoder
//!
//! Builds a real tree of [`Value`]s instead of flattening to text, so the
//! result serializes back to exactly the structure the marshaler described.
//! The encoder targets either its object container or its array container;
//! nested objects and arrays are built by swapping in a fresh scope,
//! recursing, and merging the finished container into the parent.

use super::pools::Pools;
use crate::core::{
    ArrayEncoder, ArrayMarshaler, ObjectEncoder, ObjectMarshaler, Recycle, Result, Value,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::mem;
use std::time::Duration;

/// Render an object marshaler as JSON text
pub fn encode_object_to_text(marshaler: &dyn ObjectMarshaler) -> Result<Vec<u8>> {
    encode_object_to_text_with(Pools::global(), marshaler)
}

/// Render an array marshaler as JSON text
pub fn encode_array_to_text(marshaler: &dyn ArrayMarshaler) -> Result<Vec<u8>> {
    encode_array_to_text_with(Pools::global(), marshaler)
}

/// [`encode_object_to_text`] using an explicit set of pools
pub fn encode_object_to_text_with(pools: &Pools, marshaler: &dyn ObjectMarshaler) -> Result<Vec<u8>> {
    let mut enc = pools.data().get();
    marshaler.marshal_log_object(&mut *enc)?;
    Ok(serde_json::to_vec(enc.object())?)
}

/// [`encode_array_to_text`] using an explicit set of pools
pub fn encode_array_to_text_with(pools: &Pools, marshaler: &dyn ArrayMarshaler) -> Result<Vec<u8>> {
    let mut enc = pools.data().get();
    marshaler.marshal_log_array(&mut *enc)?;
    Ok(serde_json::to_vec(enc.slice())?)
}

/// Parent state parked while a nested scope is being built
struct Scope {
    namespace: String,
    object: BTreeMap<String, Value>,
    slice: Vec<Value>,
}

/// Encoder that builds a generic value tree
#[derive(Debug, Clone, Default)]
pub struct DataEncoder {
    namespace: String,
    object: BTreeMap<String, Value>,
    slice: Vec<Value>,
}

impl DataEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all content and namespace state
    pub fn reset(&mut self) {
        self.object.clear();
        self.slice.clear();
        self.namespace.clear();
    }

    /// Fields added in object mode
    pub fn object(&self) -> &BTreeMap<String, Value> {
        &self.object
    }

    /// Values appended in array mode
    pub fn slice(&self) -> &[Value] {
        &self.slice
    }

    /// Current key prefix, `""` or `"a/b/"`
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn insert(&mut self, key: &str, value: Value) {
        let mut full = String::with_capacity(self.namespace.len() + key.len());
        full.push_str(&self.namespace);
        full.push_str(key);
        // map semantics: a repeated key keeps only the last value
        self.object.insert(full, value);
    }

    fn push(&mut self, value: Value) {
        self.slice.push(value);
    }

    /// Park the parent and start an empty nested scope
    ///
    /// The nested scope does not inherit the parent's namespace: keys added
    /// inside a nested object are relative to that object. Only the key the
    /// container is stored under carries the parent's prefix.
    fn enter(&mut self) -> Scope {
        Scope {
            namespace: mem::take(&mut self.namespace),
            object: mem::take(&mut self.object),
            slice: mem::take(&mut self.slice),
        }
    }

    /// Restore the parent scope, returning what the nested scope built
    fn leave(&mut self, parent: Scope) -> (BTreeMap<String, Value>, Vec<Value>) {
        self.namespace = parent.namespace;
        let object = mem::replace(&mut self.object, parent.object);
        let slice = mem::replace(&mut self.slice, parent.slice);
        (object, slice)
    }

    fn build_object(&mut self, marshaler: &dyn ObjectMarshaler) -> Result<BTreeMap<String, Value>> {
        let parent = self.enter();
        let result = marshaler.marshal_log_object(self);
        let (object, _) = self.leave(parent);
        result.map(|()| object)
    }

    fn build_array(&mut self, marshaler: &dyn ArrayMarshaler) -> Result<Vec<Value>> {
        let parent = self.enter();
        let result = marshaler.marshal_log_array(self);
        let (_, slice) = self.leave(parent);
        result.map(|()| slice)
    }
}

impl Recycle for DataEncoder {
    fn recycle(&mut self) {
        self.reset();
    }
}

fn address(value: usize) -> Value {
    Value::String(format!("{:#x}", value))
}

impl ObjectEncoder for DataEncoder {
    fn add_array(&mut self, key: &str, marshaler: &dyn ArrayMarshaler) -> Result<()> {
        let slice = self.build_array(marshaler)?;
        self.insert(key, Value::Array(slice));
        Ok(())
    }

    fn add_object(&mut self, key: &str, marshaler: &dyn ObjectMarshaler) -> Result<()> {
        let object = self.build_object(marshaler)?;
        self.insert(key, Value::Object(object));
        Ok(())
    }

    fn add_binary(&mut self, key: &str, value: &[u8]) {
        self.insert(key, Value::Binary(value.to_vec()));
    }

    fn add_byte_string(&mut self, key: &str, value: &[u8]) {
        self.insert(key, Value::ByteString(value.to_vec()));
    }

    fn add_bool(&mut self, key: &str, value: bool) {
        self.insert(key, Value::Bool(value));
    }

    fn add_duration(&mut self, key: &str, value: Duration) {
        self.insert(key, Value::Duration(value));
    }

    fn add_f64(&mut self, key: &str, value: f64) {
        self.insert(key, Value::F64(value));
    }

    fn add_f32(&mut self, key: &str, value: f32) {
        self.insert(key, Value::F32(value));
    }

    fn add_int(&mut self, key: &str, value: isize) {
        self.insert(key, Value::Isize(value));
    }

    fn add_i64(&mut self, key: &str, value: i64) {
        self.insert(key, Value::I64(value));
    }

    fn add_i32(&mut self, key: &str, value: i32) {
        self.insert(key, Value::I32(value));
    }

    fn add_i16(&mut self, key: &str, value: i16) {
        self.insert(key, Value::I16(value));
    }

    fn add_i8(&mut self, key: &str, value: i8) {
        self.insert(key, Value::I8(value));
    }

    fn add_string(&mut self, key: &str, value: &str) {
        self.insert(key, Value::String(value.to_string()));
    }

    fn add_time(&mut self, key: &str, value: DateTime<Utc>) {
        self.insert(key, Value::Time(value));
    }

    fn add_uint(&mut self, key: &str, value: usize) {
        self.insert(key, Value::Usize(value));
    }

    fn add_u64(&mut self, key: &str, value: u64) {
        self.insert(key, Value::U64(value));
    }

    fn add_u32(&mut self, key: &str, value: u32) {
        self.insert(key, Value::U32(value));
    }

    fn add_u16(&mut self, key: &str, value: u16) {
        self.insert(key, Value::U16(value));
    }

    fn add_u8(&mut self, key: &str, value: u8) {
        self.insert(key, Value::U8(value));
    }

    fn add_uintptr(&mut self, key: &str, value: usize) {
        self.insert(key, address(value));
    }

    fn add_reflected(&mut self, key: &str, value: &serde_json::Value) -> Result<()> {
        self.insert(key, Value::Reflected(value.clone()));
        Ok(())
    }

    fn open_namespace(&mut self, key: &str) {
        self.namespace.push_str(key);
        self.namespace.push('/');
    }
}

impl ArrayEncoder for DataEncoder {
    fn append_array(&mut self, marshaler: &dyn ArrayMarshaler) -> Result<()> {
        let slice = self.build_array(marshaler)?;
        self.push(Value::Array(slice));
        Ok(())
    }

    fn append_object(&mut self, marshaler: &dyn ObjectMarshaler) -> Result<()> {
        let object = self.build_object(marshaler)?;
        self.push(Value::Object(object));
        Ok(())
    }

    fn append_bool(&mut self, value: bool) {
        self.push(Value::Bool(value));
    }

    fn append_byte_string(&mut self, value: &[u8]) {
        self.push(Value::ByteString(value.to_vec()));
    }

    fn append_duration(&mut self, value: Duration) {
        self.push(Value::Duration(value));
    }

    fn append_f64(&mut self, value: f64) {
        self.push(Value::F64(value));
    }

    fn append_f32(&mut self, value: f32) {
        self.push(Value::F32(value));
    }

    fn append_int(&mut self, value: isize) {
        self.push(Value::Isize(value));
    }

    fn append_i64(&mut self, value: i64) {
        self.push(Value::I64(value));
    }

    fn append_i32(&mut self, value: i32) {
        self.push(Value::I32(value));
    }

    fn append_i16(&mut self, value: i16) {
        self.push(Value::I16(value));
    }

    fn append_i8(&mut self, value: i8) {
        self.push(Value::I8(value));
    }

    fn append_string(&mut self, value: &str) {
        self.push(Value::String(value.to_string()));
    }

    fn append_time(&mut self, value: DateTime<Utc>) {
        self.push(Value::Time(value));
    }

    fn append_uint(&mut self, value: usize) {
        self.push(Value::Usize(value));
    }

    fn append_u64(&mut self, value: u64) {
        self.push(Value::U64(value));
    }

    fn append_u32(&mut self, value: u32) {
        self.push(Value::U32(value));
    }

    fn append_u16(&mut self, value: u16) {
        self.push(Value::U16(value));
    }

    fn append_u8(&mut self, value: u8) {
        self.push(Value::U8(value));
    }

    fn append_uintptr(&mut self, value: usize) {
        self.push(address(value));
    }

    fn append_reflected(&mut self, value: &serde_json::Value) -> Result<()> {
        self.push(Value::Reflected(value.clone()));
        Ok(())
    }
}
