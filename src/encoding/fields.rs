//! Flat field sequence whose slots keep their storage between log calls

use crate::backend::KeyValue;
use crate::core::{Recycle, Value};
use std::fmt;
use std::ops::Deref;

/// Ordered key/value sequence backed by reusable slots
///
/// Recycling only resets the live length. Each slot keeps its key string and,
/// for string and byte values, its value storage, so a call that writes the
/// same shape of fields as an earlier call does not allocate.
#[derive(Default)]
pub struct FieldBuffer {
    slots: Vec<KeyValue>,
    len: usize,
}

impl FieldBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[KeyValue] {
        &self.slots[..self.len]
    }

    /// Claim the next slot and set its key to `prefix` + `key`
    ///
    /// The slot's value is whatever the previous user left; callers overwrite
    /// it before the slot becomes visible to anyone else.
    fn claim(&mut self, prefix: &str, key: &str) -> &mut Value {
        if self.len == self.slots.len() {
            self.slots.push(KeyValue {
                key: String::new(),
                value: Value::Bool(false),
            });
        }
        let slot = &mut self.slots[self.len];
        self.len += 1;
        slot.key.clear();
        slot.key.push_str(prefix);
        slot.key.push_str(key);
        &mut slot.value
    }

    pub fn push(&mut self, prefix: &str, key: &str, value: Value) {
        *self.claim(prefix, key) = value;
    }

    /// Claim a slot holding an empty string value, reusing old text storage
    pub fn push_text(&mut self, prefix: &str, key: &str) -> &mut String {
        let value = self.claim(prefix, key);
        if !matches!(value, Value::String(_)) {
            *value = Value::String(String::new());
        }
        match value {
            Value::String(text) => {
                text.clear();
                text
            }
            _ => unreachable!("slot was just set to a string"),
        }
    }

    pub fn push_str(&mut self, prefix: &str, key: &str, text: &str) {
        self.push_text(prefix, key).push_str(text);
    }

    pub fn push_binary(&mut self, prefix: &str, key: &str, bytes: &[u8]) {
        match self.claim(prefix, key) {
            Value::Binary(buf) => {
                buf.clear();
                buf.extend_from_slice(bytes);
            }
            other => *other = Value::Binary(bytes.to_vec()),
        }
    }

    pub fn push_byte_string(&mut self, prefix: &str, key: &str, bytes: &[u8]) {
        match self.claim(prefix, key) {
            Value::ByteString(buf) => {
                buf.clear();
                buf.extend_from_slice(bytes);
            }
            other => *other = Value::ByteString(bytes.to_vec()),
        }
    }

    /// Append copies of `fields`, reusing slot storage for string values
    pub fn extend_from_slice(&mut self, fields: &[KeyValue]) {
        for field in fields {
            match &field.value {
                Value::String(text) => self.push_str("", &field.key, text),
                Value::Binary(bytes) => self.push_binary("", &field.key, bytes),
                Value::ByteString(bytes) => self.push_byte_string("", &field.key, bytes),
                value => self.push("", &field.key, value.clone()),
            }
        }
    }
}

impl Deref for FieldBuffer {
    type Target = [KeyValue];

    fn deref(&self) -> &[KeyValue] {
        self.as_slice()
    }
}

impl Recycle for FieldBuffer {
    fn recycle(&mut self) {
        self.len = 0;
    }
}

impl fmt::Debug for FieldBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
