//! Generic value tree shared by both encoders
//!
//! `Value` keeps the exact width of every scalar so a backend sees the same
//! type the caller passed in, and serializes to JSON the way the front-end's
//! own JSON output would: durations as integer nanoseconds, timestamps as
//! RFC 3339 strings, raw bytes as standard base64, object keys sorted.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Value type for encoded fields
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
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
    F32(f32),
    F64(f64),
    String(String),
    /// Opaque binary payload
    Binary(Vec<u8>),
    /// UTF-8 text that arrived as raw bytes
    ByteString(Vec<u8>),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Caller-provided value already lowered to a serde tree
    Reflected(serde_json::Value),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::Isize(_) => "isize",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::Usize(_) => "usize",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::ByteString(_) => "bytestring",
            Value::Duration(_) => "duration",
            Value::Time(_) => "time",
            Value::Reflected(_) => "reflected",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

fn duration_nanos(d: &Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

fn rfc3339(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::Isize(v) => serializer.serialize_i64(*v as i64),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::Usize(v) => serializer.serialize_u64(*v as u64),
            // JSON has no representation for NaN or infinities
            Value::F32(v) if !v.is_finite() => {
                Err(S::Error::custom(format!("unsupported value: {}", v)))
            }
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) if !v.is_finite() => {
                Err(S::Error::custom(format!("unsupported value: {}", v)))
            }
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::String(s) => serializer.serialize_str(s),
            Value::Binary(b) | Value::ByteString(b) => serializer.serialize_str(&STANDARD.encode(b)),
            Value::Duration(d) => serializer.serialize_u64(duration_nanos(d)),
            Value::Time(t) => serializer.serialize_str(&rfc3339(t)),
            Value::Reflected(v) => v.serialize(serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::Isize(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::Usize(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(s) => write!(f, "{}", s),
            Value::Binary(b) => write!(f, "{:02x?}", b),
            Value::ByteString(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Value::Duration(d) => write!(f, "{:?}", d),
            Value::Time(t) => write!(f, "{}", rfc3339(t)),
            Value::Reflected(v) => write!(f, "{}", v),
            Value::Array(_) | Value::Object(_) => match serde_json::to_string(self) {
                Ok(json) => write!(f, "{}", json),
                Err(_) => write!(f, "<{}>", self.kind()),
            },
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
    Duration => Duration,
    DateTime<Utc> => Time,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_scalar_json() {
        assert_eq!(serde_json::to_string(&Value::I8(-8)).unwrap(), "-8");
        assert_eq!(serde_json::to_string(&Value::Usize(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&Value::F32(14.1)).unwrap(), "14.1");
        assert_eq!(serde_json::to_string(&Value::F64(15.1)).unwrap(), "15.1");
        assert_eq!(serde_json::to_string(&Value::from("13")).unwrap(), "\"13\"");
    }

    #[test]
    fn test_duration_is_nanoseconds() {
        let v = Value::Duration(Duration::from_millis(3));
        assert_eq!(serde_json::to_string(&v).unwrap(), "3000000");
    }

    #[test]
    fn test_time_is_rfc3339() {
        let t = Utc.with_ymd_and_hms(2024, 10, 17, 8, 30, 0).unwrap();
        assert_eq!(
            serde_json::to_string(&Value::Time(t)).unwrap(),
            "\"2024-10-17T08:30:00Z\""
        );
    }

    #[test]
    fn test_non_finite_floats_fail() {
        assert!(serde_json::to_string(&Value::F64(f64::NAN)).is_err());
        assert!(serde_json::to_string(&Value::F32(f32::INFINITY)).is_err());

        let nested = Value::Array(vec![Value::I64(1), Value::F64(f64::NEG_INFINITY)]);
        assert!(serde_json::to_string(&nested).is_err());
    }

    #[test]
    fn test_bytes_are_base64() {
        let mut entries = BTreeMap::new();
        entries.insert("b".to_string(), Value::Binary(vec![1, 2]));
        entries.insert("s".to_string(), Value::ByteString(vec![0xff, b'a']));
        entries.insert("empty".to_string(), Value::Binary(Vec::new()));

        assert_eq!(
            serde_json::to_string(&Value::Object(entries)).unwrap(),
            r#"{"b":"AQI=","empty":"","s":"/2E="}"#
        );
    }

    #[test]
    fn test_non_utf8_bytes_survive_json() {
        let raw = vec![0xc3, 0x28, 0x00, 0xff];
        let json = serde_json::to_string(&Value::ByteString(raw.clone())).unwrap();
        let text: String = serde_json::from_str(&json).unwrap();

        assert_eq!(STANDARD.decode(text).unwrap(), raw);
    }

    #[test]
    fn test_object_keys_sorted() {
        let mut entries = BTreeMap::new();
        entries.insert("b".to_string(), Value::Bool(true));
        entries.insert("a".to_string(), Value::I64(1));
        assert_eq!(
            serde_json::to_string(&Value::Object(entries)).unwrap(),
            r#"{"a":1,"b":true}"#
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(42_i64).to_string(), "42");
        assert_eq!(Value::ByteString(b"raw".to_vec()).to_string(), "raw");
        assert_eq!(
            Value::Array(vec![Value::I32(1), Value::from("x")]).to_string(),
            r#"[1,"x"]"#
        );
    }
}
