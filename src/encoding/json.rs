//! JSON view over a [`DataEncoder`]

use super::data::DataEncoder;
use crate::core::Result;
use std::ops::{Deref, DerefMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Object,
    Array,
}

/// A [`DataEncoder`] that renders its tree as JSON text
///
/// In object mode the keyed container is rendered, in array mode the
/// sequence container. Both encoder traits are reachable through `Deref`.
///
/// # Example
///
/// ```
/// use realm_bridge::core::{object_fn, ObjectEncoder};
/// use realm_bridge::encoding::JsonEncoder;
///
/// let mut enc = JsonEncoder::object();
/// enc.add_object("obj", &object_fn(|o| {
///     o.add_int("a", 1);
///     o.add_bool("b", true);
///     Ok(())
/// })).unwrap();
/// assert_eq!(enc.to_json_string().unwrap(), r#"{"obj":{"a":1,"b":true}}"#);
/// ```
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    mode: Mode,
    data: DataEncoder,
}

impl JsonEncoder {
    pub fn object() -> Self {
        Self {
            mode: Mode::Object,
            data: DataEncoder::new(),
        }
    }

    pub fn array() -> Self {
        Self {
            mode: Mode::Array,
            data: DataEncoder::new(),
        }
    }

    pub fn is_array(&self) -> bool {
        self.mode == Mode::Array
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let bytes = match self.mode {
            Mode::Object => serde_json::to_vec(self.data.object())?,
            Mode::Array => serde_json::to_vec(self.data.slice())?,
        };
        Ok(bytes)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.to_json_bytes()?).into_owned())
    }
}

impl Deref for JsonEncoder {
    type Target = DataEncoder;

    fn deref(&self) -> &DataEncoder {
        &self.data
    }
}

impl DerefMut for JsonEncoder {
    fn deref_mut(&mut self) -> &mut DataEncoder {
        &mut self.data
    }
}
