//! Lenient coercions and borrowing accessors.
//!
//! The `to_*` family never fails: a tagged value is looked through to its
//! child, and any other kind mismatch yields the zero value of the target
//! type. Use the `is_*` predicates when "zero" and "wrong kind" must be told
//! apart.

use crate::simple;
use crate::value::{Map, Value};

impl Value {
    /// Integer payload as `u64`.
    ///
    /// A negative integer yields its stored offset; a float is cast with
    /// saturation.
    pub fn to_unsigned(&self) -> u64 {
        match self {
            Value::Unsigned(v) | Value::Negative(v) => *v,
            Value::Tagged(_, child) => child.to_unsigned(),
            Value::Float(f) => *f as u64,
            _ => 0,
        }
    }

    /// Integer payload as `i64`, wrapping when the magnitude does not fit.
    pub fn to_signed(&self) -> i64 {
        match self {
            Value::Unsigned(v) => *v as i64,
            Value::Negative(offset) => (-1i64).wrapping_sub(*offset as i64),
            Value::Tagged(_, child) => child.to_signed(),
            Value::Float(f) => *f as i64,
            _ => 0,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Value::Bytes(bytes) => bytes.clone(),
            Value::Tagged(_, child) => child.to_bytes(),
            _ => Vec::new(),
        }
    }

    /// Text payload; invalid UTF-8 sequences are replaced.
    pub fn to_text(&self) -> String {
        match self {
            Value::Text(text) => String::from_utf8_lossy(text).into_owned(),
            Value::Tagged(_, child) => child.to_text(),
            _ => String::new(),
        }
    }

    pub fn to_array(&self) -> Vec<Value> {
        match self {
            Value::Array(items) => items.clone(),
            Value::Tagged(_, child) => child.to_array(),
            _ => Vec::new(),
        }
    }

    pub fn to_map(&self) -> Map {
        match self {
            Value::Map(entries) => entries.clone(),
            Value::Tagged(_, child) => child.to_map(),
            _ => Map::new(),
        }
    }

    /// Simple code, or `undefined` for any other kind.
    pub fn to_simple(&self) -> u8 {
        match self {
            Value::Simple(code) => *code,
            Value::Tagged(_, child) => child.to_simple(),
            _ => simple::UNDEFINED,
        }
    }

    /// True only for the simple value `true`.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Simple(code) => *code == simple::TRUE,
            Value::Tagged(_, child) => child.to_bool(),
            _ => false,
        }
    }

    pub fn to_float(&self) -> f64 {
        match self {
            Value::Unsigned(v) => *v as f64,
            Value::Negative(offset) => negative_to_float(*offset),
            Value::Tagged(_, child) => child.to_float(),
            Value::Float(f) => *f,
            _ => 0.0,
        }
    }

    /// Tag number, or 0 when the value is not tagged.
    pub fn tag(&self) -> u64 {
        match self {
            Value::Tagged(tag, _) => *tag,
            _ => 0,
        }
    }

    /// Copy of the tagged child, or [`Value::default`] when not tagged.
    pub fn child(&self) -> Value {
        match self {
            Value::Tagged(_, child) => child.as_ref().clone(),
            _ => Value::default(),
        }
    }

    pub fn child_ref(&self) -> Option<&Value> {
        match self {
            Value::Tagged(_, child) => Some(child),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Raw text bytes, whether or not they are valid UTF-8.
    pub fn as_text(&self) -> Option<&[u8]> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Text payload when it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_text().and_then(|text| std::str::from_utf8(text).ok())
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

/// `-1 - offset` as a double.
///
/// `offset + 1` can be 2^64, so it is split into 32-bit halves; the high half
/// scales exactly and the final addition rounds once.
fn negative_to_float(offset: u64) -> f64 {
    let magnitude = u128::from(offset) + 1;
    let high = (magnitude >> 32) as f64;
    let low = (magnitude & 0xFFFF_FFFF) as f64;
    -(high * 4_294_967_296.0 + low)
}
