use std::collections::BTreeMap;

use crate::simple;

/// Map payload. Keys are kept in [`Value`] order, not insertion order.
pub type Map = BTreeMap<Value, Value>;

/// Discriminant of a [`Value`].
///
/// The declaration order is the primary key of the value ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Unsigned,
    Negative,
    Bytes,
    Text,
    Array,
    Map,
    Tagged,
    Simple,
    Float,
}

impl Kind {
    /// Lowercase name used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Unsigned => "unsigned",
            Kind::Negative => "negative",
            Kind::Bytes => "bytes",
            Kind::Text => "text",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Tagged => "tagged",
            Kind::Simple => "simple",
            Kind::Float => "float",
        }
    }
}

/// A single data item.
///
/// Every container owns its children, so a value is always a tree.
#[derive(Debug, Clone)]
pub enum Value {
    /// Non-negative integer.
    Unsigned(u64),
    /// The integer `-1 - offset`.
    Negative(u64),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Text string. Stored as raw bytes; not checked for valid UTF-8.
    Text(Vec<u8>),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Mapping ordered by key.
    Map(Map),
    /// Tag number wrapping exactly one child.
    Tagged(u64, Box<Value>),
    /// One-byte simple value (booleans, null, undefined, unassigned codes).
    Simple(u8),
    /// Floating point number of any wire width.
    Float(f64),
}

impl Default for Value {
    fn default() -> Self {
        Value::Simple(simple::UNDEFINED)
    }
}

impl Value {
    pub fn unsigned(value: u64) -> Self {
        Value::Unsigned(value)
    }

    /// Build the negative integer `-1 - offset`.
    pub fn negative(offset: u64) -> Self {
        Value::Negative(offset)
    }

    /// Build any integer in `[-2^64, 2^64 - 1]`.
    ///
    /// Returns `None` when `value` is outside that range.
    pub fn integer(value: i128) -> Option<Self> {
        if value >= 0 {
            u64::try_from(value).ok().map(Value::Unsigned)
        } else {
            u64::try_from(-1 - value).ok().map(Value::Negative)
        }
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(value.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into().into_bytes())
    }

    /// Build a text value from raw bytes without UTF-8 validation.
    pub fn text_bytes(value: impl Into<Vec<u8>>) -> Self {
        Value::Text(value.into())
    }

    pub fn array(items: impl Into<Vec<Value>>) -> Self {
        Value::Array(items.into())
    }

    pub fn map(entries: Map) -> Self {
        Value::Map(entries)
    }

    pub fn tagged(tag: u64, child: impl Into<Value>) -> Self {
        Value::Tagged(tag, Box::new(child.into()))
    }

    pub fn simple(code: u8) -> Self {
        Value::Simple(code)
    }

    pub fn bool(value: bool) -> Self {
        Value::Simple(if value { simple::TRUE } else { simple::FALSE })
    }

    pub fn null() -> Self {
        Value::Simple(simple::NULL)
    }

    pub fn undefined() -> Self {
        Value::Simple(simple::UNDEFINED)
    }

    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    /// The discriminant of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Unsigned(_) => Kind::Unsigned,
            Value::Negative(_) => Kind::Negative,
            Value::Bytes(_) => Kind::Bytes,
            Value::Text(_) => Kind::Text,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Tagged(..) => Kind::Tagged,
            Value::Simple(_) => Kind::Simple,
            Value::Float(_) => Kind::Float,
        }
    }

    /// Exchange the contents of two values.
    pub fn swap(&mut self, other: &mut Value) {
        std::mem::swap(self, other);
    }

    /// Move the contents out, leaving [`Value::default`] behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(self, Value::Unsigned(_))
    }

    /// True for integers whose value fits in an `i64`.
    pub fn is_signed(&self) -> bool {
        match self {
            Value::Unsigned(v) | Value::Negative(v) => v >> 63 == 0,
            _ => false,
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Unsigned(_) | Value::Negative(_))
    }

    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, Value::Tagged(..))
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Value::Simple(_))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Simple(code) if simple::is_bool(*code))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Simple(simple::NULL))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Simple(simple::UNDEFINED))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// True for integers and floats.
    pub fn is_number(&self) -> bool {
        self.is_int() || self.is_float()
    }
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Unsigned(value as u64)
                }
            }
        )*
    };
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    let value = value as i64;
                    if value < 0 {
                        Value::Negative((-1 - value) as u64)
                    } else {
                        Value::Unsigned(value as u64)
                    }
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, usize);
from_signed!(i8, i16, i32, i64, isize);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::bool(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::null()
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Collects key/value pairs into a map. The first value seen for a key wins.
impl FromIterator<(Value, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.entry(key).or_insert(value);
        }
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_integers_map_to_offset_form() {
        assert!(matches!(Value::from(-1i32), Value::Negative(0)));
        assert!(matches!(Value::from(-500i64), Value::Negative(499)));
        assert!(matches!(Value::from(7i8), Value::Unsigned(7)));
        assert!(matches!(
            Value::from(i64::MIN),
            Value::Negative(0x7FFF_FFFF_FFFF_FFFF)
        ));
        assert!(matches!(Value::from(u64::MAX), Value::Unsigned(u64::MAX)));
    }

    #[test]
    fn integer_covers_full_range() {
        assert!(matches!(
            Value::integer(-(1i128 << 64)),
            Some(Value::Negative(u64::MAX))
        ));
        assert!(matches!(
            Value::integer(u64::MAX as i128),
            Some(Value::Unsigned(u64::MAX))
        ));
        assert!(Value::integer(1i128 << 64).is_none());
        assert!(Value::integer(-(1i128 << 64) - 1).is_none());
    }

    #[test]
    fn predicates() {
        assert!(Value::from(5u8).is_unsigned());
        assert!(Value::from(5u8).is_signed());
        assert!(!Value::Unsigned(u64::MAX).is_signed());
        assert!(Value::Negative(3).is_signed());
        assert!(!Value::Negative(1 << 63).is_signed());
        assert!(Value::Negative(3).is_int());
        assert!(!Value::Negative(3).is_unsigned());
        assert!(Value::bytes(vec![1u8]).is_bytes());
        assert!(Value::text("x").is_text());
        assert!(Value::Array(Vec::new()).is_array());
        assert!(Value::map(Map::new()).is_map());
        assert!(Value::tagged(1, 0u8).is_tagged());
        assert!(Value::simple(0).is_simple());
        assert!(Value::bool(true).is_bool());
        assert!(!Value::simple(0).is_bool());
        assert!(Value::null().is_null());
        assert!(Value::undefined().is_undefined());
        assert!(Value::float(1.0).is_float());
        assert!(Value::float(1.0).is_number());
        assert!(Value::Negative(0).is_number());
        assert!(!Value::text("1").is_number());
    }

    #[test]
    fn take_leaves_default_behind() {
        let mut v = Value::array(vec![Value::from(1u8), Value::text("a")]);
        let moved = v.take();
        assert!(v.is_undefined());
        assert_eq!(moved.to_array().len(), 2);
    }

    #[test]
    fn swap_exchanges_payloads() {
        let mut a = Value::text("left");
        let mut b = Value::from(9u8);
        a.swap(&mut b);
        assert_eq!(a, Value::from(9u8));
        assert_eq!(b, Value::text("left"));
    }

    #[test]
    fn clone_is_deep() {
        let original = Value::array(vec![Value::bytes(vec![1u8, 2, 3])]);
        let mut copy = original.clone();
        if let Value::Array(items) = &mut copy {
            items.push(Value::null());
        }
        assert_eq!(original.to_array().len(), 1);
        assert_eq!(copy.to_array().len(), 2);
    }

    #[test]
    fn collecting_pairs_keeps_first_value() {
        let map: Value = vec![
            (Value::text("k"), Value::from(1u8)),
            (Value::text("k"), Value::from(2u8)),
        ]
        .into_iter()
        .collect();
        let entries = map.to_map();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[&Value::text("k")], Value::from(1u8));
    }

    #[test]
    fn kind_order_matches_declaration() {
        assert!(Kind::Unsigned < Kind::Negative);
        assert!(Kind::Tagged < Kind::Simple);
        assert!(Kind::Simple < Kind::Float);
        assert_eq!(Value::float(0.0).kind().name(), "float");
    }
}
