//! Total ordering and equality.
//!
//! Values order first by [`Kind`](crate::Kind), then by payload. Integers and
//! simple values compare by their stored code or offset, so `-1` (offset 0)
//! sorts before `-2` (offset 1). Floats compare by IEEE-754 bit pattern,
//! which keeps the order total and makes every NaN payload equal to itself.
//! Containers compare by content.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::value::Value;

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| match (self, other) {
                (Value::Unsigned(a), Value::Unsigned(b))
                | (Value::Negative(a), Value::Negative(b)) => a.cmp(b),
                (Value::Bytes(a), Value::Bytes(b)) | (Value::Text(a), Value::Text(b)) => a.cmp(b),
                (Value::Array(a), Value::Array(b)) => a.cmp(b),
                (Value::Map(a), Value::Map(b)) => a.cmp(b),
                (Value::Tagged(tag_a, a), Value::Tagged(tag_b, b)) => {
                    tag_a.cmp(tag_b).then_with(|| a.cmp(b))
                }
                (Value::Simple(a), Value::Simple(b)) => a.cmp(b),
                (Value::Float(a), Value::Float(b)) => a.to_bits().cmp(&b.to_bits()),
                // Kinds differ; already decided above.
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Value::Unsigned(v) | Value::Negative(v) => v.hash(state),
            Value::Bytes(bytes) | Value::Text(bytes) => bytes.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Map(entries) => entries.hash(state),
            Value::Tagged(tag, child) => {
                tag.hash(state);
                child.hash(state);
            }
            Value::Simple(code) => code.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::value::Map;

    #[test]
    fn kind_decides_before_payload() {
        assert!(Value::Unsigned(u64::MAX) < Value::Negative(0));
        assert!(Value::Negative(u64::MAX) < Value::bytes(vec![0u8]));
        assert!(Value::text("") > Value::bytes(vec![0xFFu8]));
        assert!(Value::simple(0) < Value::float(f64::NEG_INFINITY));
        assert!(Value::tagged(u64::MAX, 0u8) < Value::simple(0));
    }

    #[test]
    fn integers_compare_by_stored_magnitude() {
        assert!(Value::from(1u8) < Value::from(2u8));
        assert!(Value::from(-1i8) < Value::from(-2i8));
        assert_eq!(Value::from(-7i64), Value::negative(6));
    }

    #[test]
    fn containers_compare_by_content() {
        let a = Value::array(vec![Value::from(1u8), Value::text("x")]);
        let b = Value::array(vec![Value::from(1u8), Value::text("x")]);
        assert_eq!(a, b);
        assert!(Value::bytes(vec![1u8]) < Value::bytes(vec![1u8, 0]));
        assert!(Value::text("ab") < Value::text("b"));

        let mut m1 = Map::new();
        m1.insert(Value::text("k"), Value::from(1u8));
        let mut m2 = Map::new();
        m2.insert(Value::text("k"), Value::from(1u8));
        assert_eq!(Value::map(m1.clone()), Value::map(m2.clone()));
        m2.insert(Value::text("z"), Value::null());
        assert_ne!(Value::map(m1), Value::map(m2));
    }

    #[test]
    fn tagged_tie_breaks_on_child() {
        assert!(Value::tagged(1, 5u8) < Value::tagged(2, 0u8));
        assert!(Value::tagged(1, 0u8) < Value::tagged(1, 5u8));
        assert_eq!(Value::tagged(1, "a"), Value::tagged(1, "a"));
        assert_ne!(Value::tagged(1, "a"), Value::tagged(1, "b"));
    }

    #[test]
    fn floats_use_bit_patterns() {
        assert_eq!(Value::float(f64::NAN), Value::float(f64::NAN));
        assert_ne!(Value::float(0.0), Value::float(-0.0));
        assert!(Value::float(1.0) < Value::float(2.0));
    }

    #[test]
    fn hash_agrees_with_eq() {
        let mut set = HashSet::new();
        set.insert(Value::array(vec![Value::text("a"), Value::float(f64::NAN)]));
        assert!(set.contains(&Value::array(vec![Value::text("a"), Value::float(f64::NAN)])));
        assert!(!set.contains(&Value::array(vec![Value::text("a")])));
    }

    #[test]
    fn usable_as_map_keys() {
        let mut map = Map::new();
        map.insert(Value::text("b"), Value::from(2u8));
        map.insert(Value::from(10u8), Value::from(0u8));
        map.insert(Value::text("a"), Value::from(1u8));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Value::from(10u8), Value::text("a"), Value::text("b")]
        );
    }
}
