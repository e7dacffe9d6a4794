//! Diagnostic notation.
//!
//! A human-readable rendering for logs and debugging. It is not meant to be
//! parsed back into binary form.

use std::fmt::{self, Write};

use crate::simple;
use crate::value::Value;

/// Render a value in diagnostic notation.
pub fn diagnostic(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unsigned(v) => write!(f, "{v}"),
            Value::Negative(offset) => write!(f, "-{}", u128::from(*offset) + 1),
            Value::Bytes(bytes) => {
                f.write_str("h'")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                f.write_char('\'')
            }
            Value::Text(text) => write_text(f, text),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Map(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
            Value::Tagged(tag, child) => write!(f, "{tag}({child})"),
            Value::Simple(code) => match simple::simple_name(*code) {
                Some(name) => f.write_str(name),
                None => write!(f, "simple({code})"),
            },
            Value::Float(v) => write_float(f, *v),
        }
    }
}

/// Bytes that are not valid UTF-8 are escaped as `\u00XX`, one per byte.
fn write_text(f: &mut fmt::Formatter<'_>, text: &[u8]) -> fmt::Result {
    f.write_char('"')?;
    for chunk in text.utf8_chunks() {
        for ch in chunk.valid().chars() {
            match ch {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        for byte in chunk.invalid() {
            write!(f, "\\u{byte:04x}")?;
        }
    }
    f.write_char('"')
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("NaN");
    }
    if v.is_infinite() {
        return f.write_str(if v < 0.0 { "-Infinity" } else { "Infinity" });
    }
    let rendered = v.to_string();
    f.write_str(&rendered)?;
    if !rendered.contains('.') {
        f.write_str(".0")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    #[test]
    fn integers() {
        assert_eq!(diagnostic(&Value::from(0u8)), "0");
        assert_eq!(diagnostic(&Value::from(u64::MAX)), "18446744073709551615");
        assert_eq!(diagnostic(&Value::from(-1i8)), "-1");
        assert_eq!(diagnostic(&Value::from(-1000i32)), "-1000");
        assert_eq!(
            diagnostic(&Value::negative(u64::MAX)),
            "-18446744073709551616"
        );
    }

    #[test]
    fn byte_strings_are_hex() {
        assert_eq!(diagnostic(&Value::bytes(vec![0x01u8, 0xAB, 0x00])), "h'01ab00'");
        assert_eq!(diagnostic(&Value::bytes(Vec::new())), "h''");
    }

    #[test]
    fn text_escapes() {
        assert_eq!(diagnostic(&Value::text("plain")), "\"plain\"");
        assert_eq!(
            diagnostic(&Value::text("a\nb\r\"c\"\\")),
            "\"a\\nb\\r\\\"c\\\"\\\\\""
        );
        assert_eq!(diagnostic(&Value::text("\u{1}\t")), "\"\\u0001\\u0009\"");
        assert_eq!(diagnostic(&Value::text("\u{fc}")), "\"\u{fc}\"");
    }

    #[test]
    fn invalid_utf8_is_escaped_per_byte() {
        let lone_continuation = Value::text_bytes(vec![b'a', 0x80, b'b']);
        let truncated = Value::text_bytes(vec![b'a', 0xC3, b'b']);

        assert_eq!(diagnostic(&lone_continuation), "\"a\\u0080b\"");
        assert_eq!(diagnostic(&truncated), "\"a\\u00c3b\"");
        assert_ne!(diagnostic(&lone_continuation), diagnostic(&truncated));

        let two_bad = Value::text_bytes(vec![0xFF, 0xFE]);
        assert_eq!(diagnostic(&two_bad), "\"\\u00ff\\u00fe\"");
    }

    #[test]
    fn containers() {
        let array = Value::array(vec![Value::from(1u8), Value::array(vec![Value::from(2u8)])]);
        assert_eq!(diagnostic(&array), "[1, [2]]");
        assert_eq!(diagnostic(&Value::Array(Vec::new())), "[]");

        let mut map = Map::new();
        map.insert(Value::text("b"), Value::from(2u8));
        map.insert(Value::text("a"), Value::from(1u8));
        assert_eq!(diagnostic(&Value::map(map)), "{\"a\": 1, \"b\": 2}");
        assert_eq!(diagnostic(&Value::map(Map::new())), "{}");
    }

    #[test]
    fn tagged_and_simple() {
        assert_eq!(
            diagnostic(&Value::tagged(0, "2013-03-21")),
            "0(\"2013-03-21\")"
        );
        assert_eq!(diagnostic(&Value::null()), "null");
        assert_eq!(diagnostic(&Value::undefined()), "undefined");
        assert_eq!(diagnostic(&Value::bool(true)), "true");
        assert_eq!(diagnostic(&Value::bool(false)), "false");
        assert_eq!(diagnostic(&Value::simple(16)), "simple(16)");
        assert_eq!(diagnostic(&Value::simple(255)), "simple(255)");
    }

    #[test]
    fn floats_always_show_a_point() {
        assert_eq!(diagnostic(&Value::float(f64::NAN)), "NaN");
        assert_eq!(diagnostic(&Value::float(f64::INFINITY)), "Infinity");
        assert_eq!(diagnostic(&Value::float(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(diagnostic(&Value::float(1.0)), "1.0");
        assert_eq!(diagnostic(&Value::float(1.5)), "1.5");
        assert_eq!(diagnostic(&Value::float(-0.0)), "-0.0");
        assert_eq!(diagnostic(&Value::float(100000.0)), "100000.0");
        assert_eq!(diagnostic(&Value::float(0.1)), "0.1");
    }
}
