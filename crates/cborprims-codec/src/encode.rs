use bytes::{BufMut, Bytes, BytesMut};
use cborprims_value::Value;

use crate::header::{
    self, INFO_U16, INFO_U32, INFO_U64, INFO_U8, MAJOR_ARRAY, MAJOR_BYTES, MAJOR_MAP,
    MAJOR_NEGATIVE, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UNSIGNED,
};

/// Encode a value into a new buffer.
pub fn encode(value: &Value) -> Bytes {
    let mut dst = BytesMut::with_capacity(encoded_len(value));
    encode_value(value, &mut dst);
    dst.freeze()
}

/// Encode a value into the wire format.
///
/// Every argument (integer, offset, length, count, tag number) uses the
/// shortest of the inline/1/2/4/8-byte forms. Strings, arrays and maps are
/// always definite length. Floats use 4 bytes when that loses nothing and 8
/// bytes otherwise; half precision is never written. Map entries are written
/// in the map's key order.
pub fn encode_value<B: BufMut>(value: &Value, dst: &mut B) {
    match value {
        Value::Unsigned(v) => write_argument(dst, MAJOR_UNSIGNED, *v),
        Value::Negative(offset) => write_argument(dst, MAJOR_NEGATIVE, *offset),
        Value::Bytes(bytes) => {
            write_argument(dst, MAJOR_BYTES, bytes.len() as u64);
            dst.put_slice(bytes);
        }
        Value::Text(text) => {
            write_argument(dst, MAJOR_TEXT, text.len() as u64);
            dst.put_slice(text);
        }
        Value::Array(items) => {
            write_argument(dst, MAJOR_ARRAY, items.len() as u64);
            for item in items {
                encode_value(item, dst);
            }
        }
        Value::Map(entries) => {
            write_argument(dst, MAJOR_MAP, entries.len() as u64);
            for (key, value) in entries {
                encode_value(key, dst);
                encode_value(value, dst);
            }
        }
        Value::Tagged(tag, child) => {
            write_argument(dst, MAJOR_TAG, *tag);
            encode_value(child, dst);
        }
        Value::Simple(code) => write_argument(dst, MAJOR_SIMPLE, u64::from(*code)),
        Value::Float(v) => write_float(dst, *v),
    }
}

/// Exact number of bytes [`encode_value`] writes for `value`.
pub fn encoded_len(value: &Value) -> usize {
    match value {
        Value::Unsigned(v) | Value::Negative(v) => argument_len(*v),
        Value::Bytes(bytes) | Value::Text(bytes) => argument_len(bytes.len() as u64) + bytes.len(),
        Value::Array(items) => {
            argument_len(items.len() as u64) + items.iter().map(encoded_len).sum::<usize>()
        }
        Value::Map(entries) => {
            argument_len(entries.len() as u64)
                + entries
                    .iter()
                    .map(|(key, value)| encoded_len(key) + encoded_len(value))
                    .sum::<usize>()
        }
        Value::Tagged(tag, child) => argument_len(*tag) + encoded_len(child),
        Value::Simple(code) => argument_len(u64::from(*code)),
        Value::Float(v) => {
            if narrows_to_f32(*v) {
                5
            } else {
                9
            }
        }
    }
}

fn write_argument<B: BufMut>(dst: &mut B, major: u8, value: u64) {
    if value < u64::from(INFO_U8) {
        dst.put_u8(header::initial_byte(major, value as u8));
    } else if value <= u64::from(u8::MAX) {
        dst.put_u8(header::initial_byte(major, INFO_U8));
        dst.put_u8(value as u8);
    } else if value <= u64::from(u16::MAX) {
        dst.put_u8(header::initial_byte(major, INFO_U16));
        dst.put_u16(value as u16);
    } else if value <= u64::from(u32::MAX) {
        dst.put_u8(header::initial_byte(major, INFO_U32));
        dst.put_u32(value as u32);
    } else {
        dst.put_u8(header::initial_byte(major, INFO_U64));
        dst.put_u64(value);
    }
}

fn argument_len(value: u64) -> usize {
    if value < u64::from(INFO_U8) {
        1
    } else if value <= u64::from(u8::MAX) {
        2
    } else if value <= u64::from(u16::MAX) {
        3
    } else if value <= u64::from(u32::MAX) {
        5
    } else {
        9
    }
}

fn narrows_to_f32(value: f64) -> bool {
    f64::from(value as f32).to_bits() == value.to_bits()
}

fn write_float<B: BufMut>(dst: &mut B, value: f64) {
    if narrows_to_f32(value) {
        dst.put_u8(header::initial_byte(MAJOR_SIMPLE, INFO_U32));
        dst.put_u32((value as f32).to_bits());
    } else {
        dst.put_u8(header::initial_byte(MAJOR_SIMPLE, INFO_U64));
        dst.put_u64(value.to_bits());
    }
}
