use bytes::{Buf, BytesMut};
use cborprims_value::{Map, Value};
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::header::{
    self, BREAK, INFO_INDEFINITE, INFO_U16, INFO_U32, INFO_U64, INFO_U8, MAJOR_ARRAY,
    MAJOR_BYTES, MAJOR_MAP, MAJOR_NEGATIVE, MAJOR_SIMPLE, MAJOR_TAG, MAJOR_TEXT, MAJOR_UNSIGNED,
};

/// Reads items one at a time from a byte slice.
///
/// A failed read leaves the position unchanged, so the caller never sees a
/// partially decoded item.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    src: &'a [u8],
    len: usize,
    max_depth: usize,
}

impl<'a> Decoder<'a> {
    /// Create a decoder with default configuration.
    pub fn new(src: &'a [u8]) -> Self {
        Self::with_config(src, &CodecConfig::default())
    }

    /// Create a decoder with explicit configuration.
    pub fn with_config(src: &'a [u8], config: &CodecConfig) -> Self {
        Self {
            src,
            len: src.len(),
            max_depth: config.max_depth,
        }
    }

    /// Decode the next complete item.
    pub fn read_value(&mut self) -> Result<Value> {
        let mut cursor = self.src;
        let value = read_item(&mut cursor, 0, self.max_depth)?;
        self.src = cursor;
        Ok(value)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.len - self.src.len()
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.src.len()
    }

    /// True once every input byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }
}

/// Decode exactly one item that spans the whole input.
pub fn decode(src: &[u8]) -> Result<Value> {
    decode_with_config(src, &CodecConfig::default())
}

/// Decode exactly one item that spans the whole input, with explicit limits.
pub fn decode_with_config(src: &[u8], config: &CodecConfig) -> Result<Value> {
    let mut decoder = Decoder::with_config(src, config);
    let value = decoder.read_value().inspect_err(|err| {
        debug!(error = %err, len = src.len(), "decode failed");
    })?;
    if !decoder.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: decoder.remaining(),
        });
    }
    Ok(value)
}

/// Returns true if the input is exactly one well-formed item.
pub fn validate(src: &[u8]) -> bool {
    decode(src).is_ok()
}

/// Decode one item from the front of a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete item yet.
/// On success, consumes the item bytes from the buffer.
pub fn decode_value(src: &mut BytesMut, config: &CodecConfig) -> Result<Option<Value>> {
    if src.is_empty() {
        return Ok(None);
    }

    let (result, consumed) = {
        let mut decoder = Decoder::with_config(&src[..], config);
        let result = decoder.read_value();
        (result, decoder.position())
    };

    match result {
        Ok(value) => {
            if consumed > config.max_item_size {
                return Err(CodecError::ItemTooLarge {
                    size: consumed,
                    max: config.max_item_size,
                });
            }
            trace!(consumed, kind = value.kind().name(), "decoded item");
            src.advance(consumed);
            Ok(Some(value))
        }
        Err(CodecError::UnexpectedEof) => {
            if src.len() >= config.max_item_size {
                return Err(CodecError::ItemTooLarge {
                    size: src.len(),
                    max: config.max_item_size,
                });
            }
            Ok(None) // Need more data
        }
        Err(err) => Err(err),
    }
}

/// Decode an IEEE-754 half-precision bit pattern.
pub fn half_to_f64(bits: u16) -> f64 {
    let exponent = i32::from((bits >> 10) & 0x1F);
    let significand = f64::from(bits & 0x3FF);
    let magnitude = match exponent {
        31 if significand == 0.0 => f64::INFINITY,
        31 => f64::NAN,
        0 => significand * 2f64.powi(-24),
        _ => (1024.0 + significand) * 2f64.powi(exponent - 25),
    };
    if bits >> 15 == 1 {
        -magnitude
    } else {
        magnitude
    }
}

fn read_item(src: &mut &[u8], depth: usize, max_depth: usize) -> Result<Value> {
    let initial = take_u8(src)?;
    let (major, info) = header::split(initial);
    if header::is_reserved_info(info) {
        return Err(CodecError::InvalidAdditionalInfo { major, info });
    }
    if info == INFO_INDEFINITE && !header::allows_indefinite(major) {
        if major == MAJOR_SIMPLE {
            return Err(CodecError::UnexpectedBreak);
        }
        return Err(CodecError::InvalidAdditionalInfo { major, info });
    }

    match major {
        MAJOR_UNSIGNED => Ok(Value::Unsigned(read_argument(src, major, info)?)),
        MAJOR_NEGATIVE => Ok(Value::Negative(read_argument(src, major, info)?)),
        MAJOR_BYTES => Ok(Value::Bytes(read_string(src, major, info)?)),
        MAJOR_TEXT => Ok(Value::Text(read_string(src, major, info)?)),
        MAJOR_ARRAY => {
            check_depth(depth, max_depth)?;
            read_array(src, info, depth + 1, max_depth)
        }
        MAJOR_MAP => {
            check_depth(depth, max_depth)?;
            read_map(src, info, depth + 1, max_depth)
        }
        MAJOR_TAG => {
            let tag = read_argument(src, major, info)?;
            check_depth(depth, max_depth)?;
            let child = read_item(src, depth + 1, max_depth)?;
            Ok(Value::Tagged(tag, Box::new(child)))
        }
        _ => read_simple(src, info),
    }
}

fn check_depth(depth: usize, max_depth: usize) -> Result<()> {
    if depth >= max_depth {
        return Err(CodecError::DepthLimitExceeded { max: max_depth });
    }
    Ok(())
}

fn take_u8(src: &mut &[u8]) -> Result<u8> {
    if !src.has_remaining() {
        return Err(CodecError::UnexpectedEof);
    }
    Ok(src.get_u8())
}

fn ensure_remaining(src: &[u8], needed: usize) -> Result<()> {
    if src.len() < needed {
        return Err(CodecError::UnexpectedEof);
    }
    Ok(())
}

/// Read the argument selected by `info` (0-27). Indefinite length has
/// already been routed to the string and container readers.
fn read_argument(src: &mut &[u8], major: u8, info: u8) -> Result<u64> {
    match info {
        0..=23 => Ok(u64::from(info)),
        INFO_U8 => take_u8(src).map(u64::from),
        INFO_U16 => {
            ensure_remaining(src, 2)?;
            Ok(u64::from(src.get_u16()))
        }
        INFO_U32 => {
            ensure_remaining(src, 4)?;
            Ok(u64::from(src.get_u32()))
        }
        INFO_U64 => {
            ensure_remaining(src, 8)?;
            Ok(src.get_u64())
        }
        _ => Err(CodecError::InvalidAdditionalInfo { major, info }),
    }
}

/// Read a definite length and check it against the bytes left.
///
/// Every element needs at least `min_item_size` bytes, so a length that
/// cannot be satisfied fails before anything is allocated.
fn read_length(src: &mut &[u8], major: u8, info: u8, min_item_size: usize) -> Result<usize> {
    let len = read_argument(src, major, info)?;
    let len = usize::try_from(len).map_err(|_| CodecError::LengthOverflow { len })?;
    if len.saturating_mul(min_item_size) > src.len() {
        return Err(CodecError::UnexpectedEof);
    }
    Ok(len)
}

fn at_break(src: &[u8]) -> Result<bool> {
    match src.first() {
        Some(&byte) => Ok(byte == BREAK),
        None => Err(CodecError::UnexpectedEof),
    }
}

fn read_string(src: &mut &[u8], major: u8, info: u8) -> Result<Vec<u8>> {
    if info != INFO_INDEFINITE {
        let len = read_length(src, major, info, 1)?;
        let mut out = vec![0u8; len];
        src.copy_to_slice(&mut out);
        return Ok(out);
    }

    let mut out = Vec::new();
    while !at_break(src)? {
        let initial = take_u8(src)?;
        let (chunk_major, chunk_info) = header::split(initial);
        if chunk_major != major || chunk_info > INFO_U64 {
            return Err(CodecError::InvalidChunk {
                expected: major,
                found: initial,
            });
        }
        let len = read_length(src, major, chunk_info, 1)?;
        out.extend_from_slice(&src[..len]);
        src.advance(len);
    }
    src.advance(1);
    Ok(out)
}

fn read_array(src: &mut &[u8], info: u8, depth: usize, max_depth: usize) -> Result<Value> {
    if info != INFO_INDEFINITE {
        let len = read_length(src, MAJOR_ARRAY, info, 1)?;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(read_item(src, depth, max_depth)?);
        }
        return Ok(Value::Array(items));
    }

    let mut items = Vec::new();
    while !at_break(src)? {
        items.push(read_item(src, depth, max_depth)?);
    }
    src.advance(1);
    Ok(Value::Array(items))
}

fn read_map(src: &mut &[u8], info: u8, depth: usize, max_depth: usize) -> Result<Value> {
    let mut entries = Map::new();
    if info != INFO_INDEFINITE {
        let len = read_length(src, MAJOR_MAP, info, 2)?;
        for _ in 0..len {
            read_entry(src, &mut entries, depth, max_depth)?;
        }
        return Ok(Value::Map(entries));
    }

    while !at_break(src)? {
        read_entry(src, &mut entries, depth, max_depth)?;
    }
    src.advance(1);
    Ok(Value::Map(entries))
}

/// Read one key/value pair. A key that is already present keeps its
/// first value.
fn read_entry(src: &mut &[u8], entries: &mut Map, depth: usize, max_depth: usize) -> Result<()> {
    let key = read_item(src, depth, max_depth)?;
    let value = read_item(src, depth, max_depth)?;
    if entries.contains_key(&key) {
        trace!(%key, "dropping duplicate map key");
        return Ok(());
    }
    entries.insert(key, value);
    Ok(())
}

fn read_simple(src: &mut &[u8], info: u8) -> Result<Value> {
    match info {
        0..=23 => Ok(Value::Simple(info)),
        INFO_U8 => take_u8(src).map(Value::Simple),
        INFO_U16 => {
            ensure_remaining(src, 2)?;
            Ok(Value::Float(half_to_f64(src.get_u16())))
        }
        INFO_U32 => {
            ensure_remaining(src, 4)?;
            Ok(Value::Float(f64::from(f32::from_bits(src.get_u32()))))
        }
        INFO_U64 => {
            ensure_remaining(src, 8)?;
            Ok(Value::Float(f64::from_bits(src.get_u64())))
        }
        _ => Err(CodecError::InvalidAdditionalInfo {
            major: MAJOR_SIMPLE,
            info,
        }),
    }
}
