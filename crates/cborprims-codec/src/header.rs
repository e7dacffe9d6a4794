//! Initial-byte layout.
//!
//! Every item starts with one byte: the top 3 bits select the major type and
//! the low 5 bits carry the additional info.

/// Unsigned integer.
pub const MAJOR_UNSIGNED: u8 = 0;

/// Negative integer, stored as `-1 - n`.
pub const MAJOR_NEGATIVE: u8 = 1;

/// Byte string.
pub const MAJOR_BYTES: u8 = 2;

/// Text string.
pub const MAJOR_TEXT: u8 = 3;

/// Array of items.
pub const MAJOR_ARRAY: u8 = 4;

/// Map of key/value pairs.
pub const MAJOR_MAP: u8 = 5;

/// Tag wrapping one item.
pub const MAJOR_TAG: u8 = 6;

/// Simple values, floats and the break marker.
pub const MAJOR_SIMPLE: u8 = 7;

/// Additional info: one argument byte follows.
pub const INFO_U8: u8 = 24;

/// Additional info: two argument bytes follow.
pub const INFO_U16: u8 = 25;

/// Additional info: four argument bytes follow.
pub const INFO_U32: u8 = 26;

/// Additional info: eight argument bytes follow.
pub const INFO_U64: u8 = 27;

/// Additional info: indefinite length, or break under major type 7.
pub const INFO_INDEFINITE: u8 = 31;

/// Terminates an indefinite-length string, array or map.
pub const BREAK: u8 = 0xFF;

/// Split an initial byte into `(major, info)`.
pub fn split(initial: u8) -> (u8, u8) {
    (initial >> 5, initial & 0x1F)
}

/// Build an initial byte from its two fields.
pub fn initial_byte(major: u8, info: u8) -> u8 {
    (major << 5) | (info & 0x1F)
}

/// Returns a human-readable name for a major type.
pub fn major_name(major: u8) -> &'static str {
    match major {
        MAJOR_UNSIGNED => "unsigned",
        MAJOR_NEGATIVE => "negative",
        MAJOR_BYTES => "bytes",
        MAJOR_TEXT => "text",
        MAJOR_ARRAY => "array",
        MAJOR_MAP => "map",
        MAJOR_TAG => "tag",
        MAJOR_SIMPLE => "simple",
        _ => "invalid",
    }
}

/// Returns true if the major type may use indefinite length.
pub fn allows_indefinite(major: u8) -> bool {
    matches!(major, MAJOR_BYTES | MAJOR_TEXT | MAJOR_ARRAY | MAJOR_MAP)
}

/// Returns true for the additional-info values 28-30, which are never valid.
pub fn is_reserved_info(info: u8) -> bool {
    (28..=30).contains(&info)
}
