use crate::header::major_name;

/// Errors that can occur while decoding or streaming items.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Additional info 28-30, or 31 where indefinite length is not allowed.
    #[error("invalid additional info {info} for major type {major} ({})", major_name(*.major))]
    InvalidAdditionalInfo { major: u8, info: u8 },

    /// A break marker appeared outside an indefinite-length item.
    #[error("unexpected break marker")]
    UnexpectedBreak,

    /// An indefinite-length string contained something other than a
    /// definite-length chunk of the same major type.
    #[error(
        "invalid chunk (initial byte {found:#04x}) in indefinite {} string",
        major_name(*.expected)
    )]
    InvalidChunk { expected: u8, found: u8 },

    /// The input ended before the item was complete.
    #[error("unexpected end of input (incomplete item)")]
    UnexpectedEof,

    /// A complete item was followed by more bytes.
    #[error("{remaining} trailing bytes after item")]
    TrailingBytes { remaining: usize },

    /// Arrays, maps and tags nest deeper than the configured limit.
    #[error("nesting depth exceeds limit of {max}")]
    DepthLimitExceeded { max: usize },

    /// A declared length cannot be addressed on this platform.
    #[error("declared length {len} does not fit in memory")]
    LengthOverflow { len: u64 },

    /// A streamed item exceeds the configured buffer limit.
    #[error("item too large ({size} bytes, max {max})")]
    ItemTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing items.
    #[error("codec I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
