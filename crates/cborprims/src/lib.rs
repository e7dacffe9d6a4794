//! Self-describing binary data items with permissive licensing.
//!
//! cborprims decodes any well-formed CBOR item into an owned value tree,
//! encodes value trees back into canonical-minimal bytes, and renders them
//! in diagnostic notation.
//!
//! # Crate Structure
//!
//! - [`value`]: Owned value tree, ordering, coercions, diagnostic notation
//! - [`codec`]: Decoder, encoder, and streaming reader/writer

/// Re-export value types.
pub mod value {
    pub use cborprims_value::*;
}

/// Re-export codec types.
pub mod codec {
    pub use cborprims_codec::*;
}

pub use cborprims_codec::{decode, encode, validate, CodecConfig, CodecError};
pub use cborprims_value::{diagnostic, Value};
