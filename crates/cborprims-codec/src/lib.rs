//! Decoder and canonical-minimal encoder for CBOR data items.
//!
//! Every item starts with an initial byte holding:
//! - A 3-bit major type (integer, string, array, map, tag, simple/float)
//! - A 5-bit additional info (inline value, argument width, or indefinite length)
//!
//! Decoding accepts every well-formed encoding, including indefinite-length
//! strings and containers and all three float widths. Encoding always picks
//! the shortest argument form and never writes indefinite lengths.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod header;
pub mod reader;
pub mod writer;

pub use cborprims_value::{diagnostic, Kind, Map, Value};
pub use config::{CodecConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITEM_SIZE};
pub use decode::{decode, decode_value, decode_with_config, half_to_f64, validate, Decoder};
pub use encode::{encode, encode_value, encoded_len};
pub use error::{CodecError, Result};
pub use reader::ValueReader;
pub use writer::ValueWriter;
