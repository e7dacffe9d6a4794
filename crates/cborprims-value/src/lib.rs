//! Owned CBOR value tree.
//!
//! Every item kind the format defines maps onto one [`Value`] variant:
//! - unsigned and negative integers (negatives in offset form, `-1 - n`)
//! - byte and text strings
//! - arrays and maps (maps ordered by the value ordering)
//! - tags wrapping one child
//! - simple values and floats
//!
//! Values are totally ordered and hashable, so they can key a map, and they
//! render in diagnostic notation through [`std::fmt::Display`].

pub mod compare;
pub mod convert;
pub mod diag;
pub mod simple;
pub mod value;

pub use diag::diagnostic;
pub use simple::{FALSE, NULL, TRUE, UNDEFINED};
pub use value::{Kind, Map, Value};
