//! Low-level OTBM wire components
//!
//! Building blocks of the codec, usable on their own: byte stuffing, the
//! fixed-field layout of each node kind, the attribute list format and the
//! recursive node framing. [`MapReader`](crate::MapReader) and
//! [`MapWriter`](crate::MapWriter) tie them together for whole documents.

pub mod attributes;
pub mod escape;
pub mod fields;
pub mod walker;

pub use self::escape::{ESCAPE, NODE_END, NODE_START, escape, unescape};
pub use self::walker::{MAX_NESTING_DEPTH, NodeParser, NodeWriter};
