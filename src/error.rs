use crate::types::{AttributeTag, NodeKind};
use std::io;

/// Unrecoverable decoding and encoding errors
///
/// Any of these aborts the whole operation. There is no partial document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("Invalid magic bytes in header (expected 0x00000000 or 0x4D42544F, found 0x{0:08X})")]
    InvalidMagicBytes(u32),

    #[error("Unexpected end of file: {0}")]
    UnexpectedEof(String),

    #[error("Expected node start marker at offset {offset}, found 0x{found:02X}")]
    ExpectedNodeStart { offset: usize, found: u8 },

    #[error("Node starting at offset {offset} is not terminated")]
    UnterminatedNode { offset: usize },

    #[error("Node starting at offset {offset} has no kind byte")]
    EmptyNode { offset: usize },

    #[error("Unknown node kind: 0x{0:02X}")]
    UnknownNodeKind(u8),

    #[error("{kind:?} node payload too short for its fixed fields ({len} bytes)")]
    TruncatedNode { kind: NodeKind, len: usize },

    #[error("{0:?} nodes have no fixed-field layout and cannot be encoded")]
    UnencodableNode(NodeKind),

    #[error("String of {len} bytes does not fit a 16-bit length prefix")]
    StringTooLong { len: usize },

    #[error("String {value:?} has characters outside Windows-1252")]
    UnencodableString { value: String },

    #[error("Node at offset {offset} is nested deeper than {limit} levels")]
    NestingTooDeep { offset: usize, limit: usize },
}

/// Coarse classification of [`Error`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The document prefix is not an OTBM document
    Format,
    /// The node tree could not be decoded
    Decode,
    /// The in-memory tree could not be encoded
    Encode,
    /// The underlying stream or file failed
    Io,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::IoError(_) => ErrorCategory::Io,
            Error::InvalidMagicBytes(_)
            | Error::UnexpectedEof(_)
            | Error::ExpectedNodeStart { .. } => ErrorCategory::Format,
            Error::UnterminatedNode { .. }
            | Error::EmptyNode { .. }
            | Error::UnknownNodeKind(_)
            | Error::TruncatedNode { .. }
            | Error::NestingTooDeep { .. } => ErrorCategory::Decode,
            Error::UnencodableNode(_)
            | Error::StringTooLong { .. }
            | Error::UnencodableString { .. } => ErrorCategory::Encode,
        }
    }
}

/// Non-fatal issues encountered during lenient parsing
///
/// Each of these affects a single node. Parsing of siblings, parents and the
/// node's own children continues normally.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Attribute value did not fit in the remaining bytes, attribute reading stopped
    TruncatedAttribute {
        tag: AttributeTag,
        needed: usize,
        remaining: usize,
    },

    /// Unrecognized attribute tag, attribute reading stopped
    UnknownAttribute { tag: u8, remaining: usize },

    /// Length-prefixed name ran past the end of the node payload
    TruncatedString {
        kind: NodeKind,
        declared: Option<u16>,
        available: usize,
    },

    /// Legacy item count could not be resolved because the catalogue has no entry
    MissingCatalogueEntry { id: u16 },

    /// Children found under a node kind that has no children slot
    DiscardedChildren { kind: NodeKind, count: usize },

    /// Bytes left over after the root node
    TrailingBytes { offset: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
