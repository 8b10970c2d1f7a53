#![doc = include_str!("../README.md")]

pub use crate::diagnostics::{Diagnostics, IgnoreDiagnostics, TracingDiagnostics};
pub use crate::error::{Error, ErrorCategory, Result, Warning};
pub use crate::reader::MapReader;
pub use crate::types::*;
pub use crate::writer::{MapWriter, encode, serialize_node};

mod diagnostics;
mod error;
pub mod raw;
mod reader;
mod types;
pub mod utils;
mod writer;

/// Decode a document, dropping warnings
///
/// Shorthand for [`MapReader::read`] without a diagnostics sink.
pub fn decode(bytes: &[u8], catalogue: &dyn ItemCatalogue) -> Result<Document> {
    MapReader::new(catalogue).read(bytes)
}

/// Decode a document, reporting warnings to `diagnostics`
pub fn decode_with_diagnostics(
    bytes: &[u8],
    catalogue: &dyn ItemCatalogue,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Document> {
    MapReader::new(catalogue)
        .with_diagnostics(diagnostics)
        .read(bytes)
}
