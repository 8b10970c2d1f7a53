//! Whole-document OTBM reader

use crate::diagnostics::{Diagnostics, IgnoreDiagnostics};
use crate::error::{Error, Result, Warning};
use crate::raw::NODE_START;
use crate::raw::fields::FieldContext;
use crate::raw::walker::{NodeParser, peek_root_version};
use crate::types::{Document, Identifier, ItemCatalogue};
use crate::utils::io::read_u32;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Size of the identifier in front of the root node
const IDENTIFIER_SIZE: usize = 4;

/// OTBM document reader
///
/// Decodes a complete document held in memory. Recoverable anomalies inside
/// single nodes are reported to the configured [`Diagnostics`] sink, anything
/// else aborts the read without a partial document.
///
/// # Example
///
/// ```no_run
/// use otbm_codec::{ItemFlags, MapReader, Warning};
/// use std::collections::HashMap;
///
/// let mut catalogue: HashMap<u16, ItemFlags> = HashMap::new();
/// catalogue.insert(2148, ItemFlags { stackable: true, ..ItemFlags::default() });
///
/// let mut warnings: Vec<Warning> = Vec::new();
/// let document = MapReader::new(&catalogue)
///     .with_diagnostics(&mut warnings)
///     .read_path("world.otbm")?;
///
/// println!("version {:?}, {} warnings", document.version(), warnings.len());
/// # Ok::<(), otbm_codec::Error>(())
/// ```
pub struct MapReader<'a> {
    catalogue: &'a dyn ItemCatalogue,
    diagnostics: Option<&'a mut dyn Diagnostics>,
}

impl<'a> MapReader<'a> {
    /// Create a reader resolving item flags through `catalogue`
    ///
    /// Warnings are dropped unless a sink is configured with
    /// [`with_diagnostics`](Self::with_diagnostics).
    pub fn new(catalogue: &'a dyn ItemCatalogue) -> Self {
        Self {
            catalogue,
            diagnostics: None,
        }
    }

    /// Report warnings to `diagnostics`
    pub fn with_diagnostics(mut self, diagnostics: &'a mut dyn Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Decode a document from a byte buffer
    pub fn read(&mut self, bytes: &[u8]) -> Result<Document> {
        if bytes.len() < IDENTIFIER_SIZE {
            return Err(Error::UnexpectedEof(format!(
                "expected {IDENTIFIER_SIZE} identifier bytes, found {}",
                bytes.len()
            )));
        }

        let (mut head, body) = bytes.split_at(IDENTIFIER_SIZE);
        let magic = read_u32(&mut head)?;
        let identifier = Identifier::from_magic(magic).ok_or(Error::InvalidMagicBytes(magic))?;

        match body.first() {
            Some(&NODE_START) => {}
            Some(&found) => {
                return Err(Error::ExpectedNodeStart {
                    offset: IDENTIFIER_SIZE,
                    found,
                });
            }
            None => return Err(Error::UnexpectedEof("missing root node".to_string())),
        }

        let version = peek_root_version(body);
        let context = FieldContext {
            catalogue: self.catalogue,
            legacy_counts: version == Some(0),
        };

        let mut ignore = IgnoreDiagnostics;
        let diagnostics: &mut dyn Diagnostics = match &mut self.diagnostics {
            Some(diagnostics) => &mut **diagnostics,
            None => &mut ignore,
        };

        let (root, consumed) =
            NodeParser::new(context, &mut *diagnostics).parse(body, IDENTIFIER_SIZE)?;

        let trailing = body.len() - consumed;
        if trailing > 0 {
            diagnostics.report(Warning::TrailingBytes {
                offset: IDENTIFIER_SIZE + consumed,
                len: trailing,
            });
        }

        tracing::debug!(
            ?identifier,
            ?version,
            root = ?root.kind(),
            nodes = root.count_nodes(),
            len = bytes.len(),
            "decoded document"
        );

        Ok(Document { identifier, root })
    }

    /// Read everything from `reader` and decode it
    pub fn read_from<R: Read>(&mut self, mut reader: R) -> Result<Document> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.read(&bytes)
    }

    /// Read and decode the file at `path`
    pub fn read_path<P: AsRef<Path>>(&mut self, path: P) -> Result<Document> {
        let bytes = fs::read(path)?;
        self.read(&bytes)
    }
}
