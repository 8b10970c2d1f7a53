//! Whole-document OTBM writer

use crate::error::Result;
use crate::raw::walker::NodeWriter;
use crate::types::{Document, Identifier, Node};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize a document, identifier included
///
/// The identifier is always written as four zero bytes, whatever the
/// document was read with.
pub fn encode(document: &Document) -> Result<Vec<u8>> {
    let mut out = Identifier::Null.magic().to_le_bytes().to_vec();
    NodeWriter::new().write(&document.root, &mut out)?;

    tracing::debug!(
        root = ?document.root.kind(),
        nodes = document.root.count_nodes(),
        len = out.len(),
        "encoded document"
    );

    Ok(out)
}

/// Serialize a single node and its subtree, without identifier
pub fn serialize_node(node: &Node) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    NodeWriter::new().write(node, &mut out)?;
    Ok(out)
}

/// OTBM document writer
///
/// Every document or node is fully serialized in memory before anything is
/// written, so an encoding error leaves the sink untouched.
///
/// # Example
///
/// ```no_run
/// use otbm_codec::{Document, MapHeader, MapWriter};
///
/// let document = Document::new(MapHeader {
///     version: 2,
///     width: 256,
///     height: 256,
///     ..MapHeader::default()
/// });
///
/// let mut writer = MapWriter::create("world.otbm")?;
/// writer.write_document(&document)?;
/// writer.flush()?;
/// # Ok::<(), otbm_codec::Error>(())
/// ```
pub struct MapWriter<W: Write> {
    writer: W,
}

impl MapWriter<BufWriter<File>> {
    /// Create a writer for a new file at `path`, truncating an existing one
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> MapWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a complete document, returning the number of bytes written
    pub fn write_document(&mut self, document: &Document) -> Result<usize> {
        let bytes = encode(document)?;
        self.writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    /// Write a single node and its subtree, returning the number of bytes written
    pub fn write_node(&mut self, node: &Node) -> Result<usize> {
        let bytes = serialize_node(node)?;
        self.writer.write_all(&bytes)?;
        Ok(bytes.len())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwrap the underlying sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}
