//! Recursive node framing
//!
//! A node on the wire is `NODE_START`, its escaped own payload, its children
//! (each a complete node) and `NODE_END`.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result, Warning};
use crate::raw::escape::{ESCAPE, NODE_END, NODE_START, escape_into, unescape};
use crate::raw::fields::{FieldContext, read_node_fields, write_node_fields};
use crate::types::Node;

/// Deepest child level accepted below the node a parse starts at
///
/// Real maps nest less than ten levels. Each level costs a stack frame.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Depth-first parser for node spans
pub struct NodeParser<'a> {
    context: FieldContext<'a>,
    diagnostics: &'a mut dyn Diagnostics,
    depth: usize,
}

impl<'a> NodeParser<'a> {
    pub fn new(context: FieldContext<'a>, diagnostics: &'a mut dyn Diagnostics) -> Self {
        Self {
            context,
            diagnostics,
            depth: 0,
        }
    }

    /// Parse the node starting at `span[0]`
    ///
    /// `offset` is the absolute position of `span` in the document, used for
    /// error reporting. Returns the node and the number of bytes it occupies,
    /// both delimiters included, so the caller can continue right after it.
    pub fn parse(&mut self, span: &[u8], offset: usize) -> Result<(Node, usize)> {
        match span.first() {
            Some(&NODE_START) => {}
            Some(&found) => return Err(Error::ExpectedNodeStart { offset, found }),
            None => return Err(Error::UnterminatedNode { offset }),
        }

        let mut pos = 1;
        let mut own_end = None;
        let mut children = Vec::new();

        loop {
            let Some(&byte) = span.get(pos) else {
                return Err(Error::UnterminatedNode { offset });
            };

            match byte {
                // The escaped byte is data, never a control code
                ESCAPE => pos += 2,
                NODE_START => {
                    own_end.get_or_insert(pos);
                    if self.depth >= MAX_NESTING_DEPTH {
                        return Err(Error::NestingTooDeep {
                            offset: offset + pos,
                            limit: MAX_NESTING_DEPTH,
                        });
                    }

                    self.depth += 1;
                    let child = self.parse(&span[pos..], offset + pos);
                    self.depth -= 1;

                    let (child, consumed) = child?;
                    children.push(child);
                    pos += consumed;
                }
                NODE_END => {
                    own_end.get_or_insert(pos);
                    break;
                }
                _ => pos += 1,
            }
        }

        let payload = unescape(&span[1..own_end.unwrap_or(pos)]);
        let node = read_node_fields(&payload, offset, &self.context, self.diagnostics)?;

        let kind = node.kind();
        let (node, discarded) = node.with_children(children);
        if !discarded.is_empty() {
            self.diagnostics.report(Warning::DiscardedChildren {
                kind,
                count: discarded.len(),
            });
        }

        Ok((node, pos + 1))
    }
}

/// Read the version of a root map header without parsing the tree
///
/// Items anywhere in the tree depend on it, and the root node is only built
/// after all of its descendants. Returns `None` if the root is not a map
/// header or is too short.
pub fn peek_root_version(span: &[u8]) -> Option<u32> {
    let mut own = Vec::with_capacity(5);
    let mut bytes = span.iter().copied();
    if bytes.next()? != NODE_START {
        return None;
    }

    while own.len() < 5 {
        match bytes.next()? {
            ESCAPE => own.push(bytes.next()?),
            NODE_START | NODE_END => break,
            byte => own.push(byte),
        }
    }

    match own.as_slice() {
        [0x00, a, b, c, d] => Some(u32::from_le_bytes([*a, *b, *c, *d])),
        _ => None,
    }
}

/// Depth-first serializer appending to one output buffer
///
/// Own payloads are staged in a reusable scratch buffer and escaped straight
/// into the output. Child bytes are appended as they are produced and never
/// copied again.
#[derive(Debug, Default)]
pub struct NodeWriter {
    scratch: Vec<u8>,
}

impl NodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the framed bytes of `node` and its whole subtree to `out`
    pub fn write(&mut self, node: &Node, out: &mut Vec<u8>) -> Result<()> {
        self.scratch.clear();
        write_node_fields(node, &mut self.scratch)?;

        out.push(NODE_START);
        escape_into(&self.scratch, out);
        for child in node.children() {
            self.write(child, out)?;
        }
        out.push(NODE_END);

        Ok(())
    }
}
