use crate::types::{MapHeader, Node};

/// Magic value of documents tagged with the ASCII identifier `"OTBM"`
pub const OTBM_IDENTIFIER: u32 = 0x4D42544F;

/// Format identifier found in the first four bytes of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Identifier {
    /// All-zero marker, also what the encoder writes
    #[default]
    Null,
    /// ASCII `"OTBM"`
    Otbm,
}

impl Identifier {
    pub fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            0 => Some(Identifier::Null),
            OTBM_IDENTIFIER => Some(Identifier::Otbm),
            _ => None,
        }
    }

    pub fn magic(self) -> u32 {
        match self {
            Identifier::Null => 0,
            Identifier::Otbm => OTBM_IDENTIFIER,
        }
    }
}

/// A decoded map document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    pub identifier: Identifier,
    pub root: Node,
}

impl Document {
    pub fn new(root: impl Into<Node>) -> Self {
        Self {
            identifier: Identifier::Null,
            root: root.into(),
        }
    }

    /// The root map header, if the root node is one
    pub fn header(&self) -> Option<&MapHeader> {
        match &self.root {
            Node::MapHeader(header) => Some(header),
            _ => None,
        }
    }

    /// Format version from the root map header
    pub fn version(&self) -> Option<u32> {
        self.header().map(|header| header.version)
    }
}
