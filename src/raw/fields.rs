//! Per-kind fixed-field layouts
//!
//! A node's own payload starts with its kind byte, followed by the fixed
//! fields of that kind and, for some kinds, an attribute list.

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result, Warning};
use crate::raw::attributes::{read_attributes, write_attributes};
use crate::types::{
    HouseTile, Item, ItemCatalogue, MapData, MapHeader, Node, NodeKind, OpaqueNode, Position,
    Tile, TileArea, Town, Towns, Waypoint, Waypoints,
};
use crate::utils::io::{
    read_string, read_u8, read_u16, read_u32, write_string, write_u8, write_u16, write_u32,
};
use std::io::{self, Cursor, Write};

/// Document-wide state the field codec depends on
pub struct FieldContext<'a> {
    pub catalogue: &'a dyn ItemCatalogue,
    /// Root map version is 0, items may carry a count byte after their id
    pub legacy_counts: bool,
}

/// Parse an unescaped own payload into a node without children
///
/// `offset` is the position of the node in the document and only used for
/// error reporting.
pub fn read_node_fields(
    payload: &[u8],
    offset: usize,
    context: &FieldContext<'_>,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Node> {
    let (&kind_byte, body) = payload.split_first().ok_or(Error::EmptyNode { offset })?;
    let kind = NodeKind::from_byte(kind_byte).ok_or(Error::UnknownNodeKind(kind_byte))?;

    let mut cursor = Cursor::new(body);
    match read_fields(kind, &mut cursor, context, diagnostics) {
        Err(Error::IoError(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
            Err(Error::TruncatedNode {
                kind,
                len: payload.len(),
            })
        }
        result => result,
    }
}

fn read_fields(
    kind: NodeKind,
    cursor: &mut Cursor<&[u8]>,
    context: &FieldContext<'_>,
    diagnostics: &mut dyn Diagnostics,
) -> Result<Node> {
    let node = match kind {
        NodeKind::MapHeader => MapHeader {
            version: read_u32(cursor)?,
            width: read_u16(cursor)?,
            height: read_u16(cursor)?,
            items_major_version: read_u32(cursor)?,
            items_minor_version: read_u32(cursor)?,
            nodes: Vec::new(),
        }
        .into(),

        NodeKind::MapData => MapData {
            attributes: read_attributes(rest(cursor), diagnostics),
            features: Vec::new(),
        }
        .into(),

        NodeKind::TileArea => TileArea {
            position: Position::read(cursor)?,
            tiles: Vec::new(),
        }
        .into(),

        NodeKind::Tile => {
            let x = read_u8(cursor)?;
            let y = read_u8(cursor)?;
            Tile {
                x,
                y,
                attributes: read_attributes(rest(cursor), diagnostics),
                items: Vec::new(),
            }
            .into()
        }

        NodeKind::HouseTile => {
            let x = read_u8(cursor)?;
            let y = read_u8(cursor)?;
            let house_id = read_u32(cursor)?;
            HouseTile {
                x,
                y,
                house_id,
                attributes: read_attributes(rest(cursor), diagnostics),
                items: Vec::new(),
            }
            .into()
        }

        NodeKind::Item => {
            let id = read_u16(cursor)?;
            let legacy_count = if context.legacy_counts {
                match context.catalogue.item_flags(id) {
                    Some(flags) if flags.has_legacy_count() => Some(read_u8(cursor)?),
                    Some(_) => None,
                    None => {
                        diagnostics.report(Warning::MissingCatalogueEntry { id });
                        None
                    }
                }
            } else {
                None
            };

            // A count attribute takes precedence over the legacy byte
            let mut attributes = read_attributes(rest(cursor), diagnostics);
            if attributes.count.is_none() {
                attributes.count = legacy_count;
            }

            Item {
                id,
                attributes,
                content: Vec::new(),
            }
            .into()
        }

        NodeKind::Waypoints => Waypoints::default().into(),

        NodeKind::Waypoint => {
            let (name, position) = read_named_position(kind, cursor, diagnostics)?;
            Waypoint { name, position }.into()
        }

        NodeKind::Towns => Towns::default().into(),

        NodeKind::Town => {
            let town_id = read_u32(cursor)?;
            let (name, position) = read_named_position(kind, cursor, diagnostics)?;
            Town {
                town_id,
                name,
                position,
            }
            .into()
        }

        NodeKind::RootV1
        | NodeKind::ItemDef
        | NodeKind::TileSquare
        | NodeKind::TileRef
        | NodeKind::Spawns
        | NodeKind::SpawnArea
        | NodeKind::Monster => OpaqueNode {
            kind,
            payload: rest(cursor).to_vec(),
            nodes: Vec::new(),
        }
        .into(),
    };

    Ok(node)
}

/// Unread part of the payload
fn rest<'a>(cursor: &Cursor<&'a [u8]>) -> &'a [u8] {
    let data: &'a [u8] = *cursor.get_ref();
    data.get(cursor.position() as usize..).unwrap_or(&[])
}

/// Read a length-prefixed name followed by a position
///
/// A name running past the end of the payload is cut to what remains. The
/// position then no longer fits and is left at its default.
fn read_named_position(
    kind: NodeKind,
    cursor: &mut Cursor<&[u8]>,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(String, Position)> {
    let available = rest(cursor).len();
    if available < 2 {
        diagnostics.report(Warning::TruncatedString {
            kind,
            declared: None,
            available,
        });
        return Ok((String::new(), Position::default()));
    }

    let declared = read_u16(cursor)?;
    let available = rest(cursor).len();
    if available < declared as usize {
        diagnostics.report(Warning::TruncatedString {
            kind,
            declared: Some(declared),
            available,
        });
        let name = read_string(cursor, available)?;
        return Ok((name, Position::default()));
    }

    let name = read_string(cursor, declared as usize)?;
    let position = Position::read(cursor)?;
    Ok((name, position))
}

/// Write a node's own payload: kind byte, fixed fields and attributes
///
/// The output is unescaped and does not include children.
pub fn write_node_fields<W: Write>(node: &Node, writer: &mut W) -> Result<()> {
    let kind = node.kind();
    if !kind.has_layout() || matches!(node, Node::Opaque(_)) {
        return Err(Error::UnencodableNode(kind));
    }

    write_u8(writer, kind.to_byte())?;

    match node {
        Node::MapHeader(header) => {
            write_u32(writer, header.version)?;
            write_u16(writer, header.width)?;
            write_u16(writer, header.height)?;
            write_u32(writer, header.items_major_version)?;
            write_u32(writer, header.items_minor_version)?;
        }
        Node::MapData(data) => write_attributes(&data.attributes, writer)?,
        Node::TileArea(area) => area.position.write(writer)?,
        Node::Tile(tile) => {
            write_u8(writer, tile.x)?;
            write_u8(writer, tile.y)?;
            write_attributes(&tile.attributes, writer)?;
        }
        Node::HouseTile(tile) => {
            write_u8(writer, tile.x)?;
            write_u8(writer, tile.y)?;
            write_u32(writer, tile.house_id)?;
            write_attributes(&tile.attributes, writer)?;
        }
        Node::Item(item) => {
            write_u16(writer, item.id)?;
            write_attributes(&item.attributes, writer)?;
        }
        Node::Waypoint(waypoint) => {
            write_string(writer, &waypoint.name)?;
            waypoint.position.write(writer)?;
        }
        Node::Town(town) => {
            write_u32(writer, town.town_id)?;
            write_string(writer, &town.name)?;
            town.position.write(writer)?;
        }
        Node::Waypoints(_) | Node::Towns(_) | Node::Opaque(_) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attributes, EmptyCatalogue, ItemFlags};
    use claims::{assert_matches, assert_ok};
    use std::collections::HashMap;

    const MODERN: FieldContext<'static> = FieldContext {
        catalogue: &EmptyCatalogue,
        legacy_counts: false,
    };

    fn read(payload: &[u8], context: &FieldContext<'_>) -> (Result<Node>, Vec<Warning>) {
        let mut warnings: Vec<Warning> = Vec::new();
        let node = read_node_fields(payload, 0, context, &mut warnings);
        (node, warnings)
    }

    fn write(node: impl Into<Node>) -> Vec<u8> {
        let mut buf = Vec::new();
        write_node_fields(&node.into(), &mut buf).unwrap();
        buf
    }

    #[test]
    fn map_header_layout() {
        let bytes = write(MapHeader {
            version: 2,
            width: 256,
            height: 512,
            items_major_version: 3,
            items_minor_version: 57,
            nodes: Vec::new(),
        });
        assert_eq!(
            bytes,
            vec![0x00, 2, 0, 0, 0, 0, 1, 0, 2, 3, 0, 0, 0, 57, 0, 0, 0]
        );

        let (node, warnings) = read(&bytes, &MODERN);
        let node = assert_ok!(node);
        assert_matches!(node, Node::MapHeader(MapHeader { width: 256, height: 512, .. }));
        assert!(warnings.is_empty());
    }

    #[test]
    fn town_layout() {
        let town = Town {
            town_id: 1,
            name: "Thais".to_string(),
            position: Position::new(100, 200, 7),
        };
        let bytes = write(town.clone());
        assert_eq!(
            bytes,
            b"\x0d\x01\x00\x00\x00\x05\x00Thais\x64\x00\xc8\x00\x07".to_vec()
        );

        let (node, _) = read(&bytes, &MODERN);
        assert_eq!(assert_ok!(node), Node::Town(town));
    }

    #[test]
    fn truncated_waypoint_name() {
        let (node, warnings) = read(b"\x10\x09\x00Car", &MODERN);
        assert_eq!(
            assert_ok!(node),
            Node::Waypoint(Waypoint {
                name: "Car".to_string(),
                position: Position::default(),
            })
        );
        assert_eq!(
            warnings,
            vec![Warning::TruncatedString {
                kind: NodeKind::Waypoint,
                declared: Some(9),
                available: 3,
            }]
        );
    }

    #[test]
    fn town_without_name_length() {
        let (node, warnings) = read(&[0x0d, 0x01, 0x00, 0x00, 0x00, 0x05], &MODERN);
        assert_matches!(assert_ok!(node), Node::Town(Town { town_id: 1, .. }));
        assert_eq!(
            warnings,
            vec![Warning::TruncatedString {
                kind: NodeKind::Town,
                declared: None,
                available: 1,
            }]
        );
    }

    #[test]
    fn unknown_kind_is_fatal() {
        let (node, _) = read(&[0x42, 0x00], &MODERN);
        assert_matches!(node, Err(Error::UnknownNodeKind(0x42)));
    }

    #[test]
    fn empty_payload_is_fatal() {
        let (node, _) = read(&[], &MODERN);
        assert_matches!(node, Err(Error::EmptyNode { offset: 0 }));
    }

    #[test]
    fn short_fixed_fields_are_fatal() {
        let (node, _) = read(&[0x04, 0x01, 0x00, 0x02], &MODERN);
        assert_matches!(
            node,
            Err(Error::TruncatedNode {
                kind: NodeKind::TileArea,
                len: 4
            })
        );
    }

    #[test]
    fn opaque_kinds_keep_payload() {
        let (node, _) = read(&[0x09, 0xAA, 0xBB], &MODERN);
        assert_eq!(
            assert_ok!(node),
            Node::Opaque(OpaqueNode {
                kind: NodeKind::Spawns,
                payload: vec![0xAA, 0xBB],
                nodes: Vec::new(),
            })
        );
    }

    #[test]
    fn opaque_kinds_cannot_be_written() {
        let node = Node::Opaque(OpaqueNode {
            kind: NodeKind::Monster,
            payload: Vec::new(),
            nodes: Vec::new(),
        });
        let mut buf = Vec::new();
        assert_matches!(
            write_node_fields(&node, &mut buf),
            Err(Error::UnencodableNode(NodeKind::Monster))
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn opaque_node_of_laid_out_kind_cannot_be_written() {
        let node = Node::Opaque(OpaqueNode {
            kind: NodeKind::Town,
            payload: vec![0x01],
            nodes: Vec::new(),
        });
        let mut buf = Vec::new();
        assert_matches!(
            write_node_fields(&node, &mut buf),
            Err(Error::UnencodableNode(NodeKind::Town))
        );
        assert!(buf.is_empty());
    }

    #[test]
    fn legacy_count_byte() {
        let mut catalogue: HashMap<u16, ItemFlags> = HashMap::new();
        catalogue.insert(
            3031,
            ItemFlags {
                stackable: true,
                ..ItemFlags::default()
            },
        );
        let legacy = FieldContext {
            catalogue: &catalogue,
            legacy_counts: true,
        };

        // id 3031, count 0x04, then an action id attribute
        let payload = [0x06, 0xd7, 0x0b, 0x04, 0x04, 0xe8, 0x03];

        let (node, _) = read(&payload, &legacy);
        let Node::Item(item) = assert_ok!(node) else {
            panic!("expected item");
        };
        assert_eq!(item.attributes.count, Some(4));
        assert_eq!(item.attributes.aid, Some(1000));

        // Without the legacy rule the same byte is an action id tag
        let (node, _) = read(&payload, &MODERN);
        let Node::Item(item) = assert_ok!(node) else {
            panic!("expected item");
        };
        assert_eq!(item.attributes.count, None);
        assert_eq!(item.attributes.aid, Some(0xe804));
    }

    #[test]
    fn legacy_rule_without_catalogue_entry() {
        let legacy = FieldContext {
            catalogue: &EmptyCatalogue,
            legacy_counts: true,
        };
        let (node, warnings) = read(&[0x06, 0x64, 0x00], &legacy);
        assert_ok!(node);
        assert_eq!(warnings, vec![Warning::MissingCatalogueEntry { id: 100 }]);
    }

    #[test]
    fn item_count_written_as_attribute() {
        let bytes = write(Item {
            id: 3031,
            attributes: Attributes {
                count: Some(100),
                ..Attributes::default()
            },
            content: Vec::new(),
        });
        assert_eq!(bytes, vec![0x06, 0xd7, 0x0b, 0x0f, 100]);
    }
}
