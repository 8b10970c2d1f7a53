use crate::types::{Attributes, NodeKind, Position};

/// One typed record of the map tree
///
/// Each variant owns its fixed fields, its optional attributes and its
/// children. Children keep the order in which they appear in the stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Node {
    MapHeader(MapHeader),
    MapData(MapData),
    TileArea(TileArea),
    Tile(Tile),
    HouseTile(HouseTile),
    Item(Item),
    Waypoints(Waypoints),
    Waypoint(Waypoint),
    Towns(Towns),
    Town(Town),
    /// A known kind without a fixed-field layout, kept as raw payload
    Opaque(OpaqueNode),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::MapHeader(_) => NodeKind::MapHeader,
            Node::MapData(_) => NodeKind::MapData,
            Node::TileArea(_) => NodeKind::TileArea,
            Node::Tile(_) => NodeKind::Tile,
            Node::HouseTile(_) => NodeKind::HouseTile,
            Node::Item(_) => NodeKind::Item,
            Node::Waypoints(_) => NodeKind::Waypoints,
            Node::Waypoint(_) => NodeKind::Waypoint,
            Node::Towns(_) => NodeKind::Towns,
            Node::Town(_) => NodeKind::Town,
            Node::Opaque(node) => node.kind,
        }
    }

    /// Children in stream order, empty for terminal kinds
    pub fn children(&self) -> &[Node] {
        match self {
            Node::MapHeader(node) => &node.nodes,
            Node::MapData(node) => &node.features,
            Node::TileArea(node) => &node.tiles,
            Node::Tile(node) => &node.items,
            Node::HouseTile(node) => &node.items,
            Node::Item(node) => &node.content,
            Node::Waypoints(node) => &node.waypoints,
            Node::Towns(node) => &node.towns,
            Node::Opaque(node) => &node.nodes,
            Node::Waypoint(_) | Node::Town(_) => &[],
        }
    }

    /// Attributes for the kinds that carry them
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::MapData(node) => Some(&node.attributes),
            Node::Tile(node) => Some(&node.attributes),
            Node::HouseTile(node) => Some(&node.attributes),
            Node::Item(node) => Some(&node.attributes),
            _ => None,
        }
    }

    /// Assign decoded children to the kind's slot
    ///
    /// Returns the children that had no slot to go into (terminal kinds).
    pub(crate) fn with_children(mut self, children: Vec<Node>) -> (Self, Vec<Node>) {
        match self.children_mut() {
            Some(slot) => {
                *slot = children;
                (self, Vec::new())
            }
            None => (self, children),
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::MapHeader(node) => Some(&mut node.nodes),
            Node::MapData(node) => Some(&mut node.features),
            Node::TileArea(node) => Some(&mut node.tiles),
            Node::Tile(node) => Some(&mut node.items),
            Node::HouseTile(node) => Some(&mut node.items),
            Node::Item(node) => Some(&mut node.content),
            Node::Waypoints(node) => Some(&mut node.waypoints),
            Node::Towns(node) => Some(&mut node.towns),
            Node::Opaque(node) => Some(&mut node.nodes),
            Node::Waypoint(_) | Node::Town(_) => None,
        }
    }

    /// Count this node and all of its descendants
    pub fn count_nodes(&self) -> usize {
        1 + self.children().iter().map(Node::count_nodes).sum::<usize>()
    }
}

/// Root node: format version, map size and item catalogue version
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MapHeader {
    pub version: u32,
    pub width: u16,
    pub height: u16,
    pub items_major_version: u32,
    pub items_minor_version: u32,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapData {
    pub attributes: Attributes,
    pub features: Vec<Node>,
}

/// Block of tiles sharing a base position
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileArea {
    pub position: Position,
    pub tiles: Vec<Node>,
}

/// Tile at an offset inside its parent tile area
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub x: u8,
    pub y: u8,
    pub attributes: Attributes,
    pub items: Vec<Node>,
}

impl Tile {
    /// Absolute position given the parent area's base position
    pub fn position(&self, area: Position) -> Position {
        area.offset(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HouseTile {
    pub x: u8,
    pub y: u8,
    pub house_id: u32,
    pub attributes: Attributes,
    pub items: Vec<Node>,
}

impl HouseTile {
    pub fn position(&self, area: Position) -> Position {
        area.offset(self.x, self.y)
    }
}

/// Item placed on a tile or inside a container item
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: u16,
    pub attributes: Attributes,
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoints {
    pub waypoints: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Towns {
    pub towns: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Town {
    pub town_id: u32,
    pub name: String,
    /// Temple position
    pub position: Position,
}

/// Node of a kind the codec passes through without interpreting
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpaqueNode {
    pub kind: NodeKind,
    /// Unescaped payload following the kind byte
    pub payload: Vec<u8>,
    pub nodes: Vec<Node>,
}

macro_rules! impl_from_for_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_for_node! {
    MapHeader => MapHeader,
    MapData => MapData,
    TileArea => TileArea,
    Tile => Tile,
    HouseTile => HouseTile,
    Item => Item,
    Waypoints => Waypoints,
    Waypoint => Waypoint,
    Towns => Towns,
    Town => Town,
    OpaqueNode => Opaque,
}
