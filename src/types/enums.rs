/// Node kind discriminator (first byte of every node payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    MapHeader,
    RootV1,
    MapData,
    ItemDef,
    TileArea,
    Tile,
    Item,
    TileSquare,
    TileRef,
    Spawns,
    SpawnArea,
    Monster,
    Towns,
    Town,
    HouseTile,
    Waypoints,
    Waypoint,
}

impl NodeKind {
    /// Parse from a node kind byte, `None` for bytes outside the enumeration
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(NodeKind::MapHeader),
            0x01 => Some(NodeKind::RootV1),
            0x02 => Some(NodeKind::MapData),
            0x03 => Some(NodeKind::ItemDef),
            0x04 => Some(NodeKind::TileArea),
            0x05 => Some(NodeKind::Tile),
            0x06 => Some(NodeKind::Item),
            0x07 => Some(NodeKind::TileSquare),
            0x08 => Some(NodeKind::TileRef),
            0x09 => Some(NodeKind::Spawns),
            0x0a => Some(NodeKind::SpawnArea),
            0x0b => Some(NodeKind::Monster),
            0x0c => Some(NodeKind::Towns),
            0x0d => Some(NodeKind::Town),
            0x0e => Some(NodeKind::HouseTile),
            0x0f => Some(NodeKind::Waypoints),
            0x10 => Some(NodeKind::Waypoint),
            _ => None,
        }
    }

    /// Convert to the wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            NodeKind::MapHeader => 0x00,
            NodeKind::RootV1 => 0x01,
            NodeKind::MapData => 0x02,
            NodeKind::ItemDef => 0x03,
            NodeKind::TileArea => 0x04,
            NodeKind::Tile => 0x05,
            NodeKind::Item => 0x06,
            NodeKind::TileSquare => 0x07,
            NodeKind::TileRef => 0x08,
            NodeKind::Spawns => 0x09,
            NodeKind::SpawnArea => 0x0a,
            NodeKind::Monster => 0x0b,
            NodeKind::Towns => 0x0c,
            NodeKind::Town => 0x0d,
            NodeKind::HouseTile => 0x0e,
            NodeKind::Waypoints => 0x0f,
            NodeKind::Waypoint => 0x10,
        }
    }

    /// Whether the codec knows a fixed-field layout for this kind
    ///
    /// Kinds without a layout are decoded as opaque nodes and cannot be
    /// encoded.
    pub fn has_layout(self) -> bool {
        matches!(
            self,
            NodeKind::MapHeader
                | NodeKind::MapData
                | NodeKind::TileArea
                | NodeKind::Tile
                | NodeKind::Item
                | NodeKind::Towns
                | NodeKind::Town
                | NodeKind::HouseTile
                | NodeKind::Waypoints
                | NodeKind::Waypoint
        )
    }
}

/// Attribute tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeTag {
    Description,
    ExtFile,
    TileFlags,
    ActionId,
    UniqueId,
    Text,
    /// Alternate text tag, decoded into `text`
    Desc,
    TeleDest,
    Item,
    DepotId,
    ExtSpawnFile,
    RuneCharges,
    ExtHouseFile,
    HouseDoorId,
    Count,
    Duration,
    DecayingState,
    WrittenDate,
    WrittenBy,
    SleeperGuid,
    SleepStart,
    Charges,
}

impl AttributeTag {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(AttributeTag::Description),
            0x02 => Some(AttributeTag::ExtFile),
            0x03 => Some(AttributeTag::TileFlags),
            0x04 => Some(AttributeTag::ActionId),
            0x05 => Some(AttributeTag::UniqueId),
            0x06 => Some(AttributeTag::Text),
            0x07 => Some(AttributeTag::Desc),
            0x08 => Some(AttributeTag::TeleDest),
            0x09 => Some(AttributeTag::Item),
            0x0a => Some(AttributeTag::DepotId),
            0x0b => Some(AttributeTag::ExtSpawnFile),
            0x0c => Some(AttributeTag::RuneCharges),
            0x0d => Some(AttributeTag::ExtHouseFile),
            0x0e => Some(AttributeTag::HouseDoorId),
            0x0f => Some(AttributeTag::Count),
            0x10 => Some(AttributeTag::Duration),
            0x11 => Some(AttributeTag::DecayingState),
            0x12 => Some(AttributeTag::WrittenDate),
            0x13 => Some(AttributeTag::WrittenBy),
            0x14 => Some(AttributeTag::SleeperGuid),
            0x15 => Some(AttributeTag::SleepStart),
            0x16 => Some(AttributeTag::Charges),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            AttributeTag::Description => 0x01,
            AttributeTag::ExtFile => 0x02,
            AttributeTag::TileFlags => 0x03,
            AttributeTag::ActionId => 0x04,
            AttributeTag::UniqueId => 0x05,
            AttributeTag::Text => 0x06,
            AttributeTag::Desc => 0x07,
            AttributeTag::TeleDest => 0x08,
            AttributeTag::Item => 0x09,
            AttributeTag::DepotId => 0x0a,
            AttributeTag::ExtSpawnFile => 0x0b,
            AttributeTag::RuneCharges => 0x0c,
            AttributeTag::ExtHouseFile => 0x0d,
            AttributeTag::HouseDoorId => 0x0e,
            AttributeTag::Count => 0x0f,
            AttributeTag::Duration => 0x10,
            AttributeTag::DecayingState => 0x11,
            AttributeTag::WrittenDate => 0x12,
            AttributeTag::WrittenBy => 0x13,
            AttributeTag::SleeperGuid => 0x14,
            AttributeTag::SleepStart => 0x15,
            AttributeTag::Charges => 0x16,
        }
    }

    /// Size of the value in bytes, `None` for length-prefixed strings
    pub fn value_size(self) -> Option<usize> {
        match self {
            AttributeTag::Description
            | AttributeTag::ExtFile
            | AttributeTag::Text
            | AttributeTag::Desc
            | AttributeTag::ExtSpawnFile
            | AttributeTag::ExtHouseFile
            | AttributeTag::WrittenBy => None,
            AttributeTag::HouseDoorId | AttributeTag::Count | AttributeTag::DecayingState => {
                Some(1)
            }
            AttributeTag::ActionId
            | AttributeTag::UniqueId
            | AttributeTag::Item
            | AttributeTag::DepotId
            | AttributeTag::RuneCharges
            | AttributeTag::Charges => Some(2),
            AttributeTag::TileFlags
            | AttributeTag::Duration
            | AttributeTag::WrittenDate
            | AttributeTag::SleeperGuid
            | AttributeTag::SleepStart => Some(4),
            AttributeTag::TeleDest => Some(5),
        }
    }
}

/// Tile state bits carried by the tile flags attribute
pub mod tile_state {
    pub const NONE: u32 = 0x0000;
    pub const PROTECTION_ZONE: u32 = 0x0001;
    pub const NO_PVP: u32 = 0x0004;
    pub const NO_LOGOUT: u32 = 0x0008;
    pub const PVP_ZONE: u32 = 0x0010;
    pub const REFRESH: u32 = 0x0020;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_bytes() {
        for byte in 0x00..=0x10 {
            let kind = NodeKind::from_byte(byte).expect("known kind");
            assert_eq!(kind.to_byte(), byte);
        }
        assert_eq!(NodeKind::from_byte(0x11), None);
        assert_eq!(NodeKind::from_byte(0xfe), None);
    }

    #[test]
    fn attribute_tag_bytes() {
        assert_eq!(AttributeTag::from_byte(0x00), None);
        for byte in 0x01..=0x16 {
            let tag = AttributeTag::from_byte(byte).expect("known tag");
            assert_eq!(tag.to_byte(), byte);
        }
        assert_eq!(AttributeTag::from_byte(0x17), None);
    }

    #[test]
    fn layouts() {
        assert!(NodeKind::Town.has_layout());
        assert!(!NodeKind::Spawns.has_layout());
        assert!(!NodeKind::RootV1.has_layout());
    }

    #[test]
    fn value_sizes() {
        assert_eq!(AttributeTag::TeleDest.value_size(), Some(5));
        assert_eq!(AttributeTag::WrittenBy.value_size(), None);
        assert_eq!(AttributeTag::Duration.value_size(), Some(4));
    }
}
