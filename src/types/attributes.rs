use crate::types::Position;
use crate::types::enums::tile_state;

/// Optional attributes attached to map data, tiles, house tiles and items
///
/// Every field is optional. Absent fields are omitted from the wire form
/// entirely rather than written as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Attributes {
    /// Teleport destination
    pub destination: Option<Position>,
    /// Free text description, repeated tags are joined with a space
    pub description: Option<String>,
    pub uid: Option<u16>,
    pub aid: Option<u16>,
    pub rune_charges: Option<u16>,
    pub spawn_file: Option<String>,
    pub text: Option<String>,
    pub house_file: Option<String>,
    pub ext_file: Option<String>,
    /// Ground item id of a tile
    pub tile_id: Option<u16>,
    /// Stack count, also filled by the legacy count byte of version 0 maps
    pub count: Option<u8>,
    pub depot_id: Option<u16>,
    pub house_door_id: Option<u8>,
    pub zones: Option<TileZones>,
    pub duration: Option<i32>,
    pub decaying_state: Option<u8>,
    pub written_date: Option<u32>,
    pub written_by: Option<String>,
    pub sleeper_guid: Option<u32>,
    pub sleep_start: Option<u32>,
    pub charges: Option<u16>,
}

impl Attributes {
    /// `true` if no attribute is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Append a description, joining repeats with a single space
    pub fn push_description(&mut self, value: &str) {
        match &mut self.description {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(value);
            }
            None => self.description = Some(value.to_string()),
        }
    }
}

/// Tile zone flags decoded from the tile flags attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TileZones {
    pub protection: bool,
    pub no_pvp: bool,
    pub no_logout: bool,
    pub pvp_zone: bool,
    /// Unused by current map generations. Always cleared on read and never
    /// written.
    pub refresh: bool,
}

impl TileZones {
    /// Decode from the raw flags value
    pub fn from_bits(bits: u32) -> Self {
        Self {
            protection: bits & tile_state::PROTECTION_ZONE != 0,
            no_pvp: bits & tile_state::NO_PVP != 0,
            no_logout: bits & tile_state::NO_LOGOUT != 0,
            pvp_zone: bits & tile_state::PVP_ZONE != 0,
            refresh: false,
        }
    }

    /// Encode to the raw flags value, without the refresh bit
    pub fn to_bits(&self) -> u32 {
        let mut bits = tile_state::NONE;
        if self.protection {
            bits |= tile_state::PROTECTION_ZONE;
        }
        if self.no_pvp {
            bits |= tile_state::NO_PVP;
        }
        if self.no_logout {
            bits |= tile_state::NO_LOGOUT;
        }
        if self.pvp_zone {
            bits |= tile_state::PVP_ZONE;
        }
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones_from_bits() {
        let zones = TileZones::from_bits(0x0001 | 0x0008);
        assert!(zones.protection);
        assert!(!zones.no_pvp);
        assert!(zones.no_logout);
        assert!(!zones.pvp_zone);
    }

    #[test]
    fn zones_refresh_is_cleared() {
        let zones = TileZones::from_bits(tile_state::REFRESH | tile_state::PVP_ZONE);
        assert!(!zones.refresh);
        assert!(zones.pvp_zone);
        assert_eq!(zones.to_bits(), tile_state::PVP_ZONE);
    }

    #[test]
    fn zones_refresh_is_not_written() {
        let zones = TileZones {
            refresh: true,
            no_pvp: true,
            ..TileZones::default()
        };
        assert_eq!(zones.to_bits(), tile_state::NO_PVP);
    }

    #[test]
    fn push_description() {
        let mut attributes = Attributes::default();
        attributes.push_description("a closed door");
        attributes.push_description("it is locked");
        assert_eq!(
            attributes.description.as_deref(),
            Some("a closed door it is locked")
        );
    }

    #[test]
    fn is_empty() {
        assert!(Attributes::default().is_empty());
        let attributes = Attributes {
            aid: Some(1000),
            ..Attributes::default()
        };
        assert!(!attributes.is_empty());
    }
}
