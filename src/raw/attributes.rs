//! Tag-length-value attribute codec
//!
//! Attributes follow a node's fixed fields up to the end of its own payload.
//! Each one is a tag byte followed by a value whose shape depends on the tag.

use crate::diagnostics::Diagnostics;
use crate::error::{Result, Warning};
use crate::types::{AttributeTag, Attributes, Position, TileZones};
use crate::utils::io::{
    read_i32, read_string, read_u8, read_u16, read_u32, write_i32, write_string, write_u8,
    write_u16, write_u32,
};
use std::io::{Cursor, Write};

/// Read attributes until `data` is exhausted
///
/// Never fails. Anomalies stop attribute reading for this node, are reported
/// to `diagnostics` and leave the attributes parsed so far in place.
pub fn read_attributes(data: &[u8], diagnostics: &mut dyn Diagnostics) -> Attributes {
    let mut attributes = Attributes::default();
    let mut cursor = Cursor::new(data);

    while let Ok(byte) = read_u8(&mut cursor) {
        let remaining = remaining(&cursor);

        // Zero tag is padding. A tag with nothing after it ends the list too.
        if byte == 0 || remaining == 0 {
            break;
        }

        let Some(tag) = AttributeTag::from_byte(byte) else {
            diagnostics.report(Warning::UnknownAttribute {
                tag: byte,
                remaining,
            });
            break;
        };

        let needed = value_len(tag, &cursor);
        if needed > remaining || read_value(&mut cursor, tag, &mut attributes).is_err() {
            diagnostics.report(Warning::TruncatedAttribute {
                tag,
                needed,
                remaining,
            });
            break;
        }
    }

    attributes
}

fn remaining(cursor: &Cursor<&[u8]>) -> usize {
    cursor.get_ref().len().saturating_sub(cursor.position() as usize)
}

/// Bytes the value of `tag` occupies, including a string's length prefix
fn value_len(tag: AttributeTag, cursor: &Cursor<&[u8]>) -> usize {
    if let Some(size) = tag.value_size() {
        return size;
    }

    let rest = &cursor.get_ref()[cursor.position() as usize..];
    match rest {
        [lo, hi, ..] => 2 + u16::from_le_bytes([*lo, *hi]) as usize,
        _ => 2,
    }
}

fn read_value(
    cursor: &mut Cursor<&[u8]>,
    tag: AttributeTag,
    attributes: &mut Attributes,
) -> Result<()> {
    match tag {
        AttributeTag::Description => {
            let value = read_prefixed(cursor)?;
            if !value.is_empty() {
                attributes.push_description(&value);
            }
        }
        AttributeTag::Text | AttributeTag::Desc => attributes.text = Some(read_prefixed(cursor)?),
        AttributeTag::ExtFile => attributes.ext_file = Some(read_prefixed(cursor)?),
        AttributeTag::ExtSpawnFile => attributes.spawn_file = Some(read_prefixed(cursor)?),
        AttributeTag::ExtHouseFile => attributes.house_file = Some(read_prefixed(cursor)?),
        AttributeTag::WrittenBy => attributes.written_by = Some(read_prefixed(cursor)?),
        AttributeTag::TileFlags => attributes.zones = Some(TileZones::from_bits(read_u32(cursor)?)),
        AttributeTag::ActionId => attributes.aid = Some(read_u16(cursor)?),
        AttributeTag::UniqueId => attributes.uid = Some(read_u16(cursor)?),
        AttributeTag::TeleDest => attributes.destination = Some(Position::read(cursor)?),
        AttributeTag::Item => attributes.tile_id = Some(read_u16(cursor)?),
        AttributeTag::DepotId => attributes.depot_id = Some(read_u16(cursor)?),
        AttributeTag::RuneCharges => attributes.rune_charges = Some(read_u16(cursor)?),
        AttributeTag::HouseDoorId => attributes.house_door_id = Some(read_u8(cursor)?),
        AttributeTag::Count => attributes.count = Some(read_u8(cursor)?),
        AttributeTag::Duration => attributes.duration = Some(read_i32(cursor)?),
        AttributeTag::DecayingState => attributes.decaying_state = Some(read_u8(cursor)?),
        AttributeTag::WrittenDate => attributes.written_date = Some(read_u32(cursor)?),
        AttributeTag::SleeperGuid => attributes.sleeper_guid = Some(read_u32(cursor)?),
        AttributeTag::SleepStart => attributes.sleep_start = Some(read_u32(cursor)?),
        AttributeTag::Charges => attributes.charges = Some(read_u16(cursor)?),
    }
    Ok(())
}

fn read_prefixed(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    let len = read_u16(cursor)? as usize;
    read_string(cursor, len)
}

/// Write all present attributes in a fixed order
///
/// The order does not follow the order the attributes were read in, so
/// re-encoding is only semantically equivalent to the source bytes.
pub fn write_attributes<W: Write>(attributes: &Attributes, writer: &mut W) -> Result<()> {
    if let Some(destination) = &attributes.destination {
        write_tag(writer, AttributeTag::TeleDest)?;
        destination.write(writer)?;
    }
    // Empty descriptions are skipped on read, so they are never written
    if let Some(description) = attributes.description.as_deref().filter(|d| !d.is_empty()) {
        write_tag(writer, AttributeTag::Description)?;
        write_string(writer, description)?;
    }
    if let Some(uid) = attributes.uid {
        write_tag(writer, AttributeTag::UniqueId)?;
        write_u16(writer, uid)?;
    }
    if let Some(aid) = attributes.aid {
        write_tag(writer, AttributeTag::ActionId)?;
        write_u16(writer, aid)?;
    }
    if let Some(charges) = attributes.rune_charges {
        write_tag(writer, AttributeTag::RuneCharges)?;
        write_u16(writer, charges)?;
    }
    if let Some(file) = &attributes.spawn_file {
        write_tag(writer, AttributeTag::ExtSpawnFile)?;
        write_string(writer, file)?;
    }
    if let Some(text) = &attributes.text {
        write_tag(writer, AttributeTag::Text)?;
        write_string(writer, text)?;
    }
    if let Some(file) = &attributes.house_file {
        write_tag(writer, AttributeTag::ExtHouseFile)?;
        write_string(writer, file)?;
    }
    if let Some(file) = &attributes.ext_file {
        write_tag(writer, AttributeTag::ExtFile)?;
        write_string(writer, file)?;
    }
    if let Some(tile_id) = attributes.tile_id {
        write_tag(writer, AttributeTag::Item)?;
        write_u16(writer, tile_id)?;
    }
    // Also carries the legacy count byte, which is never written back as a fixed field
    if let Some(count) = attributes.count.filter(|&count| count != 0) {
        write_tag(writer, AttributeTag::Count)?;
        write_u8(writer, count)?;
    }
    if let Some(depot_id) = attributes.depot_id {
        write_tag(writer, AttributeTag::DepotId)?;
        write_u16(writer, depot_id)?;
    }
    if let Some(door_id) = attributes.house_door_id {
        write_tag(writer, AttributeTag::HouseDoorId)?;
        write_u8(writer, door_id)?;
    }
    if let Some(zones) = &attributes.zones {
        write_tag(writer, AttributeTag::TileFlags)?;
        write_u32(writer, zones.to_bits())?;
    }
    if let Some(duration) = attributes.duration {
        write_tag(writer, AttributeTag::Duration)?;
        write_i32(writer, duration)?;
    }
    if let Some(state) = attributes.decaying_state {
        write_tag(writer, AttributeTag::DecayingState)?;
        write_u8(writer, state)?;
    }
    if let Some(date) = attributes.written_date {
        write_tag(writer, AttributeTag::WrittenDate)?;
        write_u32(writer, date)?;
    }
    if let Some(author) = &attributes.written_by {
        write_tag(writer, AttributeTag::WrittenBy)?;
        write_string(writer, author)?;
    }
    if let Some(guid) = attributes.sleeper_guid {
        write_tag(writer, AttributeTag::SleeperGuid)?;
        write_u32(writer, guid)?;
    }
    if let Some(start) = attributes.sleep_start {
        write_tag(writer, AttributeTag::SleepStart)?;
        write_u32(writer, start)?;
    }
    if let Some(charges) = attributes.charges {
        write_tag(writer, AttributeTag::Charges)?;
        write_u16(writer, charges)?;
    }
    Ok(())
}

fn write_tag<W: Write>(writer: &mut W, tag: AttributeTag) -> Result<()> {
    write_u8(writer, tag.to_byte())
}
