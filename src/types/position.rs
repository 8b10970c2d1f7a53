use crate::error::Result;
use crate::utils::io::{read_u8, read_u16, write_u8, write_u16};
use std::io::{Read, Write};

/// Absolute map position
///
/// Used by tile areas, waypoints, towns and teleport destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: u16,
    pub y: u16,
    pub z: u8,
}

impl Position {
    /// Size of a position on the wire (x: u16, y: u16, z: u8)
    pub const SIZE: usize = 5;

    pub fn new(x: u16, y: u16, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Read a position from reader
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let x = read_u16(reader)?;
        let y = read_u16(reader)?;
        let z = read_u8(reader)?;
        Ok(Self { x, y, z })
    }

    /// Write position to writer
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_u16(writer, self.x)?;
        write_u16(writer, self.y)?;
        write_u8(writer, self.z)?;
        Ok(())
    }

    /// Offset this position by a tile's in-area coordinates
    ///
    /// Tiles store `x`/`y` relative to their tile area. Wraps on overflow, the
    /// codec does not validate map bounds.
    pub fn offset(&self, dx: u8, dy: u8) -> Self {
        Self {
            x: self.x.wrapping_add(dx as u16),
            y: self.y.wrapping_add(dy as u16),
            z: self.z,
        }
    }
}
