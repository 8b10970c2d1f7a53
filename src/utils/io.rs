//! Little-endian primitives and length-prefixed strings
//!
//! Every multi-byte integer in an OTBM payload is little-endian. Strings are
//! a u16 byte length followed by the raw bytes, no terminator.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::io::{Read, Write};

/// Read u8
pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read little-endian u16
pub fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read little-endian u32
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read little-endian i32
pub fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read `len` bytes and decode them as a string
pub fn read_string<R: Read>(reader: &mut R, len: usize) -> Result<String> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(decode_string(&buf).into_owned())
}

/// Decode raw string bytes
///
/// Map strings are single-byte text. Windows-1252 is ASCII compatible and
/// maps every byte to a character, so any payload decodes and re-encodes to
/// the same bytes.
pub fn decode_string(bytes: &[u8]) -> Cow<'_, str> {
    encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes).0
}

/// Encode a string to its single-byte wire form
///
/// Fails on characters Windows-1252 has no byte for.
pub fn encode_string(value: &str) -> Result<Cow<'_, [u8]>> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1252.encode(value);
    if had_errors {
        return Err(Error::UnencodableString {
            value: value.to_string(),
        });
    }
    Ok(bytes)
}

/// Write u8
pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<()> {
    writer.write_all(&[value])?;
    Ok(())
}

/// Write little-endian u16
pub fn write_u16<W: Write>(writer: &mut W, value: u16) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write little-endian u32
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write little-endian i32
pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write a u16 length prefix followed by the encoded string bytes
pub fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<()> {
    let bytes = encode_string(value)?;
    let len = u16::try_from(bytes.len()).map_err(|_| Error::StringTooLong { len: bytes.len() })?;
    write_u16(writer, len)?;
    writer.write_all(&bytes)?;
    Ok(())
}
