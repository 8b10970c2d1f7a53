//! Byte stuffing for node payloads
//!
//! Three byte values frame the node tree. Literal occurrences inside a node's
//! own payload are prefixed with [`ESCAPE`].

/// Marks the following byte as literal data
pub const ESCAPE: u8 = 0xFD;

/// Opens a node
pub const NODE_START: u8 = 0xFE;

/// Closes a node
pub const NODE_END: u8 = 0xFF;

/// Whether `byte` is one of the three reserved control bytes
#[inline]
pub fn is_control(byte: u8) -> bool {
    matches!(byte, ESCAPE | NODE_START | NODE_END)
}

/// Escape a node's own payload
///
/// Must be applied exactly once, before the payload is wrapped. Child spans
/// are already escaped and must not go through here again.
pub fn escape(payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + payload.len() / 16);
    escape_into(payload, &mut out);
    out
}

/// Escape `payload`, appending to `out`
pub fn escape_into(payload: &[u8], out: &mut Vec<u8>) {
    for &byte in payload {
        if is_control(byte) {
            out.push(ESCAPE);
        }
        out.push(byte);
    }
}

/// Remove escape bytes from a raw own-payload span
///
/// Every [`ESCAPE`] is dropped and the byte after it is kept verbatim, so an
/// escaped escape byte survives as a single literal.
pub fn unescape(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut bytes = raw.iter().copied();
    while let Some(byte) = bytes.next() {
        if byte == ESCAPE {
            match bytes.next() {
                Some(literal) => out.push(literal),
                None => break,
            }
        } else {
            out.push(byte);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_plain_payload() {
        assert_eq!(escape(&[0x05, 0x01, 0x02]), vec![0x05, 0x01, 0x02]);
    }

    #[test]
    fn escape_control_bytes() {
        assert_eq!(
            escape(&[0x06, 0xFD, 0x00, 0xFE, 0xFF]),
            vec![0x06, 0xFD, 0xFD, 0x00, 0xFD, 0xFE, 0xFD, 0xFF]
        );
    }

    #[test]
    fn unescape_removes_markers() {
        assert_eq!(
            unescape(&[0x06, 0xFD, 0xFD, 0x00, 0xFD, 0xFE, 0xFD, 0xFF]),
            vec![0x06, 0xFD, 0x00, 0xFE, 0xFF]
        );
    }

    #[test]
    fn unescape_escape_is_identity() {
        let payloads: [&[u8]; 6] = [
            &[],
            &[0xFD],
            &[0xFE, 0xFE, 0xFE],
            &[0xFF, 0x00, 0xFD, 0xFD, 0x10],
            &[0x01, 0x02, 0x03],
            &[0xFD, 0xFE, 0xFF, 0xFD, 0xFE, 0xFF],
        ];

        for payload in payloads {
            assert_eq!(unescape(&escape(payload)), payload, "payload {payload:02X?}");
        }

        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(unescape(&escape(&all)), all);
    }

    #[test]
    fn escaped_length() {
        let payload = [0xFD, 0x00, 0xFE, 0xFF];
        assert_eq!(escape(&payload).len(), payload.len() + 3);
    }
}
