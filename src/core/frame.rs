//! # Frame Header
//!
//! Every MQTT-SN packet starts with a length field followed by the type identifier.
//!
//! ```text
//! short form:     | len (1) | type (1) | body ... |          len = 2 + body, <= 255
//! extended form:  | 0x01 | len (2, BE) | type (1) | body ... | len = 4 + body, <= 65535
//! ```
//!
//! The length always counts the whole frame, header included. Encoders pick the short
//! form whenever the frame fits in 255 bytes.

use crate::config::{MAX_FRAME_LENGTH, MAX_SHORT_FRAME_LENGTH};
use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use bytes::{BufMut, BytesMut};

/// Marker byte that announces the 3-byte length field.
pub const EXTENDED_LENGTH_MARKER: u8 = 0x01;

/// Header size of the short form (length + type).
pub const SHORT_HEADER_LEN: usize = 2;

/// Header size of the extended form (marker + length + type).
pub const EXTENDED_HEADER_LEN: usize = 4;

/// A parsed frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Declared total length of the frame
    pub length: usize,
    /// Bytes taken by the length field and the type identifier
    pub header_len: usize,
    /// Raw type identifier, not yet checked against the registry
    pub type_id: u8,
}

impl Header {
    /// Parse the header of a complete frame.
    ///
    /// The declared length must equal `buf.len()`.
    pub fn parse(buf: &[u8]) -> Result<Self, ProtocolError> {
        let (length, extended) = peek_length(buf)?.ok_or(ProtocolError::IncompleteHeader {
            available: buf.len(),
        })?;

        if length != buf.len() {
            return Err(ProtocolError::LengthMismatch {
                declared: length,
                actual: buf.len(),
            });
        }

        let header_len = if extended {
            EXTENDED_HEADER_LEN
        } else {
            SHORT_HEADER_LEN
        };

        Ok(Self {
            length,
            header_len,
            type_id: buf[header_len - 1],
        })
    }

    pub fn is_extended(&self) -> bool {
        self.header_len == EXTENDED_HEADER_LEN
    }

    /// Length of the body that follows the header.
    pub fn body_len(&self) -> usize {
        self.length - self.header_len
    }
}

/// Read the declared frame length without requiring the whole frame.
///
/// Returns `Ok(None)` when `buf` is too short to hold the length field, and the
/// declared length plus whether the extended form is used otherwise. Lengths too
/// small to hold a type identifier are rejected.
pub fn peek_length(buf: &[u8]) -> Result<Option<(usize, bool)>, ProtocolError> {
    match buf.first() {
        None => Ok(None),
        Some(&EXTENDED_LENGTH_MARKER) => {
            if buf.len() < 3 {
                return Ok(None);
            }
            let length = usize::from(u16::from_be_bytes([buf[1], buf[2]]));
            if length < EXTENDED_HEADER_LEN {
                return Err(ProtocolError::InvalidLength(length));
            }
            Ok(Some((length, true)))
        }
        Some(&0) => Err(ProtocolError::InvalidLength(0)),
        Some(&length) => Ok(Some((usize::from(length), false))),
    }
}

/// Total frame length for a body of `body_len` bytes.
pub fn frame_len(body_len: usize) -> Result<usize, ValueError> {
    let short = body_len + SHORT_HEADER_LEN;
    if short <= MAX_SHORT_FRAME_LENGTH {
        return Ok(short);
    }
    let extended = body_len + EXTENDED_HEADER_LEN;
    if extended <= MAX_FRAME_LENGTH {
        Ok(extended)
    } else {
        Err(ValueError::PacketTooLarge {
            size: extended,
            max: MAX_FRAME_LENGTH,
        })
    }
}

/// Append a complete frame to `dst`. Returns the frame length.
pub fn write_frame(type_id: u8, body: &[u8], dst: &mut BytesMut) -> Result<usize, ValueError> {
    let length = frame_len(body.len())?;
    dst.reserve(length);
    if length <= MAX_SHORT_FRAME_LENGTH {
        // frame_len guarantees the value fits
        dst.put_u8(length as u8);
    } else {
        dst.put_u8(EXTENDED_LENGTH_MARKER);
        dst.put_u16(length as u16);
    }
    dst.put_u8(type_id);
    dst.put_slice(body);
    Ok(length)
}

/// Prefix `body` with the length header and type identifier of `packet_type`.
pub fn frame(packet_type: PacketType, body: &[u8]) -> Result<Vec<u8>, ValueError> {
    let mut dst = BytesMut::new();
    write_frame(packet_type.type_id(), body, &mut dst)?;
    Ok(dst.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_frame() {
        let frame = frame(PacketType::Pingreq, &[]).unwrap();
        assert_eq!(frame, vec![0x02, 0x16]);

        let header = Header::parse(&frame).unwrap();
        assert_eq!(header.length, 2);
        assert_eq!(header.type_id, 0x16);
        assert_eq!(header.body_len(), 0);
        assert!(!header.is_extended());
    }

    #[test]
    fn test_extended_frame_boundary() {
        // 253 body bytes still fit the short form
        assert_eq!(frame_len(253), Ok(255));
        // one more switches to the 4-byte header
        assert_eq!(frame_len(254), Ok(258));

        let body = vec![0xAB; 254];
        let frame = frame(PacketType::Publish, &body).unwrap();
        assert_eq!(&frame[..4], &[0x01, 0x01, 0x02, 0x0C]);

        let header = Header::parse(&frame).unwrap();
        assert!(header.is_extended());
        assert_eq!(header.body_len(), 254);
    }

    #[test]
    fn test_too_large_to_frame() {
        assert_eq!(
            frame_len(MAX_FRAME_LENGTH),
            Err(ValueError::PacketTooLarge {
                size: MAX_FRAME_LENGTH + 4,
                max: MAX_FRAME_LENGTH,
            })
        );
        assert_eq!(frame_len(MAX_FRAME_LENGTH - 4), Ok(MAX_FRAME_LENGTH));
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            Header::parse(b"\x02\x18\x34\x35\x36\x37\x38"),
            Err(ProtocolError::LengthMismatch {
                declared: 2,
                actual: 7,
            })
        );
    }

    #[test]
    fn test_incomplete_headers() {
        assert_eq!(
            Header::parse(&[]),
            Err(ProtocolError::IncompleteHeader { available: 0 })
        );
        assert_eq!(
            Header::parse(&[0x01]),
            Err(ProtocolError::IncompleteHeader { available: 1 })
        );
        assert_eq!(
            Header::parse(&[0x01, 0x00]),
            Err(ProtocolError::IncompleteHeader { available: 2 })
        );
    }

    #[test]
    fn test_impossible_lengths() {
        assert_eq!(peek_length(&[0x00]), Err(ProtocolError::InvalidLength(0)));
        assert_eq!(
            peek_length(&[0x01, 0x00, 0x03]),
            Err(ProtocolError::InvalidLength(3))
        );
    }

    #[test]
    fn test_peek_length_partial() {
        assert_eq!(peek_length(&[0x07, 0x0B]), Ok(Some((7, false))));
        assert_eq!(peek_length(&[0x01, 0x01, 0x00]), Ok(Some((256, true))));
        assert_eq!(peek_length(&[0x01, 0x01]), Ok(None));
    }
}
