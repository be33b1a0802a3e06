use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{empty_packet, BodyReader, PacketBody};
use bytes::{BufMut, BytesMut};

/// PINGREQ: optional client id(rest).
///
/// A sleeping client includes its client id to ask the gateway for buffered messages.
/// `Some` with an empty id is rejected on encode, as it would parse back as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pingreq {
    pub client_id: Option<String>,
}

impl Pingreq {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client_id(client_id: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
        }
    }
}

impl PacketBody for Pingreq {
    const PACKET_TYPE: PacketType = PacketType::Pingreq;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        if let Some(client_id) = &self.client_id {
            if client_id.is_empty() {
                return Err(ValueError::MissingClientId);
            }
            dst.put_slice(client_id.as_bytes());
        }
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        if reader.is_empty() {
            return Ok(Self::default());
        }
        Ok(Self {
            client_id: Some(reader.rest_str("client identifier")?),
        })
    }
}

empty_packet!(
    /// PINGRESP: no body.
    Pingresp,
    PacketType::Pingresp
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pingreq() {
        assert!(Pingreq::new().body_bytes().unwrap().is_empty());
        assert_eq!(Pingreq::decode_body(&[]).unwrap(), Pingreq::new());
    }

    #[test]
    fn test_sleeping_client_pingreq() {
        let ping = Pingreq::with_client_id("sensor-7");
        assert_eq!(&ping.body_bytes().unwrap()[..], b"sensor-7");
        assert_eq!(Pingreq::decode_body(b"sensor-7").unwrap(), ping);
    }

    #[test]
    fn test_sleeping_client_needs_a_client_id() {
        assert_eq!(
            Pingreq::with_client_id("").body_bytes(),
            Err(ValueError::MissingClientId)
        );
    }

    #[test]
    fn test_pingresp_has_no_body() {
        assert_eq!(Pingresp.type_id(), 0x17);
        assert!(matches!(
            Pingresp::decode_body(b"x"),
            Err(ProtocolError::TrailingBytes { .. })
        ));
    }
}
