use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{BodyReader, PacketBody};
use bytes::{BufMut, BytesMut};

/// DISCONNECT: optional sleep duration in seconds(2).
///
/// A client that includes a duration goes to sleep instead of disconnecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disconnect {
    pub duration: Option<u16>,
}

impl Disconnect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleep(duration: u16) -> Self {
        Self {
            duration: Some(duration),
        }
    }
}

impl PacketBody for Disconnect {
    const PACKET_TYPE: PacketType = PacketType::Disconnect;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        if let Some(duration) = self.duration {
            dst.put_u16(duration);
        }
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        if reader.is_empty() {
            return Ok(Self::default());
        }
        let duration = reader.u16()?;
        reader.finish()?;
        Ok(Self::sleep(duration))
    }
}
