//! Gateway discovery: ADVERTISE, SEARCHGW and GWINFO.

use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{BodyReader, PacketBody};
use bytes::{BufMut, Bytes, BytesMut};

/// ADVERTISE: gateway id(1), duration until the next advertisement in seconds(2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advertise {
    pub gateway_id: u8,
    pub duration: u16,
}

impl PacketBody for Advertise {
    const PACKET_TYPE: PacketType = PacketType::Advertise;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_u8(self.gateway_id);
        dst.put_u16(self.duration);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let gateway_id = reader.u8()?;
        let duration = reader.u16()?;
        reader.finish()?;
        Ok(Self {
            gateway_id,
            duration,
        })
    }
}

/// SEARCHGW: broadcast radius(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchGw {
    pub radius: u8,
}

impl PacketBody for SearchGw {
    const PACKET_TYPE: PacketType = PacketType::SearchGw;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_u8(self.radius);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let radius = reader.u8()?;
        reader.finish()?;
        Ok(Self { radius })
    }
}

/// GWINFO: gateway id(1), gateway address(rest).
///
/// The address is only present when a client answers a SEARCHGW on behalf of a
/// gateway; its format depends on the network.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GwInfo {
    pub gateway_id: u8,
    pub gateway_address: Bytes,
}

impl PacketBody for GwInfo {
    const PACKET_TYPE: PacketType = PacketType::GwInfo;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_u8(self.gateway_id);
        dst.put_slice(&self.gateway_address);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let gateway_id = reader.u8()?;
        let gateway_address = reader.rest_bytes();
        Ok(Self {
            gateway_id,
            gateway_address,
        })
    }
}
