//! PUBLISH and the acknowledgements of the QoS 1 / QoS 2 flows.

use crate::core::flags::{Flags, QoS};
use crate::core::topic::{TopicId, TopicIdType};
use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{msg_id_packet, BodyReader, PacketBody};
use crate::protocol::return_code::ReturnCode;
use bytes::{BufMut, Bytes, BytesMut};

/// PUBLISH: flags(1), topic id(2), message id(2), data(rest).
///
/// The topic id field is interpreted according to the TopicIdType bits of the
/// flags byte; see [`TopicId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Publish {
    pub duplicate: bool,
    pub qos: QoS,
    pub retain: bool,
    pub topic_id: TopicId,
    /// Zero for QoS 0 and -1
    pub msg_id: u16,
    pub data: Bytes,
}

impl Publish {
    pub fn new(topic_id: TopicId, data: impl Into<Bytes>) -> Self {
        Self {
            topic_id,
            data: data.into(),
            ..Self::default()
        }
    }

    pub const fn topic_id_type(&self) -> TopicIdType {
        self.topic_id.topic_id_type()
    }
}

impl PacketBody for Publish {
    const PACKET_TYPE: PacketType = PacketType::Publish;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        let flags = Flags {
            duplicate: self.duplicate,
            qos: self.qos,
            retain: self.retain,
            topic_id_type: self.topic_id.topic_id_type(),
            ..Flags::default()
        };
        dst.reserve(5 + self.data.len());
        dst.put_u8(flags.encode());
        dst.put_slice(&self.topic_id.to_wire());
        dst.put_u16(self.msg_id);
        dst.put_slice(&self.data);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let flags = Flags::decode(reader.u8()?);
        let raw_topic = reader.topic_id()?;
        let msg_id = reader.u16()?;
        let topic_id = TopicId::from_wire(flags.topic_id_type, raw_topic, Self::PACKET_TYPE)?;
        let data = reader.rest_bytes();
        Ok(Self {
            duplicate: flags.duplicate,
            qos: flags.qos,
            retain: flags.retain,
            topic_id,
            msg_id,
            data,
        })
    }
}

/// PUBACK: topic id(2), message id(2), return code(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Puback {
    pub topic_id: u16,
    pub msg_id: u16,
    pub return_code: ReturnCode,
}

impl PacketBody for Puback {
    const PACKET_TYPE: PacketType = PacketType::Puback;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_u16(self.topic_id);
        dst.put_u16(self.msg_id);
        dst.put_u8(self.return_code.to_wire()?);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let topic_id = reader.u16()?;
        let msg_id = reader.u16()?;
        let return_code = ReturnCode::from(reader.u8()?);
        reader.finish()?;
        Ok(Self {
            topic_id,
            msg_id,
            return_code,
        })
    }
}

msg_id_packet!(
    /// PUBREC: message id(2).
    Pubrec,
    PacketType::Pubrec
);

msg_id_packet!(
    /// PUBREL: message id(2).
    Pubrel,
    PacketType::Pubrel
);

msg_id_packet!(
    /// PUBCOMP: message id(2).
    Pubcomp,
    PacketType::Pubcomp
);
