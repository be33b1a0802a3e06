use crate::core::topic::TopicIdType;
use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{BodyReader, PacketBody};
use crate::protocol::return_code::ReturnCode;
use bytes::{BufMut, BytesMut};

/// REGISTER: topic id(2), message id(2), topic name(rest).
///
/// A client sends it with topic id 0 to ask for an id; a gateway sends it to tell a
/// client which id it will use for a topic name. The id is always a normal id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Register {
    pub topic_id: u16,
    pub msg_id: u16,
    pub topic_name: String,
}

impl Register {
    pub fn new(topic_id: u16, msg_id: u16, topic_name: impl Into<String>) -> Self {
        Self {
            topic_id,
            msg_id,
            topic_name: topic_name.into(),
        }
    }

    pub const fn topic_id_type(&self) -> TopicIdType {
        TopicIdType::Normal
    }
}

impl PacketBody for Register {
    const PACKET_TYPE: PacketType = PacketType::Register;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.reserve(4 + self.topic_name.len());
        dst.put_u16(self.topic_id);
        dst.put_u16(self.msg_id);
        dst.put_slice(self.topic_name.as_bytes());
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let topic_id = reader.u16()?;
        let msg_id = reader.u16()?;
        let topic_name = reader.rest_str("topic name")?;
        Ok(Self {
            topic_id,
            msg_id,
            topic_name,
        })
    }
}

/// REGACK: topic id(2), message id(2), return code(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regack {
    pub topic_id: u16,
    pub msg_id: u16,
    pub return_code: ReturnCode,
}

impl Regack {
    pub const fn topic_id_type(&self) -> TopicIdType {
        TopicIdType::Normal
    }
}

impl PacketBody for Regack {
    const PACKET_TYPE: PacketType = PacketType::Regack;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_body() {
        let register = Register::new(0x01, 0x01, "test");
        assert_eq!(&register.body_bytes().unwrap()[..], b"\x00\x01\x00\x01test");
    }

    #[test]
    fn test_register_allows_empty_topic_name() {
        let register = Register::decode_body(&[0x00, 0x00, 0x00, 0x09]).unwrap();
        assert_eq!(register.msg_id, 9);
        assert!(register.topic_name.is_empty());
        assert_eq!(register.topic_id_type(), TopicIdType::Normal);
    }

    #[test]
    fn test_regack_truncated() {
        assert_eq!(
            Regack::decode_body(&[0x00, 0x01, 0x00, 0x02]),
            Err(ProtocolError::Truncated {
                packet_type: PacketType::Regack,
                needed: 5,
                available: 4,
            })
        );
    }

    #[test]
    fn test_regack_raw_return_code() {
        let regack = Regack::decode_body(&[0x00, 0x01, 0x00, 0x02, 0x03]).unwrap();
        assert_eq!(u8::from(regack.return_code), 0x03);
    }
}
