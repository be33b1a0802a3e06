//! SUBSCRIBE, SUBACK, UNSUBSCRIBE and UNSUBACK.

use crate::core::flags::{Flags, QoS};
use crate::core::topic::{TopicId, TopicIdType};
use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{msg_id_packet, BodyReader, PacketBody};
use crate::protocol::return_code::ReturnCode;
use bytes::{BufMut, BytesMut};

/// The topic named by a SUBSCRIBE or UNSUBSCRIBE.
///
/// A full topic name (which may contain wildcards) is sent with the Normal topic id
/// type. Predefined ids and short codes are sent in the 2-byte topic id field.
/// Normal numeric ids cannot be subscribed to directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionTopic {
    Name(String),
    Id(TopicId),
}

impl Default for SubscriptionTopic {
    fn default() -> Self {
        SubscriptionTopic::Name(String::new())
    }
}

impl SubscriptionTopic {
    pub const fn topic_id_type(&self) -> TopicIdType {
        match self {
            SubscriptionTopic::Name(_) => TopicIdType::Normal,
            SubscriptionTopic::Id(id) => id.topic_id_type(),
        }
    }

    fn encode(&self, packet_type: PacketType, dst: &mut BytesMut) -> Result<(), ValueError> {
        match self {
            SubscriptionTopic::Name(name) => dst.put_slice(name.as_bytes()),
            SubscriptionTopic::Id(TopicId::Normal(_)) => {
                return Err(ValueError::UnsupportedTopicReference {
                    packet_type,
                    topic_id_type: TopicIdType::Normal,
                })
            }
            SubscriptionTopic::Id(id) => dst.put_slice(&id.to_wire()),
        }
        Ok(())
    }

    fn decode(
        topic_id_type: TopicIdType,
        mut reader: BodyReader<'_>,
        packet_type: PacketType,
    ) -> Result<Self, ProtocolError> {
        match topic_id_type {
            TopicIdType::Normal => Ok(SubscriptionTopic::Name(reader.rest_str("topic name")?)),
            TopicIdType::Reserved => Err(ProtocolError::ReservedTopicIdType(packet_type)),
            topic_id_type => {
                let raw = reader.topic_id()?;
                reader.finish()?;
                Ok(SubscriptionTopic::Id(TopicId::from_wire(
                    topic_id_type,
                    raw,
                    packet_type,
                )?))
            }
        }
    }
}

impl From<TopicId> for SubscriptionTopic {
    fn from(id: TopicId) -> Self {
        SubscriptionTopic::Id(id)
    }
}

impl From<&str> for SubscriptionTopic {
    fn from(name: &str) -> Self {
        SubscriptionTopic::Name(name.to_owned())
    }
}

impl From<String> for SubscriptionTopic {
    fn from(name: String) -> Self {
        SubscriptionTopic::Name(name)
    }
}

/// SUBSCRIBE: flags(1), message id(2), topic name(rest) or topic id(2).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Subscribe {
    pub duplicate: bool,
    /// Requested QoS
    pub qos: QoS,
    pub msg_id: u16,
    pub topic: SubscriptionTopic,
}

impl Subscribe {
    pub fn new(msg_id: u16, topic: impl Into<SubscriptionTopic>) -> Self {
        Self {
            msg_id,
            topic: topic.into(),
            ..Self::default()
        }
    }

    pub const fn topic_id_type(&self) -> TopicIdType {
        self.topic.topic_id_type()
    }

    pub fn topic_name(&self) -> Option<&str> {
        match &self.topic {
            SubscriptionTopic::Name(name) => Some(name),
            SubscriptionTopic::Id(_) => None,
        }
    }

    pub fn topic_id(&self) -> Option<TopicId> {
        match self.topic {
            SubscriptionTopic::Id(id) => Some(id),
            SubscriptionTopic::Name(_) => None,
        }
    }
}

impl PacketBody for Subscribe {
    const PACKET_TYPE: PacketType = PacketType::Subscribe;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        let flags = Flags {
            duplicate: self.duplicate,
            qos: self.qos,
            topic_id_type: self.topic.topic_id_type(),
            ..Flags::default()
        };
        dst.put_u8(flags.encode());
        dst.put_u16(self.msg_id);
        self.topic.encode(Self::PACKET_TYPE, dst)
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let flags = Flags::decode(reader.u8()?);
        let msg_id = reader.u16()?;
        let topic = SubscriptionTopic::decode(flags.topic_id_type, reader, Self::PACKET_TYPE)?;
        Ok(Self {
            duplicate: flags.duplicate,
            qos: flags.qos,
            msg_id,
            topic,
        })
    }
}

/// SUBACK: flags(1), topic id(2), message id(2), return code(1).
///
/// The flags byte carries the granted QoS and the topic id type. The topic id is the
/// normal id assigned to a topic name, or 0 when the subscription used a short or
/// predefined id. It is kept as a plain number whatever the type bits say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Suback {
    /// Granted QoS
    pub qos: QoS,
    pub topic_id_type: TopicIdType,
    pub topic_id: u16,
    pub msg_id: u16,
    pub return_code: ReturnCode,
}

impl Suback {
    pub fn new(msg_id: u16, topic_id: u16, return_code: ReturnCode) -> Self {
        Self {
            msg_id,
            topic_id,
            return_code,
            ..Self::default()
        }
    }
}

impl PacketBody for Suback {
    const PACKET_TYPE: PacketType = PacketType::Suback;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        let flags = Flags {
            qos: self.qos,
            topic_id_type: self.topic_id_type,
            ..Flags::default()
        };
        dst.put_u8(flags.encode());
        dst.put_u16(self.topic_id);
        dst.put_u16(self.msg_id);
        dst.put_u8(self.return_code.to_wire()?);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let flags = Flags::decode(reader.u8()?);
        let topic_id = reader.u16()?;
        let msg_id = reader.u16()?;
        let return_code = ReturnCode::from(reader.u8()?);
        reader.finish()?;
        Ok(Self {
            qos: flags.qos,
            topic_id_type: flags.topic_id_type,
            topic_id,
            msg_id,
            return_code,
        })
    }
}

/// UNSUBSCRIBE: flags(1), message id(2), topic name(rest) or topic id(2).
///
/// Only the TopicIdType bits of the flags byte are used.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unsubscribe {
    pub msg_id: u16,
    pub topic: SubscriptionTopic,
}

impl Unsubscribe {
    pub fn new(msg_id: u16, topic: impl Into<SubscriptionTopic>) -> Self {
        Self {
            msg_id,
            topic: topic.into(),
        }
    }

    pub const fn topic_id_type(&self) -> TopicIdType {
        self.topic.topic_id_type()
    }
}

impl PacketBody for Unsubscribe {
    const PACKET_TYPE: PacketType = PacketType::Unsubscribe;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        let flags = Flags {
            topic_id_type: self.topic.topic_id_type(),
            ..Flags::default()
        };
        dst.put_u8(flags.encode());
        dst.put_u16(self.msg_id);
        self.topic.encode(Self::PACKET_TYPE, dst)
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let flags = Flags::decode(reader.u8()?);
        let msg_id = reader.u16()?;
        let topic = SubscriptionTopic::decode(flags.topic_id_type, reader, Self::PACKET_TYPE)?;
        Ok(Self { msg_id, topic })
    }
}

msg_id_packet!(
    /// UNSUBACK: message id(2).
    Unsuback,
    PacketType::Unsuback
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_topic_name_body() {
        let subscribe = Subscribe::new(0x02, "test");
        assert_eq!(&subscribe.body_bytes().unwrap()[..], b"\x00\x00\x02test");
    }

    #[test]
    fn test_subscribe_short_topic() {
        let subscribe = Subscribe {
            qos: QoS::AtLeastOnce,
            ..Subscribe::new(0x0010, TopicId::short("ab").unwrap())
        };
        let body = subscribe.body_bytes().unwrap();
        assert_eq!(&body[..], b"\x22\x00\x10ab");

        let decoded = Subscribe::decode_body(&body).unwrap();
        assert_eq!(decoded.topic_id(), Some(TopicId::Short(*b"ab")));
        assert_eq!(decoded.topic_name(), None);
        assert_eq!(decoded.qos, QoS::AtLeastOnce);
    }

    #[test]
    fn test_subscribe_predefined_topic_rejects_extra_bytes() {
        assert!(matches!(
            Subscribe::decode_body(b"\x01\x00\x01\x00\x05\x00"),
            Err(ProtocolError::TrailingBytes { extra: 1, .. })
        ));
    }

    #[test]
    fn test_subscribe_rejects_normal_topic_id() {
        let subscribe = Subscribe::new(1, TopicId::Normal(4));
        assert_eq!(
            subscribe.body_bytes(),
            Err(ValueError::UnsupportedTopicReference {
                packet_type: PacketType::Subscribe,
                topic_id_type: TopicIdType::Normal,
            })
        );
    }

    #[test]
    fn test_subscribe_wildcard_name() {
        let decoded = Subscribe::decode_body(b"\x80\x00\x01sensors/+/temp").unwrap();
        assert!(decoded.duplicate);
        assert_eq!(decoded.topic_name(), Some("sensors/+/temp"));
    }

    #[test]
    fn test_suback_layout() {
        let suback = Suback::new(0x02, 0x01, ReturnCode::NotSupported);
        assert_eq!(
            &suback.body_bytes().unwrap()[..],
            &[0x00, 0x00, 0x01, 0x00, 0x02, 0x03]
        );
    }

    #[test]
    fn test_suback_granted_qos() {
        let suback = Suback::decode_body(&[0x40, 0x00, 0x07, 0x00, 0x02, 0x00]).unwrap();
        assert_eq!(suback.qos, QoS::ExactlyOnce);
        assert_eq!(suback.topic_id, 7);
        assert!(suback.return_code.is_accepted());
    }

    #[test]
    fn test_suback_keeps_topic_id_type() {
        let short = Suback::decode_body(&[0x02, 0x00, 0x01, 0x00, 0x02, 0x00]).unwrap();
        assert_eq!(short.topic_id_type, TopicIdType::Short);
        assert_eq!(short.topic_id, 1);
        assert_eq!(
            &short.body_bytes().unwrap()[..],
            &[0x02, 0x00, 0x01, 0x00, 0x02, 0x00]
        );

        let predefined = Suback {
            qos: QoS::AtLeastOnce,
            topic_id_type: TopicIdType::Predefined,
            ..Suback::new(0x02, 0x0005, ReturnCode::Accepted)
        };
        let body = predefined.body_bytes().unwrap();
        assert_eq!(body[0], 0x21);
        assert_eq!(Suback::decode_body(&body).unwrap(), predefined);
    }

    #[test]
    fn test_unsubscribe_roundtrip() {
        let unsubscribe = Unsubscribe::new(0x0033, TopicId::Predefined(0x0102));
        let body = unsubscribe.body_bytes().unwrap();
        assert_eq!(&body[..], &[0x01, 0x00, 0x33, 0x01, 0x02]);
        assert_eq!(Unsubscribe::decode_body(&body).unwrap(), unsubscribe);
    }

    #[test]
    fn test_unsubscribe_reserved_topic_type() {
        assert_eq!(
            Unsubscribe::decode_body(&[0x03, 0x00, 0x01, 0x00, 0x01]),
            Err(ProtocolError::ReservedTopicIdType(PacketType::Unsubscribe))
        );
    }
}
