//! Will negotiation and update packets.
//!
//! WILLTOPIC and WILLTOPICUPD share a layout: a flags byte carrying QoS and Retain,
//! followed by the topic name. A body with no bytes at all asks the gateway to
//! delete the stored will.

use crate::core::flags::{Flags, QoS};
use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{empty_packet, return_code_packet, BodyReader, PacketBody};
use bytes::{BufMut, Bytes, BytesMut};

empty_packet!(
    /// WILLTOPICREQ: no body.
    WillTopicReq,
    PacketType::WillTopicReq
);

empty_packet!(
    /// WILLMSGREQ: no body.
    WillMsgReq,
    PacketType::WillMsgReq
);

return_code_packet!(
    /// WILLTOPICRESP: return code(1).
    WillTopicResp,
    PacketType::WillTopicResp
);

return_code_packet!(
    /// WILLMSGRESP: return code(1).
    WillMsgResp,
    PacketType::WillMsgResp
);

fn encode_will_topic(
    qos: QoS,
    retain: bool,
    topic_name: &str,
    dst: &mut BytesMut,
) -> Result<(), ValueError> {
    if topic_name.is_empty() {
        // an empty body carries no flags byte
        if qos != QoS::default() || retain {
            return Err(ValueError::WillFlagsWithoutTopic);
        }
        return Ok(());
    }
    let flags = Flags {
        qos,
        retain,
        ..Flags::default()
    };
    dst.reserve(1 + topic_name.len());
    dst.put_u8(flags.encode());
    dst.put_slice(topic_name.as_bytes());
    Ok(())
}

fn decode_will_topic(
    packet_type: PacketType,
    body: &[u8],
) -> Result<(QoS, bool, String), ProtocolError> {
    let mut reader = BodyReader::new(packet_type, body);
    if reader.is_empty() {
        return Ok((QoS::default(), false, String::new()));
    }
    let flags = Flags::decode(reader.u8()?);
    let topic_name = reader.rest_str("will topic")?;
    Ok((flags.qos, flags.retain, topic_name))
}

/// WILLTOPIC: flags(1), will topic(rest). An empty topic serialises to an empty body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WillTopic {
    pub qos: QoS,
    pub retain: bool,
    pub topic_name: String,
}

impl PacketBody for WillTopic {
    const PACKET_TYPE: PacketType = PacketType::WillTopic;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        encode_will_topic(self.qos, self.retain, &self.topic_name, dst)
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let (qos, retain, topic_name) = decode_will_topic(Self::PACKET_TYPE, body)?;
        Ok(Self {
            qos,
            retain,
            topic_name,
        })
    }
}

/// WILLTOPICUPD: same layout as WILLTOPIC.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WillTopicUpd {
    pub qos: QoS,
    pub retain: bool,
    pub topic_name: String,
}

impl PacketBody for WillTopicUpd {
    const PACKET_TYPE: PacketType = PacketType::WillTopicUpd;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        encode_will_topic(self.qos, self.retain, &self.topic_name, dst)
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let (qos, retain, topic_name) = decode_will_topic(Self::PACKET_TYPE, body)?;
        Ok(Self {
            qos,
            retain,
            topic_name,
        })
    }
}

/// WILLMSG: will message(rest).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WillMsg {
    pub message: Bytes,
}

impl PacketBody for WillMsg {
    const PACKET_TYPE: PacketType = PacketType::WillMsg;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_slice(&self.message);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            message: BodyReader::new(Self::PACKET_TYPE, body).rest_bytes(),
        })
    }
}

/// WILLMSGUPD: will message(rest).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WillMsgUpd {
    pub message: Bytes,
}

impl PacketBody for WillMsgUpd {
    const PACKET_TYPE: PacketType = PacketType::WillMsgUpd;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_slice(&self.message);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        Ok(Self {
            message: BodyReader::new(Self::PACKET_TYPE, body).rest_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::return_code::ReturnCode;

    #[test]
    fn test_will_topic_body() {
        let will = WillTopic {
            qos: QoS::AtLeastOnce,
            retain: true,
            topic_name: "status/offline".to_string(),
        };
        let body = will.body_bytes().unwrap();
        assert_eq!(body[0], 0x30);
        assert_eq!(&body[1..], b"status/offline");
        assert_eq!(WillTopic::decode_body(&body).unwrap(), will);
    }

    #[test]
    fn test_empty_will_topic_deletes_will() {
        let will = WillTopicUpd::default();
        assert!(will.body_bytes().unwrap().is_empty());
        assert_eq!(WillTopicUpd::decode_body(&[]).unwrap(), will);
    }

    #[test]
    fn test_empty_will_topic_cannot_carry_flags() {
        let will = WillTopic {
            qos: QoS::AtLeastOnce,
            retain: true,
            topic_name: String::new(),
        };
        assert_eq!(will.body_bytes(), Err(ValueError::WillFlagsWithoutTopic));

        let update = WillTopicUpd {
            retain: true,
            ..WillTopicUpd::default()
        };
        assert_eq!(update.body_bytes(), Err(ValueError::WillFlagsWithoutTopic));
    }

    #[test]
    fn test_will_message_is_raw_bytes() {
        let msg = WillMsg::decode_body(&[0xFF, 0x00, 0x10]).unwrap();
        assert_eq!(&msg.message[..], &[0xFF, 0x00, 0x10]);
    }

    #[test]
    fn test_request_packets_have_no_body() {
        assert!(WillTopicReq.body_bytes().unwrap().is_empty());
        assert!(WillMsgReq::decode_body(&[0x00]).is_err());
    }

    #[test]
    fn test_will_responses() {
        let resp = WillMsgResp::decode_body(&[0x03]).unwrap();
        assert_eq!(resp.return_code, ReturnCode::NotSupported);
        assert_eq!(
            &WillTopicResp::new(ReturnCode::Congestion).body_bytes().unwrap()[..],
            &[0x01]
        );
    }
}
