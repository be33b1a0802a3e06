//! # Packet
//!
//! [`Packet`] is the closed set of MQTT-SN message kinds. It is what the codec yields
//! on decode and accepts on encode.
//!
//! Decoding a frame runs in a fixed order, and nothing past a failed step is read:
//! 1. the declared length must equal the buffer length
//! 2. the type identifier must be in the registry ([`PacketType::from_u8`])
//! 3. the body is handed to the decoder of that kind
//!
//! ## Example Usage
//! ```rust
//! use mqttsn_protocol::core::packet::Packet;
//! use mqttsn_protocol::protocol::packets::Connect;
//!
//! let bytes = Packet::from(Connect::new("myclient")).to_bytes().unwrap();
//! assert_eq!(&bytes[..6], &[0x0E, 0x04, 0x04, 0x01, 0x00, 0x0F]);
//!
//! let packet = Packet::from_bytes(&bytes).unwrap();
//! assert!(matches!(packet, Packet::Connect(ref c) if c.client_id == "myclient"));
//! ```

use crate::core::flags::QoS;
use crate::core::frame::{self, Header};
use crate::error::{ProtocolError, Result, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::*;
use bytes::{Bytes, BytesMut};
use tracing::{instrument, trace};

/// Every MQTT-SN message kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    Advertise(Advertise),
    SearchGw(SearchGw),
    GwInfo(GwInfo),
    Connect(Connect),
    Connack(Connack),
    WillTopicReq(WillTopicReq),
    WillTopic(WillTopic),
    WillMsgReq(WillMsgReq),
    WillMsg(WillMsg),
    Register(Register),
    Regack(Regack),
    Publish(Publish),
    Puback(Puback),
    Pubcomp(Pubcomp),
    Pubrec(Pubrec),
    Pubrel(Pubrel),
    Subscribe(Subscribe),
    Suback(Suback),
    Unsubscribe(Unsubscribe),
    Unsuback(Unsuback),
    Pingreq(Pingreq),
    Pingresp(Pingresp),
    Disconnect(Disconnect),
    WillTopicUpd(WillTopicUpd),
    WillTopicResp(WillTopicResp),
    WillMsgUpd(WillMsgUpd),
    WillMsgResp(WillMsgResp),
}

/// Apply `$body` to the inner value of every variant.
macro_rules! each_variant {
    ($packet:expr, $inner:ident => $body:expr) => {
        match $packet {
            Packet::Advertise($inner) => $body,
            Packet::SearchGw($inner) => $body,
            Packet::GwInfo($inner) => $body,
            Packet::Connect($inner) => $body,
            Packet::Connack($inner) => $body,
            Packet::WillTopicReq($inner) => $body,
            Packet::WillTopic($inner) => $body,
            Packet::WillMsgReq($inner) => $body,
            Packet::WillMsg($inner) => $body,
            Packet::Register($inner) => $body,
            Packet::Regack($inner) => $body,
            Packet::Publish($inner) => $body,
            Packet::Puback($inner) => $body,
            Packet::Pubcomp($inner) => $body,
            Packet::Pubrec($inner) => $body,
            Packet::Pubrel($inner) => $body,
            Packet::Subscribe($inner) => $body,
            Packet::Suback($inner) => $body,
            Packet::Unsubscribe($inner) => $body,
            Packet::Unsuback($inner) => $body,
            Packet::Pingreq($inner) => $body,
            Packet::Pingresp($inner) => $body,
            Packet::Disconnect($inner) => $body,
            Packet::WillTopicUpd($inner) => $body,
            Packet::WillTopicResp($inner) => $body,
            Packet::WillMsgUpd($inner) => $body,
            Packet::WillMsgResp($inner) => $body,
        }
    };
}

impl Packet {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Advertise(_) => PacketType::Advertise,
            Packet::SearchGw(_) => PacketType::SearchGw,
            Packet::GwInfo(_) => PacketType::GwInfo,
            Packet::Connect(_) => PacketType::Connect,
            Packet::Connack(_) => PacketType::Connack,
            Packet::WillTopicReq(_) => PacketType::WillTopicReq,
            Packet::WillTopic(_) => PacketType::WillTopic,
            Packet::WillMsgReq(_) => PacketType::WillMsgReq,
            Packet::WillMsg(_) => PacketType::WillMsg,
            Packet::Register(_) => PacketType::Register,
            Packet::Regack(_) => PacketType::Regack,
            Packet::Publish(_) => PacketType::Publish,
            Packet::Puback(_) => PacketType::Puback,
            Packet::Pubcomp(_) => PacketType::Pubcomp,
            Packet::Pubrec(_) => PacketType::Pubrec,
            Packet::Pubrel(_) => PacketType::Pubrel,
            Packet::Subscribe(_) => PacketType::Subscribe,
            Packet::Suback(_) => PacketType::Suback,
            Packet::Unsubscribe(_) => PacketType::Unsubscribe,
            Packet::Unsuback(_) => PacketType::Unsuback,
            Packet::Pingreq(_) => PacketType::Pingreq,
            Packet::Pingresp(_) => PacketType::Pingresp,
            Packet::Disconnect(_) => PacketType::Disconnect,
            Packet::WillTopicUpd(_) => PacketType::WillTopicUpd,
            Packet::WillTopicResp(_) => PacketType::WillTopicResp,
            Packet::WillMsgUpd(_) => PacketType::WillMsgUpd,
            Packet::WillMsgResp(_) => PacketType::WillMsgResp,
        }
    }

    pub fn type_id(&self) -> u8 {
        self.packet_type().type_id()
    }

    /// Append the body of the packet, without the frame header, to `dst`.
    pub fn encode_body(&self, dst: &mut BytesMut) -> std::result::Result<(), ValueError> {
        each_variant!(self, inner => inner.encode_body(dst))
    }

    /// The serialised body on its own.
    pub fn body_bytes(&self) -> std::result::Result<Bytes, ValueError> {
        let mut body = BytesMut::new();
        self.encode_body(&mut body)?;
        Ok(body.freeze())
    }

    /// Append the complete frame to `dst`. Returns the frame length.
    pub fn encode(&self, dst: &mut BytesMut) -> std::result::Result<usize, ValueError> {
        let body = self.body_bytes()?;
        frame::write_frame(self.type_id(), &body, dst)
    }

    /// Serialise the complete frame.
    #[instrument(level = "trace", skip(self), fields(packet_type = %self.packet_type()))]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut dst = BytesMut::new();
        let length = self.encode(&mut dst)?;
        trace!(length, "encoded packet");
        Ok(dst.to_vec())
    }

    /// Parse one complete frame.
    #[instrument(level = "trace", skip(buf), fields(len = buf.len()))]
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let header = Header::parse(buf)?;
        Ok(Self::decode_frame(&header, buf)?)
    }

    /// Decode the body of a frame whose header was already parsed.
    pub fn decode_frame(header: &Header, buf: &[u8]) -> std::result::Result<Self, ProtocolError> {
        let packet_type = PacketType::from_u8(header.type_id)
            .ok_or(ProtocolError::InvalidPacketType(header.type_id))?;
        let body = buf
            .get(header.header_len..header.length)
            .ok_or(ProtocolError::LengthMismatch {
                declared: header.length,
                actual: buf.len(),
            })?;
        Self::decode_body(packet_type, body)
    }

    /// Hand `body` to the decoder registered for `packet_type`.
    pub fn decode_body(
        packet_type: PacketType,
        body: &[u8],
    ) -> std::result::Result<Self, ProtocolError> {
        let packet = match packet_type {
            PacketType::Advertise => Packet::Advertise(Advertise::decode_body(body)?),
            PacketType::SearchGw => Packet::SearchGw(SearchGw::decode_body(body)?),
            PacketType::GwInfo => Packet::GwInfo(GwInfo::decode_body(body)?),
            PacketType::Connect => Packet::Connect(Connect::decode_body(body)?),
            PacketType::Connack => Packet::Connack(Connack::decode_body(body)?),
            PacketType::WillTopicReq => Packet::WillTopicReq(WillTopicReq::decode_body(body)?),
            PacketType::WillTopic => Packet::WillTopic(WillTopic::decode_body(body)?),
            PacketType::WillMsgReq => Packet::WillMsgReq(WillMsgReq::decode_body(body)?),
            PacketType::WillMsg => Packet::WillMsg(WillMsg::decode_body(body)?),
            PacketType::Register => Packet::Register(Register::decode_body(body)?),
            PacketType::Regack => Packet::Regack(Regack::decode_body(body)?),
            PacketType::Publish => Packet::Publish(Publish::decode_body(body)?),
            PacketType::Puback => Packet::Puback(Puback::decode_body(body)?),
            PacketType::Pubcomp => Packet::Pubcomp(Pubcomp::decode_body(body)?),
            PacketType::Pubrec => Packet::Pubrec(Pubrec::decode_body(body)?),
            PacketType::Pubrel => Packet::Pubrel(Pubrel::decode_body(body)?),
            PacketType::Subscribe => Packet::Subscribe(Subscribe::decode_body(body)?),
            PacketType::Suback => Packet::Suback(Suback::decode_body(body)?),
            PacketType::Unsubscribe => Packet::Unsubscribe(Unsubscribe::decode_body(body)?),
            PacketType::Unsuback => Packet::Unsuback(Unsuback::decode_body(body)?),
            PacketType::Pingreq => Packet::Pingreq(Pingreq::decode_body(body)?),
            PacketType::Pingresp => Packet::Pingresp(Pingresp::decode_body(body)?),
            PacketType::Disconnect => Packet::Disconnect(Disconnect::decode_body(body)?),
            PacketType::WillTopicUpd => Packet::WillTopicUpd(WillTopicUpd::decode_body(body)?),
            PacketType::WillTopicResp => {
                Packet::WillTopicResp(WillTopicResp::decode_body(body)?)
            }
            PacketType::WillMsgUpd => Packet::WillMsgUpd(WillMsgUpd::decode_body(body)?),
            PacketType::WillMsgResp => Packet::WillMsgResp(WillMsgResp::decode_body(body)?),
        };
        Ok(packet)
    }

    /// DUP flag; false for kinds without one.
    pub fn duplicate(&self) -> bool {
        match self {
            Packet::Publish(p) => p.duplicate,
            Packet::Subscribe(p) => p.duplicate,
            _ => false,
        }
    }

    /// QoS carried in the flags byte; [`QoS::AtMostOnce`] for kinds without one.
    pub fn qos(&self) -> QoS {
        match self {
            Packet::Publish(p) => p.qos,
            Packet::Subscribe(p) => p.qos,
            Packet::Suback(p) => p.qos,
            Packet::WillTopic(p) => p.qos,
            Packet::WillTopicUpd(p) => p.qos,
            _ => QoS::default(),
        }
    }

    /// Retain flag; false for kinds without one.
    pub fn retain(&self) -> bool {
        match self {
            Packet::Publish(p) => p.retain,
            Packet::WillTopic(p) => p.retain,
            Packet::WillTopicUpd(p) => p.retain,
            _ => false,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Packet {
                fn from(packet: $variant) -> Self {
                    Packet::$variant(packet)
                }
            }
        )*
    };
}

impl_from_variant!(
    Advertise,
    SearchGw,
    GwInfo,
    Connect,
    Connack,
    WillTopicReq,
    WillTopic,
    WillMsgReq,
    WillMsg,
    Register,
    Regack,
    Publish,
    Puback,
    Pubcomp,
    Pubrec,
    Pubrel,
    Subscribe,
    Suback,
    Unsubscribe,
    Unsuback,
    Pingreq,
    Pingresp,
    Disconnect,
    WillTopicUpd,
    WillTopicResp,
    WillMsgUpd,
    WillMsgResp,
);
