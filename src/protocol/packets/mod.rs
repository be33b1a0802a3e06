//! # Packet Variants
//!
//! One type per MQTT-SN message kind. Each owns its body layout and implements
//! [`PacketBody`]: a fixed [`PacketType`], an encoder that appends the body to a
//! buffer, and a decoder that reads the body once the frame header is stripped.
//!
//! | Module         | Kinds                                                            |
//! |----------------|------------------------------------------------------------------|
//! | `gateway`      | ADVERTISE, SEARCHGW, GWINFO                                      |
//! | `connect`      | CONNECT, CONNACK                                                 |
//! | `will`         | WILLTOPICREQ, WILLTOPIC, WILLMSGREQ, WILLMSG and the update kinds |
//! | `register`     | REGISTER, REGACK                                                 |
//! | `publish`      | PUBLISH, PUBACK, PUBREC, PUBREL, PUBCOMP                         |
//! | `subscribe`    | SUBSCRIBE, SUBACK, UNSUBSCRIBE, UNSUBACK                         |
//! | `ping`         | PINGREQ, PINGRESP                                                |
//! | `disconnect`   | DISCONNECT                                                       |

mod connect;
mod disconnect;
mod gateway;
mod ping;
mod publish;
mod register;
mod subscribe;
mod will;

pub use connect::{Connack, Connect};
pub use disconnect::Disconnect;
pub use gateway::{Advertise, GwInfo, SearchGw};
pub use ping::{Pingreq, Pingresp};
pub use publish::{Puback, Pubcomp, Publish, Pubrec, Pubrel};
pub use register::{Regack, Register};
pub use subscribe::{Suback, Subscribe, SubscriptionTopic, Unsuback, Unsubscribe};
pub use will::{
    WillMsg, WillMsgReq, WillMsgResp, WillMsgUpd, WillTopic, WillTopicReq, WillTopicResp,
    WillTopicUpd,
};

use crate::core::frame;
use crate::error::{ProtocolError, Result, ValueError};
use crate::protocol::packet_type::PacketType;
use bytes::{Buf, Bytes, BytesMut};

/// Body codec implemented by every packet kind.
pub trait PacketBody: Sized {
    /// Fixed type identifier of this kind.
    const PACKET_TYPE: PacketType;

    fn type_id(&self) -> u8 {
        Self::PACKET_TYPE.type_id()
    }

    /// Append the body (everything after the type identifier) to `dst`.
    fn encode_body(&self, dst: &mut BytesMut) -> std::result::Result<(), ValueError>;

    /// Decode a body with the frame header already stripped.
    fn decode_body(body: &[u8]) -> std::result::Result<Self, ProtocolError>;

    /// The serialised body on its own.
    fn body_bytes(&self) -> std::result::Result<Bytes, ValueError> {
        let mut body = BytesMut::new();
        self.encode_body(&mut body)?;
        Ok(body.freeze())
    }

    /// The complete frame: length header, type identifier and body.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let body = self.body_bytes()?;
        Ok(frame::frame(Self::PACKET_TYPE, &body)?)
    }
}

/// Sequential reader over a packet body.
///
/// Every read checks the remaining length first, so a short body surfaces as
/// [`ProtocolError::Truncated`] instead of a panic.
pub(crate) struct BodyReader<'a> {
    packet_type: PacketType,
    buf: &'a [u8],
    len: usize,
}

impl<'a> BodyReader<'a> {
    pub(crate) fn new(packet_type: PacketType, body: &'a [u8]) -> Self {
        Self {
            packet_type,
            buf: body,
            len: body.len(),
        }
    }

    fn require(&self, n: usize) -> std::result::Result<(), ProtocolError> {
        if self.buf.remaining() < n {
            return Err(ProtocolError::Truncated {
                packet_type: self.packet_type,
                needed: self.len - self.buf.remaining() + n,
                available: self.len,
            });
        }
        Ok(())
    }

    pub(crate) fn u8(&mut self) -> std::result::Result<u8, ProtocolError> {
        self.require(1)?;
        Ok(self.buf.get_u8())
    }

    pub(crate) fn u16(&mut self) -> std::result::Result<u16, ProtocolError> {
        self.require(2)?;
        Ok(self.buf.get_u16())
    }

    /// Raw 2-byte topic id field.
    pub(crate) fn topic_id(&mut self) -> std::result::Result<[u8; 2], ProtocolError> {
        self.require(2)?;
        let raw = [self.buf[0], self.buf[1]];
        self.buf.advance(2);
        Ok(raw)
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.buf.has_remaining()
    }

    /// Consume everything left.
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let rest = self.buf;
        self.buf = &[];
        rest
    }

    pub(crate) fn rest_bytes(&mut self) -> Bytes {
        Bytes::copy_from_slice(self.rest())
    }

    pub(crate) fn rest_str(
        &mut self,
        field: &'static str,
    ) -> std::result::Result<String, ProtocolError> {
        let rest = self.rest();
        std::str::from_utf8(rest)
            .map(str::to_owned)
            .map_err(|_| ProtocolError::InvalidUtf8 { field })
    }

    /// Fail if bytes remain after a fixed-size body.
    pub(crate) fn finish(self) -> std::result::Result<(), ProtocolError> {
        if self.buf.has_remaining() {
            return Err(ProtocolError::TrailingBytes {
                packet_type: self.packet_type,
                extra: self.buf.remaining(),
            });
        }
        Ok(())
    }
}

/// Packet kinds without a body.
macro_rules! empty_packet {
    ($(#[$meta:meta])* $name:ident, $packet_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $crate::protocol::packets::PacketBody for $name {
            const PACKET_TYPE: $crate::protocol::packet_type::PacketType = $packet_type;

            fn encode_body(
                &self,
                _dst: &mut ::bytes::BytesMut,
            ) -> ::std::result::Result<(), $crate::error::ValueError> {
                Ok(())
            }

            fn decode_body(
                body: &[u8],
            ) -> ::std::result::Result<Self, $crate::error::ProtocolError> {
                $crate::protocol::packets::BodyReader::new($packet_type, body).finish()?;
                Ok($name)
            }
        }
    };
}

/// Packet kinds whose body is a single message id.
macro_rules! msg_id_packet {
    ($(#[$meta:meta])* $name:ident, $packet_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            pub msg_id: u16,
        }

        impl $name {
            pub fn new(msg_id: u16) -> Self {
                Self { msg_id }
            }
        }

        impl $crate::protocol::packets::PacketBody for $name {
            const PACKET_TYPE: $crate::protocol::packet_type::PacketType = $packet_type;

            fn encode_body(
                &self,
                dst: &mut ::bytes::BytesMut,
            ) -> ::std::result::Result<(), $crate::error::ValueError> {
                ::bytes::BufMut::put_u16(dst, self.msg_id);
                Ok(())
            }

            fn decode_body(
                body: &[u8],
            ) -> ::std::result::Result<Self, $crate::error::ProtocolError> {
                let mut reader = $crate::protocol::packets::BodyReader::new($packet_type, body);
                let msg_id = reader.u16()?;
                reader.finish()?;
                Ok(Self { msg_id })
            }
        }
    };
}

/// Packet kinds whose body is a single return code.
macro_rules! return_code_packet {
    ($(#[$meta:meta])* $name:ident, $packet_type:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            pub return_code: $crate::protocol::return_code::ReturnCode,
        }

        impl $name {
            pub fn new(return_code: $crate::protocol::return_code::ReturnCode) -> Self {
                Self { return_code }
            }
        }

        impl $crate::protocol::packets::PacketBody for $name {
            const PACKET_TYPE: $crate::protocol::packet_type::PacketType = $packet_type;

            fn encode_body(
                &self,
                dst: &mut ::bytes::BytesMut,
            ) -> ::std::result::Result<(), $crate::error::ValueError> {
                ::bytes::BufMut::put_u8(dst, self.return_code.to_wire()?);
                Ok(())
            }

            fn decode_body(
                body: &[u8],
            ) -> ::std::result::Result<Self, $crate::error::ProtocolError> {
                let mut reader = $crate::protocol::packets::BodyReader::new($packet_type, body);
                let return_code = reader.u8()?.into();
                reader.finish()?;
                Ok(Self { return_code })
            }
        }
    };
}

pub(crate) use {empty_packet, msg_id_packet, return_code_packet};
