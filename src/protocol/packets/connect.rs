use crate::config::{DEFAULT_KEEP_ALIVE, MAX_CLIENT_ID_LENGTH, PROTOCOL_ID};
use crate::core::flags::Flags;
use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use crate::protocol::packets::{BodyReader, PacketBody};
use crate::protocol::return_code::ReturnCode;
use bytes::{BufMut, BytesMut};
use std::borrow::Cow;

/// CONNECT: flags(1), protocol id(1), keep-alive(2), client id(rest).
///
/// Only the Will and CleanSession bits of the flags byte are used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect {
    /// Ask the gateway to prompt for a will topic and message
    pub request_will: bool,
    pub clean_session: bool,
    /// Keep-alive period in seconds
    pub keep_alive: u16,
    /// 1-23 bytes; an empty id cannot be serialised
    pub client_id: String,
}

impl Default for Connect {
    fn default() -> Self {
        Self {
            request_will: false,
            clean_session: true,
            keep_alive: DEFAULT_KEEP_ALIVE,
            client_id: String::new(),
        }
    }
}

impl Connect {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    fn validate_client_id(&self) -> Result<(), ValueError> {
        if self.client_id.is_empty() {
            return Err(ValueError::MissingClientId);
        }
        if self.client_id.len() > MAX_CLIENT_ID_LENGTH {
            return Err(ValueError::ClientIdTooLong {
                length: self.client_id.len(),
                max: MAX_CLIENT_ID_LENGTH,
            });
        }
        Ok(())
    }
}

impl PacketBody for Connect {
    const PACKET_TYPE: PacketType = PacketType::Connect;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        self.validate_client_id()?;
        let flags = Flags {
            will: self.request_will,
            clean_session: self.clean_session,
            ..Flags::default()
        };
        dst.reserve(4 + self.client_id.len());
        dst.put_u8(flags.encode());
        dst.put_u8(PROTOCOL_ID);
        dst.put_u16(self.keep_alive);
        dst.put_slice(self.client_id.as_bytes());
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let flags = Flags::decode(reader.u8()?);
        let protocol_id = reader.u8()?;
        if protocol_id != PROTOCOL_ID {
            return Err(ProtocolError::UnsupportedProtocolId(protocol_id));
        }
        let keep_alive = reader.u16()?;
        let client_id = reader.rest_str("client identifier")?;
        Ok(Self {
            request_will: flags.will,
            clean_session: flags.clean_session,
            keep_alive,
            client_id,
        })
    }
}

/// CONNACK: return code(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Connack {
    pub return_code: ReturnCode,
}

impl Connack {
    pub fn new(return_code: ReturnCode) -> Self {
        Self { return_code }
    }

    /// Human-readable connection outcome, e.g. `Rejected: congestion`.
    pub fn return_msg(&self) -> Cow<'static, str> {
        self.return_code.message()
    }
}

impl PacketBody for Connack {
    const PACKET_TYPE: PacketType = PacketType::Connack;

    fn encode_body(&self, dst: &mut BytesMut) -> Result<(), ValueError> {
        dst.put_u8(self.return_code.to_wire()?);
        Ok(())
    }

    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = BodyReader::new(Self::PACKET_TYPE, body);
        let return_code = ReturnCode::from(reader.u8()?);
        reader.finish()?;
        Ok(Self { return_code })
    }
}
