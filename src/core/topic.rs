//! Topic identifiers.
//!
//! A topic is referenced on the wire through a 2-byte field whose meaning depends on
//! the topic id type carried in the flags byte:
//! - **Normal** / **Predefined**: big-endian `u16`
//! - **Short**: two characters taken verbatim (e.g. `"tt"`)
//!
//! [`TopicId`] keeps the type and the value together so the two cannot disagree.

use crate::error::{ProtocolError, ValueError};
use crate::protocol::packet_type::PacketType;
use std::fmt;

/// The 2-bit topic id type field of the flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TopicIdType {
    /// Id assigned through REGISTER / REGACK
    #[default]
    Normal,
    /// Id agreed out of band
    Predefined,
    /// Two-character topic name
    Short,
    /// Reserved by the protocol
    Reserved,
}

impl TopicIdType {
    /// The 2-bit wire value.
    pub const fn bits(self) -> u8 {
        match self {
            TopicIdType::Normal => 0b00,
            TopicIdType::Predefined => 0b01,
            TopicIdType::Short => 0b10,
            TopicIdType::Reserved => 0b11,
        }
    }

    /// Decode from the low two bits of `byte`.
    pub const fn from_bits(byte: u8) -> Self {
        match byte & 0b11 {
            0b00 => TopicIdType::Normal,
            0b01 => TopicIdType::Predefined,
            0b10 => TopicIdType::Short,
            _ => TopicIdType::Reserved,
        }
    }
}

impl fmt::Display for TopicIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TopicIdType::Normal => "normal",
            TopicIdType::Predefined => "predefined",
            TopicIdType::Short => "short",
            TopicIdType::Reserved => "reserved",
        })
    }
}

/// A caller-supplied topic id before it is checked against a [`TopicIdType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTopicId<'a> {
    Numeric(u64),
    Code(&'a str),
}

impl From<u16> for RawTopicId<'_> {
    fn from(id: u16) -> Self {
        RawTopicId::Numeric(u64::from(id))
    }
}

impl From<u32> for RawTopicId<'_> {
    fn from(id: u32) -> Self {
        RawTopicId::Numeric(u64::from(id))
    }
}

impl From<u64> for RawTopicId<'_> {
    fn from(id: u64) -> Self {
        RawTopicId::Numeric(id)
    }
}

impl<'a> From<&'a str> for RawTopicId<'a> {
    fn from(code: &'a str) -> Self {
        RawTopicId::Code(code)
    }
}

/// A topic reference as carried in the 2-byte topic id field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicId {
    Normal(u16),
    Predefined(u16),
    Short([u8; 2]),
}

impl Default for TopicId {
    fn default() -> Self {
        TopicId::Normal(0)
    }
}

impl TopicId {
    /// Build a topic id of the given type from a number or a short code.
    ///
    /// Fails when a numeric id does not fit in 16 bits, when a short code is not
    /// exactly two bytes, or when the value kind does not match the type.
    pub fn new<'a>(
        topic_id_type: TopicIdType,
        value: impl Into<RawTopicId<'a>>,
    ) -> Result<Self, ValueError> {
        match (topic_id_type, value.into()) {
            (TopicIdType::Normal, RawTopicId::Numeric(id)) => Ok(TopicId::Normal(narrow(id)?)),
            (TopicIdType::Predefined, RawTopicId::Numeric(id)) => {
                Ok(TopicId::Predefined(narrow(id)?))
            }
            (TopicIdType::Short, RawTopicId::Code(code)) => TopicId::short(code),
            (topic_id_type, _) => Err(ValueError::InvalidTopicId(topic_id_type)),
        }
    }

    /// Build a short topic id from a two-byte code.
    pub fn short(code: &str) -> Result<Self, ValueError> {
        let bytes: [u8; 2] = code
            .as_bytes()
            .try_into()
            .map_err(|_| ValueError::InvalidShortTopic(code.len()))?;
        Ok(TopicId::Short(bytes))
    }

    /// Interpret a 2-byte wire field according to `topic_id_type`.
    pub fn from_wire(
        topic_id_type: TopicIdType,
        raw: [u8; 2],
        packet_type: PacketType,
    ) -> Result<Self, ProtocolError> {
        match topic_id_type {
            TopicIdType::Normal => Ok(TopicId::Normal(u16::from_be_bytes(raw))),
            TopicIdType::Predefined => Ok(TopicId::Predefined(u16::from_be_bytes(raw))),
            TopicIdType::Short => Ok(TopicId::Short(raw)),
            TopicIdType::Reserved => Err(ProtocolError::ReservedTopicIdType(packet_type)),
        }
    }

    /// The 2-byte wire field.
    pub const fn to_wire(&self) -> [u8; 2] {
        match self {
            TopicId::Normal(id) | TopicId::Predefined(id) => id.to_be_bytes(),
            TopicId::Short(code) => *code,
        }
    }

    pub const fn topic_id_type(&self) -> TopicIdType {
        match self {
            TopicId::Normal(_) => TopicIdType::Normal,
            TopicId::Predefined(_) => TopicIdType::Predefined,
            TopicId::Short(_) => TopicIdType::Short,
        }
    }

    /// Numeric value for Normal and Predefined ids.
    pub const fn as_u16(&self) -> Option<u16> {
        match self {
            TopicId::Normal(id) | TopicId::Predefined(id) => Some(*id),
            TopicId::Short(_) => None,
        }
    }

    /// Short code as text, when it is valid UTF-8.
    pub fn as_short(&self) -> Option<&str> {
        match self {
            TopicId::Short(code) => std::str::from_utf8(code).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopicId::Normal(id) | TopicId::Predefined(id) => write!(f, "{id}"),
            TopicId::Short(code) => write!(f, "{}", String::from_utf8_lossy(code)),
        }
    }
}

fn narrow(id: u64) -> Result<u16, ValueError> {
    u16::try_from(id).map_err(|_| ValueError::TopicIdOutOfRange(id))
}
