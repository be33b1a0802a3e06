//! # Error Types
//!
//! Error handling for the MQTT-SN packet layer.
//!
//! Failures fall into two kinds:
//! - **Protocol errors** ([`ProtocolError`]): raised while interpreting untrusted wire
//!   bytes. A parse either yields a complete packet or one of these; a packet is never
//!   partially populated.
//! - **Value errors** ([`ValueError`]): raised when a caller builds or serialises a packet
//!   from values the wire format cannot carry (missing client identifier, malformed topic
//!   identifier, out-of-range QoS).
//!
//! [`Error`] wraps both kinds together with I/O and configuration failures so that the
//! codec traits and the dispatcher can share a single error type.
//!
//! ## Example Usage
//! ```rust
//! use mqttsn_protocol::core::packet::Packet;
//! use mqttsn_protocol::error::{Error, ProtocolError};
//!
//! match Packet::from_bytes(&[0x02, 0xFF]) {
//!     Err(Error::Protocol(ProtocolError::InvalidPacketType(id))) => assert_eq!(id, 255),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use crate::core::topic::TopicIdType;
use crate::protocol::packet_type::PacketType;
use std::io;
use thiserror::Error;

/// Errors raised while interpreting bytes received from the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Length of packet is not the same as the length header")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("Invalid packet type identifier: {0}")]
    InvalidPacketType(u8),

    #[error("Unsupported protocol ID number: {0}")]
    UnsupportedProtocolId(u8),

    #[error("Invalid length header: {0}")]
    InvalidLength(usize),

    #[error("Incomplete packet header: {available} bytes available")]
    IncompleteHeader { available: usize },

    #[error("Truncated {packet_type} packet: needed {needed} bytes, got {available}")]
    Truncated {
        packet_type: PacketType,
        needed: usize,
        available: usize,
    },

    #[error("Unexpected {extra} trailing bytes in {packet_type} packet")]
    TrailingBytes { packet_type: PacketType, extra: usize },

    #[error("Invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("Reserved topic id type in {0} packet")]
    ReservedTopicIdType(PacketType),

    #[error("Extended length header is disabled")]
    ExtendedLengthDisabled,

    #[error("Packet too large: {size} bytes (max {max})")]
    OversizedPacket { size: usize, max: usize },
}

/// Errors raised by caller-supplied values that cannot be put on the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid client identifier when serialising packet")]
    MissingClientId,

    #[error("Client identifier too long: {length} bytes (max {max})")]
    ClientIdTooLong { length: usize, max: usize },

    #[error("Short topic identifier must be exactly 2 bytes, got {0}")]
    InvalidShortTopic(usize),

    #[error("Topic identifier out of range: {0}")]
    TopicIdOutOfRange(u64),

    #[error("Value does not fit a {0} topic id")]
    InvalidTopicId(TopicIdType),

    #[error("Invalid QoS level: {0}")]
    InvalidQos(i8),

    #[error("{packet_type} packets cannot reference a {topic_id_type} topic id")]
    UnsupportedTopicReference {
        packet_type: PacketType,
        topic_id_type: TopicIdType,
    },

    #[error("Packet too large to frame: {size} bytes (max {max})")]
    PacketTooLarge { size: usize, max: usize },

    #[error("Return code {0} must be sent as its named variant")]
    AliasedReturnCode(u8),

    #[error("Will QoS and retain flags need a will topic")]
    WillFlagsWithoutTopic,
}

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Value error: {0}")]
    Value(#[from] ValueError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No handler registered for {0} packets")]
    Unhandled(PacketType),

    #[error("Dispatcher error: {0}")]
    Dispatch(String),
}

impl Error {
    /// True when the error came from malformed wire data.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }

    /// True when the error came from a value the caller supplied.
    pub fn is_value(&self) -> bool {
        matches!(self, Error::Value(_))
    }
}

/// Type alias for Results using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
