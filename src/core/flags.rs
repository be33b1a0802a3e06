//! Flags byte shared by CONNECT, PUBLISH, SUBSCRIBE, SUBACK, UNSUBSCRIBE and the
//! will-topic packets.
//!
//! ```text
//! ┌─────┬─────────┬────────┬──────┬──────────────┬───────────────┐
//! │ DUP │   QoS   │ Retain │ Will │ CleanSession │ TopicIdType   │
//! │ 7   │ 6..5    │ 4      │ 3    │ 2            │ 1..0          │
//! └─────┴─────────┴────────┴──────┴──────────────┴───────────────┘
//! ```
//!
//! Encoding and decoding are total: every byte decodes to some [`Flags`] value.
//! Packet kinds read only the bits they use and leave the others at their defaults.

use crate::core::topic::TopicIdType;
use crate::error::ValueError;

/// Bit masks for the flags byte.
pub mod bits {
    /// Duplicate delivery.
    pub const DUP: u8 = 0b1000_0000;
    /// QoS level, two bits.
    pub const QOS_MASK: u8 = 0b0110_0000;
    /// Shift of the QoS field.
    pub const QOS_SHIFT: u8 = 5;
    /// Retained message.
    pub const RETAIN: u8 = 0b0001_0000;
    /// Will requested during CONNECT.
    pub const WILL: u8 = 0b0000_1000;
    /// Clean session during CONNECT.
    pub const CLEAN_SESSION: u8 = 0b0000_0100;
    /// Topic id type, two bits.
    pub const TOPIC_ID_TYPE_MASK: u8 = 0b0000_0011;
}

/// Quality of service level.
///
/// MQTT-SN adds level -1 ("publish without a connection"), encoded as `0b11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QoS {
    /// At most once delivery
    #[default]
    AtMostOnce,
    /// At least once delivery
    AtLeastOnce,
    /// Exactly once delivery
    ExactlyOnce,
    /// QoS -1: fire and forget without a session
    NoSession,
}

impl QoS {
    /// Signed protocol level (-1..=2).
    pub const fn as_i8(self) -> i8 {
        match self {
            QoS::AtMostOnce => 0,
            QoS::AtLeastOnce => 1,
            QoS::ExactlyOnce => 2,
            QoS::NoSession => -1,
        }
    }

    /// The 2-bit wire value.
    pub const fn bits(self) -> u8 {
        match self {
            QoS::AtMostOnce => 0b00,
            QoS::AtLeastOnce => 0b01,
            QoS::ExactlyOnce => 0b10,
            QoS::NoSession => 0b11,
        }
    }

    /// Decode from the 2-bit wire value; higher bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => QoS::AtMostOnce,
            0b01 => QoS::AtLeastOnce,
            0b10 => QoS::ExactlyOnce,
            _ => QoS::NoSession,
        }
    }
}

impl TryFrom<i8> for QoS {
    type Error = ValueError;

    fn try_from(level: i8) -> Result<Self, Self::Error> {
        match level {
            -1 => Ok(QoS::NoSession),
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            _ => Err(ValueError::InvalidQos(level)),
        }
    }
}

impl From<QoS> for i8 {
    fn from(qos: QoS) -> Self {
        qos.as_i8()
    }
}

/// Unpacked flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub duplicate: bool,
    pub qos: QoS,
    pub retain: bool,
    pub will: bool,
    pub clean_session: bool,
    pub topic_id_type: TopicIdType,
}

impl Flags {
    /// Pack into a single byte.
    pub const fn encode(&self) -> u8 {
        let mut byte = 0u8;
        if self.duplicate {
            byte |= bits::DUP;
        }
        byte |= self.qos.bits() << bits::QOS_SHIFT;
        if self.retain {
            byte |= bits::RETAIN;
        }
        if self.will {
            byte |= bits::WILL;
        }
        if self.clean_session {
            byte |= bits::CLEAN_SESSION;
        }
        byte | self.topic_id_type.bits()
    }

    /// Unpack a byte. Never fails.
    pub const fn decode(byte: u8) -> Self {
        Self {
            duplicate: byte & bits::DUP != 0,
            qos: QoS::from_bits((byte & bits::QOS_MASK) >> bits::QOS_SHIFT),
            retain: byte & bits::RETAIN != 0,
            will: byte & bits::WILL != 0,
            clean_session: byte & bits::CLEAN_SESSION != 0,
            topic_id_type: TopicIdType::from_bits(byte),
        }
    }
}

impl From<u8> for Flags {
    fn from(byte: u8) -> Self {
        Flags::decode(byte)
    }
}

impl From<Flags> for u8 {
    fn from(flags: Flags) -> Self {
        flags.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_byte_roundtrips() {
        for byte in 0u8..=255 {
            assert_eq!(Flags::decode(byte).encode(), byte);
        }
    }

    #[test]
    fn test_connect_flags() {
        let flags = Flags {
            will: true,
            clean_session: true,
            ..Flags::default()
        };
        assert_eq!(flags.encode(), 0x0C);
        assert!(Flags::decode(0x04).clean_session);
        assert!(!Flags::decode(0x04).will);
    }

    #[test]
    fn test_qos_minus_one() {
        let flags = Flags::decode(0b0110_0000);
        assert_eq!(flags.qos, QoS::NoSession);
        assert_eq!(flags.qos.as_i8(), -1);

        let flags = Flags {
            qos: QoS::NoSession,
            ..Flags::default()
        };
        assert_eq!(flags.encode(), 0x60);
    }

    #[test]
    fn test_publish_flags() {
        let flags = Flags::decode(0b1011_0010);
        assert!(flags.duplicate);
        assert_eq!(flags.qos, QoS::AtLeastOnce);
        assert!(flags.retain);
        assert_eq!(flags.topic_id_type, TopicIdType::Short);
    }

    #[test]
    fn test_qos_from_level() {
        assert_eq!(QoS::try_from(2i8), Ok(QoS::ExactlyOnce));
        assert_eq!(QoS::try_from(-1i8), Ok(QoS::NoSession));
        assert_eq!(QoS::try_from(3i8), Err(ValueError::InvalidQos(3)));
        assert_eq!(QoS::try_from(-2i8), Err(ValueError::InvalidQos(-2)));
    }
}
