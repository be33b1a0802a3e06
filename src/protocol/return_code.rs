//! Return codes carried by CONNACK, REGACK, PUBACK, SUBACK and the will update responses.

use crate::error::ValueError;
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReturnCode {
    #[default]
    Accepted,
    Congestion,
    InvalidTopicId,
    NotSupported,
    /// Any code the protocol does not define
    Other(u8),
}

impl ReturnCode {
    pub const fn as_u8(self) -> u8 {
        match self {
            ReturnCode::Accepted => 0x00,
            ReturnCode::Congestion => 0x01,
            ReturnCode::InvalidTopicId => 0x02,
            ReturnCode::NotSupported => 0x03,
            ReturnCode::Other(code) => code,
        }
    }

    pub const fn from_u8(code: u8) -> Self {
        match code {
            0x00 => ReturnCode::Accepted,
            0x01 => ReturnCode::Congestion,
            0x02 => ReturnCode::InvalidTopicId,
            0x03 => ReturnCode::NotSupported,
            other => ReturnCode::Other(other),
        }
    }

    /// Byte to put on the wire. `Other` holding a defined code is rejected, since it
    /// would parse back as the named variant.
    pub fn to_wire(self) -> Result<u8, ValueError> {
        match self {
            ReturnCode::Other(code @ 0x00..=0x03) => Err(ValueError::AliasedReturnCode(code)),
            code => Ok(code.as_u8()),
        }
    }

    #[inline]
    pub const fn is_accepted(self) -> bool {
        matches!(self, ReturnCode::Accepted)
    }

    /// Human-readable outcome.
    pub fn message(self) -> Cow<'static, str> {
        match self {
            ReturnCode::Accepted => Cow::Borrowed("Accepted"),
            ReturnCode::Congestion => Cow::Borrowed("Rejected: congestion"),
            ReturnCode::InvalidTopicId => Cow::Borrowed("Rejected: invalid topic ID"),
            ReturnCode::NotSupported => Cow::Borrowed("Rejected: not supported"),
            ReturnCode::Other(code) => Cow::Owned(format!("Rejected with code {code}")),
        }
    }
}

impl From<u8> for ReturnCode {
    fn from(code: u8) -> Self {
        ReturnCode::from_u8(code)
    }
}

impl From<ReturnCode> for u8 {
    fn from(code: ReturnCode) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossless_byte_conversion() {
        for code in 0u8..=255 {
            assert_eq!(ReturnCode::from(code).as_u8(), code);
        }
    }

    #[test]
    fn test_other_cannot_alias_named_codes() {
        assert_eq!(
            ReturnCode::Other(0).to_wire(),
            Err(ValueError::AliasedReturnCode(0))
        );
        assert_eq!(
            ReturnCode::Other(3).to_wire(),
            Err(ValueError::AliasedReturnCode(3))
        );
        assert_eq!(ReturnCode::Other(4).to_wire(), Ok(4));
        assert_eq!(ReturnCode::Congestion.to_wire(), Ok(1));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ReturnCode::from(0u8).message(), "Accepted");
        assert_eq!(ReturnCode::from(1u8).message(), "Rejected: congestion");
        assert_eq!(ReturnCode::from(2u8).message(), "Rejected: invalid topic ID");
        assert_eq!(ReturnCode::from(3u8).message(), "Rejected: not supported");
        assert_eq!(ReturnCode::from(0x10u8).message(), "Rejected with code 16");
    }
}
