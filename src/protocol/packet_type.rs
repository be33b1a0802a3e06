//! Packet type registry.
//!
//! Maps the one-byte type identifier carried in every frame header to the message
//! kind responsible for it. The table is fixed at compile time: [`PacketType::from_u8`]
//! is the only lookup, and an identifier missing from it is rejected before any body
//! byte is read.

use std::fmt;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum PacketType {
    /// Gateway advertisement
    /// Direction: Gateway to Client (broadcast)
    Advertise = 0x00,

    /// Gateway discovery request
    /// Direction: Client to Gateway (broadcast)
    SearchGw = 0x01,

    /// Gateway information
    /// Direction: Gateway or Client to Client
    GwInfo = 0x02,

    /// Client request to connect
    /// Direction: Client to Gateway
    Connect = 0x04,

    /// Connect acknowledgment
    /// Direction: Gateway to Client
    Connack = 0x05,

    /// Will topic request
    /// Direction: Gateway to Client
    WillTopicReq = 0x06,

    /// Will topic
    /// Direction: Client to Gateway
    WillTopic = 0x07,

    /// Will message request
    /// Direction: Gateway to Client
    WillMsgReq = 0x08,

    /// Will message
    /// Direction: Client to Gateway
    WillMsg = 0x09,

    /// Topic name registration
    /// Direction: Client to Gateway or Gateway to Client
    Register = 0x0A,

    /// Registration acknowledgment
    /// Direction: Client to Gateway or Gateway to Client
    Regack = 0x0B,

    /// Publish message
    /// Direction: Client to Gateway or Gateway to Client
    Publish = 0x0C,

    /// Publish acknowledgment
    Puback = 0x0D,

    /// Publish complete (assured delivery part 3)
    Pubcomp = 0x0E,

    /// Publish received (assured delivery part 1)
    Pubrec = 0x0F,

    /// Publish release (assured delivery part 2)
    Pubrel = 0x10,

    /// Subscribe request
    /// Direction: Client to Gateway
    Subscribe = 0x12,

    /// Subscribe acknowledgment
    /// Direction: Gateway to Client
    Suback = 0x13,

    /// Unsubscribe request
    /// Direction: Client to Gateway
    Unsubscribe = 0x14,

    /// Unsubscribe acknowledgment
    /// Direction: Gateway to Client
    Unsuback = 0x15,

    /// Ping request
    Pingreq = 0x16,

    /// Ping response
    Pingresp = 0x17,

    /// Disconnect notification
    Disconnect = 0x18,

    /// Will topic update
    /// Direction: Client to Gateway
    WillTopicUpd = 0x1A,

    /// Will topic update response
    /// Direction: Gateway to Client
    WillTopicResp = 0x1B,

    /// Will message update
    /// Direction: Client to Gateway
    WillMsgUpd = 0x1C,

    /// Will message update response
    /// Direction: Gateway to Client
    WillMsgResp = 0x1D,
}

impl PacketType {
    /// Every registered packet type, in type-identifier order.
    pub const ALL: [PacketType; 27] = [
        PacketType::Advertise,
        PacketType::SearchGw,
        PacketType::GwInfo,
        PacketType::Connect,
        PacketType::Connack,
        PacketType::WillTopicReq,
        PacketType::WillTopic,
        PacketType::WillMsgReq,
        PacketType::WillMsg,
        PacketType::Register,
        PacketType::Regack,
        PacketType::Publish,
        PacketType::Puback,
        PacketType::Pubcomp,
        PacketType::Pubrec,
        PacketType::Pubrel,
        PacketType::Subscribe,
        PacketType::Suback,
        PacketType::Unsubscribe,
        PacketType::Unsuback,
        PacketType::Pingreq,
        PacketType::Pingresp,
        PacketType::Disconnect,
        PacketType::WillTopicUpd,
        PacketType::WillTopicResp,
        PacketType::WillMsgUpd,
        PacketType::WillMsgResp,
    ];

    /// Look up the packet type for a wire identifier.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(PacketType::Advertise),
            0x01 => Some(PacketType::SearchGw),
            0x02 => Some(PacketType::GwInfo),
            0x04 => Some(PacketType::Connect),
            0x05 => Some(PacketType::Connack),
            0x06 => Some(PacketType::WillTopicReq),
            0x07 => Some(PacketType::WillTopic),
            0x08 => Some(PacketType::WillMsgReq),
            0x09 => Some(PacketType::WillMsg),
            0x0A => Some(PacketType::Register),
            0x0B => Some(PacketType::Regack),
            0x0C => Some(PacketType::Publish),
            0x0D => Some(PacketType::Puback),
            0x0E => Some(PacketType::Pubcomp),
            0x0F => Some(PacketType::Pubrec),
            0x10 => Some(PacketType::Pubrel),
            0x12 => Some(PacketType::Subscribe),
            0x13 => Some(PacketType::Suback),
            0x14 => Some(PacketType::Unsubscribe),
            0x15 => Some(PacketType::Unsuback),
            0x16 => Some(PacketType::Pingreq),
            0x17 => Some(PacketType::Pingresp),
            0x18 => Some(PacketType::Disconnect),
            0x1A => Some(PacketType::WillTopicUpd),
            0x1B => Some(PacketType::WillTopicResp),
            0x1C => Some(PacketType::WillMsgUpd),
            0x1D => Some(PacketType::WillMsgResp),
            _ => None,
        }
    }

    /// The wire identifier for this packet type.
    #[inline]
    pub const fn type_id(self) -> u8 {
        self as u8
    }

    /// Upper-case protocol name, as written in MQTT-SN v1.2.
    pub const fn name(self) -> &'static str {
        match self {
            PacketType::Advertise => "ADVERTISE",
            PacketType::SearchGw => "SEARCHGW",
            PacketType::GwInfo => "GWINFO",
            PacketType::Connect => "CONNECT",
            PacketType::Connack => "CONNACK",
            PacketType::WillTopicReq => "WILLTOPICREQ",
            PacketType::WillTopic => "WILLTOPIC",
            PacketType::WillMsgReq => "WILLMSGREQ",
            PacketType::WillMsg => "WILLMSG",
            PacketType::Register => "REGISTER",
            PacketType::Regack => "REGACK",
            PacketType::Publish => "PUBLISH",
            PacketType::Puback => "PUBACK",
            PacketType::Pubcomp => "PUBCOMP",
            PacketType::Pubrec => "PUBREC",
            PacketType::Pubrel => "PUBREL",
            PacketType::Subscribe => "SUBSCRIBE",
            PacketType::Suback => "SUBACK",
            PacketType::Unsubscribe => "UNSUBSCRIBE",
            PacketType::Unsuback => "UNSUBACK",
            PacketType::Pingreq => "PINGREQ",
            PacketType::Pingresp => "PINGRESP",
            PacketType::Disconnect => "DISCONNECT",
            PacketType::WillTopicUpd => "WILLTOPICUPD",
            PacketType::WillTopicResp => "WILLTOPICRESP",
            PacketType::WillMsgUpd => "WILLMSGUPD",
            PacketType::WillMsgResp => "WILLMSGRESP",
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
