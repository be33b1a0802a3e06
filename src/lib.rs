//! # MQTT-SN Protocol
//!
//! Packet layer of MQTT-SN v1.2, the publish/subscribe protocol for sensor networks.
//!
//! The crate turns typed packets into length-prefixed frames and back. It does no I/O
//! of its own: a transport hands in complete datagrams (or a byte stream through the
//! [`PacketCodec`]) and gets packets or typed errors out.
//!
//! ## Modules
//! - [`core`]: framing, flags byte, topic ids, the [`Packet`] enum and the Tokio codec
//! - [`protocol`]: packet types, per-kind body layouts, return codes, dispatcher
//! - [`config`]: protocol constants and codec configuration
//! - [`error`]: protocol and value errors
//! - [`utils`]: codec metrics
//!
//! ## Example Usage
//! ```rust
//! use mqttsn_protocol::core::topic::TopicId;
//! use mqttsn_protocol::protocol::packets::Publish;
//! use mqttsn_protocol::Packet;
//!
//! let publish = Publish::new(TopicId::short("tt").unwrap(), "Hello World");
//! let bytes = Packet::from(publish.clone()).to_bytes().unwrap();
//! assert_eq!(bytes[0] as usize, bytes.len());
//!
//! assert_eq!(Packet::from_bytes(&bytes).unwrap(), Packet::Publish(publish));
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::config::{CodecConfig, Framing, MqttSnConfig};
pub use crate::core::codec::PacketCodec;
pub use crate::core::flags::{Flags, QoS};
pub use crate::core::packet::Packet;
pub use crate::core::topic::{TopicId, TopicIdType};
pub use crate::error::{Error, ProtocolError, Result, ValueError};
pub use crate::protocol::dispatcher::Dispatcher;
pub use crate::protocol::packet_type::PacketType;
pub use crate::protocol::return_code::ReturnCode;
