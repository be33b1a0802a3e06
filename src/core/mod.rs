//! # Core Protocol Components
//!
//! Framing, field codecs and the packet enum.
//!
//! ## Components
//! - **Frame**: length header and type identifier around every body
//! - **Flags**: the shared flags byte and QoS levels
//! - **Topic**: topic id types and the 2-byte topic id field
//! - **Packet**: the closed set of message kinds and the type id registry
//! - **Codec**: Tokio codec for datagram and stream transports
//!
//! ## Wire Format
//! ```text
//! [Length(1 or 3)] [Type(1)] [Body(N)]
//! ```
//!
//! All multi-byte integers are big-endian. The length counts the whole frame.

pub mod codec;
pub mod flags;
pub mod frame;
pub mod packet;
pub mod topic;
