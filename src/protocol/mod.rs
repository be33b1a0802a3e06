//! # Protocol Layer
//!
//! Message kinds, their type identifiers and return codes, plus packet routing.
//!
//! ## Components
//! - **Packet Type**: the type identifier registry
//! - **Packets**: one body codec per message kind
//! - **Return Code**: acknowledgement status values
//! - **Dispatcher**: routes decoded packets to handlers by type

pub mod dispatcher;
pub mod packet_type;
pub mod packets;
pub mod return_code;
