use crate::core::packet::Packet;
use crate::error::{Error, Result};
use crate::protocol::packet_type::PacketType;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::trace;

type HandlerFn = dyn Fn(&Packet) -> Result<Option<Packet>> + Send + Sync + 'static;

/// Routes decoded packets to handlers by packet type.
///
/// A handler may answer with a reply packet (e.g. PINGRESP for PINGREQ) or `None`.
/// Clones share the handler table.
#[derive(Clone)]
pub struct Dispatcher {
    handlers: Arc<RwLock<HashMap<PacketType, Box<HandlerFn>>>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register `handler` for `packet_type`, replacing any previous one.
    pub fn register<F>(&self, packet_type: PacketType, handler: F) -> Result<()>
    where
        F: Fn(&Packet) -> Result<Option<Packet>> + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().map_err(|_| {
            Error::Dispatch("Failed to acquire write lock on dispatcher".to_string())
        })?;

        handlers.insert(packet_type, Box::new(handler));
        Ok(())
    }

    pub fn is_registered(&self, packet_type: PacketType) -> bool {
        self.handlers
            .read()
            .map(|handlers| handlers.contains_key(&packet_type))
            .unwrap_or(false)
    }

    pub fn dispatch(&self, packet: &Packet) -> Result<Option<Packet>> {
        let packet_type = packet.packet_type();

        let handlers = self.handlers.read().map_err(|_| {
            Error::Dispatch("Failed to acquire read lock on dispatcher".to_string())
        })?;

        trace!(%packet_type, "dispatching packet");
        handlers
            .get(&packet_type)
            .ok_or(Error::Unhandled(packet_type))
            .and_then(|handler| handler(packet))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registered = self
            .handlers
            .read()
            .map(|handlers| handlers.len())
            .unwrap_or(0);
        f.debug_struct("Dispatcher")
            .field("registered", &registered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packets::{Pingreq, Pingresp, Pubrec, Pubrel};

    #[test]
    fn test_dispatch_returns_reply() {
        let dispatcher = Dispatcher::new();
        dispatcher
            .register(PacketType::Pingreq, |_| Ok(Some(Pingresp.into())))
            .unwrap();

        let reply = dispatcher.dispatch(&Pingreq::new().into()).unwrap();
        assert_eq!(reply, Some(Packet::Pingresp(Pingresp)));
    }

    #[test]
    fn test_reply_built_from_request() {
        let dispatcher = Dispatcher::new();
        dispatcher
            .register(PacketType::Pubrec, |packet| match packet {
                Packet::Pubrec(rec) => Ok(Some(Pubrel::new(rec.msg_id).into())),
                _ => Ok(None),
            })
            .unwrap();

        let reply = dispatcher.dispatch(&Pubrec::new(42).into()).unwrap();
        assert_eq!(reply, Some(Packet::Pubrel(Pubrel::new(42))));
    }

    #[test]
    fn test_unregistered_type() {
        let dispatcher = Dispatcher::new();
        assert!(!dispatcher.is_registered(PacketType::Pingresp));
        let err = dispatcher.dispatch(&Pingresp.into()).unwrap_err();
        assert!(matches!(err, Error::Unhandled(PacketType::Pingresp)));
        assert_eq!(err.to_string(), "No handler registered for PINGRESP packets");
    }
}
