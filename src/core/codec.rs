//! # Packet Codec
//!
//! [`tokio_util::codec`] adapter for MQTT-SN packets.
//!
//! Two framing modes are supported (see [`Framing`]):
//! - **Datagram**: every call to `decode` treats the whole buffer as one packet. Use with
//!   [`tokio_util::udp::UdpFramed`].
//! - **Stream**: packets are split off a byte stream using the length header. Use with
//!   [`tokio_util::codec::Framed`] over serial or TCP links.
//!
//! Both modes enforce `max_packet_size` and `allow_extended_length` from [`CodecConfig`],
//! and count traffic in a shared [`CodecMetrics`].

use crate::config::{CodecConfig, Framing, MAX_SHORT_FRAME_LENGTH};
use crate::core::frame::{self, Header};
use crate::core::packet::Packet;
use crate::error::{Error, ProtocolError, Result, ValueError};
use crate::utils::metrics::CodecMetrics;
use bytes::BytesMut;
use std::sync::Arc;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, instrument, trace};

/// Codec turning bytes into [`Packet`]s and back.
///
/// Clones share the same metrics collector.
#[derive(Debug, Clone, Default)]
pub struct PacketCodec {
    config: CodecConfig,
    metrics: Arc<CodecMetrics>,
}

impl PacketCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(CodecMetrics::new()),
        }
    }

    /// Datagram codec with default limits.
    pub fn datagram() -> Self {
        Self::default()
    }

    /// Stream codec with default limits.
    pub fn stream() -> Self {
        Self::new(CodecConfig {
            framing: Framing::Stream,
            ..CodecConfig::default()
        })
    }

    /// Record into an existing collector instead of a private one.
    pub fn with_metrics(mut self, metrics: Arc<CodecMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<CodecMetrics> {
        &self.metrics
    }

    /// Apply the configured limits to a declared frame length.
    fn check_limits(&self, length: usize, extended: bool) -> std::result::Result<(), ProtocolError> {
        if extended && !self.config.allow_extended_length {
            return Err(ProtocolError::ExtendedLengthDisabled);
        }
        let max = self.config.frame_limit();
        if length > max {
            return Err(ProtocolError::OversizedPacket { size: length, max });
        }
        Ok(())
    }

    fn decode_datagram(&self, src: &mut BytesMut) -> std::result::Result<Option<Packet>, ProtocolError> {
        if src.is_empty() {
            return Ok(None);
        }
        let datagram = src.split();
        let header = Header::parse(&datagram)?;
        self.check_limits(header.length, header.is_extended())?;
        let packet = Packet::decode_frame(&header, &datagram)?;
        self.metrics.packet_decoded(header.length);
        Ok(Some(packet))
    }

    fn decode_stream(&self, src: &mut BytesMut) -> std::result::Result<Option<Packet>, ProtocolError> {
        let Some((length, extended)) = frame::peek_length(src)? else {
            return Ok(None);
        };
        self.check_limits(length, extended)?;

        if src.len() < length {
            src.reserve(length - src.len());
            return Ok(None);
        }

        let data = src.split_to(length);
        let header = Header::parse(&data)?;
        let packet = Packet::decode_frame(&header, &data)?;
        self.metrics.packet_decoded(length);
        Ok(Some(packet))
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = Error;

    #[instrument(level = "trace", skip_all, fields(framing = ?self.config.framing, available = src.len()))]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Packet>> {
        let available = src.len();
        let decoded = match self.config.framing {
            Framing::Datagram => self.decode_datagram(src),
            Framing::Stream => self.decode_stream(src),
        };

        match decoded {
            Ok(Some(packet)) => {
                trace!(packet_type = %packet.packet_type(), "decoded packet");
                Ok(Some(packet))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.metrics.decode_error();
                debug!(error = %e, bytes = available, "rejected inbound frame");
                Err(e.into())
            }
        }
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = Error;

    #[instrument(level = "trace", skip_all, fields(packet_type = %item.packet_type()))]
    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<()> {
        let encoded = item.body_bytes().and_then(|body| {
            let length = frame::frame_len(body.len())?;
            let max = self.config.frame_limit();
            if length > max {
                return Err(ValueError::PacketTooLarge { size: length, max });
            }
            frame::write_frame(item.type_id(), &body, dst)
        });

        match encoded {
            Ok(length) => {
                self.metrics.packet_encoded(length);
                trace!(length, extended = length > MAX_SHORT_FRAME_LENGTH, "encoded packet");
                Ok(())
            }
            Err(e) => {
                self.metrics.encode_error();
                debug!(error = %e, "failed to encode packet");
                Err(e.into())
            }
        }
    }
}
