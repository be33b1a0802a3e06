//! Codec Metrics
//!
//! Counters for traffic through a [`PacketCodec`](crate::core::codec::PacketCodec).
//!
//! Uses atomic counters so clones of a codec sharing one collector can be driven from
//! several tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Metrics collector for packet encode/decode
#[derive(Debug)]
pub struct CodecMetrics {
    /// Packets decoded successfully
    pub packets_decoded: AtomicU64,
    /// Packets encoded successfully
    pub packets_encoded: AtomicU64,
    /// Frame bytes consumed by successful decodes
    pub bytes_decoded: AtomicU64,
    /// Frame bytes produced by successful encodes
    pub bytes_encoded: AtomicU64,
    /// Malformed or rejected inbound frames
    pub decode_errors: AtomicU64,
    /// Packets that could not be serialised
    pub encode_errors: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl CodecMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            packets_decoded: AtomicU64::new(0),
            packets_encoded: AtomicU64::new(0),
            bytes_decoded: AtomicU64::new(0),
            bytes_encoded: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            encode_errors: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a decoded packet
    pub fn packet_decoded(&self, byte_count: usize) {
        self.packets_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_decoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    /// Record an encoded packet
    pub fn packet_encoded(&self, byte_count: usize) {
        self.packets_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_encoded
            .fetch_add(byte_count as u64, Ordering::Relaxed);
    }

    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn encode_error(&self) {
        self.encode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            packets_decoded: self.packets_decoded.load(Ordering::Relaxed),
            packets_encoded: self.packets_encoded.load(Ordering::Relaxed),
            bytes_decoded: self.bytes_decoded.load(Ordering::Relaxed),
            bytes_encoded: self.bytes_encoded.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            encode_errors: self.encode_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            packets_decoded = snapshot.packets_decoded,
            packets_encoded = snapshot.packets_encoded,
            bytes_decoded = snapshot.bytes_decoded,
            bytes_encoded = snapshot.bytes_encoded,
            decode_errors = snapshot.decode_errors,
            encode_errors = snapshot.encode_errors,
            uptime_seconds = snapshot.uptime_seconds,
            "Codec metrics snapshot"
        );
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub packets_decoded: u64,
    pub packets_encoded: u64,
    pub bytes_decoded: u64,
    pub bytes_encoded: u64,
    pub decode_errors: u64,
    pub encode_errors: u64,
    pub uptime_seconds: u64,
}
