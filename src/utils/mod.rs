//! # Utility Modules
//!
//! Supporting utilities shared by the codec.
//!
//! ## Components
//! - **Metrics**: Thread-safe encode/decode counters

pub mod metrics;

pub use metrics::{CodecMetrics, MetricsSnapshot};
