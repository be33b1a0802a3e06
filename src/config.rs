//! # Configuration Management
//!
//! Protocol constants and the runtime configuration of the packet codec.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()` / `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Framing
//! MQTT-SN is datagram oriented: each datagram carries exactly one packet. The codec
//! can also split packets out of a byte stream (serial links, TCP tunnels) using the
//! length header.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Protocol id carried in CONNECT (MQTT-SN v1.2)
pub const PROTOCOL_ID: u8 = 0x01;

/// Maximum client identifier length in bytes
pub const MAX_CLIENT_ID_LENGTH: usize = 23;

/// Keep-alive applied to CONNECT when the caller does not set one (seconds)
pub const DEFAULT_KEEP_ALIVE: u16 = 15;

/// Largest frame expressible with the 1-byte length header
pub const MAX_SHORT_FRAME_LENGTH: usize = 255;

/// Largest frame expressible with the 3-byte length header
pub const MAX_FRAME_LENGTH: usize = 65_535;

/// How packets are delimited on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    /// One packet per buffer; the whole buffer must match the length header
    #[default]
    Datagram,
    /// Packets are read back to back from a byte stream
    Stream,
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MqttSnConfig {
    /// Packet codec configuration
    #[serde(default)]
    pub codec: CodecConfig,
}

impl MqttSnConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| Error::Config(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(framing) = std::env::var("MQTTSN_FRAMING") {
            config.codec.framing = match framing.to_ascii_lowercase().as_str() {
                "datagram" => Framing::Datagram,
                "stream" => Framing::Stream,
                other => {
                    return Err(Error::Config(format!(
                        "Invalid MQTTSN_FRAMING value: '{other}' (expected 'datagram' or 'stream')"
                    )))
                }
            };
        }

        if let Ok(size) = std::env::var("MQTTSN_MAX_PACKET_SIZE") {
            config.codec.max_packet_size = size
                .parse::<usize>()
                .map_err(|e| Error::Config(format!("Invalid MQTTSN_MAX_PACKET_SIZE: {e}")))?;
        }

        if let Ok(extended) = std::env::var("MQTTSN_EXTENDED_LENGTH") {
            config.codec.allow_extended_length = extended
                .parse::<bool>()
                .map_err(|e| Error::Config(format!("Invalid MQTTSN_EXTENDED_LENGTH: {e}")))?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        self.codec.validate()
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Packet codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodecConfig {
    /// How packets are delimited on the transport
    #[serde(default)]
    pub framing: Framing,

    /// Largest frame (header included) accepted or produced, in bytes
    pub max_packet_size: usize,

    /// Whether frames longer than 255 bytes (3-byte length header) are allowed
    pub allow_extended_length: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            framing: Framing::Datagram,
            max_packet_size: MAX_FRAME_LENGTH,
            allow_extended_length: true,
        }
    }
}

impl CodecConfig {
    /// Validate codec configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.max_packet_size < 2 {
            errors.push(format!(
                "Max packet size too small: {} bytes (minimum: 2)",
                self.max_packet_size
            ));
        } else if self.max_packet_size > MAX_FRAME_LENGTH {
            errors.push(format!(
                "Max packet size too large: {} bytes (maximum: {MAX_FRAME_LENGTH})",
                self.max_packet_size
            ));
        }

        if !self.allow_extended_length && self.max_packet_size > MAX_SHORT_FRAME_LENGTH {
            errors.push(format!(
                "Max packet size {} needs the extended length header, which is disabled",
                self.max_packet_size
            ));
        }

        errors
    }

    /// The effective frame size limit.
    pub fn frame_limit(&self) -> usize {
        if self.allow_extended_length {
            self.max_packet_size.min(MAX_FRAME_LENGTH)
        } else {
            self.max_packet_size.min(MAX_SHORT_FRAME_LENGTH)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_limit() {
        let config = CodecConfig::default();
        assert_eq!(config.frame_limit(), MAX_FRAME_LENGTH);

        let config = CodecConfig {
            allow_extended_length: false,
            ..CodecConfig::default()
        };
        assert_eq!(config.frame_limit(), MAX_SHORT_FRAME_LENGTH);

        let config = CodecConfig {
            max_packet_size: 64,
            ..CodecConfig::default()
        };
        assert_eq!(config.frame_limit(), 64);
    }

    #[test]
    fn test_framing_serde_names() {
        let config = MqttSnConfig::from_toml(
            "[codec]\nframing = \"stream\"\nmax_packet_size = 512\nallow_extended_length = true\n",
        )
        .unwrap();
        assert_eq!(config.codec.framing, Framing::Stream);
        assert_eq!(config.codec.max_packet_size, 512);
    }
}
