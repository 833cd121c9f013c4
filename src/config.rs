//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::crsf::protocol::address;
use crate::error::{CrsfError, Result};

/// Supported CRSF baud rates
pub const SUPPORTED_BAUD_RATES: [u32; 6] = [115200, 400000, 420000, 921600, 1870000, 3750000];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub serial: SerialConfig,

    #[serde(default)]
    pub link: LinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Serial port configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SerialConfig {
    #[serde(default = "default_serial_port")]
    pub port: String,

    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,

    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

/// Device addressing on the CRSF link
#[derive(Debug, Deserialize, Clone)]
pub struct LinkConfig {
    /// Device whose parameters are read and written
    #[serde(default = "default_device_address")]
    pub device_address: u8,

    /// Address this host sends from
    #[serde(default = "default_origin_address")]
    pub origin_address: u8,

    #[serde(default = "default_ping_on_connect")]
    pub ping_on_connect: bool,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Optional log file; rotated daily
    #[serde(default)]
    pub file: Option<String>,
}

// Default value functions
fn default_serial_port() -> String { "/dev/ttyACM0".to_string() }
fn default_baud_rate() -> u32 { 115200 }
fn default_read_buffer_size() -> usize { 256 }

fn default_device_address() -> u8 { address::FLIGHT_CONTROLLER }
fn default_origin_address() -> u8 { address::RADIO_TRANSMITTER }
fn default_ping_on_connect() -> bool { true }

fn default_log_level() -> String { "info".to_string() }

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_serial_port(),
            baud_rate: default_baud_rate(),
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_address: default_device_address(),
            origin_address: default_origin_address(),
            ping_on_connect: default_ping_on_connect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use crsf_link::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            return Err(invalid("serial port cannot be empty"));
        }

        if !SUPPORTED_BAUD_RATES.contains(&self.serial.baud_rate) {
            return Err(invalid(
                "baud_rate must be one of: 115200, 400000, 420000, 921600, 1870000, 3750000",
            ));
        }

        if self.serial.read_buffer_size == 0 || self.serial.read_buffer_size > 4096 {
            return Err(invalid("read_buffer_size must be between 1 and 4096"));
        }

        if self.link.origin_address == address::BROADCAST {
            return Err(invalid("origin_address cannot be the broadcast address"));
        }

        if self.link.origin_address == self.link.device_address {
            return Err(invalid("origin_address must differ from device_address"));
        }

        if self.logging.level.trim().is_empty() {
            return Err(invalid("logging level cannot be empty"));
        }

        if matches!(&self.logging.file, Some(file) if file.trim().is_empty()) {
            return Err(invalid("logging file cannot be empty when set"));
        }

        Ok(())
    }
}

fn invalid(msg: &str) -> CrsfError {
    CrsfError::Config(toml::de::Error::custom(msg))
}
