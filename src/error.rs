//! # Error Types
//!
//! Custom error types for CRSF Link using `thiserror`.

use thiserror::Error;

use crate::crsf::parameter::ParameterKind;

/// Main error type for CRSF Link
#[derive(Debug, Error)]
pub enum CrsfError {
    /// First byte of a frame is not the sync byte
    #[error("Invalid sync byte: 0x{0:02X}")]
    InvalidSyncByte(u8),

    /// Length byte outside the protocol range (4..=64)
    #[error("Invalid frame length: {0}")]
    InvalidFrameLength(usize),

    /// Fewer bytes than the length field announces
    #[error("Frame too short: expected {expected} bytes, got {actual}")]
    FrameTooShort { expected: usize, actual: usize },

    /// Trailing CRC byte does not match the recomputed checksum
    #[error("CRC mismatch: expected 0x{expected:02X}, got 0x{actual:02X}")]
    CrcMismatch { expected: u8, actual: u8 },

    /// Payload does not fit into a single frame
    #[error("Payload size {size} exceeds maximum {max}")]
    PayloadTooLarge { size: usize, max: usize },

    /// A field needs more bytes than the payload holds
    #[error("Incomplete data: needed {needed} bytes, {available} available")]
    Incomplete { needed: usize, available: usize },

    /// Frame handed to a decoder meant for another frame type
    #[error("Unexpected frame type: expected 0x{expected:02X}, got 0x{actual:02X}")]
    UnexpectedFrameType { expected: u8, actual: u8 },

    /// Parameter type id outside the known set
    #[error("Unknown parameter type: 0x{0:02X}")]
    UnknownParameterType(u8),

    /// Parameter kind has no wire serializer
    #[error("Parameter kind {0:?} is read-only")]
    ReadOnlyParameter(ParameterKind),

    /// Session was closed or the transport reached end of stream
    #[error("Connection closed")]
    ConnectionClosed,

    /// Serial port errors
    #[error("Serial port error: {0}")]
    Serial(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CRSF Link
pub type Result<T> = std::result::Result<T, CrsfError>;
