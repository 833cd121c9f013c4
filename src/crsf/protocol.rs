//! # CRSF Protocol Constants and Types
//!
//! Core protocol definitions for CRSF (Crossfire) communication.
//!
//! ## Wire Layout
//!
//! ```text
//! sync(1) | length(1) | type(1) | [dest(1) | origin(1)] | payload(N) | crc(1)
//! ```
//!
//! Destination and origin are present only when type >= 0x28.
//!
//! Length counts every byte from Type through CRC inclusive.

use crate::error::{CrsfError, Result};

/// CRSF frame sync byte (always 0xC8)
pub const CRSF_SYNC_BYTE: u8 = 0xC8;

/// Smallest valid value of the length byte
pub const CRSF_FRAME_LENGTH_MIN: usize = 4;

/// Largest valid value of the length byte
pub const CRSF_FRAME_LENGTH_MAX: usize = 64;

/// Frame types at or above this value carry destination and origin bytes
pub const CRSF_EXTENDED_FRAME_THRESHOLD: u8 = 0x28;

/// Bytes counted by the length field besides the payload in an addressed frame
/// (type + destination + origin + crc)
pub const CRSF_EXTENDED_OVERHEAD: usize = 4;

/// Maximum payload size of an addressed frame
/// Frame length is at most 64, so max payload = 64 - 4 = 60 bytes
pub const CRSF_MAX_PAYLOAD_SIZE: usize = CRSF_FRAME_LENGTH_MAX - CRSF_EXTENDED_OVERHEAD;

/// Frame type constants
pub mod frame_type {
    pub const GPS: u8 = 0x02;
    pub const BATTERY_SENSOR: u8 = 0x08;
    pub const LINK_STATISTICS: u8 = 0x14;
    pub const RC_CHANNELS_PACKED: u8 = 0x16;
    pub const DEVICE_PING: u8 = 0x28;
    pub const DEVICE_INFO: u8 = 0x29;
    pub const PARAMETER_SETTINGS_ENTRY: u8 = 0x2B;
    pub const PARAMETER_READ: u8 = 0x2C;
    pub const PARAMETER_WRITE: u8 = 0x2D;
    pub const COMMAND: u8 = 0x32;
}

/// Device address constants
pub mod address {
    pub const BROADCAST: u8 = 0x00;
    pub const USB: u8 = 0x10;
    pub const FLIGHT_CONTROLLER: u8 = 0xC8;
    pub const RADIO_TRANSMITTER: u8 = 0xEA;
    pub const RECEIVER: u8 = 0xEC;
    pub const TRANSMITTER: u8 = 0xEE;
}

/// RC channels payload size (22 bytes for 16 channels × 11 bits)
pub const CRSF_RC_CHANNELS_PAYLOAD_SIZE: usize = 22;

/// Number of RC channels
pub const CRSF_NUM_CHANNELS: usize = 16;

/// Bits per packed channel value
pub const CRSF_CHANNEL_BITS: usize = 11;

/// Channel value range (11-bit: 0-2047)
pub const CRSF_CHANNEL_VALUE_MIN: u16 = 0;
pub const CRSF_CHANNEL_VALUE_MAX: u16 = 2047;
pub const CRSF_CHANNEL_VALUE_CENTER: u16 = 1024;

/// RC channels array type (16 channels, 11-bit values)
pub type RcChannels = [u16; CRSF_NUM_CHANNELS];

/// CRSF frame structure
///
/// Length and CRC are wire-only attributes computed by the codec. Destination
/// and origin are zero for legacy (non-addressed) frame types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrsfFrame {
    /// Frame type
    pub frame_type: u8,

    /// Destination device address
    pub destination: u8,

    /// Origin device address
    pub origin: u8,

    /// Payload data
    pub payload: Vec<u8>,
}

impl CrsfFrame {
    /// Create a new frame without addressing
    ///
    /// # Errors
    ///
    /// Returns error if payload exceeds CRSF_MAX_PAYLOAD_SIZE (60 bytes)
    pub fn new(frame_type: u8, payload: Vec<u8>) -> Result<Self> {
        Self::addressed(frame_type, 0, 0, payload)
    }

    /// Create a new addressed frame
    ///
    /// # Arguments
    ///
    /// * `frame_type` - Frame type byte
    /// * `destination` - Destination device address
    /// * `origin` - Origin device address
    /// * `payload` - Payload data (max 60 bytes)
    ///
    /// # Errors
    ///
    /// Returns error if payload exceeds CRSF_MAX_PAYLOAD_SIZE (60 bytes)
    pub fn addressed(
        frame_type: u8,
        destination: u8,
        origin: u8,
        payload: Vec<u8>,
    ) -> Result<Self> {
        if payload.len() > CRSF_MAX_PAYLOAD_SIZE {
            return Err(CrsfError::PayloadTooLarge {
                size: payload.len(),
                max: CRSF_MAX_PAYLOAD_SIZE,
            });
        }

        Ok(Self {
            frame_type,
            destination,
            origin,
            payload,
        })
    }

    /// Whether this frame type uses the extended (addressed) header
    pub fn is_extended(&self) -> bool {
        is_extended_type(self.frame_type)
    }

    /// Length byte of the encoded frame (type + dest + origin + payload + crc)
    ///
    /// Cannot overflow since payload is validated to be ≤ 60 bytes
    pub fn length(&self) -> u8 {
        (self.payload.len() + CRSF_EXTENDED_OVERHEAD) as u8
    }
}

/// Whether `frame_type` carries destination and origin bytes
pub fn is_extended_type(frame_type: u8) -> bool {
    frame_type >= CRSF_EXTENDED_FRAME_THRESHOLD
}

/// Whether a length byte is inside the protocol range
pub fn is_valid_frame_length(length: usize) -> bool {
    (CRSF_FRAME_LENGTH_MIN..=CRSF_FRAME_LENGTH_MAX).contains(&length)
}
