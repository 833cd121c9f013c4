//! # CRSF Packet Decoder
//!
//! Decodes complete CRSF frames (legacy and addressed forms) and RC channel
//! payloads.

use super::crc::crc8_dvb_s2;
use super::protocol::*;
use crate::error::{CrsfError, Result};

/// Decode a complete CRSF frame
///
/// # Arguments
///
/// * `frame` - Complete CRSF frame bytes (including sync, length, type, payload, crc)
///
/// # Returns
///
/// * `Result<CrsfFrame>` - Decoded frame, or error if invalid
///
/// # Errors
///
/// Returns error if:
/// - Frame is too short
/// - Sync byte is incorrect
/// - Length byte is outside 4..=64
/// - CRC check fails
///
/// Frame types below 0x28 decode with zero destination and origin; types at
/// or above 0x28 read them from bytes 3 and 4.
pub fn decode_frame(frame: &[u8]) -> Result<CrsfFrame> {
    if frame.len() < 2 {
        return Err(CrsfError::FrameTooShort {
            expected: CRSF_FRAME_LENGTH_MIN + 2,
            actual: frame.len(),
        });
    }

    if frame[0] != CRSF_SYNC_BYTE {
        return Err(CrsfError::InvalidSyncByte(frame[0]));
    }

    let length = frame[1] as usize;
    if !is_valid_frame_length(length) {
        return Err(CrsfError::InvalidFrameLength(length));
    }

    // Frame should be: sync(1) + length(1) + [length bytes]
    if frame.len() < 2 + length {
        return Err(CrsfError::FrameTooShort {
            expected: 2 + length,
            actual: frame.len(),
        });
    }

    let received_crc = frame[1 + length];

    // CRC over Type + [Dest + Origin] + Payload
    let calculated_crc = crc8_dvb_s2(&frame[2..1 + length]);
    if calculated_crc != received_crc {
        return Err(CrsfError::CrcMismatch {
            expected: calculated_crc,
            actual: received_crc,
        });
    }

    let frame_type = frame[2];

    // Length >= 4 guarantees dest and origin exist for addressed types
    let decoded = if is_extended_type(frame_type) {
        CrsfFrame {
            frame_type,
            destination: frame[3],
            origin: frame[4],
            payload: frame[5..1 + length].to_vec(),
        }
    } else {
        CrsfFrame {
            frame_type,
            destination: 0,
            origin: 0,
            payload: frame[3..1 + length].to_vec(),
        }
    };

    Ok(decoded)
}

/// Decode a packed RC channels payload (22 bytes)
///
/// Unpacks 16 channels of 11 bits each, LSB first. Each channel is read from
/// a 24-bit little-endian window starting at the current byte, shifted by
/// the current bit offset and masked to 11 bits.
///
/// # Errors
///
/// Returns [`CrsfError::Incomplete`] if fewer than 22 bytes are given.
///
/// # Examples
///
/// ```
/// use crsf_link::crsf::decoder::decode_rc_channels;
///
/// let channels = decode_rc_channels(&[0xFF; 22])?;
/// assert!(channels.iter().all(|&c| c == 2047));
/// # Ok::<(), crsf_link::error::CrsfError>(())
/// ```
pub fn decode_rc_channels(payload: &[u8]) -> Result<RcChannels> {
    if payload.len() < CRSF_RC_CHANNELS_PAYLOAD_SIZE {
        return Err(CrsfError::Incomplete {
            needed: CRSF_RC_CHANNELS_PAYLOAD_SIZE,
            available: payload.len(),
        });
    }

    let mut channels = [0u16; CRSF_NUM_CHANNELS];
    let mut byte_index = 0;
    let mut bit_offset = 0;

    for channel in channels.iter_mut() {
        // The last channel ends inside byte 21, so a missing third window
        // byte never contributes bits
        let window = u32::from(payload[byte_index])
            | u32::from(payload[byte_index + 1]) << 8
            | u32::from(payload.get(byte_index + 2).copied().unwrap_or(0)) << 16;

        *channel = ((window >> bit_offset) & u32::from(CRSF_CHANNEL_VALUE_MAX)) as u16;

        let bits = bit_offset + CRSF_CHANNEL_BITS;
        byte_index += bits / 8;
        bit_offset = bits % 8;
    }

    Ok(channels)
}

/// Decode the channel set carried by an RC channels frame
///
/// # Errors
///
/// Returns [`CrsfError::UnexpectedFrameType`] for any other frame type, or
/// [`CrsfError::Incomplete`] if the payload is shorter than 22 bytes.
pub fn decode_rc_channels_frame(frame: &CrsfFrame) -> Result<RcChannels> {
    if frame.frame_type != frame_type::RC_CHANNELS_PACKED {
        return Err(CrsfError::UnexpectedFrameType {
            expected: frame_type::RC_CHANNELS_PACKED,
            actual: frame.frame_type,
        });
    }

    decode_rc_channels(&frame.payload)
}
