//! # CRSF Packet Encoder
//!
//! Encodes outbound CRSF frames.
//!
//! Frames are always emitted in the extended (addressed) form:
//! `sync, length, type, destination, origin, payload, crc`. Legacy frames
//! such as RC channels are never produced by [`encode_frame`]; the decoder
//! accepts both forms.

use super::crc::crc8_dvb_s2;
use super::parameter::ParameterValue;
use super::protocol::*;
use crate::error::{CrsfError, Result};

/// Encode a frame into its addressed wire form
///
/// # Arguments
///
/// * `frame` - Frame to encode (payload max 60 bytes)
///
/// # Returns
///
/// * `Result<Vec<u8>>` - Complete frame: sync + length + type + dest + origin + payload + crc
///
/// # Examples
///
/// ```
/// use crsf_link::crsf::encoder::encode_frame;
/// use crsf_link::crsf::protocol::{address, frame_type, CrsfFrame};
///
/// let frame = CrsfFrame::addressed(
///     frame_type::DEVICE_PING,
///     address::BROADCAST,
///     address::RADIO_TRANSMITTER,
///     vec![],
/// )?;
/// let bytes = encode_frame(&frame)?;
/// assert_eq!(&bytes[..5], &[0xC8, 0x04, 0x28, 0x00, 0xEA]);
/// # Ok::<(), crsf_link::error::CrsfError>(())
/// ```
pub fn encode_frame(frame: &CrsfFrame) -> Result<Vec<u8>> {
    if frame.payload.len() > CRSF_MAX_PAYLOAD_SIZE {
        return Err(CrsfError::PayloadTooLarge {
            size: frame.payload.len(),
            max: CRSF_MAX_PAYLOAD_SIZE,
        });
    }

    let mut bytes = Vec::with_capacity(frame.payload.len() + CRSF_EXTENDED_OVERHEAD + 2);
    bytes.push(CRSF_SYNC_BYTE);
    bytes.push(frame.length());
    bytes.push(frame.frame_type);
    bytes.push(frame.destination);
    bytes.push(frame.origin);
    bytes.extend_from_slice(&frame.payload);

    // CRC over Type + Dest + Origin + Payload
    let crc = crc8_dvb_s2(&bytes[2..]);
    bytes.push(crc);

    Ok(bytes)
}

/// Build a device ping frame
///
/// Devices answer a ping with a device info frame. Use
/// [`address::BROADCAST`] to ping every device on the link.
pub fn device_ping_frame(destination: u8, origin: u8) -> CrsfFrame {
    CrsfFrame {
        frame_type: frame_type::DEVICE_PING,
        destination,
        origin,
        payload: Vec::new(),
    }
}

/// Build a parameter read request for one chunk of a parameter entry
pub fn parameter_read_frame(
    destination: u8,
    origin: u8,
    field_index: u8,
    chunk_index: u8,
) -> CrsfFrame {
    CrsfFrame {
        frame_type: frame_type::PARAMETER_READ,
        destination,
        origin,
        payload: vec![field_index, chunk_index],
    }
}

/// Build a parameter write frame carrying a new value for `field_index`
///
/// # Errors
///
/// Returns [`CrsfError::ReadOnlyParameter`] if the value kind has no wire
/// serializer, or [`CrsfError::PayloadTooLarge`] if the serialized value does
/// not fit into one frame.
pub fn parameter_write_frame(
    destination: u8,
    origin: u8,
    field_index: u8,
    value: &ParameterValue,
) -> Result<CrsfFrame> {
    let serialized = value.serialize()?;

    let mut payload = Vec::with_capacity(1 + serialized.len());
    payload.push(field_index);
    payload.extend_from_slice(&serialized);

    CrsfFrame::addressed(frame_type::PARAMETER_WRITE, destination, origin, payload)
}

/// Encode RC channels into payload (22 bytes)
///
/// Packs 16 channels (11 bits each) into 22 bytes using bit packing.
/// Channels are packed as a continuous bitstream, LSB first.
///
/// # Algorithm
///
/// ```text
/// Byte 0: Ch1[0:7]
/// Byte 1: Ch1[8:10] | Ch2[0:4]
/// Byte 2: Ch2[5:10] | Ch3[0:1]
/// ...
/// ```
pub fn encode_rc_channels_payload(channels: &RcChannels) -> Vec<u8> {
    let mut payload = vec![0u8; CRSF_RC_CHANNELS_PAYLOAD_SIZE];
    let mut bit_index = 0;

    for &channel in channels.iter() {
        let value = channel.min(CRSF_CHANNEL_VALUE_MAX);

        for bit in 0..CRSF_CHANNEL_BITS {
            if (value >> bit) & 1 == 1 {
                payload[bit_index / 8] |= 1 << (bit_index % 8);
            }
            bit_index += 1;
        }
    }

    payload
}
