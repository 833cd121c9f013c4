//! # CRC8-DVB-S2 Implementation
//!
//! CRC-8-DVB-S2 checksum calculation for CRSF protocol.
//!
//! **Polynomial**: 0xD5 (x^8 + x^7 + x^6 + x^4 + x^2 + 1)
//! **Initial Value**: 0x00, no reflection, no final XOR
//!
//! The checksum covers every byte from the frame type through the end of the
//! payload. Sync, length and the CRC byte itself are excluded.

/// CRC-8-DVB-S2 polynomial
const CRC8_POLY: u8 = 0xD5;

/// Checksum of each possible register value after eight shifts
const CRC8_TABLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut index = 0;
    while index < table.len() {
        table[index] = shift_register(index as u8);
        index += 1;
    }
    table
};

/// Run the register through eight polynomial shifts
const fn shift_register(mut crc: u8) -> u8 {
    let mut bit = 0;
    while bit < 8 {
        crc = if crc & 0x80 != 0 { (crc << 1) ^ CRC8_POLY } else { crc << 1 };
        bit += 1;
    }
    crc
}

/// Calculate CRC8-DVB-S2 checksum using lookup table
///
/// # Arguments
///
/// * `data` - Frame type, optional destination/origin, and payload
///
/// # Examples
///
/// ```
/// use crsf_link::crsf::crc::crc8_dvb_s2;
///
/// assert_eq!(crc8_dvb_s2(&[]), 0x00);
/// assert_eq!(crc8_dvb_s2(&[0x01]), 0xD5);
/// ```
pub fn crc8_dvb_s2(data: &[u8]) -> u8 {
    data.iter().fold(0, |crc, &byte| CRC8_TABLE[usize::from(crc ^ byte)])
}

/// Check a received CRC byte against the checksum of `data`
pub fn verify_crc8(data: &[u8], received: u8) -> bool {
    crc8_dvb_s2(data) == received
}
