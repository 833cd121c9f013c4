//! # CRSF Protocol Module
//!
//! Implementation of the Crossfire (CRSF) protocol for ExpressLRS communication.
//!
//! This module handles:
//! - CRC8-DVB-S2 checksum calculation
//! - Frame synchronization over an arbitrarily chunked byte stream
//! - Legacy and extended (addressed) frame encoding/decoding
//! - RC channels unpacking (16 channels, 11-bit resolution)
//! - Device parameter entries (12 data kinds) and parameter writes
//! - Delivery of validated frames to registered handlers

pub mod protocol;
pub mod encoder;
pub mod decoder;
pub mod crc;
pub mod deframer;
pub mod parameter;
pub mod dispatcher;
