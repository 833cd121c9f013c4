//! # CRSF Link Library
//!
//! Serial link engine for the Crossfire (CRSF) protocol as spoken by
//! ExpressLRS transmitter modules and receivers.
//!
//! This library turns a chunked byte stream into validated CRSF frames,
//! decodes RC channel sets, and decodes/encodes the device parameter
//! schema used to configure ELRS hardware.

pub mod config;
pub mod error;
pub mod crsf;
pub mod serial;
