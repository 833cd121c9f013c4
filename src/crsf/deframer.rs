//! # CRSF Stream Deframer
//!
//! Turns an arbitrarily chunked byte stream into complete, CRC-valid frames.
//!
//! ## Resynchronization
//!
//! - Bytes before the first sync byte are discarded.
//! - A length byte outside 4..=64 marks the sync byte as spurious; only that
//!   one byte is dropped and scanning restarts.
//! - A candidate whose CRC does not match is dropped whole.
//!
//! None of these surface as errors; they are counted in [`DeframerStats`].

use bytes::{Buf, BytesMut};
use tracing::{debug, trace};

use super::decoder::decode_frame;
use super::protocol::*;
use crate::error::{CrsfError, Result};

/// Largest number of bytes a single frame occupies on the wire
pub const CRSF_MAX_FRAME_SIZE: usize = CRSF_FRAME_LENGTH_MAX + 2;

/// Diagnostic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeframerStats {
    /// Frames emitted
    pub frames: u64,

    /// Candidates dropped for a CRC mismatch
    pub crc_errors: u64,

    /// Bytes skipped while searching for a sync byte
    pub discarded_bytes: u64,
}

/// Incremental CRSF frame extractor
///
/// Owns the carry-over buffer between reads.
///
/// # Examples
///
/// ```
/// use crsf_link::crsf::deframer::Deframer;
/// use crsf_link::crsf::encoder::{device_ping_frame, encode_frame};
///
/// let bytes = encode_frame(&device_ping_frame(0x00, 0xEA))?;
/// let mut deframer = Deframer::new();
///
/// assert_eq!(deframer.feed(&bytes[..3]).count(), 0);
/// let frames: Vec<_> = deframer.feed(&bytes[3..]).collect::<Result<_, _>>()?;
/// assert_eq!(frames.len(), 1);
/// # Ok::<(), crsf_link::error::CrsfError>(())
/// ```
#[derive(Debug, Default)]
pub struct Deframer {
    buffer: BytesMut,
    stats: DeframerStats,
}

impl Deframer {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(CRSF_MAX_FRAME_SIZE * 2),
            stats: DeframerStats::default(),
        }
    }

    /// Append bytes and iterate over the frames they complete
    ///
    /// Frames are yielded lazily in stream order. Bytes of an incomplete frame
    /// stay buffered for the next call; dropping the iterator early keeps any
    /// unread frames buffered as well.
    pub fn feed(&mut self, data: &[u8]) -> Frames<'_> {
        self.buffer.extend_from_slice(data);
        Frames { deframer: self }
    }

    /// Extract the next complete frame from buffered bytes
    ///
    /// Returns `None` when more data is needed.
    pub fn next_frame(&mut self) -> Option<Result<CrsfFrame>> {
        loop {
            if self.buffer.is_empty() {
                return None;
            }

            match self.buffer.iter().position(|&b| b == CRSF_SYNC_BYTE) {
                Some(0) => {}
                Some(start) => self.discard(start),
                None => {
                    // Cannot contain a frame
                    self.discard(self.buffer.len());
                    return None;
                }
            }

            if self.buffer.len() < 2 {
                return None;
            }

            let length = self.buffer[1] as usize;
            if !is_valid_frame_length(length) {
                trace!("Spurious sync byte (length {}), skipping", length);
                self.discard(1);
                continue;
            }

            if self.buffer.len() < length + 2 {
                return None;
            }

            let candidate = self.buffer.split_to(length + 2);

            match decode_frame(&candidate) {
                Err(CrsfError::CrcMismatch { expected, actual }) => {
                    self.stats.crc_errors += 1;
                    debug!(
                        "Dropped frame with bad CRC (expected 0x{:02X}, got 0x{:02X})",
                        expected, actual
                    );
                }
                Ok(frame) => {
                    self.stats.frames += 1;
                    trace!(
                        "Frame type 0x{:02X}, {} payload bytes",
                        frame.frame_type,
                        frame.payload.len()
                    );
                    return Some(Ok(frame));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }

    /// Bytes waiting for the rest of a frame
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Drop all buffered bytes
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn stats(&self) -> DeframerStats {
        self.stats
    }

    fn discard(&mut self, count: usize) {
        trace!("Discarding {} bytes", count);
        self.buffer.advance(count);
        self.stats.discarded_bytes += count as u64;
    }
}

/// Lazy iterator over frames completed by [`Deframer::feed`]
#[derive(Debug)]
pub struct Frames<'a> {
    deframer: &'a mut Deframer,
}

impl Iterator for Frames<'_> {
    type Item = Result<CrsfFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.deframer.next_frame()
    }
}
