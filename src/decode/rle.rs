//! Nintendo-style run-length stream.
//!
//! A flag byte with bit 7 set is followed by one byte repeated
//! `(flag & 0x7F) + 3` times; otherwise `flag + 1` raw bytes follow.

use std::io::{Read, Write};

use log::{debug, trace};

use super::{ByteReader, Decoder, SizeTarget};
use crate::error::Result;

/// Shortest run a run token encodes.
pub const MIN_RUN: usize = 3;
/// Longest run a run token encodes.
pub const MAX_RUN: usize = 0x7F + MIN_RUN;
/// Longest block of raw bytes.
pub const MAX_RAW: usize = 0x80;

/// Decoder for headerless RLE data.
#[derive(Clone, Copy, Debug, Default)]
pub struct RleDecoder;

impl RleDecoder {
    pub fn new() -> Self {
        RleDecoder
    }
}

impl Decoder for RleDecoder {
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>) -> Result<()> {
        let mut reader = ByteReader::new(input);
        let mut target = SizeTarget::new(decompressed_size);
        let bounded = target.is_bounded();
        let mut raw = [0u8; MAX_RAW];

        while !target.is_done() {
            let Some(flag) = reader.token_start(bounded)? else {
                break;
            };
            if flag & 0x80 != 0 {
                let length = (flag & 0x7F) as usize + MIN_RUN;
                let value = reader.read_u8()?;
                let length = target.clamp(length);
                trace!("rle: run of {:#04x} len={}", value, length);
                output.write_all(&[value; MAX_RUN][..length])?;
                target.advance(length);
            } else {
                let length = flag as usize + 1;
                reader.read_exact(&mut raw[..length])?;
                let length = target.clamp(length);
                trace!("rle: raw len={}", length);
                output.write_all(&raw[..length])?;
                target.advance(length);
            }
        }

        debug!("rle: decoded {} bytes from {} input bytes", target.written(), reader.offset());
        Ok(())
    }
}
