//! SpikeChunsoft token stream.
//!
//! Every token starts with a flag byte whose top bits select its kind:
//!
//! | Flag        | Token                                                        |
//! |-------------|--------------------------------------------------------------|
//! | `1LLDDDDD`  | match: one more displacement byte, length `LL + 4`           |
//! | `011LLLLL`  | continue the previous match for `LLLLL` more bytes           |
//! | `010XLLLL`  | run of one byte, length `L + 4` (`X`: one more length byte)  |
//! | `00XLLLLL`  | raw bytes, length `L` (`X`: one more length byte)            |

use std::io::{Read, Write};

use log::{debug, trace};

use super::{ByteReader, Decoder, SizeTarget};
use crate::config::WINDOW_SPIKE_CHUNSOFT;
use crate::error::{Error, Result};
use crate::history::HistoryBuffer;

/// Decoder for headerless SpikeChunsoft data.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpikeChunsoftDecoder;

impl SpikeChunsoftDecoder {
    pub fn new() -> Self {
        SpikeChunsoftDecoder
    }
}

impl Decoder for SpikeChunsoftDecoder {
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>) -> Result<()> {
        let mut reader = ByteReader::new(input);
        let mut history = HistoryBuffer::new(WINDOW_SPIKE_CHUNSOFT);
        let mut target = SizeTarget::new(decompressed_size);
        let bounded = target.is_bounded();
        // Displacement of the match token directly before, if any.
        let mut last_match: Option<usize> = None;

        while !target.is_done() {
            let Some(flag) = reader.token_start(bounded)? else {
                break;
            };

            if flag & 0x80 != 0 {
                let displacement = (((flag & 0x1F) as usize) << 8) | reader.read_u8()? as usize;
                let length = target.clamp(((flag >> 5) & 0x03) as usize + 4);
                trace!("spike: match disp={:#x} len={}", displacement, length);
                history.copy(output, displacement, length)?;
                target.advance(length);
                last_match = Some(displacement);
            } else if flag & 0x60 == 0x60 {
                let displacement = last_match.ok_or(Error::MissingPriorMatch {
                    position: history.produced(),
                })?;
                let length = target.clamp((flag & 0x1F) as usize);
                trace!("spike: continue len={}", length);
                history.copy(output, displacement, length)?;
                target.advance(length);
            } else if flag & 0x40 != 0 {
                let mut length = (flag & 0x0F) as usize;
                if flag & 0x10 != 0 {
                    length = (length << 8) | reader.read_u8()? as usize;
                }
                let length = target.clamp(length + 4);
                let value = reader.read_u8()?;
                trace!("spike: run of {:#04x} len={}", value, length);
                for _ in 0..length {
                    history.emit(output, value)?;
                }
                target.advance(length);
                last_match = None;
            } else {
                let mut length = (flag & 0x1F) as usize;
                if flag & 0x20 != 0 {
                    length = (length << 8) | reader.read_u8()? as usize;
                }
                let length = target.clamp(length);
                trace!("spike: raw len={}", length);
                for _ in 0..length {
                    let value = reader.read_u8()?;
                    history.emit(output, value)?;
                }
                target.advance(length);
                last_match = None;
            }
        }

        debug!(
            "spike: decoded {} bytes from {} input bytes",
            target.written(),
            reader.offset()
        );
        Ok(())
    }
}
