//! Shared loop of the flag-byte LZ formats (Lz10, IrLz, Lzss01).
//!
//! All three read one flag byte per eight tokens; a literal token is one raw
//! byte and a match token is two bytes packing a length and a window
//! reference. Only the bit order, the meaning of a set bit and the packing of
//! the two match bytes differ.

use std::io::{Read, Write};

use log::{debug, trace};

use super::{ByteReader, SizeTarget};
use crate::error::Result;
use crate::flags::{BitOrder, FlagReader};
use crate::history::HistoryBuffer;

/// Static description of one flag-byte format.
pub(crate) struct FlagFormat {
    pub name: &'static str,
    pub order: BitOrder,
    /// Flag value announcing a match token.
    pub match_bit: bool,
}

/// Decode a flag-byte stream. `reference` turns the two match bytes into
/// `(displacement, length)` given the current window state.
pub(crate) fn decode_flagged<F>(
    format: &FlagFormat,
    mut history: HistoryBuffer,
    input: &mut dyn Read,
    output: &mut dyn Write,
    decompressed_size: Option<usize>,
    mut reference: F,
) -> Result<()>
where
    F: FnMut(u8, u8, &HistoryBuffer) -> (usize, usize),
{
    let mut reader = ByteReader::new(input);
    let mut target = SizeTarget::new(decompressed_size);
    let mut flags = FlagReader::new(format.order);
    let bounded = target.is_bounded();

    while !target.is_done() {
        if flags.is_empty() {
            match reader.token_start(bounded)? {
                Some(byte) => flags.load(byte),
                None => break,
            }
        }
        let is_match = flags.next_bit() == format.match_bit;
        let Some(first) = reader.token_start(bounded)? else {
            break;
        };

        if is_match {
            let second = reader.read_u8()?;
            let (displacement, length) = reference(first, second, &history);
            let length = target.clamp(length);
            trace!(
                "{}: match disp={:#x} len={} at {:#x}",
                format.name,
                displacement,
                length,
                target.written()
            );
            history.copy(output, displacement, length)?;
            target.advance(length);
        } else {
            history.emit(output, first)?;
            target.advance(1);
        }
    }

    debug!(
        "{}: decoded {} bytes from {} input bytes",
        format.name,
        target.written(),
        reader.offset()
    );
    Ok(())
}
