//! Headerless decoders.
//!
//! Every decoder is a small sequential state machine that replays a token
//! stream against its own [`HistoryBuffer`](crate::history::HistoryBuffer)
//! (or, for the entropy and run-length formats, directly against the output).
//!
//! # Termination
//!
//! With a known decompressed size the decoder writes exactly that many bytes
//! and stops; the last copy is clamped to what remains, and running out of
//! input anywhere is [`Error::StreamTooShort`].
//!
//! Without a size the decoder runs until the input ends at a token boundary:
//! end of input where a flag byte or the first byte of a token is expected
//! is a clean end, end of input inside a token is still `StreamTooShort`.

mod flagged;
pub mod huffman;
pub mod irlz;
pub mod lz10;
pub mod lzss01;
pub mod rle;
pub mod spike_chunsoft;

pub use huffman::{HuffmanDecoder, NibbleOrder, SymbolDepth, WordOrder};
pub use irlz::IrLzDecoder;
pub use lz10::Lz10Decoder;
pub use lzss01::Lzss01Decoder;
pub use rle::RleDecoder;
pub use spike_chunsoft::SpikeChunsoftDecoder;

use std::io::{self, Read, Write};

use byteorder::ByteOrder;

use crate::error::{Error, Result};

/// A format-specific decoder.
pub trait Decoder {
    /// Decode `input` into `output`.
    ///
    /// `decompressed_size` is the exact number of bytes to produce; `None`
    /// decodes until the input ends between two tokens.
    ///
    /// Only the bytes of this stream are taken from `input`, so streams
    /// stored back to back can be decoded one after another from the same
    /// reader. Reads go straight to `input`; wrap slow sources in a
    /// `BufReader`.
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>)
        -> Result<()>;
}

/// Output bytes reserved per input byte before decoding starts.
const RESERVE_PER_INPUT_BYTE: usize = 8;

/// Decode an in-memory stream into a fresh vector.
///
/// The decompressed size only bounds the up-front reservation; a size larger
/// than the stream can produce fails with [`Error::StreamTooShort`] once the
/// input runs out.
pub fn decode_to_vec(decoder: &dyn Decoder, bytes: &[u8], decompressed_size: Option<usize>) -> Result<Vec<u8>> {
    let reserve = bytes.len().saturating_mul(RESERVE_PER_INPUT_BYTE);
    let mut output = Vec::with_capacity(decompressed_size.map_or(reserve, |size| size.min(reserve)));
    let mut input = bytes;
    decoder.decode(&mut input, &mut output, decompressed_size)?;
    Ok(output)
}

// ─────────────────────────────────────────────────────────────────────────────
// ByteReader
// ─────────────────────────────────────────────────────────────────────────────

/// Byte source that tracks its input offset for error reports.
///
/// Bytes are pulled from the caller's reader one at a time and never read
/// ahead, so the reader is left positioned right after the last token.
pub(crate) struct ByteReader<'a> {
    inner: &'a mut dyn Read,
    offset: u64,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(input: &'a mut dyn Read) -> Self {
        ByteReader { inner: input, offset: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub(crate) fn offset(&self) -> u64 {
        self.offset
    }

    /// Next byte, or `None` at end of input.
    fn try_read_u8(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.offset += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Next byte of a token already under way.
    #[inline]
    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        let offset = self.offset;
        self.try_read_u8()?.ok_or(Error::StreamTooShort { offset })
    }

    /// First byte of a token (or a flag byte). End of input is a clean end
    /// unless the stream is `bounded` by a decompressed size.
    #[inline]
    pub(crate) fn token_start(&mut self, bounded: bool) -> Result<Option<u8>> {
        if bounded {
            self.read_u8().map(Some)
        } else {
            self.try_read_u8()
        }
    }

    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        for slot in buf.iter_mut() {
            *slot = self.read_u8()?;
        }
        Ok(())
    }

    /// 32-bit word in byte order `B`.
    pub(crate) fn read_u32<B: ByteOrder>(&mut self) -> Result<u32> {
        let mut word = [0u8; 4];
        self.read_exact(&mut word)?;
        Ok(B::read_u32(&word))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SizeTarget
// ─────────────────────────────────────────────────────────────────────────────

/// Output bookkeeping against an optional decompressed size.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SizeTarget {
    target: Option<usize>,
    written: usize,
}

impl SizeTarget {
    pub(crate) fn new(target: Option<usize>) -> Self {
        SizeTarget { target, written: 0 }
    }

    /// A decompressed size was given.
    #[inline]
    pub(crate) fn is_bounded(&self) -> bool {
        self.target.is_some()
    }

    /// The requested size has been produced.
    #[inline]
    pub(crate) fn is_done(&self) -> bool {
        self.target.is_some_and(|t| self.written >= t)
    }

    /// `length` cut down to what may still be written.
    #[inline]
    pub(crate) fn clamp(&self, length: usize) -> usize {
        match self.target {
            Some(t) => length.min(t - self.written),
            None => length,
        }
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.written += n;
    }

    #[inline]
    pub(crate) fn written(&self) -> usize {
        self.written
    }
}
