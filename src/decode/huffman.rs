//! Huffman bit-tree decoding.
//!
//! Stream layout: `tree_size` byte, `root` node byte, then `tree_size × 2`
//! bytes of node pairs, followed by the bit stream packed in 32-bit words
//! (consumed most significant bit first).
//!
//! The tree table is addressed with the two header bytes at addresses 0 and
//! 1, so the root node sits at address 1 and node pair `k` at `2 + 2k`. A
//! node byte holds the offset to its child pair in the low six bits, and its
//! top two bits mark which of the two children are leaves (`0x80` for the
//! 0-child, `0x40` for the 1-child). The child pair of the node at address
//! `a` is at `(a & !1) + 2 × offset + 2`.

use std::io::{Read, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::debug;

use super::{ByteReader, Decoder};
use crate::error::{Error, Result};

/// Upper bound on the symbol buffer reserved up front from the header size.
const MAX_RESERVED_SYMBOLS: usize = 1 << 16;

/// Bits per coded symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SymbolDepth {
    /// Each leaf is a nibble; two leaves make one output byte.
    Four,
    #[default]
    Eight,
}

impl SymbolDepth {
    #[inline]
    pub fn bits(self) -> usize {
        match self {
            SymbolDepth::Four => 4,
            SymbolDepth::Eight => 8,
        }
    }
}

/// Which half of a byte the first of two 4-bit symbols fills.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NibbleOrder {
    #[default]
    LowNibbleFirst,
    HighNibbleFirst,
}

impl NibbleOrder {
    /// Byte made of two symbols in stream order.
    #[inline]
    pub fn combine(self, first: u8, second: u8) -> u8 {
        match self {
            NibbleOrder::LowNibbleFirst => (first & 0x0F) | (second << 4),
            NibbleOrder::HighNibbleFirst => (first << 4) | (second & 0x0F),
        }
    }

    /// Symbols of `byte` in stream order.
    #[inline]
    pub fn split(self, byte: u8) -> [u8; 2] {
        match self {
            NibbleOrder::LowNibbleFirst => [byte & 0x0F, byte >> 4],
            NibbleOrder::HighNibbleFirst => [byte >> 4, byte & 0x0F],
        }
    }
}

/// Byte order of the 32-bit words carrying the bit stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WordOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

/// Decoder for headerless Huffman data. Needs the decompressed size.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanDecoder {
    depth: SymbolDepth,
    nibble_order: NibbleOrder,
    word_order: WordOrder,
}

impl HuffmanDecoder {
    pub fn new(depth: SymbolDepth) -> Self {
        HuffmanDecoder {
            depth,
            ..Default::default()
        }
    }

    pub fn with_nibble_order(mut self, order: NibbleOrder) -> Self {
        self.nibble_order = order;
        self
    }

    pub fn with_word_order(mut self, order: WordOrder) -> Self {
        self.word_order = order;
        self
    }

    fn decode_words<B: ByteOrder>(
        &self,
        reader: &mut ByteReader<'_>,
        output: &mut dyn Write,
        size: usize,
    ) -> Result<()> {
        let tree_size = reader.read_u8()? as usize;
        let root = reader.read_u8()?;
        let mut table = vec![0u8; 2 + tree_size * 2];
        table[0] = tree_size as u8;
        table[1] = root;
        reader.read_exact(&mut table[2..])?;

        // The size may exceed what the input holds; reading runs dry first.
        let symbols = size.saturating_mul(8 / self.depth.bits());
        let mut decoded: Vec<u8> = Vec::with_capacity(symbols.min(MAX_RESERVED_SYMBOLS));

        let mut word = 0u32;
        let mut bits_left = 0u32;
        let mut node = root;
        let mut next = 0usize;

        while decoded.len() < symbols {
            if bits_left == 0 {
                word = reader.read_u32::<B>()?;
                bits_left = 32;
            }
            let bit = (word >> 31) as usize;
            word <<= 1;
            bits_left -= 1;

            next += (((node & 0x3F) as usize) << 1) + 2;
            let address = next + bit;
            if address >= table.len() {
                return Err(Error::CorruptHuffmanTree {
                    address,
                    table_len: table.len(),
                });
            }
            let is_leaf = node & (0x80 >> bit) != 0;
            node = table[address];
            if is_leaf {
                decoded.push(node);
                node = root;
                next = 0;
            }
        }

        match self.depth {
            SymbolDepth::Eight => output.write_all(&decoded)?,
            SymbolDepth::Four => {
                let bytes: Vec<u8> = decoded
                    .chunks_exact(2)
                    .map(|pair| self.nibble_order.combine(pair[0], pair[1]))
                    .collect();
                output.write_all(&bytes)?;
            }
        }

        debug!(
            "huffman: {} symbols of {} bits, tree of {} pairs, {} input bytes",
            symbols,
            self.depth.bits(),
            tree_size,
            reader.offset()
        );
        Ok(())
    }
}

impl Decoder for HuffmanDecoder {
    fn decode(&self, input: &mut dyn Read, output: &mut dyn Write, decompressed_size: Option<usize>) -> Result<()> {
        let size = decompressed_size.ok_or(Error::SizeRequired { format: "huffman" })?;
        if size == 0 {
            return Ok(());
        }
        let mut reader = ByteReader::new(input);
        match self.word_order {
            WordOrder::LittleEndian => self.decode_words::<LittleEndian>(&mut reader, output, size),
            WordOrder::BigEndian => self.decode_words::<BigEndian>(&mut reader, output, size),
        }
    }
}
