//! Error type shared by the finders, parsers and codecs.
//!
//! Every failure is a data-integrity or setup failure: nothing here is retried
//! or recovered locally, the variants only carry enough context (input offset,
//! output position, requested displacement) to diagnose the stream.

use std::io;
use thiserror::Error;

/// Errors returned by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The input ended before the current token could be read completely.
    #[error("stream too short: input exhausted at offset {offset:#x}")]
    StreamTooShort { offset: u64 },

    /// A back-reference points before the start of the produced history.
    #[error(
        "invalid displacement {displacement:#x} at output position {position:#x} \
         ({available:#x} bytes available)"
    )]
    InvalidDisplacement {
        position: u64,
        displacement: usize,
        available: usize,
    },

    /// Parser, finder or options were set up inconsistently.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A SpikeChunsoft continue token appeared without a preceding match.
    #[error("match continuation at output position {position:#x} without a prior match")]
    MissingPriorMatch { position: u64 },

    /// A Huffman walk referenced an address outside the tree table.
    #[error("corrupt huffman tree: address {address:#x} outside table of {table_len:#x} bytes")]
    CorruptHuffmanTree { address: usize, table_len: usize },

    /// The format has no end marker and needs the decompressed size.
    #[error("{format} streams can only be decoded with a known decompressed size")]
    SizeRequired { format: &'static str },

    /// The Huffman encoder could not place every child pair within reach
    /// of the 6-bit node offset.
    #[error("huffman tree too wide for 6-bit node offsets")]
    HuffmanTreeTooWide,

    /// The caller's reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::Configuration`].
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
