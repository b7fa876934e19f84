//! Input adjustment applied before match finding.
//!
//! Order: user transform, then reversal for backward sessions, then the
//! zero pre-buffer. Parsers work on the adjusted buffer and start at
//! `pre_buffer_size`; match positions they report have the pre-buffer removed.

use log::trace;

use super::types::{FindOptions, SearchDirection};

/// Buffer a parser works on, with the offset of the first real byte.
pub struct AdjustedInput {
    pub buffer: Vec<u8>,
    pub start: usize,
}

impl AdjustedInput {
    /// Bytes after the pre-buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The adjusted input without the pre-buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.start..]
    }
}

/// Apply the session's adjustments to `input`.
pub fn adjust_input(input: &[u8], options: &FindOptions) -> AdjustedInput {
    let transformed: Vec<u8> = match options.transform() {
        Some(transform) => transform(input),
        None => input.to_vec(),
    };

    let mut buffer = Vec::with_capacity(options.pre_buffer_size + transformed.len());
    buffer.resize(options.pre_buffer_size, 0);
    match options.direction {
        SearchDirection::Forward => buffer.extend_from_slice(&transformed),
        SearchDirection::Backward => buffer.extend(transformed.iter().rev()),
    }

    trace!(
        "adjusted input: {} bytes, pre-buffer {}, {:?}",
        transformed.len(),
        options.pre_buffer_size,
        options.direction
    );

    AdjustedInput {
        buffer,
        start: options.pre_buffer_size,
    }
}
