//! RLE encoder.

use std::io::Write;

use log::debug;

use super::Encoder;
use crate::decode::rle::{MAX_RAW, MAX_RUN, MIN_RUN};
use crate::error::Result;

/// Encoder producing headerless data for [`RleDecoder`](crate::decode::RleDecoder).
#[derive(Clone, Copy, Debug, Default)]
pub struct RleEncoder;

impl RleEncoder {
    pub fn new() -> Self {
        RleEncoder
    }
}

fn flush_raw(output: &mut dyn Write, raw: &[u8]) -> Result<()> {
    for block in raw.chunks(MAX_RAW) {
        output.write_all(&[(block.len() - 1) as u8])?;
        output.write_all(block)?;
    }
    Ok(())
}

impl Encoder for RleEncoder {
    fn encode(&self, input: &[u8], output: &mut dyn Write) -> Result<()> {
        let mut raw_start = 0usize;
        let mut i = 0usize;
        let mut runs = 0usize;

        while i < input.len() {
            let value = input[i];
            let run = input[i..].iter().take(MAX_RUN).take_while(|&&b| b == value).count();
            if run >= MIN_RUN {
                flush_raw(output, &input[raw_start..i])?;
                output.write_all(&[0x80 | (run - MIN_RUN) as u8, value])?;
                runs += 1;
                i += run;
                raw_start = i;
            } else {
                i += 1;
            }
        }
        flush_raw(output, &input[raw_start..])?;

        debug!("rle: encoded {} bytes with {} runs", input.len(), runs);
        Ok(())
    }
}
