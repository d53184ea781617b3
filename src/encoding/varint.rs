//! # Variable-Length Integer Encoding
//!
//! Length prefixes in the directory blob (record frames and every string
//! field inside a record) use a marker-byte varint. Almost every airport
//! string is shorter than 241 bytes, so the common case costs one byte.
//!
//! ## Encoding Format
//!
//! | Value Range              | Bytes | Format                           |
//! |--------------------------|-------|----------------------------------|
//! | 0 - 240                  | 1     | `[value]`                        |
//! | 241 - 2287               | 2     | `[241 + (v-240)>>8, (v-240)&FF]` |
//! | 2288 - 67823             | 3     | `[249, (v-2288)>>8, (v-2288)&FF]`|
//! | 67824 - 16777215         | 4     | `[250, v>>16, v>>8, v]`          |
//! | 16777216 - 4294967295    | 5     | `[251, v>>24, v>>16, v>>8, v]`   |
//! | 4294967296 - u64::MAX    | 9     | `[255, 8-byte big-endian]`       |
//!
//! Markers 252-254 are unused and rejected by the decoder.
//!
//! ## Error Handling
//!
//! `decode_varint` never panics on arbitrary input. Empty or truncated input
//! and unused markers produce an `eyre` error; the caller decides whether that
//! is corruption (blob loading) or a bug (decoding a trusted record).

use eyre::{bail, ensure, Result};

const ONE_BYTE_MAX: u64 = 240;
const TWO_BYTE_MAX: u64 = 2287;
const THREE_BYTE_MAX: u64 = 67823;
const FOUR_BYTE_MAX: u64 = 0xFF_FFFF;
const FIVE_BYTE_MAX: u64 = 0xFFFF_FFFF;

pub fn varint_len(value: u64) -> usize {
    match value {
        0..=ONE_BYTE_MAX => 1,
        241..=TWO_BYTE_MAX => 2,
        2288..=THREE_BYTE_MAX => 3,
        67824..=FOUR_BYTE_MAX => 4,
        0x100_0000..=FIVE_BYTE_MAX => 5,
        _ => 9,
    }
}

/// Appends the encoding of `value` to `out` and returns the number of bytes written.
pub fn put_varint(out: &mut Vec<u8>, value: u64) -> usize {
    match value {
        0..=ONE_BYTE_MAX => out.push(value as u8),
        241..=TWO_BYTE_MAX => {
            let v = value - 240;
            out.extend_from_slice(&[((v >> 8) + 241) as u8, v as u8]);
        }
        2288..=THREE_BYTE_MAX => {
            let v = value - 2288;
            out.extend_from_slice(&[249, (v >> 8) as u8, v as u8]);
        }
        67824..=FOUR_BYTE_MAX => {
            out.extend_from_slice(&[250, (value >> 16) as u8, (value >> 8) as u8, value as u8]);
        }
        0x100_0000..=FIVE_BYTE_MAX => {
            out.push(251);
            out.extend_from_slice(&(value as u32).to_be_bytes());
        }
        _ => {
            out.push(255);
            out.extend_from_slice(&value.to_be_bytes());
        }
    }
    varint_len(value)
}

/// Decodes one varint from the front of `buf`, returning `(value, bytes_read)`.
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize)> {
    let Some(&first) = buf.first() else {
        bail!("empty buffer for varint decode");
    };

    let need = match first {
        0..=240 => return Ok((first as u64, 1)),
        241..=248 => 2,
        249 => 3,
        250 => 4,
        251 => 5,
        255 => 9,
        _ => bail!("invalid varint marker: {}", first),
    };
    ensure!(buf.len() >= need, "truncated {}-byte varint", need);

    let tail = &buf[1..need];
    let value = match first {
        241..=248 => 240 + ((first as u64 - 241) << 8) + tail[0] as u64,
        249 => 2288 + ((tail[0] as u64) << 8) + tail[1] as u64,
        _ => tail.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64),
    };
    Ok((value, need))
}
