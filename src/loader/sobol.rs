//! Binary Sobol direction-number tables.
//!
//! The Sobol family is served from a single precompiled binary file rather
//! than the generic tabular store, because the full table (21201 dimensions)
//! is far too large to pack as text.
//!
//! # File Layout
//!
//! Little-endian throughout:
//!
//! - magic: `u64`, the ASCII bytes `SOBOLD64`,
//! - `s_max: u32`, `m_max: u32` — the extent of the table,
//! - `s_max` blocks of `m_max` `u64` direction rows, dimension-major.
//!
//! Rows are stored in the engine's bit convention (most significant bit =
//! first output digit), so the reader takes them verbatim; only the row-major
//! transpose happens on ingestion.

use std::io::{Read, Seek, SeekFrom};

use crate::error::NetError;

/// Magic number at the start of every Sobol table file.
pub const MAGIC: u64 = u64::from_le_bytes(*b"SOBOLD64");

/// Smallest dimension with tabulated direction numbers.
pub const S_MIN: i64 = 2;
/// Largest tabulated dimension.
pub const S_MAX: i64 = 21201;
/// Smallest supported resolution.
pub const M_MIN: i64 = 1;
/// Largest supported resolution (one 64-bit word per row).
pub const M_MAX: i64 = 64;

const HEADER_LEN: u64 = 16;

fn read_u64(r: &mut impl Read) -> std::io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_u32(r: &mut impl Read) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// A short read anywhere in the file means a truncated table.
fn truncated(e: std::io::Error, expected: usize, read: usize) -> NetError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        NetError::TruncatedStream { expected, read }
    } else {
        NetError::Io(e)
    }
}

/// Reads an `s x m` slice of direction numbers from a Sobol table file.
///
/// Returns the words in row-major order (`m` outer, `s` inner), ready for
/// [`GeneratingMatrix::from_words`](crate::GeneratingMatrix::from_words).
pub fn read_table<R: Read + Seek>(r: &mut R, s: u32, m: u32) -> Result<Vec<u64>, NetError> {
    let expected = (s * m) as usize;
    if read_u64(r).map_err(|e| truncated(e, expected, 0))? != MAGIC {
        return Err(NetError::BadMagic);
    }
    let s_max = read_u32(r).map_err(|e| truncated(e, expected, 0))?;
    let m_max = read_u32(r).map_err(|e| truncated(e, expected, 0))?;
    if s > s_max || m > m_max {
        return Err(NetError::OutOfTable { s, m, s_max, m_max });
    }
    let mut words = vec![0u64; expected];
    let mut filled = 0usize;
    for dim in 0..s as u64 {
        r.seek(SeekFrom::Start(HEADER_LEN + dim * m_max as u64 * 8))?;
        for row in 0..m as usize {
            let word = read_u64(r).map_err(|e| truncated(e, expected, filled))?;
            words[row * s as usize + dim as usize] = word;
            filled += 1;
        }
    }
    Ok(words)
}
