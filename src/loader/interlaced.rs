//! Interlaced Sobol column files.
//!
//! Interlaced Sobol nets ship as text files with one line per dimension,
//! each line holding `m` whitespace-separated integers. The on-disk
//! convention stores every generating row most-significant-bit first, the
//! reverse of the engine's convention, so each value is bit-reversed on
//! ingestion.
//!
//! Admissible dimensions shrink as the interlacing factor grows: interlacing
//! at factor `alpha` consumes `alpha` underlying Sobol dimensions per output
//! dimension, so the table tops out near `21201 / alpha`.

use std::io::BufRead;

use crate::bits::bit_reverse64;
use crate::error::NetError;

/// Smallest tabulated dimension, any interlacing factor.
pub const S_MIN: i64 = 2;
/// Smallest supported resolution.
pub const M_MIN: i64 = 8;
/// Largest supported resolution.
pub const M_MAX: i64 = 31;

/// Largest tabulated dimension for the given interlacing factor.
pub fn s_max(alpha: u32) -> i64 {
    match alpha {
        2 => 10600,
        3 => 7067,
        4 => 5300,
        5 => 4240,
        _ => 0,
    }
}

/// Reads an `s x m` matrix slice from an interlaced Sobol column file.
///
/// Line `i` supplies the `m` generating rows of dimension `i`; output is
/// row-major (`m` outer, `s` inner) with every word bit-reversed into the
/// engine convention.
pub fn read_columns<R: BufRead>(r: &mut R, s: u32, m: u32) -> Result<Vec<u64>, NetError> {
    let expected = (s * m) as usize;
    let mut words = vec![0u64; expected];
    let mut line = String::new();
    for dim in 0..s as usize {
        line.clear();
        let n = r.read_line(&mut line)?;
        if n == 0 {
            return Err(NetError::TruncatedStream {
                expected,
                read: dim * m as usize,
            });
        }
        let mut tokens = line.split_whitespace();
        for row in 0..m as usize {
            let token = tokens.next().ok_or(NetError::TruncatedStream {
                expected,
                read: dim * m as usize + row,
            })?;
            let value: u64 = token.parse().map_err(|_| NetError::InvalidToken {
                token: token.to_string(),
            })?;
            words[row * s as usize + dim] = bit_reverse64(value);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_reversed_transpose() {
        // File value 1 << row bit-reverses to 1 << (63 - row): an identity
        // staircase in the engine convention.
        let mut text = String::new();
        for _ in 0..3 {
            text.push_str("1 2 4 8\n");
        }
        let words = read_columns(&mut text.as_bytes(), 3, 4).unwrap();
        for row in 0..4 {
            for dim in 0..3 {
                assert_eq!(words[row * 3 + dim], 1u64 << (63 - row));
            }
        }
    }

    #[test]
    fn test_missing_line() {
        let text = "1 2 3\n";
        let err = read_columns(&mut text.as_bytes(), 2, 3).unwrap_err();
        assert!(matches!(err, NetError::TruncatedStream { read: 3, .. }));
    }

    #[test]
    fn test_short_line() {
        let text = "1 2 3\n4 5\n";
        let err = read_columns(&mut text.as_bytes(), 2, 3).unwrap_err();
        assert!(matches!(err, NetError::TruncatedStream { read: 5, .. }));
    }

    #[test]
    fn test_garbage_token() {
        let text = "1 2 zap\n";
        let err = read_columns(&mut text.as_bytes(), 1, 3).unwrap_err();
        assert!(matches!(err, NetError::InvalidToken { .. }));
    }

    #[test]
    fn test_extra_tokens_on_line_ignored() {
        // Files tabulated at a larger m than requested still load.
        let text = "1 2 4 8 16\n1 2 4 8 16\n";
        let words = read_columns(&mut text.as_bytes(), 2, 3).unwrap();
        assert_eq!(words.len(), 6);
    }

    #[test]
    fn test_s_max_by_alpha() {
        assert_eq!(s_max(2), 10600);
        assert_eq!(s_max(3), 7067);
        assert_eq!(s_max(4), 5300);
        assert_eq!(s_max(5), 4240);
        assert_eq!(s_max(7), 0);
    }
}
