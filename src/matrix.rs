//! Generating matrices of a digital net.
//!
//! A digital net over the s-dimensional unit cube is defined by one binary
//! generating matrix per dimension. This crate packs each matrix column-wise:
//! for every resolution index `row` in `[0, m)` and dimension `dim` in
//! `[0, s)` there is one 64-bit word holding 64 binary digits of that
//! generating vector. XOR-combining rows according to a binary index yields
//! the net's points.
//!
//! # Stream Format
//!
//! Matrices travel in a self-describing whitespace-separated text format:
//!
//! - header: `bit_width s m` (bit width 64, or 32 for half-width data),
//! - body: `s * m` unsigned integers in row-major order (`m` outer, `s`
//!   inner),
//! - optional trailer: a WAFOM figure of merit (float) and a t-value
//!   (integer). Either may be absent.
//!
//! # Example
//!
//! ```
//! use digitalnet::GeneratingMatrix;
//!
//! let text = "64 2 2  1 2 3 4  0.25 3";
//! let gm = GeneratingMatrix::from_reader(text.as_bytes()).unwrap();
//! assert_eq!(gm.s(), 2);
//! assert_eq!(gm.get(1, 0), 3);
//! assert_eq!(gm.wafom(), Some(0.25));
//! assert_eq!(gm.t_value(), Some(3));
//! ```

use std::io::{Read, Write};

use crate::error::NetError;

/// An immutable-shape set of generating matrices plus optional quality
/// metadata.
///
/// The shape `(s, m)` never changes after construction. Linear scrambling
/// rewrites the stored words in place through [`set`](GeneratingMatrix::set)
/// but cannot alter the shape.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratingMatrix {
    s: u32,
    m: u32,
    /// Row-major `m * s` words; entry `(row, dim)` lives at `row * s + dim`.
    words: Vec<u64>,
    wafom: Option<f64>,
    t_value: Option<i64>,
}

impl GeneratingMatrix {
    /// Builds a matrix set from raw words in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `s == 0`, `m` is outside `[1, 64]`, or `words.len() != s * m`.
    pub fn from_words(s: u32, m: u32, words: Vec<u64>) -> Self {
        assert!(s >= 1, "dimension s must be at least 1");
        assert!((1..=64).contains(&m), "resolution m must be in [1, 64]");
        assert_eq!(words.len(), (s * m) as usize, "words must hold s * m entries");
        GeneratingMatrix {
            s,
            m,
            words,
            wafom: None,
            t_value: None,
        }
    }

    /// Attaches WAFOM / t-value metadata.
    pub fn with_metadata(mut self, wafom: Option<f64>, t_value: Option<i64>) -> Self {
        self.wafom = wafom;
        self.t_value = t_value;
        self
    }

    /// Reads a matrix set from the text stream format.
    ///
    /// A header width of 64 takes each value verbatim; 32 shifts each value
    /// into the high half of the 64-bit word. Any other width is a format
    /// error, as is a stream that ends inside the mandatory body.
    pub fn from_reader(mut r: impl Read) -> Result<Self, NetError> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        let mut tokens = text.split_whitespace();

        let bit_width: u32 = next_int(&mut tokens, 3, 0)?;
        if bit_width != 64 && bit_width != 32 {
            return Err(NetError::UnsupportedBitWidth { found: bit_width });
        }
        let s: u32 = next_int(&mut tokens, 3, 1)?;
        let m: u32 = next_int(&mut tokens, 3, 2)?;
        if s == 0 || !(1..=64).contains(&m) {
            return Err(NetError::InvalidToken {
                token: format!("s = {}, m = {}", s, m),
            });
        }

        let expected = (s * m) as usize;
        let mut words = Vec::with_capacity(expected);
        for read in 0..expected {
            let token = tokens
                .next()
                .ok_or(NetError::TruncatedStream { expected, read })?;
            let value: u64 = token.parse().map_err(|_| NetError::InvalidToken {
                token: token.to_string(),
            })?;
            words.push(if bit_width == 32 { value << 32 } else { value });
        }

        // Trailer is optional and read best-effort: a missing or unparseable
        // WAFOM leaves both fields absent, matching the source format where
        // the t-value never appears without a preceding WAFOM.
        let wafom = tokens.next().and_then(|t| t.parse::<f64>().ok());
        let t_value = if wafom.is_some() {
            tokens.next().and_then(|t| t.parse::<i64>().ok())
        } else {
            None
        };

        Ok(GeneratingMatrix {
            s,
            m,
            words,
            wafom,
            t_value,
        })
    }

    /// Writes the matrix set in the text stream format at width 64.
    ///
    /// Output written by this method reads back bit-identically through
    /// [`from_reader`](GeneratingMatrix::from_reader).
    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        write!(w, "64 {} {}", self.s, self.m)?;
        for word in &self.words {
            write!(w, " {}", word)?;
        }
        if let Some(wafom) = self.wafom {
            // 17 significant digits round-trips any f64 exactly.
            write!(w, " {:.17e}", wafom)?;
            if let Some(t) = self.t_value {
                write!(w, " {}", t)?;
            }
        }
        writeln!(w)
    }

    /// Dimension of the net.
    pub fn s(&self) -> u32 {
        self.s
    }

    /// Resolution of the net: the number of generating rows per dimension,
    /// hence `2^m` points per cycle.
    pub fn m(&self) -> u32 {
        self.m
    }

    /// Returns the generating word for `(row, dim)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= m` or `dim >= s`.
    #[inline]
    pub fn get(&self, row: usize, dim: usize) -> u64 {
        assert!(dim < self.s as usize);
        self.words[row * self.s as usize + dim]
    }

    /// Replaces the generating word for `(row, dim)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= m` or `dim >= s`.
    #[inline]
    pub fn set(&mut self, row: usize, dim: usize, word: u64) {
        assert!(dim < self.s as usize);
        self.words[row * self.s as usize + dim] = word;
    }

    /// WAFOM figure of merit, if the source carried one.
    pub fn wafom(&self) -> Option<f64> {
        self.wafom
    }

    /// t-value quality parameter, if the source carried one.
    pub fn t_value(&self) -> Option<i64> {
        self.t_value
    }
}

/// Pulls the next header integer, reporting a truncated or malformed header.
fn next_int<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: usize,
    read: usize,
) -> Result<u32, NetError> {
    let token = tokens
        .next()
        .ok_or(NetError::TruncatedStream { expected, read })?;
    token.parse().map_err(|_| NetError::InvalidToken {
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratingMatrix {
        let words = (0..6u64).map(|i| i * 0x0101_0101_0101_0101).collect();
        GeneratingMatrix::from_words(2, 3, words).with_metadata(Some(0.125), Some(2))
    }

    #[test]
    fn test_from_words_layout() {
        let gm = GeneratingMatrix::from_words(3, 2, vec![10, 11, 12, 20, 21, 22]);
        assert_eq!(gm.get(0, 0), 10);
        assert_eq!(gm.get(0, 2), 12);
        assert_eq!(gm.get(1, 0), 20);
        assert_eq!(gm.get(1, 2), 22);
    }

    #[test]
    #[should_panic(expected = "s * m")]
    fn test_from_words_rejects_short_body() {
        GeneratingMatrix::from_words(3, 2, vec![1, 2, 3]);
    }

    #[test]
    fn test_set_get() {
        let mut gm = GeneratingMatrix::from_words(2, 2, vec![0; 4]);
        gm.set(1, 1, 0xFEED);
        assert_eq!(gm.get(1, 1), 0xFEED);
        assert_eq!(gm.get(0, 1), 0);
    }

    #[test]
    fn test_round_trip() {
        let gm = sample();
        let mut buf = Vec::new();
        gm.write_to(&mut buf).unwrap();
        let back = GeneratingMatrix::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, gm);
    }

    #[test]
    fn test_round_trip_without_metadata() {
        let gm = GeneratingMatrix::from_words(2, 2, vec![1, u64::MAX, 3, 4]);
        let mut buf = Vec::new();
        gm.write_to(&mut buf).unwrap();
        let back = GeneratingMatrix::from_reader(buf.as_slice()).unwrap();
        assert_eq!(back, gm);
        assert_eq!(back.wafom(), None);
        assert_eq!(back.t_value(), None);
    }

    #[test]
    fn test_width_32_shifts_into_high_half() {
        let gm = GeneratingMatrix::from_reader("32 1 2  1 4294967295".as_bytes()).unwrap();
        assert_eq!(gm.get(0, 0), 1u64 << 32);
        assert_eq!(gm.get(1, 0), 0xFFFF_FFFFu64 << 32);
    }

    #[test]
    fn test_rejects_other_widths() {
        let err = GeneratingMatrix::from_reader("16 1 1 7".as_bytes()).unwrap_err();
        assert!(matches!(err, NetError::UnsupportedBitWidth { found: 16 }));
    }

    #[test]
    fn test_truncated_body() {
        let err = GeneratingMatrix::from_reader("64 2 2 1 2 3".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            NetError::TruncatedStream {
                expected: 4,
                read: 3
            }
        ));
    }

    #[test]
    fn test_truncated_header() {
        let err = GeneratingMatrix::from_reader("64 2".as_bytes()).unwrap_err();
        assert!(matches!(err, NetError::TruncatedStream { .. }));
    }

    #[test]
    fn test_garbage_body_token() {
        let err = GeneratingMatrix::from_reader("64 1 2 5 x".as_bytes()).unwrap_err();
        assert!(matches!(err, NetError::InvalidToken { .. }));
    }

    #[test]
    fn test_wafom_only_trailer() {
        let gm = GeneratingMatrix::from_reader("64 1 1 9 0.5".as_bytes()).unwrap();
        assert_eq!(gm.wafom(), Some(0.5));
        assert_eq!(gm.t_value(), None);
    }

    #[test]
    fn test_unparseable_trailer_is_absent() {
        let gm = GeneratingMatrix::from_reader("64 1 1 9 end".as_bytes()).unwrap();
        assert_eq!(gm.wafom(), None);
        assert_eq!(gm.t_value(), None);
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let err = GeneratingMatrix::from_reader("64 0 3".as_bytes()).unwrap_err();
        assert!(matches!(err, NetError::InvalidToken { .. }));
    }

    #[test]
    fn test_rejects_m_over_64() {
        let err = GeneratingMatrix::from_reader("64 1 65 1".as_bytes()).unwrap_err();
        assert!(matches!(err, NetError::InvalidToken { .. }));
    }
}
