//! The digital net point engine.
//!
//! [`DigitalNet`] walks the `2^m` points of a net in Gray-code order: each
//! step XORs exactly one generating row into the running state instead of
//! recomputing the point from its index, so advancing costs `s` XORs and `s`
//! float conversions regardless of `m`.
//!
//! # Randomization
//!
//! Two randomizations turn the deterministic net into a family of
//! independent, unbiased estimators for randomized quasi-Monte Carlo:
//!
//! - a **digital shift** XORs a fixed random word into every point of a
//!   cycle (enabled via [`set_digital_shift`](DigitalNet::set_digital_shift),
//!   drawn freshly at every [`initialize`](DigitalNet::initialize)),
//! - a **linear scramble** replaces the generating matrices with the product
//!   of a random nonsingular lower-triangular GF(2) matrix, preserving the
//!   net's equidistribution while decorrelating replicates.
//!
//! Seed the engine with [`set_seed`](DigitalNet::set_seed) before drawing
//! shifts or scrambles to make randomized runs reproducible.
//!
//! # Example
//!
//! ```
//! use digitalnet::{DigitalNet, GeneratingMatrix};
//!
//! // A 2-dimensional net with 2^4 points: identity matrix in the first
//! // dimension, bit-reversed identity in the second.
//! let mut words = Vec::new();
//! for r in 0..4 {
//!     words.push(1u64 << (63 - r));
//!     words.push(1u64 << (60 + r));
//! }
//! let mut net = DigitalNet::from_matrix(GeneratingMatrix::from_words(2, 4, words));
//!
//! let mut sum = 0.0;
//! for _ in 0..16 {
//!     let p = net.point();
//!     sum += p[0] * p[1];
//!     net.next_point();
//! }
//! // Quasi-Monte Carlo estimate of the integral of x * y over the unit square.
//! assert!((sum / 16.0 - 0.25).abs() < 0.02);
//! ```

use std::io::{Read, Write};

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::bits::gf2_inner_product;
use crate::error::NetError;
use crate::family::NetFamily;
use crate::gray::GrayIndex;
use crate::loader::MatrixStore;
use crate::matrix::GeneratingMatrix;

/// Bits discarded below the 53-bit significance window.
const GET_MAX: u32 = 64 - 53;
/// Scale mapping a 53-bit integer into [0, 1): 2^-53.
const FACTOR: f64 = 1.0 / ((1u64 << 53) as f64);
/// Strictly positive bias keeping coordinates off 0 exactly: 2^-64.
const EPS: f64 = FACTOR / 2048.0;

/// Fixed default seed so unseeded engines behave reproducibly.
const DEFAULT_SEED: u64 = 5489;

/// Stateful generator walking the points of a digital net.
///
/// The engine owns its generating matrices and all walk state. It is
/// single-threaded by design: randomized-QMC workloads wanting several
/// independent streams should construct one engine per stream, each with its
/// own seed, rather than sharing one engine across threads.
pub struct DigitalNet {
    matrix: GeneratingMatrix,
    /// Digital shift words, all zero unless shifting is enabled.
    shift: Vec<u64>,
    /// Running XOR-accumulated raw state, one word per dimension.
    point_base: Vec<u64>,
    /// Derived coordinates; always the scaling of `point_base ^ shift`.
    point: Vec<f64>,
    /// Occupancy count: how many points of the current cycle are out.
    count: u64,
    digital_shift: bool,
    gray: GrayIndex,
    rng: Xoshiro256StarStar,
}

impl DigitalNet {
    /// Builds an engine directly from a generating matrix set.
    ///
    /// The engine comes up initialized: `point()` immediately yields point 0.
    pub fn from_matrix(matrix: GeneratingMatrix) -> Self {
        let s = matrix.s() as usize;
        let mut net = DigitalNet {
            matrix,
            shift: vec![0; s],
            point_base: vec![0; s],
            point: vec![0.0; s],
            count: 0,
            digital_shift: false,
            gray: GrayIndex::new(),
            rng: Xoshiro256StarStar::seed_from_u64(DEFAULT_SEED),
        };
        net.initialize();
        net
    }

    /// Builds an engine from the self-describing text stream format.
    ///
    /// See [`GeneratingMatrix::from_reader`] for the format and its failure
    /// modes; no engine is returned on malformed input.
    pub fn from_reader(r: impl Read) -> Result<Self, NetError> {
        Ok(DigitalNet::from_matrix(GeneratingMatrix::from_reader(r)?))
    }

    /// Builds an engine for a predefined family at shape `(s, m)`.
    ///
    /// Use the store's range queries to find admissible shapes; an absent
    /// parameterization fails with [`NetError::NotFound`].
    pub fn from_family(
        store: &MatrixStore<'_>,
        family: NetFamily,
        s: u32,
        m: u32,
    ) -> Result<Self, NetError> {
        Ok(DigitalNet::from_matrix(store.load(family, s, m)?))
    }

    /// (Re-)initializes the walk at point 0 of a fresh cycle.
    ///
    /// Zeroes the raw state, draws fresh shift words when digital shifting
    /// is enabled (zeroes them otherwise), clears the Gray counter and
    /// recomputes the coordinates. Without a shift, point 0 is the origin
    /// biased to `2^-64` in every coordinate; with one, it is the shift
    /// itself scaled into (0, 1).
    pub fn initialize(&mut self) {
        for base in &mut self.point_base {
            *base = 0;
        }
        if self.digital_shift {
            for word in &mut self.shift {
                *word = self.rng.next_u64();
            }
        } else {
            for word in &mut self.shift {
                *word = 0;
            }
        }
        self.gray.clear();
        self.count = 1;
        self.convert_point();
    }

    /// Advances to the next of the `2^m` points of the cycle.
    ///
    /// After the last point of a cycle the engine silently restarts at point
    /// 0 — with a freshly drawn shift when digital shifting is enabled.
    /// Callers that need exactly `2^m` distinct points per replicate must
    /// count iterations themselves.
    pub fn next_point(&mut self) {
        let period = 1u128 << self.matrix.m();
        if self.count as u128 == period {
            self.initialize();
            return;
        }
        let bit = self.gray.index();
        for (dim, base) in self.point_base.iter_mut().enumerate() {
            *base ^= self.matrix.get(bit, dim);
        }
        self.convert_point();
        if self.count as u128 == period {
            self.count = 0;
            self.gray.clear();
        } else {
            self.gray.next();
            self.count += 1;
        }
    }

    /// Recomputes the coordinate vector from the raw state.
    ///
    /// Keeps the top 53 bits of `base ^ shift`, scales by 2^-53 and adds
    /// 2^-64: the result is exactly representable and strictly inside
    /// (0, 1), so integrands may divide by or take logarithms of any
    /// coordinate.
    fn convert_point(&mut self) {
        for (dim, coord) in self.point.iter_mut().enumerate() {
            let bits = (self.point_base[dim] ^ self.shift[dim]) >> GET_MAX;
            *coord = bits as f64 * FACTOR + EPS;
        }
    }

    /// Applies a random linear scramble to the generating matrices.
    ///
    /// Per dimension, a random lower-triangular 64x64 bit matrix with a unit
    /// diagonal multiplies every generating row over GF(2). Triangularity
    /// with the unit diagonal makes the transform invertible, hence
    /// measure-preserving: the scrambled net is an independent replicate with
    /// the same equidistribution quality.
    ///
    /// The mutation is one-way. Call [`initialize`](DigitalNet::initialize)
    /// before resuming point generation.
    pub fn linear_scramble(&mut self) {
        const N: usize = 64;
        let mut tri = [0u64; N];
        for dim in 0..self.matrix.s() as usize {
            // Row j carries its diagonal at bit N-1-j; everything below the
            // diagonal is shifted out, everything above is random.
            for (j, row) in tri.iter_mut().enumerate() {
                let diagonal = 1u64 << (N - 1 - j);
                *row = (self.rng.next_u64() << (N - 1 - j)) | diagonal;
            }
            for k in 0..self.matrix.m() as usize {
                let original = self.matrix.get(k, dim);
                let mut word = 0u64;
                for (j, &row) in tri.iter().enumerate() {
                    word ^= gf2_inner_product(row, original) << (N - 1 - j);
                }
                self.matrix.set(k, dim, word);
            }
        }
    }

    /// Current point of the walk, one coordinate per dimension, each
    /// strictly inside (0, 1).
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Single coordinate of the current point.
    ///
    /// # Panics
    ///
    /// Panics if `dim >= s`.
    pub fn coordinate(&self, dim: usize) -> f64 {
        self.point[dim]
    }

    /// Generating word at `(row, dim)`.
    pub fn base(&self, row: usize, dim: usize) -> u64 {
        self.matrix.get(row, dim)
    }

    /// Dimension of the net.
    pub fn s(&self) -> u32 {
        self.matrix.s()
    }

    /// Resolution of the net; one cycle holds `2^m` points.
    pub fn m(&self) -> u32 {
        self.matrix.m()
    }

    /// WAFOM figure of merit carried by the matrix source, if any.
    pub fn wafom(&self) -> Option<f64> {
        self.matrix.wafom()
    }

    /// t-value carried by the matrix source, if any.
    pub fn t_value(&self) -> Option<i64> {
        self.matrix.t_value()
    }

    /// Enables or disables the digital shift for future
    /// [`initialize`](DigitalNet::initialize) calls.
    pub fn set_digital_shift(&mut self, enabled: bool) {
        self.digital_shift = enabled;
    }

    /// Deterministically reseeds the engine's random stream.
    ///
    /// Fix the seed before drawing shifts or scrambles to make randomized
    /// runs reproducible.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = Xoshiro256StarStar::seed_from_u64(seed);
    }

    /// Writes a diagnostic dump of the net's shape, matrices and metadata.
    pub fn show_status(&self, mut w: impl Write) -> std::io::Result<()> {
        writeln!(w, "n = 64")?;
        writeln!(w, "s = {}", self.s())?;
        writeln!(w, "m = {}", self.m())?;
        for row in 0..self.m() as usize {
            for dim in 0..self.s() as usize {
                write!(w, "base[{}][{}] = {} ", row, dim, self.base(row, dim))?;
            }
            writeln!(w)?;
        }
        match self.wafom() {
            Some(v) => writeln!(w, "WAFOM-value = {}", v)?,
            None => writeln!(w, "WAFOM-value = n/a")?,
        }
        match self.t_value() {
            Some(v) => writeln!(w, "t-value = {}", v),
            None => writeln!(w, "t-value = n/a"),
        }
    }
}
