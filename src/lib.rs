//! digitalnet - Digital nets for quasi-Monte Carlo integration
//!
//! Deterministic low-discrepancy point sets over the s-dimensional unit
//! cube, generated from binary matrices over GF(2) and walked in Gray-code
//! order so that advancing to the next point touches a single generating row.
//! Optional digital-shift and linear-scrambling randomization turn one net
//! into a family of independent, unbiased estimators for randomized QMC.
//!
//! Generating matrices come either from a self-describing text stream or
//! from a catalog of precomputed families (Niederreiter-Xing, Sobol,
//! low-WAFOM and interlaced-Sobol variants) resolved through [`loader`].
//!
//! # Example
//!
//! ```
//! use digitalnet::DigitalNet;
//!
//! // 2 dimensions, 2^2 points, matrices inline in the stream format.
//! let stream = "64 2 2  9223372036854775808 9223372036854775808 \
//!               4611686018427387904 4611686018427387904";
//! let mut net = DigitalNet::from_reader(stream.as_bytes()).unwrap();
//!
//! for _ in 0..4 {
//!     let p = net.point();
//!     assert!(p.iter().all(|&c| c > 0.0 && c < 1.0));
//!     net.next_point();
//! }
//! ```

pub mod bits;
pub mod error;
pub mod family;
pub mod gray;
pub mod loader;
pub mod matrix;
pub mod net;

pub use error::NetError;
pub use family::NetFamily;
pub use loader::{DataPath, MatrixStore, MatrixTable, MemoryTable, TableRow};
pub use matrix::GeneratingMatrix;
pub use net::DigitalNet;
