//! Loaders for predefined generating-matrix families.
//!
//! Every family resolves to one of three loading strategies behind the same
//! `load(family, s, m)` contract:
//!
//! - **Sobol** — a binary direction-number table file ([`sobol`]),
//! - **interlaced Sobol** (plain alphas 2-5) — text column files with
//!   bit-reversed rows ([`interlaced`]),
//! - **everything else** — a row lookup against the external tabular store
//!   ([`MatrixTable`]), keyed by family abbreviation, bit width, dimension
//!   and the smallest stored resolution >= the requested one.
//!
//! Configuration is explicit: [`MatrixStore`] takes the table-file base
//! directory ([`DataPath`]) and the tabular store as constructor arguments
//! instead of reading ambient process state, so fixtures can stand in for
//! both during tests. [`DataPath::from_env`] remains available for callers
//! that want the conventional `DIGITAL_NET_PATH` environment lookup.
//!
//! # Range Queries
//!
//! `s_min`/`s_max`/`m_min`/`m_max` report the admissible parameter ranges
//! per family: compile-time constants for the file-backed families,
//! min/max over matching rows for the table-backed ones. An unknown
//! family/parameterization answers with `-1` rather than an error so callers
//! can probe defensively.

pub mod interlaced;
pub mod sobol;
mod table;

pub use table::{MatrixTable, MemoryTable, TableRow};

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::NetError;
use crate::family::NetFamily;
use crate::matrix::GeneratingMatrix;

/// Name of the environment variable holding the table-file directory.
pub const DATA_PATH_ENV: &str = "DIGITAL_NET_PATH";

/// Base directory containing the Sobol and interlaced Sobol table files.
#[derive(Debug, Clone)]
pub struct DataPath {
    base: PathBuf,
}

impl DataPath {
    /// Uses the given directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        DataPath { base: base.into() }
    }

    /// Reads the directory from `DIGITAL_NET_PATH`, falling back to
    /// `../data` when unset.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_PATH_ENV) {
            Some(dir) => DataPath::new(dir),
            None => DataPath::new("../data"),
        }
    }

    /// Assembles `<base>/<stem><ext>`.
    pub fn file(&self, stem: &str, ext: &str) -> PathBuf {
        self.base.join(format!("{}{}", stem, ext))
    }
}

/// Loader front end: resolves a family and shape to a
/// [`GeneratingMatrix`] through the strategy the family requires.
pub struct MatrixStore<'a> {
    path: DataPath,
    table: &'a dyn MatrixTable,
}

impl<'a> MatrixStore<'a> {
    /// Creates a store over the given file directory and tabular store.
    pub fn new(path: DataPath, table: &'a dyn MatrixTable) -> Self {
        MatrixStore { path, table }
    }

    /// Loads the generating matrices for `family` at shape `(s, m)`.
    ///
    /// A missing file or table row is [`NetError::NotFound`]; malformed data
    /// surfaces as the corresponding format error. Nothing is silently
    /// substituted.
    pub fn load(&self, family: NetFamily, s: u32, m: u32) -> Result<GeneratingMatrix, NetError> {
        match family {
            NetFamily::Sobol => {
                let path = self.path.file(family.abbrev(), ".dat");
                let mut r = BufReader::new(open(&path, family, s, m)?);
                let words = sobol::read_table(&mut r, s, m)?;
                Ok(GeneratingMatrix::from_words(s, m, words))
            }
            f if f.interlace_alpha().is_some() => {
                let path = self.path.file(family.abbrev(), "_Bs53.col");
                let mut r = BufReader::new(open(&path, family, s, m)?);
                let words = interlaced::read_columns(&mut r, s, m)?;
                Ok(GeneratingMatrix::from_words(s, m, words))
            }
            _ => {
                let row = self.table.select(family.abbrev(), 64, s, m).ok_or(
                    NetError::NotFound {
                        family: family.abbrev(),
                        s,
                        m,
                    },
                )?;
                let words = parse_packed(&row.data, s, m)?;
                Ok(GeneratingMatrix::from_words(s, m, words)
                    .with_metadata(row.wafom, row.t_value))
            }
        }
    }

    /// Smallest admissible dimension for `family`, or -1 if unknown.
    pub fn s_min(&self, family: NetFamily) -> i64 {
        match family {
            NetFamily::Sobol => sobol::S_MIN,
            f if f.interlace_alpha().is_some() => interlaced::S_MIN,
            _ => self
                .table
                .s_range(family.abbrev())
                .map_or(-1, |(lo, _)| lo as i64),
        }
    }

    /// Largest admissible dimension for `family`, or -1 if unknown.
    pub fn s_max(&self, family: NetFamily) -> i64 {
        match family {
            NetFamily::Sobol => sobol::S_MAX,
            f if f.interlace_alpha().is_some() => {
                interlaced::s_max(f.interlace_alpha().unwrap_or(0))
            }
            _ => self
                .table
                .s_range(family.abbrev())
                .map_or(-1, |(_, hi)| hi as i64),
        }
    }

    /// Smallest admissible resolution for `family` at dimension `s`, or -1
    /// if the parameterization is unknown.
    pub fn m_min(&self, family: NetFamily, s: u32) -> i64 {
        match family {
            NetFamily::Sobol => sobol::M_MIN,
            f if f.interlace_alpha().is_some() => interlaced::M_MIN,
            _ => self
                .table
                .m_range(family.abbrev(), s)
                .map_or(-1, |(lo, _)| lo as i64),
        }
    }

    /// Largest admissible resolution for `family` at dimension `s`, or -1
    /// if the parameterization is unknown.
    pub fn m_max(&self, family: NetFamily, s: u32) -> i64 {
        match family {
            NetFamily::Sobol => sobol::M_MAX,
            f if f.interlace_alpha().is_some() => interlaced::M_MAX,
            _ => self
                .table
                .m_range(family.abbrev(), s)
                .map_or(-1, |(_, hi)| hi as i64),
        }
    }
}

/// Opens a table file, translating a missing file into `NotFound` for the
/// requested parameterization.
fn open(path: &Path, family: NetFamily, s: u32, m: u32) -> Result<File, NetError> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            NetError::NotFound {
                family: family.abbrev(),
                s,
                m,
            }
        } else {
            NetError::Io(e)
        }
    })
}

/// Parses the first `s * m` words of a packed table row body.
///
/// Rows selected at a resolution larger than requested carry extra trailing
/// values; only the leading `m` rows matter because the body is row-major.
fn parse_packed(data: &str, s: u32, m: u32) -> Result<Vec<u64>, NetError> {
    let expected = (s * m) as usize;
    let mut words = Vec::with_capacity(expected);
    let mut tokens = data.split_whitespace();
    for read in 0..expected {
        let token = tokens
            .next()
            .ok_or(NetError::TruncatedStream { expected, read })?;
        let value: u64 = token.parse().map_err(|_| NetError::InvalidToken {
            token: token.to_string(),
        })?;
        words.push(value);
    }
    Ok(words)
}
