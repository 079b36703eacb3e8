//! Access contract for the external table of precomputed nets.
//!
//! Table-backed families (Niederreiter-Xing and the low-WAFOM variants) live
//! in an external tabular store keyed by family name, bit width, dimension
//! and resolution. The storage engine itself is out of scope here; this
//! module only fixes the query contract and provides [`MemoryTable`], a
//! minimal in-memory implementation used for fixtures and tests. Callers with
//! a real database wrap it in the same trait.

/// One row of the tabular store: quality metadata plus the packed matrix
/// body as whitespace-separated unsigned integers in row-major order.
#[derive(Debug, Clone)]
pub struct TableRow {
    /// WAFOM figure of merit, if recorded.
    pub wafom: Option<f64>,
    /// t-value, if recorded.
    pub t_value: Option<i64>,
    /// Packed matrix words, whitespace separated, row-major.
    pub data: String,
}

/// Query interface of the external tabular store.
///
/// Absence of a matching row is reported as `None`, never substituted with a
/// different net.
pub trait MatrixTable {
    /// Returns the row for `name` at bit width `bit_size` and dimension `s`
    /// whose resolution is the **smallest available value >= `m`**.
    fn select(&self, name: &str, bit_size: u32, s: u32, m: u32) -> Option<TableRow>;

    /// Minimum and maximum dimension stored for `name`.
    fn s_range(&self, name: &str) -> Option<(u32, u32)>;

    /// Minimum and maximum resolution stored for `name` at dimension `s`.
    fn m_range(&self, name: &str, s: u32) -> Option<(u32, u32)>;
}

#[derive(Debug, Clone)]
struct MemoryRow {
    name: String,
    bit_size: u32,
    s: u32,
    m: u32,
    wafom: Option<f64>,
    t_value: Option<i64>,
    data: String,
}

/// In-memory [`MatrixTable`] implementation.
///
/// # Example
///
/// ```
/// use digitalnet::loader::{MatrixTable, MemoryTable};
///
/// let mut table = MemoryTable::new();
/// table.insert("nx", 64, 2, 2, Some(0.5), Some(1), "1 2 3 4");
/// assert!(table.select("nx", 64, 2, 2).is_some());
/// assert_eq!(table.s_range("nx"), Some((2, 2)));
/// assert_eq!(table.s_range("unknown"), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryTable {
    rows: Vec<MemoryRow>,
}

impl MemoryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        MemoryTable::default()
    }

    /// Adds a row.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        name: &str,
        bit_size: u32,
        s: u32,
        m: u32,
        wafom: Option<f64>,
        t_value: Option<i64>,
        data: impl Into<String>,
    ) {
        self.rows.push(MemoryRow {
            name: name.to_string(),
            bit_size,
            s,
            m,
            wafom,
            t_value,
            data: data.into(),
        });
    }
}

impl MatrixTable for MemoryTable {
    fn select(&self, name: &str, bit_size: u32, s: u32, m: u32) -> Option<TableRow> {
        self.rows
            .iter()
            .filter(|r| r.name == name && r.bit_size == bit_size && r.s == s && r.m >= m)
            .min_by_key(|r| r.m)
            .map(|r| TableRow {
                wafom: r.wafom,
                t_value: r.t_value,
                data: r.data.clone(),
            })
    }

    fn s_range(&self, name: &str) -> Option<(u32, u32)> {
        let mut matches = self.rows.iter().filter(|r| r.name == name).map(|r| r.s);
        let first = matches.next()?;
        let (lo, hi) = matches.fold((first, first), |(lo, hi), s| (lo.min(s), hi.max(s)));
        Some((lo, hi))
    }

    fn m_range(&self, name: &str, s: u32) -> Option<(u32, u32)> {
        let mut matches = self
            .rows
            .iter()
            .filter(|r| r.name == name && r.s == s)
            .map(|r| r.m);
        let first = matches.next()?;
        let (lo, hi) = matches.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Some((lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> MemoryTable {
        let mut t = MemoryTable::new();
        t.insert("nx", 64, 4, 10, Some(0.1), Some(3), "a");
        t.insert("nx", 64, 4, 14, Some(0.2), Some(4), "b");
        t.insert("nx", 64, 6, 12, None, None, "c");
        t.insert("nx", 32, 4, 10, None, None, "half");
        t
    }

    #[test]
    fn test_select_smallest_m_at_least_requested() {
        let t = table();
        assert_eq!(t.select("nx", 64, 4, 9).unwrap().data, "a");
        assert_eq!(t.select("nx", 64, 4, 10).unwrap().data, "a");
        assert_eq!(t.select("nx", 64, 4, 11).unwrap().data, "b");
        assert_eq!(t.select("nx", 64, 4, 14).unwrap().data, "b");
        assert!(t.select("nx", 64, 4, 15).is_none());
    }

    #[test]
    fn test_select_filters_bit_size_and_name() {
        let t = table();
        assert_eq!(t.select("nx", 32, 4, 10).unwrap().data, "half");
        assert!(t.select("nx", 16, 4, 10).is_none());
        assert!(t.select("solw", 64, 4, 10).is_none());
    }

    #[test]
    fn test_metadata_passthrough() {
        let t = table();
        let row = t.select("nx", 64, 4, 10).unwrap();
        assert_eq!(row.wafom, Some(0.1));
        assert_eq!(row.t_value, Some(3));
        let row = t.select("nx", 64, 6, 12).unwrap();
        assert_eq!(row.wafom, None);
        assert_eq!(row.t_value, None);
    }

    #[test]
    fn test_ranges() {
        let t = table();
        assert_eq!(t.s_range("nx"), Some((4, 6)));
        assert_eq!(t.m_range("nx", 4), Some((10, 14)));
        assert_eq!(t.m_range("nx", 6), Some((12, 12)));
        assert_eq!(t.m_range("nx", 5), None);
        assert_eq!(t.s_range("missing"), None);
    }
}
