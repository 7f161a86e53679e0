//! Pascal's triangle.

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::error::{self, Error, Result};

/// Maps from `(row, column)` to the element at that position.
type Cells = FxHashMap<(u64, u64), u128>;

/// Compute the element in row `n` and column `k` of Pascal's triangle, that
/// is, the binomial coefficient `C(n, k)`.
///
/// Every row up to `n` is rebuilt on every call. Use [`Pascal`] to keep
/// computed rows around between calls.
///
/// ```
/// assert_eq!(memoseq::pascal(10, 3), Ok(120));
/// assert!(memoseq::pascal(3, 4).is_err());
/// ```
pub fn pascal(n: i64, k: i64) -> Result<u128> {
    let (n, k) = error::cell(n, k)?;
    let mut elements = Cells::default();
    extend(&mut elements, 0, n)?;
    Ok(elements[&(n, k)])
}

/// A Pascal's triangle generator that remembers every row it has computed.
///
/// Rows are computed in order and only ever whole, so asking for any element
/// at or above the deepest computed row is a plain lookup.
///
/// ```
/// let mut triangle = memoseq::Pascal::new();
/// assert_eq!(triangle.get(10, 3), Ok(120));
/// assert_eq!(triangle.get(5, 2), Ok(10));
/// assert_eq!(triangle.rows(), 11);
/// ```
#[derive(Debug, Clone)]
pub struct Pascal {
    /// Every cell of rows `0..rows`.
    cells: Cells,
    /// The number of complete rows in `cells`.
    rows: u64,
}

impl Pascal {
    /// Create a generator that only knows the tip of the triangle.
    pub fn new() -> Self {
        let mut cells = Cells::default();
        cells.insert((0, 0), 1);
        Self { cells, rows: 1 }
    }

    /// Return the element in row `n` and column `k`, computing missing rows
    /// first.
    ///
    /// Fails if `n` is negative or `k` lies outside of `0..=n`. If a row
    /// overflows, the cache is left as it was before the call.
    pub fn get(&mut self, n: i64, k: i64) -> Result<u128> {
        let (n, k) = match error::cell(n, k) {
            Ok(cell) => cell,
            Err(err) => {
                #[cfg(feature = "testing")]
                crate::testing::register_miss();
                return Err(err);
            }
        };

        if let Some(&value) = self.cells.get(&(n, k)) {
            #[cfg(feature = "testing")]
            crate::testing::register_hit();
            return Ok(value);
        }

        trace!(from = self.rows, to = n + 1, "extending pascal cache");
        let result = extend(&mut self.cells, self.rows, n).map(|()| {
            self.rows = self.rows.max(n + 1);
            self.cells[&(n, k)]
        });

        #[cfg(feature = "testing")]
        crate::testing::register_miss();

        result
    }

    /// The number of complete rows in the cache.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// The number of cached elements.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, the tip of the triangle is known from the start.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return the element at `(n, k)` if it is already cached.
    pub fn cached(&self, n: i64, k: i64) -> Option<u128> {
        error::cell(n, k).ok().and_then(|cell| self.cells.get(&cell)).copied()
    }

    /// Whether the element at `(n, k)` can be answered without computation.
    pub fn is_cached(&self, n: i64, k: i64) -> bool {
        self.cached(n, k).is_some()
    }
}

impl Default for Pascal {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute rows `from..=to` and insert them into `cells`.
///
/// All rows before `from` must already be in `cells`. Nothing is inserted if
/// any of the new rows overflows.
fn extend(cells: &mut Cells, from: u64, to: u64) -> Result<()> {
    let seed: Vec<u128> = match from.checked_sub(1) {
        Some(prev) => (0..=prev).map(|j| cells[&(prev, j)]).collect(),
        None => Vec::new(),
    };

    let mut staged: Vec<Vec<u128>> = Vec::new();
    for i in from..=to {
        let row = next_row(i, staged.last().unwrap_or(&seed)).inspect_err(|_| {
            debug!(row = i, "pascal row overflows");
        })?;
        staged.push(row);
    }

    for (i, row) in (from..).zip(staged) {
        for (j, value) in (0..).zip(row) {
            cells.insert((i, j), value);
        }
    }

    Ok(())
}

/// Compute row `i` from the row above it.
fn next_row(i: u64, above: &[u128]) -> Result<Vec<u128>> {
    (0..=i)
        .map(|j| {
            if j == 0 || j == i {
                return Ok(1);
            }
            let j = j as usize;
            above[j - 1]
                .checked_add(above[j])
                .ok_or(Error::Overflow { index: i })
        })
        .collect()
}
