use thiserror::Error;

/// A specialized result type for sequence computations.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors that can happen while computing a sequence element.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A term or row index was negative.
    #[error("index {index} is negative")]
    NegativeIndex { index: i64 },
    /// A column lies outside of `0..=row`.
    #[error("column {column} is out of range for row {row}")]
    ColumnOutOfRange { row: i64, column: i64 },
    /// The value at this term or row does not fit into a `u128`.
    #[error("value at index {index} overflows u128")]
    Overflow { index: u64 },
}

/// Convert a signed index into a table index.
pub(crate) fn index(index: i64) -> Result<u64> {
    u64::try_from(index).map_err(|_| Error::NegativeIndex { index })
}

/// Validate a `(row, column)` pair of Pascal's triangle.
pub(crate) fn cell(row: i64, column: i64) -> Result<(u64, u64)> {
    let n = index(row)?;
    if column < 0 || column > row {
        return Err(Error::ColumnOutOfRange { row, column });
    }
    Ok((n, column as u64))
}
