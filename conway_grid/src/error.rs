use thiserror::Error;

/// Rejected grid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Template rows must all have the width of the first row
    #[error("template row {row} has {found} cells, expected {expected}")]
    RaggedTemplate {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell value {0}, expected 0 or 1")]
    InvalidCellValue(u8),
}
