//! I/O error types for fastwarp-io.

use std::path::PathBuf;

/// Errors from reading and validating a series CSV file.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero data rows.
    #[error("empty dataset (no data rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a data row has an empty id cell.
    #[error("missing series id in {path}: row {row_index}")]
    MissingSeriesId {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
    },

    /// Returned when a data row has an id but no samples.
    #[error("series \"{id}\" in {path} (row {row_index}) has no samples")]
    EmptySeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Id of the offending row.
        id: String,
    },

    /// Returned when a cell is NaN, infinite, empty, or not a number.
    #[error("non-finite value in {path}: row {row_index}, column {col_index}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Zero-based sample index (excluding the id column).
        col_index: usize,
        /// The raw cell text.
        raw: String,
    },

    /// Returned when parsed samples fail series validation for any reason
    /// other than a non-finite value.
    #[error("invalid series in {path}: row {row_index}")]
    InvalidSeries {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based row index (excluding header).
        row_index: usize,
        /// Underlying series error.
        source: fastwarp_dtw::DtwError,
    },

    /// Returned when the same series id appears more than once.
    #[error("duplicate series id \"{id}\" in {path}: first at row {first_row}, again at row {second_row}")]
    DuplicateSeriesId {
        /// Path to the CSV file.
        path: PathBuf,
        /// The duplicated id.
        id: String,
        /// Zero-based row index of the first occurrence.
        first_row: usize,
        /// Zero-based row index of the second occurrence.
        second_row: usize,
    },
}
