//! Error types for sequence construction and DTW alignment.

/// Errors from time series validation, window construction, and alignment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DtwError {
    /// Returned when a DTW engine is handed a zero-length sequence.
    #[error("time series must be non-empty")]
    EmptySeries,

    /// Returned when a time series contains NaN, infinity, or negative infinity.
    #[error("time series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value in the flat sample buffer.
        index: usize,
    },

    /// Returned when a multivariate series is declared with zero values per sample.
    #[error("samples must have at least one component")]
    ZeroWidth,

    /// Returned when a sample does not have the width shared by the rest of the series.
    #[error("sample {index} has {got} components, expected {expected}")]
    RaggedSeries {
        /// Index of the offending sample.
        index: usize,
        /// Width established by the first sample (or declared width).
        expected: usize,
        /// Width actually found.
        got: usize,
    },

    /// Returned when a downsampling factor of zero is requested.
    #[error("downsampling factor must be at least 1")]
    ZeroFactor,

    /// Returned when a window is built over a zero-sized grid.
    #[error("window must cover at least one cell, got {width}x{height}")]
    EmptyWindow {
        /// Number of columns requested.
        width: usize,
        /// Number of rows requested.
        height: usize,
    },

    /// Returned when a window's bounding rectangle does not fit the sequences being aligned.
    #[error(
        "window spans columns {min_x}..={max_x} and rows {min_y}..={max_y}, \
         but sequences have lengths {len_a} and {len_b}"
    )]
    WindowShape {
        /// First admissible column.
        min_x: usize,
        /// Last admissible column.
        max_x: usize,
        /// First admissible row.
        min_y: usize,
        /// Last admissible row.
        max_y: usize,
        /// Length of the first sequence (columns).
        len_a: usize,
        /// Length of the second sequence (rows).
        len_b: usize,
    },

    /// Returned when a window has no monotone path from its origin to its far corner.
    #[error("window is not path-connected at row {row}")]
    DisconnectedWindow {
        /// First row at which connectivity breaks.
        row: usize,
    },
}
