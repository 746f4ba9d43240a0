//! Dynamic time warping over numeric time series.
//!
//! Pure math library with no I/O. Provides exact DTW with path extraction,
//! a linear-memory cost-only variant, DTW constrained to an arbitrary
//! [`Window`], block-averaging [`downsample`], and the multiresolution
//! [`FastDtw`] approximation with parallel all-pairs costs.
//!
//! Indices follow one convention throughout: `x` walks the first series
//! (columns of the cost grid) and `y` walks the second (rows).

mod cost;
mod downsample;
mod dtw;
mod error;
mod fastdtw;
mod matrix;
mod metric;
mod pairwise;
mod path;
mod series;
mod window;

pub use cost::WarpCost;
pub use downsample::downsample;
pub use dtw::{Alignment, Dtw};
pub use error::DtwError;
pub use fastdtw::{FastDtw, project_window};
pub use matrix::WindowMatrix;
pub use metric::{BuiltinMetric, Euclidean, Manhattan, Metric};
pub use pairwise::PairwiseCosts;
pub use path::{Point, WarpPath};
pub use series::{InterleavedSeries, ScalarSeries, TimeSeries, VectorSeries};
pub use window::{
    ColumnRange, CustomWindow, FullWindow, Rect, SakoeChibaWindow, Window, WindowDisplay,
    check_connected, display_window,
};
