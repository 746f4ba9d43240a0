//! CSV input for fastwarp: named scalar series, validated on load.

mod domain;
mod error;
mod reader;

pub use domain::{SeriesId, SeriesSet};
pub use error::IoError;
pub use reader::SeriesReader;
