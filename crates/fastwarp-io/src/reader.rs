//! CSV series reader with full input validation.

use std::path::{Path, PathBuf};

use fastwarp_dtw::{DtwError, ScalarSeries};
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{SeriesId, SeriesSet};

/// Reads named scalar series from a CSV file.
///
/// Expected CSV format:
/// - Header row required; its contents are ignored beyond the first column
/// - `id,s0,s1,...`: one row per series, first column is the id
/// - Rows may differ in length; trailing empty cells are dropped
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::MissingSeriesId`] | Row has an empty id cell |
/// | [`IoError::EmptySeries`] | Row has an id but no samples |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, empty, or unparseable |
/// | [`IoError::InvalidSeries`] | Parsed samples fail any other series check |
/// | [`IoError::DuplicateSeriesId`] | Same id appears twice |
pub struct SeriesReader {
    path: PathBuf,
}

impl SeriesReader {
    /// Create a reader for the CSV file at `path`.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn parse_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    /// Read and validate the file, returning a [`SeriesSet`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<SeriesSet, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header_len = rdr.headers().map_err(|e| self.parse_error(e))?.len();
        debug!(header_len, "read CSV header");

        let mut set = SeriesSet::default();
        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.parse_error(e))?;

            let id = record.get(0).unwrap_or("");
            if id.is_empty() {
                return Err(IoError::MissingSeriesId {
                    path: self.path.clone(),
                    row_index,
                });
            }

            let cells: Vec<&str> = record.iter().skip(1).collect();
            let used = cells.iter().rposition(|c| !c.is_empty()).map_or(0, |i| i + 1);
            if used == 0 {
                return Err(IoError::EmptySeries {
                    path: self.path.clone(),
                    row_index,
                    id: id.to_string(),
                });
            }

            let cells = &cells[..used];
            let mut values = Vec::with_capacity(used);
            for (col_index, raw) in cells.iter().enumerate() {
                let value = raw.parse::<f64>().map_err(|_| IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index,
                    raw: (*raw).to_string(),
                })?;
                values.push(value);
            }

            let series = ScalarSeries::new(values).map_err(|e| match e {
                DtwError::NonFiniteValue { index } => IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index: index,
                    raw: cells[index].to_string(),
                },
                source => IoError::InvalidSeries {
                    path: self.path.clone(),
                    row_index,
                    source,
                },
            })?;

            set.push(SeriesId::new(id.to_string()), series)
                .map_err(|first_row| IoError::DuplicateSeriesId {
                    path: self.path.clone(),
                    id: id.to_string(),
                    first_row,
                    second_row: row_index,
                })?;
        }

        if set.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_series = set.len(),
            max_len = set.series().iter().map(|s| s.as_ref().len()).max().unwrap_or(0),
            "series loaded"
        );
        Ok(set)
    }
}
