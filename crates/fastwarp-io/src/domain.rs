//! Named series collections.

use std::collections::HashMap;

use fastwarp_dtw::ScalarSeries;

/// Identifier of one series, taken from the first CSV column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesId(String);

impl SeriesId {
    pub(crate) fn new(id: String) -> Self {
        debug_assert!(!id.is_empty(), "series id must not be empty");
        Self(id)
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Series in file order, each with a unique id.
///
/// Produced by [`SeriesReader`](crate::SeriesReader). `ids()[i]` names
/// `series()[i]`.
#[derive(Debug, Default)]
pub struct SeriesSet {
    ids: Vec<SeriesId>,
    series: Vec<ScalarSeries>,
    index: HashMap<String, usize>,
}

impl SeriesSet {
    /// Append a series. Returns the row of an earlier series with the same
    /// id instead of inserting.
    pub(crate) fn push(&mut self, id: SeriesId, series: ScalarSeries) -> Result<(), usize> {
        if let Some(&first) = self.index.get(id.as_str()) {
            return Err(first);
        }
        self.index.insert(id.as_str().to_owned(), self.ids.len());
        self.ids.push(id);
        self.series.push(series);
        Ok(())
    }

    /// Return the number of series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Return true if the set holds no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Return the ids in file order.
    #[must_use]
    pub fn ids(&self) -> &[SeriesId] {
        &self.ids
    }

    /// Return the series in file order.
    #[must_use]
    pub fn series(&self) -> &[ScalarSeries] {
        &self.series
    }

    /// Look up a series by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ScalarSeries> {
        self.index.get(id).map(|&i| &self.series[i])
    }

    /// Iterate over `(id, series)` in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&SeriesId, &ScalarSeries)> {
        self.ids.iter().zip(&self.series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> ScalarSeries {
        ScalarSeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn lookup_by_id() {
        let mut set = SeriesSet::default();
        set.push(SeriesId::new("a".into()), series(&[1.0])).unwrap();
        set.push(SeriesId::new("b".into()), series(&[2.0, 3.0])).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("b").map(AsRef::as_ref), Some(&[2.0, 3.0][..]));
        assert!(set.get("c").is_none());
    }

    #[test]
    fn duplicate_push_reports_first_row() {
        let mut set = SeriesSet::default();
        set.push(SeriesId::new("x".into()), series(&[1.0])).unwrap();
        set.push(SeriesId::new("y".into()), series(&[1.0])).unwrap();
        assert_eq!(set.push(SeriesId::new("x".into()), series(&[2.0])), Err(0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn iter_follows_insertion_order() {
        let mut set = SeriesSet::default();
        for id in ["zz", "aa", "mm"] {
            set.push(SeriesId::new(id.into()), series(&[0.0])).unwrap();
        }
        let ids: Vec<&str> = set.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["zz", "aa", "mm"]);
    }
}
