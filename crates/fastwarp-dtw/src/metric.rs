//! Per-sample distance functions.
//!
//! A [`Metric`] compares two samples of equal width. Mismatched widths are not
//! comparable and yield `NaN`; the alignment engines do not guard against this,
//! so both sequences of an alignment must share their sample width.

/// Distance between two equal-width samples.
pub trait Metric {
    /// Return a non-negative cost for `a` against `b`, or `NaN` if their widths differ.
    fn distance(&self, a: &[f64], b: &[f64]) -> f64;
}

impl<F> Metric for F
where
    F: Fn(&[f64], &[f64]) -> f64,
{
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        self(a, b)
    }
}

/// Euclidean (L2) distance. Reduces to `|a - b|` for scalar samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() {
            return f64::NAN;
        }
        if let ([x], [y]) = (a, b) {
            return (x - y).abs();
        }
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}

/// Manhattan (L1) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Metric for Manhattan {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() {
            return f64::NAN;
        }
        a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
    }
}

/// Runtime choice between the built-in metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuiltinMetric {
    /// See [`Euclidean`].
    #[default]
    Euclidean,
    /// See [`Manhattan`].
    Manhattan,
}

impl Metric for BuiltinMetric {
    fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        match self {
            Self::Euclidean => Euclidean.distance(a, b),
            Self::Manhattan => Manhattan.distance(a, b),
        }
    }
}
