//! Time series shapes sharing one read contract.
//!
//! Every shape exposes its samples as `&[f64]` slices of a fixed width, so the
//! engines never care whether a series is scalar, a list of vectors, or an
//! interleaved buffer.

use crate::error::DtwError;

/// Read-only indexed access to equal-width samples.
pub trait TimeSeries {
    /// Return the number of samples.
    fn len(&self) -> usize;

    /// Return the number of components in every sample.
    fn width(&self) -> usize;

    /// Return sample `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    fn sample(&self, index: usize) -> &[f64];

    /// Return true if the series has no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: TimeSeries + ?Sized> TimeSeries for &T {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn width(&self) -> usize {
        (**self).width()
    }

    fn sample(&self, index: usize) -> &[f64] {
        (**self).sample(index)
    }
}

fn check_index(index: usize, len: usize) {
    assert!(
        index < len,
        "sample index {index} out of bounds for series of length {len}"
    );
}

fn check_finite(values: &[f64]) -> Result<(), DtwError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DtwError::NonFiniteValue { index }),
        None => Ok(()),
    }
}

/// Univariate series: one value per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSeries(Vec<f64>);

impl ScalarSeries {
    /// Create a scalar series, validating that all values are finite.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: Vec<f64>) -> Result<Self, DtwError> {
        check_finite(&values)?;
        Ok(Self(values))
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for ScalarSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for ScalarSeries {
    type Error = DtwError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl TimeSeries for ScalarSeries {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn width(&self) -> usize {
        1
    }

    fn sample(&self, index: usize) -> &[f64] {
        check_index(index, self.0.len());
        std::slice::from_ref(&self.0[index])
    }
}

/// Multivariate series stored as one vector per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSeries {
    samples: Vec<Vec<f64>>,
    width: usize,
}

impl VectorSeries {
    /// Create a vector series. All samples must share the width of the first.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroWidth`] | The first sample is empty |
    /// | [`DtwError::RaggedSeries`] | A sample's width differs from the first sample's |
    /// | [`DtwError::NonFiniteValue`] | Any component is NaN or infinite (index is flat) |
    pub fn new(samples: Vec<Vec<f64>>) -> Result<Self, DtwError> {
        let width = samples.first().map_or(0, Vec::len);
        if !samples.is_empty() && width == 0 {
            return Err(DtwError::ZeroWidth);
        }
        for (index, sample) in samples.iter().enumerate() {
            if sample.len() != width {
                return Err(DtwError::RaggedSeries {
                    index,
                    expected: width,
                    got: sample.len(),
                });
            }
            check_finite(sample).map_err(|e| match e {
                DtwError::NonFiniteValue { index: j } => DtwError::NonFiniteValue {
                    index: index * width + j,
                },
                other => other,
            })?;
        }
        Ok(Self { samples, width })
    }
}

impl TimeSeries for VectorSeries {
    fn len(&self) -> usize {
        self.samples.len()
    }

    fn width(&self) -> usize {
        self.width
    }

    fn sample(&self, index: usize) -> &[f64] {
        check_index(index, self.samples.len());
        &self.samples[index]
    }
}

/// Multivariate series stored as one flat buffer, `width` values per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct InterleavedSeries {
    width: usize,
    values: Vec<f64>,
}

impl InterleavedSeries {
    /// Create an interleaved series from a flat buffer of `width`-sized samples.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::ZeroWidth`] | `width` is zero |
    /// | [`DtwError::RaggedSeries`] | `values.len()` is not a multiple of `width` |
    /// | [`DtwError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(width: usize, values: Vec<f64>) -> Result<Self, DtwError> {
        if width == 0 {
            return Err(DtwError::ZeroWidth);
        }
        if values.len() % width != 0 {
            return Err(DtwError::RaggedSeries {
                index: values.len() / width,
                expected: width,
                got: values.len() % width,
            });
        }
        check_finite(&values)?;
        Ok(Self { width, values })
    }

    /// Build without validation. Callers guarantee finite values in whole samples.
    pub(crate) fn from_raw(width: usize, values: Vec<f64>) -> Self {
        debug_assert!((width == 0 && values.is_empty()) || values.len() % width == 0);
        Self { width, values }
    }

    /// Return the flat sample buffer.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl TimeSeries for InterleavedSeries {
    fn len(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.values.len() / self.width
        }
    }

    fn width(&self) -> usize {
        self.width
    }

    fn sample(&self, index: usize) -> &[f64] {
        check_index(index, self.len());
        let start = index * self.width;
        &self.values[start..start + self.width]
    }
}
