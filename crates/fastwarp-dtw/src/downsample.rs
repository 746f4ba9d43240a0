//! Block-averaging reduction used between FastDTW resolution levels.

use crate::error::DtwError;
use crate::series::{InterleavedSeries, TimeSeries};

/// Shrink `series` by averaging consecutive blocks of `factor` samples.
///
/// The final block may be shorter than `factor`; the output has
/// `ceil(len / factor)` samples of the input's width, averaged component-wise.
/// An empty input yields an empty output of the same width.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::ZeroFactor`] | `factor` is zero |
pub fn downsample<S: TimeSeries + ?Sized>(
    series: &S,
    factor: usize,
) -> Result<InterleavedSeries, DtwError> {
    if factor == 0 {
        return Err(DtwError::ZeroFactor);
    }
    let len = series.len();
    let width = series.width();
    let mut values = Vec::with_capacity(len.div_ceil(factor) * width);

    for start in (0..len).step_by(factor) {
        let end = (start + factor).min(len);
        let base = values.len();
        values.resize(base + width, 0.0);
        let acc = &mut values[base..];
        for i in start..end {
            for (sum, v) in acc.iter_mut().zip(series.sample(i)) {
                *sum += v;
            }
        }
        let count = (end - start) as f64;
        for sum in acc.iter_mut() {
            *sum /= count;
        }
    }

    Ok(InterleavedSeries::from_raw(width, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::{ScalarSeries, VectorSeries};

    #[test]
    fn factor_one_is_identity() {
        let ts = ScalarSeries::new(vec![3.0, -1.0, 4.0, 1.5]).unwrap();
        let out = downsample(&ts, 1).unwrap();
        assert_eq!(out.as_slice(), ts.as_ref());
    }

    #[test]
    fn exact_blocks_average() {
        let ts = ScalarSeries::new(vec![1.0, 3.0, 5.0, 7.0, 10.0, 20.0]).unwrap();
        let out = downsample(&ts, 2).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.as_slice(), &[2.0, 6.0, 15.0]);
    }

    #[test]
    fn short_final_block() {
        let ts = ScalarSeries::new(vec![1.0, 2.0, 3.0, 4.0, 10.0]).unwrap();
        let out = downsample(&ts, 3).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.as_slice(), &[2.0, 7.0]);
    }

    #[test]
    fn vectors_average_component_wise() {
        let ts = VectorSeries::new(vec![
            vec![0.0, 10.0],
            vec![2.0, 20.0],
            vec![4.0, 30.0],
        ])
        .unwrap();
        let out = downsample(&ts, 2).unwrap();
        assert_eq!(out.width(), 2);
        assert_eq!(out.sample(0), &[1.0, 15.0]);
        assert_eq!(out.sample(1), &[4.0, 30.0]);
    }

    #[test]
    fn empty_input_stays_empty() {
        let ts = ScalarSeries::new(vec![]).unwrap();
        let out = downsample(&ts, 2).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.width(), 1);
    }

    #[test]
    fn zero_factor_is_rejected() {
        let ts = ScalarSeries::new(vec![1.0]).unwrap();
        assert_eq!(downsample(&ts, 0), Err(DtwError::ZeroFactor));
    }
}
