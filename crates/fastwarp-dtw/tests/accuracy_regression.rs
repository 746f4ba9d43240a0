//! Accuracy regression tests for fastwarp-dtw.
//!
//! Reference costs and paths were computed with an independent
//! straightforward DTW and are hardcoded to catch regressions in the
//! recurrence, the backtrack tie-break, or the window projection.

use fastwarp_dtw::{Dtw, FastDtw, Manhattan, ScalarSeries, VectorSeries, WarpPath};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ts(values: &[f64]) -> ScalarSeries {
    ScalarSeries::new(values.to_vec()).expect("valid test series")
}

fn points(path: &WarpPath) -> Vec<(usize, usize)> {
    path.points().iter().map(|p| (p.x, p.y)).collect()
}

fn sine_pair(len_a: usize, len_b: usize) -> (ScalarSeries, ScalarSeries) {
    let a: Vec<f64> = (0..len_a)
        .map(|i| {
            let t = i as f64;
            (0.13 * t).sin() + 0.5 * (0.031 * t).sin()
        })
        .collect();
    let b: Vec<f64> = (0..len_b)
        .map(|i| {
            let t = i as f64;
            (0.11 * t + 0.7).sin() + 0.4 * (0.05 * t).cos()
        })
        .collect();
    (ts(&a), ts(&b))
}

/// Random walk driven by a 64-bit LCG, so reference values are reproducible
/// outside Rust.
fn lcg_walk(seed: u64, len: usize) -> ScalarSeries {
    let mut state = seed;
    let mut value = 0.0;
    let values: Vec<f64> = (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            value += (state >> 11) as f64 / (1_u64 << 53) as f64 - 0.5;
            value
        })
        .collect();
    ts(&values)
}

fn vector_pair() -> (VectorSeries, VectorSeries) {
    let a = (0..40)
        .map(|i| {
            let t = f64::from(i);
            vec![(0.2 * t).sin(), (0.17 * t).cos()]
        })
        .collect();
    let b = (0..50)
        .map(|i| {
            let t = f64::from(i);
            vec![(0.21 * t + 0.3).sin(), (0.15 * t).cos()]
        })
        .collect();
    (
        VectorSeries::new(a).expect("valid"),
        VectorSeries::new(b).expect("valid"),
    )
}

// ---------------------------------------------------------------------------
// Exact DTW
// ---------------------------------------------------------------------------

#[test]
fn reference_pair_cost_and_path() {
    let a = ts(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let b = ts(&[0.0, 0.0, 1.0, 2.0, 4.0, 5.0]);
    let result = Dtw::new().align(&a, &b).unwrap();
    assert_eq!(result.cost.value(), 1.0);
    assert_eq!(
        points(&result.path),
        vec![(0, 0), (0, 1), (1, 2), (2, 3), (3, 3), (4, 4), (5, 5)]
    );
    assert_eq!(
        result.path.to_string(),
        "*.....\n*.....\n.*....\n..**..\n....*.\n.....*\n"
    );
}

#[test]
fn exact_costs_match_known_values() {
    let cases: &[(&[f64], &[f64], f64)] = &[
        (&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0], 3.0),                 // constant offset
        (&[0.0, 1.0, 0.0], &[0.0, 0.0, 0.0], 1.0),                 // single peak
        (&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0, 3.0, 4.0], 0.0),       // identical
        (&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0], 4.0),                 // reversed
        (&[0.0, 5.0, 0.0, 5.0], &[5.0, 0.0, 5.0, 0.0], 10.0),      // alternating
        (&[1.0], &[5.0], 4.0),                                     // single point
        (&[0.0, 0.0, 1.0], &[1.0, 0.0, 0.0], 2.0),                 // shifted peak
        (&[0.0, 1.0, 2.0, 3.0, 4.0], &[0.0, 0.0, 0.0, 0.0, 4.0], 4.0), // late ramp
        (&[10.0, 10.0, 10.0], &[10.1, 9.9, 10.0], 0.2),            // tiny perturbation
        (&[0.0, 3.0, 0.0, 3.0, 0.0], &[3.0, 0.0, 3.0, 0.0, 3.0], 6.0), // opposite phase
    ];

    let dtw = Dtw::new();
    for (i, &(a, b, expected)) in cases.iter().enumerate() {
        let cost = dtw.align(&ts(a), &ts(b)).unwrap().cost.value();
        assert!(
            (cost - expected).abs() < 1e-10,
            "case {i}: got {cost:.15}, expected {expected:.15}"
        );
    }
}

#[test]
fn alternating_pair_path() {
    let result = Dtw::new()
        .align(&ts(&[0.0, 5.0, 0.0, 5.0]), &ts(&[5.0, 0.0, 5.0, 0.0]))
        .unwrap();
    assert_eq!(
        points(&result.path),
        vec![(0, 0), (0, 1), (1, 2), (2, 3), (3, 3)]
    );
}

#[test]
fn sine_pair_exact_cost() {
    let (a, b) = sine_pair(150, 180);
    let cost = Dtw::new().align(&a, &b).unwrap().cost.value();
    assert!((cost - 48.590_367_581_090_51).abs() < 1e-9, "got {cost}");
    let rolling = Dtw::new().warp_distance(&a, &b).unwrap().value();
    assert_eq!(rolling, cost);
}

// ---------------------------------------------------------------------------
// FastDTW
// ---------------------------------------------------------------------------

#[test]
fn fastdtw_reference_pair_is_exact() {
    let a = ts(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let b = ts(&[0.0, 0.0, 1.0, 2.0, 4.0, 5.0]);
    let exact = Dtw::new().align(&a, &b).unwrap();
    let fast = FastDtw::new(1).align(&a, &b).unwrap();
    assert_eq!(fast.cost, exact.cost);
    assert_eq!(fast.path, exact.path);
}

#[test]
fn fastdtw_sine_pair_by_radius() {
    let (a, b) = sine_pair(150, 180);
    let expected = [
        (0, 61.768_477_951_133_88, 211),
        (1, 48.590_367_581_090_51, 233),
        (2, 48.590_367_581_090_51, 233),
        (3, 48.590_367_581_090_51, 233),
    ];
    for (radius, cost, path_len) in expected {
        let result = FastDtw::new(radius).align(&a, &b).unwrap();
        assert!(
            (result.cost.value() - cost).abs() < 1e-9,
            "radius {radius}: got {}, expected {cost}",
            result.cost.value()
        );
        assert_eq!(result.path.len(), path_len, "radius {radius}");
    }
}

#[test]
fn fastdtw_equal_length_sine_pair() {
    let (a, b) = sine_pair(64, 64);
    let exact = Dtw::new().align(&a, &b).unwrap().cost.value();
    assert!((exact - 23.833_741_747_373_42).abs() < 1e-9);

    let coarse = FastDtw::new(0).align(&a, &b).unwrap();
    assert!((coarse.cost.value() - 24.117_203_065_803_13).abs() < 1e-9);
    assert_eq!(coarse.path.len(), 88);

    let fine = FastDtw::new(1).align(&a, &b).unwrap();
    assert!((fine.cost.value() - exact).abs() < 1e-9);
    assert_eq!(fine.path.len(), 91);
}

#[test]
fn fastdtw_cost_is_not_monotone_in_radius() {
    // Widening the radius also raises the base-case size, which changes the
    // recursion depth and the coarse path. Radius 4 lands on a worse path than
    // radius 2 or 3 for this pair.
    let a = lcg_walk(9, 100);
    let b = lcg_walk(66, 64);
    let exact = Dtw::new().align(&a, &b).unwrap();
    assert!((exact.cost.value() - 44.315_470_596_074_27).abs() < 1e-9);
    assert_eq!(exact.path.len(), 138);

    let expected = [
        (0, 61.388_779_031_828_4, 130),
        (1, 53.897_030_324_798_145, 146),
        (2, 44.315_470_596_074_27, 138),
        (3, 44.315_470_596_074_27, 138),
        (4, 51.759_761_371_959_335, 145),
        (10, 51.759_761_371_959_335, 145),
        (11, 44.315_470_596_074_27, 138),
    ];
    for (radius, cost, path_len) in expected {
        let result = FastDtw::new(radius).align(&a, &b).unwrap();
        assert!(
            (result.cost.value() - cost).abs() < 1e-9,
            "radius {radius}: got {}, expected {cost}",
            result.cost.value()
        );
        assert_eq!(result.path.len(), path_len, "radius {radius}");
    }

    let covering = FastDtw::new(64).align(&a, &b).unwrap();
    assert_eq!(covering, exact);
}

#[test]
fn fastdtw_vector_pair() {
    let (a, b) = vector_pair();
    let exact = Dtw::new().align(&a, &b).unwrap().cost.value();
    assert!((exact - 24.980_016_072_197_863).abs() < 1e-9);
    for radius in 0..3 {
        let fast = FastDtw::new(radius).align(&a, &b).unwrap().cost.value();
        assert!((fast - exact).abs() < 1e-9, "radius {radius}: {fast}");
    }
}

#[test]
fn fastdtw_vector_pair_manhattan() {
    let (a, b) = vector_pair();
    let exact = Dtw::new().with_metric(Manhattan).align(&a, &b).unwrap();
    let fast = FastDtw::new(1).with_metric(Manhattan).align(&a, &b).unwrap();
    assert!((exact.cost.value() - 30.979_071_229_132_35).abs() < 1e-9);
    assert!((fast.cost.value() - exact.cost.value()).abs() < 1e-9);
}
