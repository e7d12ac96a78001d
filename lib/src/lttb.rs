use thiserror::Error;

/// Errors from the downsampling entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DownsampleError {
    #[error("x and y lengths differ: {x_len} vs {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("cannot reduce {len} points to {threshold}; the threshold must be at least 2")]
    TargetTooSmall { threshold: usize, len: usize },
}

/// Largest Triangle Three Buckets (LTTB) downsampling algorithm.
///
/// Reduces paired `x`/`y` slices to at most `threshold` points while
/// preserving the visual shape of the curve. The first and last points are
/// always kept verbatim. Inputs of at most `threshold` points come back
/// unchanged, in newly allocated vectors.
///
/// Buckets are formed over input order with fractional boundaries; the
/// routine never sorts and never looks at whether `x` is monotonic.
/// Non-finite values are not errors and flow through the area arithmetic.
///
/// Fails with [`DownsampleError::LengthMismatch`] when the slices disagree
/// in length, and with [`DownsampleError::TargetTooSmall`] when
/// `threshold < 2` while an input of more than two points actually needs
/// reducing. Inputs of up to two points pass through under any threshold:
/// both are endpoints and endpoints are never dropped.
pub fn downsample(
    x: &[f64],
    y: &[f64],
    threshold: usize,
) -> Result<(Vec<f64>, Vec<f64>), DownsampleError> {
    if x.len() != y.len() {
        return Err(DownsampleError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    let n = x.len();
    if n <= threshold || n <= 2 {
        return Ok((x.to_vec(), y.to_vec()));
    }
    if threshold < 2 {
        return Err(DownsampleError::TargetTooSmall { threshold, len: n });
    }

    let mut sampled_x = Vec::with_capacity(threshold);
    let mut sampled_y = Vec::with_capacity(threshold);
    sampled_x.push(x[0]);
    sampled_y.push(y[0]);

    // Interior points [1, n-2] are spread over threshold - 2 buckets with
    // fractional boundaries.
    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;

    let mut a = 0usize;

    for i in 0..(threshold - 2) {
        // Average of the next bucket, the third vertex of the triangle.
        // An empty window (possible only through pathological float
        // rounding of the boundaries) leaves the average at the origin.
        let avg_start = (((i + 1) as f64 * bucket_size).floor() as usize + 1).min(n);
        let avg_end = (((i + 2) as f64 * bucket_size).floor() as usize + 1).min(n);

        let mut avg_x = 0.0f64;
        let mut avg_y = 0.0f64;
        for j in avg_start..avg_end {
            avg_x += x[j];
            avg_y += y[j];
        }
        let avg_len = avg_end - avg_start;
        if avg_len > 0 {
            avg_x /= avg_len as f64;
            avg_y /= avg_len as f64;
        }

        // Candidates for this output slot.
        let range_offs = ((i as f64 * bucket_size).floor() as usize + 1).min(n - 1);
        let range_to = (((i + 1) as f64 * bucket_size).floor() as usize + 1).min(n - 1);

        let a_x = x[a];
        let a_y = y[a];

        let mut max_area = -1.0f64;
        let mut next_a = range_offs;

        for j in range_offs..range_to {
            // Triangle over the previous pick, this candidate, and the next
            // bucket's average. Strict comparison keeps the first maximum;
            // a bucket of all-NaN areas keeps its first candidate.
            let area =
                0.5 * ((a_x - avg_x) * (y[j] - a_y) - (a_x - x[j]) * (avg_y - a_y)).abs();
            if area > max_area {
                max_area = area;
                next_a = j;
            }
        }

        sampled_x.push(x[next_a]);
        sampled_y.push(y[next_a]);
        a = next_a;
    }

    sampled_x.push(x[n - 1]);
    sampled_y.push(y[n - 1]);

    Ok((sampled_x, sampled_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..n).map(|i| (i * i) as f64).collect();
        (x, y)
    }

    #[test]
    fn identity_below_threshold() {
        let (x, y) = ramp(5);
        assert_eq!(downsample(&x, &y, 10).unwrap(), (x, y));
    }

    #[test]
    fn identity_at_threshold() {
        let (x, y) = ramp(5);
        assert_eq!(downsample(&x, &y, 5).unwrap(), (x, y));
    }

    #[test]
    fn empty_input() {
        assert_eq!(downsample(&[], &[], 100).unwrap(), (vec![], vec![]));
    }

    #[test]
    fn single_point() {
        assert_eq!(
            downsample(&[5.0], &[7.0], 100).unwrap(),
            (vec![5.0], vec![7.0])
        );
    }

    #[test]
    fn tiny_inputs_pass_through_any_threshold() {
        assert_eq!(downsample(&[5.0], &[7.0], 0).unwrap(), (vec![5.0], vec![7.0]));
        assert_eq!(
            downsample(&[0.0, 1.0], &[2.0, 3.0], 1).unwrap(),
            (vec![0.0, 1.0], vec![2.0, 3.0])
        );
    }

    #[test]
    fn exact_output_size() {
        let (x, y) = ramp(100);
        let (dx, dy) = downsample(&x, &y, 20).unwrap();
        assert_eq!(dx.len(), 20);
        assert_eq!(dy.len(), 20);
    }

    #[test]
    fn endpoints_preserved() {
        let (x, y) = ramp(100);
        let (dx, dy) = downsample(&x, &y, 7).unwrap();
        assert_eq!((dx[0], dy[0]), (0.0, 0.0));
        assert_eq!((*dx.last().unwrap(), *dy.last().unwrap()), (99.0, 9801.0));
    }

    #[test]
    fn threshold_two_keeps_endpoints_only() {
        let (x, y) = ramp(50);
        let (dx, dy) = downsample(&x, &y, 2).unwrap();
        assert_eq!(dx, vec![0.0, 49.0]);
        assert_eq!(dy, vec![0.0, 49.0 * 49.0]);
    }

    #[test]
    fn output_is_ordered_subsequence() {
        let x: Vec<f64> = (0..500).map(|i| i as f64 * 0.1).collect();
        let y: Vec<f64> = (0..500).map(|i| (i as f64 * 0.37).sin()).collect();
        let (dx, dy) = downsample(&x, &y, 40).unwrap();

        let mut cursor = 0usize;
        for (xv, yv) in dx.iter().zip(dy.iter()) {
            let found = x[cursor..]
                .iter()
                .zip(y[cursor..].iter())
                .position(|(sx, sy)| sx == xv && sy == yv)
                .expect("output point not found in input order");
            cursor += found + 1;
        }
    }

    #[test]
    fn deterministic() {
        let x: Vec<f64> = (0..10_000).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..10_000).map(|i| (i as f64 * 0.01).cos()).collect();
        let first = downsample(&x, &y, 500).unwrap();
        let second = downsample(&x, &y, 500).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn alternating_signal_pins_selection() {
        // bucket_size = 8 / 2 = 4.0: slot 0 picks from [1, 5) against the
        // average of [5, 9), slot 1 from [5, 9) against the average of [9, 10).
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..10).map(|i| (i % 2) as f64).collect();
        let (dx, dy) = downsample(&x, &y, 4).unwrap();
        assert_eq!(dx, vec![0.0, 1.0, 6.0, 9.0]);
        assert_eq!(dy, vec![0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn large_input_compresses_to_threshold() {
        let n = 830_000usize;
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 1e-5).collect();
        let y: Vec<f64> = (0..n).map(|i| (i as f64 * 2e-4).sin()).collect();
        let (dx, dy) = downsample(&x, &y, 15_000).unwrap();

        assert_eq!(dx.len(), 15_000);
        assert_eq!(dy.len(), 15_000);
        assert_eq!(dx[0], x[0]);
        assert_eq!(*dx.last().unwrap(), *x.last().unwrap());

        // Selection only: the output cannot step outside the input's range.
        let (y_min, y_max) = y.iter().fold((f64::MAX, f64::MIN), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
        for &v in &dy {
            assert!(v >= y_min && v <= y_max);
        }
    }

    #[test]
    fn threshold_too_small_errors() {
        let (x, y) = ramp(100);
        assert_eq!(
            downsample(&x, &y, 1),
            Err(DownsampleError::TargetTooSmall {
                threshold: 1,
                len: 100
            })
        );
        assert_eq!(
            downsample(&x, &y, 0),
            Err(DownsampleError::TargetTooSmall {
                threshold: 0,
                len: 100
            })
        );
    }

    #[test]
    fn mismatched_lengths_error() {
        assert_eq!(
            downsample(&[1.0, 2.0], &[1.0], 10),
            Err(DownsampleError::LengthMismatch { x_len: 2, y_len: 1 })
        );
    }

    #[test]
    fn nan_values_tolerated() {
        let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let mut y: Vec<f64> = (0..100).map(|i| i as f64).collect();
        y[10] = f64::NAN;
        y[50] = f64::INFINITY;

        let (dx, dy) = downsample(&x, &y, 10).unwrap();
        assert_eq!(dx.len(), 10);
        assert_eq!(dy.len(), 10);
        assert_eq!((dx[0], dy[0]), (0.0, 0.0));
        assert_eq!((*dx.last().unwrap(), *dy.last().unwrap()), (99.0, 99.0));
    }

    #[test]
    fn all_nan_bucket_keeps_first_candidate() {
        // bucket_size = 4.0, so slot 0 picks from indices [1, 5). With every
        // candidate area NaN the running maximum never updates and the first
        // candidate wins.
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut y: Vec<f64> = vec![0.0; 10];
        for i in 1..5 {
            y[i] = f64::NAN;
        }
        let (dx, _dy) = downsample(&x, &y, 4).unwrap();
        assert_eq!(dx[1], 1.0);
    }
}
