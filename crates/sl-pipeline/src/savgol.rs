//! Savitzky-Golay smoothing.
//!
//! Each output point is the value at the window centre of a least-squares
//! polynomial fitted over a symmetric odd window of the unsmoothed input.
//! Near the boundaries the window shrinks to the largest odd width that still
//! fits (order clamped to `window - 1`); no synthetic padding, so the output
//! length always equals the input length.

use nalgebra::{DMatrix, DVector};
use sl_core::Real;

use crate::error::{PipelineError, PipelineResult};

/// Smooth a single curve. The wavelength axis is never touched.
pub fn smooth(curve: &[Real], window: usize, order: usize) -> PipelineResult<Vec<Real>> {
    if order < 1 {
        return Err(PipelineError::InvalidWindow {
            window,
            what: "polynomial order must be at least 1",
        });
    }
    if window % 2 == 0 {
        return Err(PipelineError::InvalidWindow {
            window,
            what: "window must be odd",
        });
    }
    if window < order + 1 {
        return Err(PipelineError::InvalidWindow {
            window,
            what: "window must be at least order + 1",
        });
    }
    if window > curve.len() {
        return Err(PipelineError::InvalidWindow {
            window,
            what: "window exceeds curve length",
        });
    }

    let len = curve.len();
    let half = window / 2;
    let mut out = Vec::with_capacity(len);

    for i in 0..len {
        // Largest symmetric half-width that fits inside the curve
        let h = half.min(i).min(len - 1 - i);
        if h == 0 {
            out.push(curve[i]);
            continue;
        }
        let ord = order.min(2 * h);
        out.push(fit_window_centre(&curve[i - h..=i + h], h, ord)?);
    }

    Ok(out)
}

/// Least-squares polynomial fit over `values` (length `2h + 1`) on integer
/// offsets `-h..=h`, evaluated at offset 0.
fn fit_window_centre(values: &[Real], h: usize, order: usize) -> PipelineResult<Real> {
    let rows = values.len();
    let cols = order + 1;

    let x = DMatrix::from_fn(rows, cols, |r, c| {
        let offset = r as Real - h as Real;
        offset.powi(c as i32)
    });
    let y = DVector::from_column_slice(values);

    // Normal equations; the Vandermonde basis on distinct offsets keeps
    // X^T X nonsingular for order <= 2h
    let xtx = x.transpose() * &x;
    let xty = x.transpose() * y;
    let coeffs = xtx
        .lu()
        .solve(&xty)
        .ok_or_else(|| PipelineError::Numeric {
            what: "polynomial normal equations are singular".to_string(),
        })?;

    // Value at offset 0 is the constant coefficient
    Ok(coeffs[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_window() {
        let err = smooth(&[1.0; 10], 4, 2).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidWindow { window: 4, .. }));
    }

    #[test]
    fn rejects_window_below_order_plus_one() {
        let err = smooth(&[1.0; 10], 3, 3).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidWindow { .. }));
    }

    #[test]
    fn rejects_window_longer_than_curve() {
        let err = smooth(&[1.0; 5], 7, 2).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidWindow { window: 7, .. }));
    }

    #[test]
    fn rejects_zero_order() {
        let err = smooth(&[1.0; 5], 3, 0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidWindow { .. }));
    }

    #[test]
    fn preserves_length() {
        let curve: Vec<f64> = (0..37).map(|i| (i as f64 * 0.3).sin()).collect();
        let smoothed = smooth(&curve, 7, 2).unwrap();
        assert_eq!(smoothed.len(), curve.len());
    }

    #[test]
    fn linear_curve_is_a_fixed_point() {
        let curve: Vec<f64> = (0..25).map(|i| 3.0 + 0.5 * i as f64).collect();
        let smoothed = smooth(&curve, 7, 2).unwrap();
        for (orig, sm) in curve.iter().zip(&smoothed) {
            assert!((orig - sm).abs() < 1e-9, "expected {orig}, got {sm}");
        }
    }

    #[test]
    fn constant_curve_unchanged_including_edges() {
        let curve = vec![4.2; 11];
        let smoothed = smooth(&curve, 5, 2).unwrap();
        for v in smoothed {
            assert!((v - 4.2).abs() < 1e-12);
        }
    }

    #[test]
    fn cubic_data_reproduced_by_cubic_fit() {
        let f = |x: f64| 0.1 * x * x * x - 2.0 * x + 1.0;
        let curve: Vec<f64> = (0..21).map(|i| f(i as f64)).collect();
        let smoothed = smooth(&curve, 7, 3).unwrap();
        for (i, sm) in smoothed.iter().enumerate() {
            assert!((sm - f(i as f64)).abs() < 1e-7);
        }
    }

    #[test]
    fn smoothing_damps_noise_spike() {
        let mut curve = vec![1.0; 21];
        curve[10] = 5.0;
        let smoothed = smooth(&curve, 7, 2).unwrap();
        assert!(smoothed[10] < curve[10]);
        assert!(smoothed[10] > 1.0);
    }

    proptest::proptest! {
        #[test]
        fn linear_idempotence_any_slope(
            slope in -100.0f64..100.0,
            intercept in -1.0e3f64..1.0e3,
            half in 1usize..6,
        ) {
            let window = 2 * half + 1;
            let curve: Vec<f64> = (0..64).map(|i| intercept + slope * i as f64).collect();
            let smoothed = smooth(&curve, window, 2).unwrap();
            for (orig, sm) in curve.iter().zip(&smoothed) {
                let tol = 1e-6 * orig.abs().max(1.0);
                proptest::prop_assert!((orig - sm).abs() < tol);
            }
        }
    }
}
