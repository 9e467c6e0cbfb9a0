//! Correction engine: corrected intensity, transmittance, absorbance.
//!
//! All operations are element-wise over the shared wavelength axis:
//! `I_corr = sample - dark`, `I_ref = water - dark`, `T = I_corr / I_ref`,
//! `A = -log10(T)`.

use sl_capture::RawCapture;
use sl_core::{
    AXIS_TOL, CURVE_ABSORBANCE, CURVE_CORRECTED, CURVE_TRANSMITTANCE, CurveBundle, Real,
    nearly_equal,
};

use crate::error::{PipelineError, PipelineResult};
use crate::options::ProcessingOptions;

/// Combine the three background-subtracted captures into the curves the
/// options request. Axis agreement is checked before any numeric work.
pub fn correct(
    sample: &RawCapture,
    water: &RawCapture,
    dark: &RawCapture,
    options: &ProcessingOptions,
) -> PipelineResult<CurveBundle> {
    check_axes("sample", sample, "water", water)?;
    check_axes("sample", sample, "dark", dark)?;

    let axis = sample.wavelength();
    let mut bundle = CurveBundle::new(axis.to_vec());

    if !options.emit_corrected && !options.needs_transmittance() {
        // Empty selection: nothing to compute, not an error
        return Ok(bundle);
    }

    let i_corr: Vec<Real> = sample
        .intensity()
        .iter()
        .zip(dark.intensity())
        .map(|(s, d)| s - d)
        .collect();

    let (transmittance, absorbance) = if options.needs_transmittance() {
        let i_ref: Vec<Real> = water
            .intensity()
            .iter()
            .zip(dark.intensity())
            .map(|(w, d)| w - d)
            .collect();

        let mut t = Vec::with_capacity(i_corr.len());
        for (i, (&num, &den)) in i_corr.iter().zip(&i_ref).enumerate() {
            if den == 0.0 {
                return Err(PipelineError::DivisionByZero {
                    index: i,
                    wavelength: axis[i],
                });
            }
            t.push(num / den);
        }

        let a = if options.emit_absorbance {
            let mut a = Vec::with_capacity(t.len());
            for (i, &value) in t.iter().enumerate() {
                if value <= 0.0 {
                    return Err(PipelineError::Domain {
                        index: i,
                        wavelength: axis[i],
                        value,
                    });
                }
                a.push(-value.log10());
            }
            Some(a)
        } else {
            None
        };
        (Some(t), a)
    } else {
        (None, None)
    };

    if options.emit_corrected {
        bundle.insert_curve(CURVE_CORRECTED, i_corr)?;
    }
    if options.emit_transmittance
        && let Some(t) = transmittance
    {
        bundle.insert_curve(CURVE_TRANSMITTANCE, t)?;
    }
    if let Some(a) = absorbance {
        bundle.insert_curve(CURVE_ABSORBANCE, a)?;
    }

    Ok(bundle)
}

fn check_axes(
    left: &'static str,
    a: &RawCapture,
    right: &'static str,
    b: &RawCapture,
) -> PipelineResult<()> {
    if a.len() != b.len() {
        return Err(PipelineError::AxisLengthMismatch {
            left,
            left_len: a.len(),
            right,
            right_len: b.len(),
        });
    }
    for (i, (&wa, &wb)) in a.wavelength().iter().zip(b.wavelength()).enumerate() {
        if !nearly_equal(wa, wb, AXIS_TOL) {
            return Err(PipelineError::AxisValueMismatch {
                left,
                right,
                index: i,
            });
        }
    }
    Ok(())
}
