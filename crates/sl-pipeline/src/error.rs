//! Error types for pipeline operations.

use sl_capture::CaptureError;
use sl_core::CoreError;
use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors raised by the correction/smoothing pipeline. Any stage failure
/// aborts the run; no stage substitutes defaults or retries.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Axis length mismatch: {left} has {left_len} samples, {right} has {right_len}")]
    AxisLengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    #[error("Wavelength axes of {left} and {right} disagree at index {index}")]
    AxisValueMismatch {
        left: &'static str,
        right: &'static str,
        index: usize,
    },

    #[error("Reference intensity is zero at index {index} (wavelength {wavelength})")]
    DivisionByZero { index: usize, wavelength: f64 },

    #[error("Transmittance {value} at index {index} is outside the log domain")]
    Domain {
        index: usize,
        wavelength: f64,
        value: f64,
    },

    #[error("Invalid smoothing window {window}: {what}")]
    InvalidWindow { window: usize, what: &'static str },

    #[error("Numeric failure: {what}")]
    Numeric { what: String },

    #[error("Bundle error: {0}")]
    Bundle(#[from] CoreError),
}
