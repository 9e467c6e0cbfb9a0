//! sl-capture: raw spectrometer capture parsing.

pub mod capture;
pub mod reader;

pub use capture::RawCapture;
pub use reader::read;

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Parse failures. Every variant is a malformed capture; the service layer
/// surfaces them all under the `Format` error kind.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("Capture is not UTF-8 text")]
    NotText,

    #[error("Capture contains no data lines")]
    Empty,

    #[error("Line {line}: expected 2 fields (wavelength, intensity), found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("Line {line}: '{token}' is not a number")]
    BadNumber { line: usize, token: String },

    #[error("Line {line}: non-finite value {value}")]
    NonFinite { line: usize, value: f64 },

    #[error("Wavelength axis is not strictly increasing at index {index} ({prev} -> {next})")]
    NonMonotonicAxis { index: usize, prev: f64, next: f64 },

    #[error("Wavelength and intensity counts differ ({wavelengths} vs {intensities})")]
    CountMismatch {
        wavelengths: usize,
        intensities: usize,
    },
}
