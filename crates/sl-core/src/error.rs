use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Duplicate curve name: {name}")]
    DuplicateCurve { name: String },

    #[error("Curve '{name}' has {actual} samples but the axis has {expected}")]
    CurveLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Curve name '{name}' is reserved for the wavelength axis")]
    ReservedName { name: String },

    #[error("Flat bundle is missing the 'wavelength' axis key")]
    MissingAxis,
}
