//! Error types for the sl-app service layer.

use sl_core::CoreError;
use sl_pipeline::PipelineError;
use sl_results::StoreError;

use crate::lifecycle::OperationClass;

/// Wire-level error kind surfaced to the presentation/transport shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    AxisMismatch,
    DivisionByZero,
    Domain,
    InvalidWindow,
    Validation,
    NotFound,
    Busy,
    /// Storage/system failures outside the processing taxonomy.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Format => "format_error",
            ErrorKind::AxisMismatch => "axis_mismatch_error",
            ErrorKind::DivisionByZero => "division_by_zero_error",
            ErrorKind::Domain => "domain_error",
            ErrorKind::InvalidWindow => "invalid_window_error",
            ErrorKind::Validation => "validation_error",
            ErrorKind::NotFound => "not_found_error",
            ErrorKind::Busy => "busy_error",
            ErrorKind::Internal => "internal_error",
        }
    }
}

/// Application error type that wraps errors from the backend crates and
/// provides a unified interface for the shell.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid input: {0}")]
    Core(#[from] CoreError),

    #[error("A {0} request is already in flight")]
    Busy(OperationClass),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// The wire-level kind of this error. Pipeline-stage kinds pass through
    /// unmodified.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Pipeline(err) => match err {
                PipelineError::Capture(_) => ErrorKind::Format,
                PipelineError::AxisLengthMismatch { .. }
                | PipelineError::AxisValueMismatch { .. } => ErrorKind::AxisMismatch,
                PipelineError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
                PipelineError::Domain { .. } => ErrorKind::Domain,
                PipelineError::InvalidWindow { .. } => ErrorKind::InvalidWindow,
                PipelineError::Numeric { .. } => ErrorKind::Domain,
                PipelineError::Bundle(_) => ErrorKind::Validation,
            },
            AppError::Store(err) => match err {
                StoreError::Validation { .. } => ErrorKind::Validation,
                StoreError::NotFound { .. } => ErrorKind::NotFound,
                StoreError::Corrupt { .. } | StoreError::Json(_) => ErrorKind::Format,
                StoreError::Io(_) | StoreError::Csv(_) | StoreError::Zip(_) => ErrorKind::Internal,
            },
            AppError::Core(_) => ErrorKind::Validation,
            AppError::Busy(_) => ErrorKind::Busy,
            AppError::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for sl-app operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sl_capture::CaptureError;

    #[test]
    fn pipeline_kinds_pass_through() {
        let err = AppError::from(PipelineError::DivisionByZero {
            index: 3,
            wavelength: 503.0,
        });
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        let err = AppError::from(PipelineError::Capture(CaptureError::Empty));
        assert_eq!(err.kind(), ErrorKind::Format);

        let err = AppError::from(PipelineError::AxisValueMismatch {
            left: "sample",
            right: "dark",
            index: 0,
        });
        assert_eq!(err.kind(), ErrorKind::AxisMismatch);
    }

    #[test]
    fn store_kinds_map_to_taxonomy() {
        let err = AppError::from(StoreError::NotFound {
            name: "x".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = AppError::from(StoreError::Validation {
            message: "empty".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn busy_kind() {
        assert_eq!(
            AppError::Busy(OperationClass::Preview).kind(),
            ErrorKind::Busy
        );
    }
}
