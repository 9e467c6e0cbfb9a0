//! Shared application service layer for spectralab.
//!
//! Provides the contract the presentation/transport shell calls into:
//! processing, saving, history access and export, plus the per-operation
//! exclusivity guard and transient status reporting.

pub mod error;
pub mod lifecycle;
pub mod service;

pub use error::{AppError, AppResult, ErrorKind};
pub use lifecycle::{
    GatePermit, OperationClass, OperationGate, STATUS_DISMISS, Status, StatusBoard, StatusKind,
};
pub use service::SpectraLab;
