//! sl-pipeline: capture correction and smoothing.
//!
//! Sequences the spectrum reader, the correction engine and the optional
//! Savitzky-Golay smoothing filter into a single-attempt pipeline producing
//! a [`sl_core::CurveBundle`].

pub mod correction;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod savgol;

pub use correction::correct;
pub use error::{PipelineError, PipelineResult};
pub use options::{ProcessingOptions, SmoothingOptions};
pub use pipeline::{PipelineEvent, PipelineStage, run, run_with_progress};
pub use savgol::smooth;
