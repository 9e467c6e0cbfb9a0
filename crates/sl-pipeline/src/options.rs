//! Processing options for a pipeline run.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Which curves to emit and how to smooth them.
///
/// An empty output selection is allowed and yields an empty curve set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    pub emit_corrected: bool,
    pub emit_transmittance: bool,
    pub emit_absorbance: bool,
    pub smoothing: SmoothingOptions,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            emit_corrected: true,
            emit_transmittance: true,
            emit_absorbance: true,
            smoothing: SmoothingOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingOptions {
    pub enabled: bool,
    /// Sliding window width; must be odd and at least `order + 1`.
    pub window: usize,
    /// Polynomial order of the local fit.
    pub order: usize,
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            window: 11,
            order: 3,
        }
    }
}

impl ProcessingOptions {
    /// Whether transmittance must be computed (requested directly or as the
    /// input to absorbance).
    pub fn needs_transmittance(&self) -> bool {
        self.emit_transmittance || self.emit_absorbance
    }

    /// Validate smoothing parameters before any capture is read. The
    /// window-vs-curve-length constraint is checked later, once the curve
    /// length is known.
    pub fn validate(&self) -> PipelineResult<()> {
        if !self.smoothing.enabled {
            return Ok(());
        }
        let s = &self.smoothing;
        if s.order < 1 {
            return Err(PipelineError::InvalidWindow {
                window: s.window,
                what: "polynomial order must be at least 1",
            });
        }
        if s.window % 2 == 0 {
            return Err(PipelineError::InvalidWindow {
                window: s.window,
                what: "window must be odd",
            });
        }
        if s.window < s.order + 1 {
            return Err(PipelineError::InvalidWindow {
                window: s.window,
                what: "window must be at least order + 1",
            });
        }
        Ok(())
    }
}
