//! One instrument reading: a wavelength axis paired with raw intensities.

use sl_core::Real;

use crate::{CaptureError, CaptureResult};

/// An immutable raw capture. The wavelength axis is strictly increasing and
/// the intensity array has the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCapture {
    wavelength: Vec<Real>,
    intensity: Vec<Real>,
}

impl RawCapture {
    /// Build a capture from parts, validating the axis invariants.
    pub fn from_parts(wavelength: Vec<Real>, intensity: Vec<Real>) -> CaptureResult<Self> {
        if wavelength.len() != intensity.len() {
            return Err(CaptureError::CountMismatch {
                wavelengths: wavelength.len(),
                intensities: intensity.len(),
            });
        }
        if wavelength.is_empty() {
            return Err(CaptureError::Empty);
        }
        for (i, pair) in wavelength.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(CaptureError::NonMonotonicAxis {
                    index: i + 1,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(Self {
            wavelength,
            intensity,
        })
    }

    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    pub fn wavelength(&self) -> &[Real] {
        &self.wavelength
    }

    pub fn intensity(&self) -> &[Real] {
        &self.intensity
    }
}
