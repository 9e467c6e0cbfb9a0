//! Shared wavelength axis plus named output curves.
//!
//! The axis is a distinct field in the core model and is only flattened into
//! the wire map at the serialization boundary, so it can never be mistaken
//! for a plottable series.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Reserved key the wavelength axis takes in the flat wire shape.
/// Never a valid curve name.
pub const AXIS_KEY: &str = "wavelength";

/// Background-subtracted sample intensity.
pub const CURVE_CORRECTED: &str = "I_corr";
/// Transmittance.
pub const CURVE_TRANSMITTANCE: &str = "T";
/// Absorbance.
pub const CURVE_ABSORBANCE: &str = "A";

/// Flat wire shape: one map holding the axis under [`AXIS_KEY`] and one
/// entry per curve.
pub type FlatBundle = BTreeMap<String, Vec<Real>>;

/// A shared wavelength axis and a set of named curves of equal length.
///
/// Curves keep insertion order; names are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveBundle {
    wavelength: Vec<Real>,
    curves: Vec<(String, Vec<Real>)>,
}

impl CurveBundle {
    pub fn new(wavelength: Vec<Real>) -> Self {
        Self {
            wavelength,
            curves: Vec::new(),
        }
    }

    /// Number of samples along the axis (and in every curve).
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    pub fn wavelength(&self) -> &[Real] {
        &self.wavelength
    }

    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|(name, _)| name.as_str())
    }

    pub fn curve(&self, name: &str) -> Option<&[Real]> {
        self.curves
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Real])> {
        self.curves.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Add a curve. The name must be unique, non-reserved, and the values
    /// must match the axis length.
    pub fn insert_curve(&mut self, name: impl Into<String>, values: Vec<Real>) -> CoreResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(CoreError::InvalidArg {
                what: "curve name must not be empty",
            });
        }
        if name == AXIS_KEY {
            return Err(CoreError::ReservedName { name });
        }
        if self.curves.iter().any(|(n, _)| *n == name) {
            return Err(CoreError::DuplicateCurve { name });
        }
        if values.len() != self.wavelength.len() {
            return Err(CoreError::CurveLengthMismatch {
                name,
                expected: self.wavelength.len(),
                actual: values.len(),
            });
        }
        self.curves.push((name, values));
        Ok(())
    }

    /// Replace a curve's values in place, keeping its position.
    pub fn replace_curve(&mut self, name: &str, values: Vec<Real>) -> CoreResult<()> {
        if values.len() != self.wavelength.len() {
            return Err(CoreError::CurveLengthMismatch {
                name: name.to_string(),
                expected: self.wavelength.len(),
                actual: values.len(),
            });
        }
        let slot = self
            .curves
            .iter_mut()
            .find(|(n, _)| n == name)
            .ok_or(CoreError::InvalidArg {
                what: "unknown curve name",
            })?;
        slot.1 = values;
        Ok(())
    }

    /// Flatten to the wire map: axis under [`AXIS_KEY`], one key per curve.
    pub fn to_flat(&self) -> FlatBundle {
        let mut flat = BTreeMap::new();
        flat.insert(AXIS_KEY.to_string(), self.wavelength.clone());
        for (name, values) in &self.curves {
            flat.insert(name.clone(), values.clone());
        }
        flat
    }

    /// Rebuild from the wire map. The axis key must be present and every
    /// curve must match its length.
    pub fn from_flat(flat: &FlatBundle) -> CoreResult<Self> {
        let wavelength = flat.get(AXIS_KEY).ok_or(CoreError::MissingAxis)?.clone();
        let mut bundle = CurveBundle::new(wavelength);
        for (name, values) in flat {
            if name == AXIS_KEY {
                continue;
            }
            bundle.insert_curve(name.clone(), values.clone())?;
        }
        Ok(bundle)
    }
}
