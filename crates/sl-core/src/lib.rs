//! sl-core: stable foundation for spectralab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - bundle (shared wavelength axis + named curves, flat wire shape)
//! - error (shared error types)

pub mod bundle;
pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use bundle::{
    AXIS_KEY, CURVE_ABSORBANCE, CURVE_CORRECTED, CURVE_TRANSMITTANCE, CurveBundle, FlatBundle,
};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
