//! Text capture parser.
//!
//! Accepted layout: UTF-8 text, one `(wavelength, intensity)` pair per line.
//! Fields split on commas, semicolons, tabs or spaces. Blank lines and lines
//! starting with `#` or `;` are comments. A single non-numeric header line is
//! tolerated before the first data line.

use sl_core::Real;

use crate::capture::RawCapture;
use crate::{CaptureError, CaptureResult};

/// Parse a raw instrument capture. Pure; no side effects.
pub fn read(raw_bytes: &[u8]) -> CaptureResult<RawCapture> {
    let text = std::str::from_utf8(raw_bytes).map_err(|_| CaptureError::NotText)?;

    let mut wavelength: Vec<Real> = Vec::new();
    let mut intensity: Vec<Real> = Vec::new();
    let mut header_allowed = true;

    for (line_idx, line) in text.lines().enumerate() {
        let line_no = line_idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let fields: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        // One header line may precede the data
        if header_allowed && !fields.iter().all(|f| f.parse::<Real>().is_ok()) {
            header_allowed = false;
            continue;
        }
        header_allowed = false;

        if fields.len() != 2 {
            return Err(CaptureError::FieldCount {
                line: line_no,
                found: fields.len(),
            });
        }

        let wl = parse_field(fields[0], line_no)?;
        let it = parse_field(fields[1], line_no)?;
        wavelength.push(wl);
        intensity.push(it);
    }

    RawCapture::from_parts(wavelength, intensity)
}

fn parse_field(token: &str, line: usize) -> CaptureResult<Real> {
    let value: Real = token.parse().map_err(|_| CaptureError::BadNumber {
        line,
        token: token.to_string(),
    })?;
    if !value.is_finite() {
        return Err(CaptureError::NonFinite { line, value });
    }
    Ok(value)
}
