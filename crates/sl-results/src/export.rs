//! CSV and ZIP export of stored results.

use std::io::Write;

use sl_core::{AXIS_KEY, CurveBundle};
use zip::write::SimpleFileOptions;

use crate::store::ResultStore;
use crate::{StoreError, StoreResult};

/// Render a bundle as CSV: header `wavelength,<curve...>`, one row per
/// wavelength sample, axis in the first column.
pub fn csv_bytes(bundle: &CurveBundle) -> StoreResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec![AXIS_KEY.to_string()];
    header.extend(bundle.curve_names().map(str::to_string));
    writer.write_record(&header)?;

    let curves: Vec<&[f64]> = bundle.iter().map(|(_, values)| values).collect();
    for (i, wl) in bundle.wavelength().iter().enumerate() {
        let mut row = vec![wl.to_string()];
        row.extend(curves.iter().map(|c| c[i].to_string()));
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| StoreError::Io(e.into_error()))
}

impl ResultStore {
    /// CSV for one stored entry.
    pub fn export_csv(&self, name: &str) -> StoreResult<Vec<u8>> {
        let result = self.load(name)?;
        csv_bytes(&result.bundle)
    }

    /// ZIP archive with one `<name>.csv` per history entry.
    pub fn export_batch(&self) -> StoreResult<Vec<u8>> {
        let cursor = std::io::Cursor::new(Vec::new());
        let mut archive = zip::ZipWriter::new(cursor);
        let options = SimpleFileOptions::default();

        for summary in self.list()? {
            let csv = self.export_csv(&summary.name)?;
            archive.start_file(format!("{}.csv", summary.name), options)?;
            archive.write_all(&csv)?;
        }

        let cursor = archive.finish()?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_has_axis_first_and_one_row_per_sample() {
        let mut bundle = CurveBundle::new(vec![500.0, 501.0]);
        bundle.insert_curve("I_corr", vec![8.0, 10.0]).unwrap();
        bundle.insert_curve("T", vec![1.5, 2.5]).unwrap();

        let bytes = csv_bytes(&bundle).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "wavelength,I_corr,T");
        assert_eq!(lines[1], "500,8,1.5");
        assert_eq!(lines[2], "501,10,2.5");
    }

    #[test]
    fn csv_of_empty_selection_is_axis_only() {
        let bundle = CurveBundle::new(vec![500.0]);
        let text = String::from_utf8(csv_bytes(&bundle).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "wavelength");
        assert_eq!(lines[1], "500");
    }
}
