//! Tabular export of the entries view

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use shared::listing::ExportRow;

use crate::{ClientError, ClientResult};

/// Worksheet name used by the entries export
pub const SHEET_NAME: &str = "Horas Extra";

/// File name used when the caller does not pick one
pub const DEFAULT_FILE_NAME: &str = "horas_extra.xlsx";

/// Anything that can turn a header row plus data rows into an artifact
pub trait TabularExport {
    type Output;

    fn export(&self, sheet: &str, headers: &[&str], rows: &[ExportRow]) -> ClientResult<Self::Output>;
}

impl From<XlsxError> for ClientError {
    fn from(err: XlsxError) -> Self {
        ClientError::Export(err.to_string())
    }
}

/// Writes an `.xlsx` workbook to disk and returns its path
#[derive(Debug, Clone)]
pub struct XlsxExport {
    path: PathBuf,
}

impl XlsxExport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/horas_extra.xlsx`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for XlsxExport {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl TabularExport for XlsxExport {
    type Output = PathBuf;

    fn export(&self, sheet: &str, headers: &[&str], rows: &[ExportRow]) -> ClientResult<PathBuf> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet)?;

        for (col, header) in headers.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        }
        for (idx, row) in rows.iter().enumerate() {
            let r = idx as u32 + 1;
            worksheet.write_string(r, 0, &row.name)?;
            worksheet.write_string(r, 1, &row.reason)?;
            worksheet.write_string(r, 2, &row.date)?;
            worksheet.write_number(r, 3, row.hours)?;
        }

        workbook.save(&self.path)?;
        tracing::info!(path = %self.path.display(), rows = rows.len(), "Entries exported");
        Ok(self.path.clone())
    }
}
