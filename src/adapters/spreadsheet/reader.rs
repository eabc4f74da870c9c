//! Spreadsheet reader backed by calamine
//!
//! Opens any workbook format calamine detects from the file extension
//! (xlsx, xlsm, xlsb, xls, ods) and loads sheets into [`SheetTable`]s.

use super::table::SheetTable;
use crate::config::InputConfig;
use crate::domain::{ReadError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A workbook loaded into memory
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Source path
    pub path: PathBuf,

    /// SHA-256 of the file contents (hex)
    pub checksum: String,

    /// Loaded sheets in workbook order
    pub sheets: Vec<SheetTable>,
}

impl Workbook {
    /// Total data rows across all sheets
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(SheetTable::row_count).sum()
    }
}

/// Reads sheets from a workbook file
pub struct SpreadsheetReader {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
    header_row: usize,
}

impl SpreadsheetReader {
    /// Opens a workbook
    ///
    /// `header_row` is the 1-based row holding the column headers.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::OpenFailed` if the file is not a readable workbook.
    pub fn open(path: impl AsRef<Path>, header_row: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let workbook = open_workbook_auto(&path).map_err(|e| ReadError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path,
            workbook,
            header_row: header_row.max(1),
        })
    }

    /// Sheet names in workbook order
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Loads one sheet
    pub fn read_sheet(&mut self, name: &str) -> Result<SheetTable> {
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| ReadError::SheetFailed {
                sheet: name.to_string(),
                message: e.to_string(),
            })?;

        let table = range_to_table(name, &range, self.header_row);
        tracing::info!(
            sheet = %name,
            rows = table.row_count(),
            columns = table.headers().len(),
            "Loaded sheet"
        );
        Ok(table)
    }

    /// Loads every sheet, or only the sheets named in `filter`
    ///
    /// # Errors
    ///
    /// Returns `ReadError::NoSheets` for an empty workbook and
    /// `ReadError::SheetNotFound` when a filtered name does not exist.
    pub fn read_all(&mut self, filter: &[String]) -> Result<Vec<SheetTable>> {
        let names = self.sheet_names();
        if names.is_empty() {
            return Err(ReadError::NoSheets(self.path.display().to_string()).into());
        }

        let selected: Vec<String> = if filter.is_empty() {
            names
        } else {
            let mut selected = Vec::with_capacity(filter.len());
            for wanted in filter {
                let found = names
                    .iter()
                    .find(|n| n.trim().eq_ignore_ascii_case(wanted.trim()))
                    .ok_or_else(|| ReadError::SheetNotFound(wanted.clone()))?;
                selected.push(found.clone());
            }
            selected
        };

        tracing::debug!(sheets = ?selected, "Reading sheets");

        selected
            .iter()
            .map(|name| self.read_sheet(name))
            .collect()
    }
}

/// Opens the configured workbook and loads its sheets
pub fn read_workbook(path: impl AsRef<Path>, input: &InputConfig) -> Result<Workbook> {
    let path = path.as_ref();
    let checksum = file_checksum(path)?;

    let mut reader = SpreadsheetReader::open(path, input.header_row)?;
    let sheets = reader.read_all(&input.sheets)?;

    Ok(Workbook {
        path: path.to_path_buf(),
        checksum,
        sheets,
    })
}

/// Computes the SHA-256 of a file (hex)
pub fn file_checksum(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| ReadError::OpenFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

fn range_to_table(name: &str, range: &Range<Data>, header_row: usize) -> SheetTable {
    let (start_row, _) = range.start().unwrap_or((0, 0));
    let header_index = (header_row - 1) as u32;

    // The range begins at the first non-empty row; everything above the
    // header row is ignored.
    let Some(skip) = header_index.checked_sub(start_row) else {
        // Header row lies above the range: data starts at the range's first
        // row, i.e. right after 1-based row `start_row`.
        let rows = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect())
            .collect();
        return SheetTable::with_header_row(name, Vec::new(), rows, start_row as usize);
    };

    let mut rows = range.rows().skip(skip as usize);
    let headers = rows
        .next()
        .map(|r| r.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let data = rows
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();

    SheetTable::with_header_row(name, headers, data, header_row)
}

/// Normalizes a cell to text
///
/// Integral floats are printed without a fractional part so that numeric
/// pincodes survive (`411001.0` becomes `"411001"`).
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        _ => String::new(),
    }
}
