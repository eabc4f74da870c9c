//! In-memory sheet tables
//!
//! A [`SheetTable`] holds one sheet as rows of string cells under named
//! column headers. Cell values are normalized to strings by the reader, so
//! every later stage works on text.

/// One sheet loaded into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    first_data_row: usize,
}

impl SheetTable {
    /// Creates a table whose header sits on spreadsheet row 1
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self::with_header_row(name, headers, rows, 1)
    }

    /// Creates a table whose header sits on the given 1-based row
    pub fn with_header_row(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        header_row: usize,
    ) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
            first_data_row: header_row + 1,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column headers as they appear in the sheet
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows (header excluded)
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a column by header, ignoring case and surrounding whitespace
    pub fn column_index(&self, header: &str) -> Option<usize> {
        let wanted = header.trim().to_lowercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_lowercase() == wanted)
    }

    /// Converts a 0-based data row index into its 1-based spreadsheet row number
    pub fn row_number(&self, index: usize) -> usize {
        self.first_data_row + index
    }

    /// Returns a cell, or an empty string when the row is short
    pub fn cell<'a>(row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}
