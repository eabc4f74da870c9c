//! Row extraction
//!
//! Maps configured column headers onto sheet positions and turns raw cells
//! into validated [`GeoRow`]s.

use crate::adapters::spreadsheet::SheetTable;
use crate::config::ColumnConfig;
use crate::domain::{
    CityName, ClusterLabel, Pincode, PinloadError, ReadError, Result, StateCode,
};

/// Column positions for one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    state_code: usize,
    state_name: Option<usize>,
    city: usize,
    pincode: usize,
    cluster: usize,
}

impl ColumnLayout {
    /// Locates the configured headers in a sheet
    ///
    /// The state name column is optional; every other column must be present.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::MissingColumn` naming the first absent column.
    pub fn resolve(table: &SheetTable, columns: &ColumnConfig) -> Result<Self> {
        let find = |header: &str| {
            table
                .column_index(header)
                .ok_or_else(|| ReadError::MissingColumn {
                    sheet: table.name().to_string(),
                    column: header.to_string(),
                })
        };

        let state_name = columns
            .state_name
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .and_then(|h| table.column_index(h));

        Ok(Self {
            state_code: find(&columns.state_code)?,
            state_name,
            city: find(&columns.city)?,
            pincode: find(&columns.pincode)?,
            cluster: find(&columns.cluster)?,
        })
    }

    /// Extracts one row
    ///
    /// Returns `Ok(None)` when every mapped cell is blank.
    ///
    /// # Errors
    ///
    /// Returns `PinloadError::Validation` when a required cell is blank or a
    /// value is malformed.
    pub fn extract(&self, cells: &[String]) -> Result<Option<GeoRow>> {
        let cell = |index: usize| SheetTable::cell(cells, index);

        let state_code = cell(self.state_code);
        let state_name = self.state_name.map(cell).unwrap_or("");
        let city = cell(self.city);
        let pincode = cell(self.pincode);
        let cluster = cell(self.cluster);

        let required = [
            ("state code", state_code),
            ("city", city),
            ("pincode", pincode),
            ("cluster", cluster),
        ];

        if required.iter().all(|(_, v)| v.trim().is_empty()) && state_name.trim().is_empty() {
            return Ok(None);
        }

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(PinloadError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        Ok(Some(GeoRow {
            state_code: StateCode::new(state_code).map_err(PinloadError::Validation)?,
            state_name: Some(state_name.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            city: CityName::new(city).map_err(PinloadError::Validation)?,
            pincode: Pincode::new(pincode).map_err(PinloadError::Validation)?,
            cluster: ClusterLabel::new(cluster).map_err(PinloadError::Validation)?,
        }))
    }

    /// Returns the raw pincode cell of a row, for error context
    pub fn raw_pincode<'a>(&self, cells: &'a [String]) -> Option<&'a str> {
        Some(SheetTable::cell(cells, self.pincode).trim()).filter(|p| !p.is_empty())
    }
}

/// A validated spreadsheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoRow {
    /// Normalized state code
    pub state_code: StateCode,

    /// State display name, if the sheet has one
    pub state_name: Option<String>,

    /// Normalized city name
    pub city: CityName,

    /// Pincode
    pub pincode: Pincode,

    /// Cluster label
    pub cluster: ClusterLabel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table(headers: &[&str]) -> SheetTable {
        SheetTable::new("North", strings(headers), Vec::new())
    }

    fn layout() -> ColumnLayout {
        ColumnLayout::resolve(
            &table(&["State", "State Name", "City", "Pincode", "Cluster"]),
            &ColumnConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_case_insensitive_headers() {
        let layout = ColumnLayout::resolve(
            &table(&["cluster", " PINCODE ", "city", "state"]),
            &ColumnConfig::default(),
        )
        .unwrap();

        assert_eq!(layout.cluster, 0);
        assert_eq!(layout.pincode, 1);
        assert_eq!(layout.state_code, 3);
        assert_eq!(layout.state_name, None);
    }

    #[test]
    fn test_resolve_missing_column() {
        let err = ColumnLayout::resolve(&table(&["State", "City", "Pincode"]), &ColumnConfig::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Read error: Sheet 'North' is missing required column 'Cluster'"
        );
    }

    #[test]
    fn test_extract_valid_row() {
        let row = layout()
            .extract(&strings(&[" mh ", "Maharashtra", "Pune", "411001", "A"]))
            .unwrap()
            .unwrap();

        assert_eq!(row.state_code.as_str(), "MH");
        assert_eq!(row.state_name.as_deref(), Some("Maharashtra"));
        assert_eq!(row.city.as_str(), "Pune");
        assert_eq!(row.pincode.as_str(), "411001");
        assert_eq!(row.cluster.as_str(), "A");
    }

    #[test]
    fn test_extract_blank_row() {
        assert!(layout().extract(&strings(&["", " ", "", "", ""])).unwrap().is_none());
        assert!(layout().extract(&[]).unwrap().is_none());
    }

    #[test]
    fn test_extract_blank_state_name_is_none() {
        let row = layout()
            .extract(&strings(&["MH", "", "Pune", "411001", "A"]))
            .unwrap()
            .unwrap();
        assert!(row.state_name.is_none());
    }

    #[test_case(&["MH", "", "Pune", "", "A"], "missing pincode" ; "blank pincode")]
    #[test_case(&["", "", "Pune", "411001", ""], "missing state code, cluster" ; "two blanks")]
    #[test_case(&["MH", "", "Pune", "41100A", "A"], "digits" ; "non numeric pincode")]
    #[test_case(&["M H", "", "Pune", "411001", "A"], "whitespace" ; "bad state code")]
    fn test_extract_invalid_row(cells: &[&str], expected: &str) {
        let err = layout().extract(&strings(cells)).unwrap_err();
        assert!(matches!(err, PinloadError::Validation(_)));
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_raw_pincode() {
        let layout = layout();
        assert_eq!(
            layout.raw_pincode(&strings(&["MH", "", "Pune", " 411001 ", "A"])),
            Some("411001")
        );
        assert_eq!(layout.raw_pincode(&strings(&["MH"])), None);
    }
}
