//! Spreadsheet input
//!
//! Loads workbook sheets into in-memory tables of string cells.

pub mod reader;
pub mod table;

pub use reader::{read_workbook, SpreadsheetReader, Workbook};
pub use table::SheetTable;
