//! Shared fixtures for integration tests

#![allow(dead_code)]

use pinload::adapters::memory::MemoryStore;
use pinload::config::PinloadConfig;
use pinload::core::ingest::{IngestCoordinator, IngestSummary};
use pinload::domain::Result;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::watch;

/// Default header row
pub const HEADERS: [&str; 4] = ["State", "City", "Pincode", "Cluster"];

/// Writes an xlsx workbook with one string-valued sheet per entry
pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// A sheet with the default headers followed by `rows`
pub fn sheet<'a>(rows: &[[&'a str; 4]]) -> Vec<Vec<&'a str>> {
    let mut all = vec![HEADERS.to_vec()];
    all.extend(rows.iter().map(|r| r.to_vec()));
    all
}

/// Temporary workspace holding an input workbook and a report path
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn input(&self) -> PathBuf {
        self.dir.path().join("pincodes_clusters.xlsx")
    }

    pub fn report(&self) -> PathBuf {
        self.dir.path().join("coverage_report.md")
    }

    pub fn write(&self, sheets: &[(&str, Vec<Vec<&str>>)]) {
        write_workbook(&self.input(), sheets);
    }

    /// Configuration pointing at this workspace
    pub fn config(&self) -> PinloadConfig {
        let mut config = PinloadConfig::default();
        config.input.file_path = self.input().display().to_string();
        config.report.path = self.report().display().to_string();
        config
    }
}

/// The two-sheet example: Pune twice in sheet 1, Mumbai in sheet 2
pub fn scenario_sheets() -> Vec<(&'static str, Vec<Vec<&'static str>>)> {
    vec![
        (
            "Sheet1",
            sheet(&[
                ["MH", "Pune", "411001", "A"],
                ["MH", "Pune", "411002", "A"],
            ]),
        ),
        ("Sheet2", sheet(&[["MH", "Mumbai", "400001", "B"]])),
    ]
}

/// Runs the pipeline against a memory store
pub async fn run(config: PinloadConfig, store: &Arc<MemoryStore>) -> Result<IngestSummary> {
    let (_tx, rx) = watch::channel(false);
    IngestCoordinator::new(config, rx)
        .with_store(store.clone())
        .execute()
        .await
}
