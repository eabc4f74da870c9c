//! Ingestion coordinator - main orchestrator for a run
//!
//! One sequential pass: locate, read every sheet, open the store, resolve and
//! persist row by row, count, report.

use super::row::ColumnLayout;
use super::summary::IngestSummary;
use super::writer::PersistenceWriter;
use crate::adapters::database::{create_store, CoverageCounts, GeoStore};
use crate::adapters::spreadsheet::{read_workbook, SheetTable, Workbook};
use crate::config::{PinloadConfig, RowErrorPolicy};
use crate::core::locate::locate_input;
use crate::core::report::{check_destination, CoverageReport};
use crate::core::resolve::EntityResolver;
use crate::domain::{PinloadError, Result, RowErrorDetail};
use crate::{log_error_with_context, log_ingest_complete, log_ingest_start, log_sheet_processing};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Ingestion coordinator
pub struct IngestCoordinator {
    config: PinloadConfig,
    shutdown: watch::Receiver<bool>,
    store: Option<Arc<dyn GeoStore>>,
}

impl IngestCoordinator {
    /// Create a new coordinator
    ///
    /// The store is created from configuration when the run reaches the
    /// write stage, so a missing input file never opens a connection.
    pub fn new(config: PinloadConfig, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            config,
            shutdown,
            store: None,
        }
    }

    /// Use the given store instead of creating one from configuration
    pub fn with_store(mut self, store: Arc<dyn GeoStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Execute the run
    ///
    /// # Errors
    ///
    /// Returns `PinloadError::InputNotFound` before any other work if the
    /// input file is missing, and `PinloadError::Report` before any write if
    /// the report exists and overwrite is disabled. Read, connection and schema errors always halt
    /// the run; row errors halt it under the `abort` row policy. A halted
    /// run writes no report.
    pub async fn execute(&self) -> Result<IngestSummary> {
        let start_time = Instant::now();
        let dry_run = self.config.application.dry_run;
        let mut summary = IngestSummary {
            dry_run,
            ..IngestSummary::default()
        };

        log_ingest_start!(self.config.input.file_path, dry_run);

        let path = locate_input(&self.config.input.file_path)?;

        let input = self.config.input.clone();
        let workbook = tokio::task::spawn_blocking(move || read_workbook(&path, &input))
            .await
            .map_err(|e| PinloadError::Other(format!("Spreadsheet reader task failed: {e}")))??;

        tracing::info!(
            path = %workbook.path.display(),
            checksum = %workbook.checksum,
            sheets = workbook.sheets.len(),
            rows = workbook.total_rows(),
            "Workbook loaded"
        );
        summary.input_checksum = Some(workbook.checksum.clone());

        let sheets = self.plan_sheets(&workbook)?;
        if !dry_run {
            check_destination(&self.config.report.path, self.config.report.overwrite)?;
        }

        let store = self.open_store().await?;
        let writer = PersistenceWriter::new(store.as_ref(), self.config.ingest.duplicate_policy);
        let mut resolver = EntityResolver::new();

        let total = sheets.len();
        'sheets: for (position, (sheet, layout)) in sheets.into_iter().enumerate() {
            log_sheet_processing!(sheet.name(), position + 1, total, sheet.row_count());

            for (index, cells) in sheet.rows().iter().enumerate() {
                if *self.shutdown.borrow() {
                    tracing::warn!(
                        sheet = %sheet.name(),
                        row = sheet.row_number(index),
                        "Shutdown requested, stopping before next row"
                    );
                    summary.interrupted = true;
                    break 'sheets;
                }

                summary.rows_read += 1;

                let result = match layout.extract(cells) {
                    Ok(None) => {
                        summary.blank_rows += 1;
                        continue;
                    }
                    Ok(Some(row)) => writer.persist_row(&row, &mut resolver).await,
                    Err(e) => Err(e),
                };

                match result {
                    Ok(outcome) => summary.record_row(&outcome),
                    Err(error) => {
                        let mut detail =
                            RowErrorDetail::new(sheet.name(), sheet.row_number(index), error.to_string());
                        if let Some(pincode) = layout.raw_pincode(cells) {
                            detail = detail.with_pincode(pincode);
                        }
                        log_error_with_context!(error, detail.location());

                        if error.is_connection_error()
                            || self.config.ingest.on_row_error == RowErrorPolicy::Abort
                        {
                            return Err(error);
                        }
                        summary.record_failure(&detail, &error);
                    }
                }
            }

            summary.sheets_processed += 1;
        }

        if summary.interrupted {
            let summary = summary.with_duration(start_time.elapsed());
            summary.log_summary();
            return Ok(summary);
        }

        let counts = match store.coverage_counts().await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to count store totals, reporting N/A");
                CoverageCounts::unavailable()
            }
        };
        summary.coverage = Some(counts);

        let report = CoverageReport::new(counts);
        if dry_run {
            tracing::info!(
                path = %self.config.report.path,
                report = %report.render(),
                "DRY RUN: coverage report not written"
            );
        } else {
            let written = report.write(&self.config.report.path, self.config.report.overwrite)?;
            summary.report_path = Some(written);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        log_ingest_complete!(summary.rows_written(), summary.duration);

        Ok(summary)
    }

    /// Pairs each sheet with its column layout
    ///
    /// Sheets with neither headers nor data are skipped. Every other sheet
    /// must carry the required columns, checked before anything is written.
    fn plan_sheets<'w>(&self, workbook: &'w Workbook) -> Result<Vec<(&'w SheetTable, ColumnLayout)>> {
        let mut planned = Vec::with_capacity(workbook.sheets.len());
        for sheet in &workbook.sheets {
            if sheet.headers().is_empty() && sheet.is_empty() {
                tracing::warn!(sheet = %sheet.name(), "Skipping empty sheet");
                continue;
            }
            let layout = ColumnLayout::resolve(sheet, &self.config.input.columns)?;
            planned.push((sheet, layout));
        }
        Ok(planned)
    }

    async fn open_store(&self) -> Result<Arc<dyn GeoStore>> {
        let store = match &self.store {
            Some(store) => store.clone(),
            None => create_store(&self.config).await?,
        };

        store.test_connection().await?;
        if self.config.ingest.create_schema {
            store.ensure_schema().await?;
        }

        tracing::info!(store = store.store_name(), "Store ready");
        Ok(store)
    }
}
