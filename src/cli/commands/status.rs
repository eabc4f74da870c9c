//! Status command implementation
//!
//! This module implements the `status` command for displaying the totals
//! held by the database and the number of pincodes per cluster.

use crate::adapters::database::{ClusterCount, CoverageCounts, GeoStore};
use crate::adapters::postgresql::{PostgreSQLAdapter, PostgreSQLClient};
use crate::cli::{EXIT_CONFIG, EXIT_CONNECTION, EXIT_FATAL, EXIT_SUCCESS};
use crate::config::load_config_or_default;
use clap::Args;
use serde::Serialize;

/// Arguments for the status command
#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Snapshot printed by the status command
#[derive(Debug, Serialize)]
pub struct StatusReport {
    /// Database location with credentials redacted
    pub database: String,

    /// Table totals
    pub counts: CoverageCounts,

    /// Pincodes per cluster
    pub clusters: Vec<ClusterCount>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        tracing::info!("Checking database status");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(EXIT_CONFIG);
            }
        };

        let client = match PostgreSQLClient::new(config.postgresql.clone()).await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to create database client");
                println!("   Error: {}", e);
                return Ok(EXIT_CONFIG);
            }
        };
        let database = client.connection_string_safe();
        let store = PostgreSQLAdapter::new(client);

        if let Err(e) = store.test_connection().await {
            println!("❌ Failed to connect to database");
            println!("   Error: {}", e);
            return Ok(EXIT_CONNECTION);
        }

        let counts = match store.coverage_counts().await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to count records");
                println!("   Error: {}", e);
                println!("   Has the schema been created? Run 'pinload ingest' first.");
                return Ok(EXIT_FATAL);
            }
        };

        let clusters = match store.cluster_breakdown().await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load cluster breakdown");
                println!("   Error: {}", e);
                return Ok(EXIT_FATAL);
            }
        };

        let report = StatusReport {
            database,
            counts,
            clusters,
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_status(&report);
        }

        Ok(EXIT_SUCCESS)
    }
}

fn print_status(report: &StatusReport) {
    let count = |c: Option<u64>| c.map_or_else(|| "N/A".to_string(), |c| c.to_string());

    println!("📊 Database Status");
    println!();
    println!("  Database: {}", report.database);
    println!("  States:   {}", count(report.counts.states));
    println!("  Cities:   {}", count(report.counts.cities));
    println!("  Pincodes: {}", count(report.counts.pincodes));
    println!();

    if report.clusters.is_empty() {
        println!("No pincodes loaded yet.");
        println!("Run 'pinload ingest' to load the spreadsheet.");
        return;
    }

    println!("{:<30} {:>10}", "Cluster", "Pincodes");
    println!("{}", "-".repeat(41));
    for cluster in &report.clusters {
        println!("{:<30} {:>10}", cluster.cluster, cluster.pincodes);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_args_defaults() {
        let args = StatusArgs::default();
        assert!(!args.json);
    }

    #[test]
    fn test_status_report_json() {
        let report = StatusReport {
            database: "postgresql://***@localhost/geo".to_string(),
            counts: CoverageCounts::known(1, 2, 3),
            clusters: vec![ClusterCount {
                cluster: "A".to_string(),
                pincodes: 2,
            }],
        };

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"]["cities"], 2);
        assert_eq!(json["clusters"][0]["cluster"], "A");
        assert!(!json["database"].as_str().unwrap().contains("password"));
    }
}
