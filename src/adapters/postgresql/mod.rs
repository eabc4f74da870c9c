//! PostgreSQL database integration
//!
//! This module provides integration with PostgreSQL for storing states,
//! cities and pincodes. The schema lives in `migrations/001_initial_schema.sql`.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
