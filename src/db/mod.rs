//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema loading
//! - SQLite pragma configuration
//! - Invoice and invoice item repositories

pub mod migrations;
pub mod repo;

pub use migrations::{init_db, init_db_with_schema, run_schema_script, BUNDLED_SCHEMA};
pub use repo::{
    InvoiceItemRepository, InvoiceRepository, Repositories, SqliteInvoiceItemRepository,
    SqliteInvoiceRepository,
};
