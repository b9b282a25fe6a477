//! Database initialization and schema loading.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::{debug, info};

/// DDL for the `invoices` and `invoice_items` tables.
pub const BUNDLED_SCHEMA: &str = include_str!("schema.sql");

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Initialize the SQLite database with the bundled schema and pragmas.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    init_db_with_schema(db_path, DEFAULT_MAX_CONNECTIONS, BUNDLED_SCHEMA).await
}

/// Initialize the SQLite database, applying the given DDL script.
pub async fn init_db_with_schema(
    db_path: &str,
    max_connections: u32,
    ddl: &str,
) -> Result<SqlitePool, sqlx::Error> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .after_connect(|conn, _meta| Box::pin(async move { configure_pragmas_conn(conn).await }))
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await?;

    run_schema_script(&pool, ddl).await?;

    info!(db_path, "Invoice database initialized");
    Ok(pool)
}

/// Execute a DDL script statement by statement.
///
/// Statements are separated by `;`. Blank fragments are skipped.
pub async fn run_schema_script(pool: &SqlitePool, ddl: &str) -> Result<(), sqlx::Error> {
    info!("Applying schema script...");

    let mut applied = 0usize;
    for statement in ddl.split(';') {
        let trimmed = statement.trim();
        if !trimmed.is_empty() {
            sqlx::query(trimmed).execute(pool).await?;
            applied += 1;
        }
    }

    info!(statements = applied, "Schema script applied");
    Ok(())
}

/// Foreign keys are enforced per connection, so this runs on every new one.
async fn configure_pragmas_conn(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    use sqlx::Row;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&mut *conn)
        .await?;

    // journal_mode returns the actual mode set; must use fetch to get result
    let row = sqlx::query("PRAGMA journal_mode = WAL")
        .fetch_one(&mut *conn)
        .await?;
    let journal_mode: String = row.get(0);
    debug!(journal_mode = %journal_mode, "SQLite journal_mode set");

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&mut *conn)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
