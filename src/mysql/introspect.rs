// ABOUTME: Read-only introspection queries against the WordPress database
// ABOUTME: Enumerates tables and reports per-table sizes and row counts

use crate::utils;
use anyhow::{Context, Result};
use mysql_async::{prelude::*, Conn};

/// List all base tables in a MySQL database
///
/// Queries INFORMATION_SCHEMA for user tables, excluding views. Returns
/// tables in alphabetical order.
///
/// # Arguments
///
/// * `conn` - MySQL connection
/// * `db_name` - Database to list tables from
///
/// # Examples
///
/// ```no_run
/// # use wp_light_db::mysql::{connect, introspect::list_tables};
/// # async fn example() -> anyhow::Result<()> {
/// let mut conn = connect("mysql://localhost:3306/wordpress").await?;
/// let tables = list_tables(&mut conn, "wordpress").await?;
/// println!("Found {} tables", tables.len());
/// # Ok(())
/// # }
/// ```
pub async fn list_tables(conn: &mut Conn, db_name: &str) -> Result<Vec<String>> {
    tracing::debug!("Listing tables from MySQL database '{}'", db_name);

    let query = r#"
        SELECT TABLE_NAME
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ?
        AND TABLE_TYPE = 'BASE TABLE'
        ORDER BY TABLE_NAME
    "#;

    let tables: Vec<String> = conn
        .exec(query, (db_name,))
        .await
        .with_context(|| format!("Failed to list tables from database '{}'", db_name))?;

    tracing::info!("Found {} table(s) in database '{}'", tables.len(), db_name);

    Ok(tables)
}

/// Get the on-disk size of a table in bytes
///
/// Sums `data_length + index_length` from the INFORMATION_SCHEMA metadata
/// catalog. A table the catalog does not know about reports 0 bytes.
pub async fn table_size(conn: &mut Conn, db_name: &str, table_name: &str) -> Result<u64> {
    tracing::debug!("Getting size for table '{}.{}'", db_name, table_name);

    // SUM collapses per-segment rows; CAST keeps the DECIMAL sum out of the
    // driver's type conversion.
    let query = r#"
        SELECT CAST(COALESCE(SUM(DATA_LENGTH + INDEX_LENGTH), 0) AS UNSIGNED)
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ?
        AND TABLE_NAME = ?
    "#;

    let size: Option<u64> = conn
        .exec_first(query, (db_name, table_name))
        .await
        .with_context(|| format!("Failed to query size for table '{}'", table_name))?;

    Ok(size.unwrap_or(0))
}

/// Get the row count for a table
///
/// Executes a direct COUNT(*) query against the table. Identifiers cannot be
/// bound as placeholders, so both names are validated before interpolation.
pub async fn table_row_count(conn: &mut Conn, db_name: &str, table_name: &str) -> Result<u64> {
    utils::validate_mysql_identifier(db_name).context("Invalid database name for count query")?;
    utils::validate_mysql_identifier(table_name).context("Invalid table name for count query")?;

    tracing::debug!("Getting row count for table '{}.{}'", db_name, table_name);

    // Backticks allow reserved words as identifiers
    let query = format!("SELECT COUNT(*) FROM `{}`.`{}`", db_name, table_name);

    let count: Option<u64> = conn
        .query_first(&query)
        .await
        .with_context(|| format!("Failed to count rows in table '{}'", table_name))?;

    Ok(count.unwrap_or(0))
}
