// ABOUTME: Aggregates size and row statistics for filtered tables
// ABOUTME: Reports how much data a light export leaves out

use crate::mysql::introspect;
use anyhow::Result;
use mysql_async::Conn;

/// Byte and row totals for the tables exported without data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilteredStats {
    /// On-disk bytes (data + indexes) across the filtered tables.
    pub total_bytes: u64,
    /// Row count across the filtered tables.
    pub total_rows: u64,
}

/// Sum per-table size and row-count statistics for the filtered partition
///
/// Issues two sequential queries per table and adds up the results. An empty
/// partition yields zero totals. The numbers are informational (they feed a
/// single log line), but any query failure aborts the whole export: partial
/// statistics are never reported.
///
/// # Arguments
///
/// * `conn` - MySQL connection
/// * `database` - Database the tables live in
/// * `filtered` - Tables whose data the export leaves out
pub async fn aggregate(
    conn: &mut Conn,
    database: &str,
    filtered: &[String],
) -> Result<FilteredStats> {
    let mut stats = FilteredStats::default();

    for table in filtered {
        stats.total_bytes += introspect::table_size(conn, database, table).await?;
        stats.total_rows += introspect::table_row_count(conn, database, table).await?;
    }

    Ok(stats)
}

/// Format bytes into a human-readable string
///
/// Converts a byte count into appropriate units (B, KB, MB, GB, TB) with one
/// decimal place of precision.
///
/// # Examples
///
/// ```
/// # use wp_light_db::stats::format_bytes;
/// assert_eq!(format_bytes(1024), "1.0 KB");
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// assert_eq!(format_bytes(1073741824), "1.0 GB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.1} {}", size, UNITS[unit_idx])
}
