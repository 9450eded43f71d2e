// ABOUTME: Orchestrates the two-pass light export into a single artifact
// ABOUTME: Schema-only segment first, data segment second, then optional gzip

use crate::compress;
use crate::export::dump::{DumpService, WriteMode};
use crate::filters::TablePartition;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

/// One export run: destination, table partition, and compression choice.
///
/// Created fresh per invocation; nothing persists across runs.
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub output: PathBuf,
    pub partition: TablePartition,
    pub compress: bool,
}

impl ExportJob {
    /// Runs the export and returns the final artifact path.
    ///
    /// The schema-only segment always lands before the data segment so the
    /// concatenated stream stays one valid dump. A dump failure aborts
    /// before compression and leaves any partial file untouched; a
    /// compression failure leaves the plain artifact in place.
    pub fn run(&self, dump: &dyn DumpService) -> Result<PathBuf> {
        if self.partition.filtered.is_empty() {
            // Nothing schema-only to write, but the data pass appends and
            // must start from an empty file.
            File::create(&self.output).with_context(|| {
                format!("Failed to create output file at {}", self.output.display())
            })?;
        } else {
            dump.export_schema_only(&self.partition.filtered, &self.output, WriteMode::Truncate)?;
        }

        if !self.partition.normal.is_empty() {
            dump.export_with_data(&self.partition.normal, &self.output, WriteMode::Append)?;
        }

        if !self.compress {
            return Ok(self.output.clone());
        }

        compress::gzip_file(&self.output).with_context(|| {
            format!(
                "Failed to compress the export; the uncompressed dump remains at {}",
                self.output.display()
            )
        })
    }
}
