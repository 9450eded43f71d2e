// ABOUTME: Gzip compression for finished dump files
// ABOUTME: Streams source into a .gz sibling at maximum compression, then removes the source

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Compresses `source` into `<source>.gz` and removes the original.
///
/// A stale archive at the target path is overwritten. On failure the
/// partial archive is cleaned up and the original stays where it was.
pub fn gzip_file(source: &Path) -> Result<PathBuf> {
    let mut archive_path = source.as_os_str().to_owned();
    archive_path.push(".gz");
    let archive_path = PathBuf::from(archive_path);

    tracing::info!(
        "Compressing {} to {}",
        source.display(),
        archive_path.display()
    );

    match write_archive(source, &archive_path) {
        Ok(()) => {}
        Err(e) => {
            let _ = fs::remove_file(&archive_path);
            return Err(e);
        }
    }

    fs::remove_file(source)
        .with_context(|| format!("Failed to remove {} after compression", source.display()))?;

    tracing::info!("✓ Compressed to {}", archive_path.display());
    Ok(archive_path)
}

fn write_archive(source: &Path, archive_path: &Path) -> Result<()> {
    let mut input = File::open(source)
        .with_context(|| format!("Failed to open {} for compression", source.display()))?;
    let output = File::create(archive_path)
        .with_context(|| format!("Failed to create archive at {}", archive_path.display()))?;

    let mut encoder = GzEncoder::new(output, Compression::best());
    io::copy(&mut input, &mut encoder)
        .with_context(|| format!("Failed to compress {}", source.display()))?;
    encoder
        .finish()
        .with_context(|| format!("Failed to finalize archive at {}", archive_path.display()))?;
    Ok(())
}
