use crate::error::{ReaderError, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (source.canonicalize(), destination.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Byte-for-byte copy of `source` to `destination`. Returns the number of
/// bytes written.
pub fn copy_document(source: &Path, destination: &Path) -> Result<u64> {
    if !source.is_file() {
        return Err(ReaderError::NotFound(source.to_path_buf()));
    }

    if is_same_file(source, destination) {
        return Ok(std::fs::metadata(source)?.len());
    }

    let mut reader = File::open(source)?;
    let mut writer = File::create(destination)?;
    let written = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.sync_all()?;

    log::info!(
        "Saved copy of {} to {} ({} bytes)",
        source.display(),
        destination.display(),
        written
    );
    Ok(written)
}
