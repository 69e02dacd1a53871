use std::{fs, path::Path};

use crate::error::{Error, Result};

/// Fails with [`Error::MissingFile`] unless `path` exists.
pub(crate) fn ensure_file_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::MissingFile(path.to_path_buf()))
    }
}

/// Byte length from file metadata, without reading the contents.
pub(crate) fn file_size(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| Error::io(path, e))
}

/// Reads a required UTF-8 file, reporting a missing file distinctly.
pub(crate) fn read_required(path: &Path) -> Result<String> {
    ensure_file_exists(path)?;
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}
