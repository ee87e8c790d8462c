//! JSON files: landmark meshes in, child records out

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::io::error::{KinError, Result, file_system_error};

/// Read and deserialize a JSON file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `ConfigParse` if its
/// contents do not match `T`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| file_system_error(path, "read JSON", source))?;
    serde_json::from_str(&text).map_err(|source| KinError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty-printed JSON and write it to `path`
///
/// # Errors
///
/// Returns `RecordExport` if `value` cannot be encoded and `FileSystem` if
/// the directory or file cannot be written
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| KinError::RecordExport {
        path: path.to_path_buf(),
        source,
    })?;
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|source| file_system_error(dir, "create directory", source))?;
    }
    std::fs::write(path, text).map_err(|source| file_system_error(path, "write JSON", source))
}
