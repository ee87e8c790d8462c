//! Parent image loading and reference image export

use image::{ImageFormat, RgbImage};
use std::path::Path;

use crate::io::error::{KinError, Parent, Result, file_system_error};
use crate::pipeline::decode_image;

/// Read and decode a parent image from disk
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read (`FileSystem`)
/// - The bytes are not a decodable image (`DecodeFailure` naming `parent`)
pub fn load_parent_image(path: &Path, parent: Parent) -> Result<RgbImage> {
    let bytes =
        std::fs::read(path).map_err(|source| file_system_error(path, "read image", source))?;
    decode_image(&bytes, parent)
}

/// Save an RGB image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .map_err(|source| file_system_error(dir, "create directory", source))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| KinError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}
