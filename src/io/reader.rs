use std::path::Path;

use image::{DynamicImage, ImageError, ImageReader};
use tracing::debug;

use crate::error::{Error, Result};

/// Open and decode one image, sniffing the format from its content.
///
/// I/O and decoding failures map to `Error::UnreadableFile`; formats the
/// decoder does not know map to `Error::UnsupportedFormat`.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let unreadable = |reason: String| Error::UnreadableFile {
        path: path.to_path_buf(),
        reason,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| unreadable(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| unreadable(e.to_string()))?;

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => Error::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
        other => unreadable(other.to_string()),
    })?;

    debug!(
        "Opened {:?}: {}x{} {:?}",
        path,
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img)
}
