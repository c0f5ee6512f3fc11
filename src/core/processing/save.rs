use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::info;

use crate::core::params::ResizeParams;
use crate::error::{Error, Result};
use crate::io::writers::write_image;
use crate::types::OutputPolicy;

/// Destination of the resized copy of `input` under `params.policy`.
pub fn output_path_for(input: &Path, params: &ResizeParams) -> Result<PathBuf> {
    let file_name = input.file_name().ok_or_else(|| Error::InvalidArgument {
        arg: "input",
        value: input.display().to_string(),
    })?;

    match params.policy {
        OutputPolicy::InPlace => Ok(input.to_path_buf()),
        OutputPolicy::Prefix => {
            let name = format!("{}{}", params.prefix, file_name.to_string_lossy());
            Ok(input.with_file_name(name))
        }
        OutputPolicy::OutputDir => {
            let dir = params
                .output_dir
                .as_ref()
                .ok_or_else(|| Error::InvalidArgument {
                    arg: "output_dir",
                    value: "none".to_string(),
                })?;
            Ok(dir.join(file_name))
        }
    }
}

/// Persist a resized image for `input` and return where it went.
///
/// In-place replacement writes to a temporary file first, so the original
/// survives a failed encode.
pub fn save_resized_image(
    img: &DynamicImage,
    input: &Path,
    params: &ResizeParams,
) -> Result<PathBuf> {
    let output = output_path_for(input, params)?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| Error::write_failure(&output, e))?;
        }
    }
    write_image(&output, img)?;
    info!(
        "Saved {}x{} image ({}): {:?}",
        img.width(),
        img.height(),
        params.policy,
        output
    );
    Ok(output)
}
