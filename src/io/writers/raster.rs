use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tempfile::{Builder, NamedTempFile};
use tracing::debug;

use crate::error::{Error, Result};

/// Temporary file in `dir` created with the process umask applied, like a
/// plain `File::create`.
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".pixprep-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// Encode `img` to `output`, choosing the format from the file extension.
///
/// The image is written to a temporary file in the destination directory and
/// renamed over `output` only after encoding succeeded, so an existing file at
/// `output` is left untouched on failure. A replaced file keeps its permissions.
pub fn write_image(output: &Path, img: &DynamicImage) -> Result<()> {
    let format = ImageFormat::from_path(output).map_err(|e| Error::write_failure(output, e))?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = temp_file_in(parent).map_err(|e| Error::write_failure(output, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        img.write_to(&mut writer, format)
            .map_err(|e| Error::write_failure(output, e))?;
        writer.flush().map_err(|e| Error::write_failure(output, e))?;
    }
    if let Ok(existing) = fs::metadata(output) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::write_failure(output, e))?;
    }
    tmp.persist(output)
        .map_err(|e| Error::write_failure(output, e.error))?;

    debug!("Wrote {:?} as {:?}", output, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn unknown_extension_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        let err = write_image(&dir.path().join("out.unknown"), &img).unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
    }

    #[test]
    fn failed_encode_leaves_existing_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("keep.ico");
        std::fs::write(&target, b"original").unwrap();
        // the ICO encoder is not compiled in, so encoding fails after the temp file exists
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(4, 4));
        assert!(write_image(&target, &img).is_err());
        assert_eq!(std::fs::read(&target).unwrap(), b"original");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn replacing_a_file_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("g.png");
        std::fs::write(&target, b"old").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o640)).unwrap();

        let img = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
        write_image(&target, &img).unwrap();

        let mode = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn png_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("g.png");
        let img = DynamicImage::ImageLuma8(GrayImage::from_raw(2, 1, vec![7, 9]).unwrap());
        write_image(&target, &img).unwrap();
        let back = image::open(&target).unwrap().into_luma8();
        assert_eq!(back.as_raw(), &vec![7, 9]);
    }
}
