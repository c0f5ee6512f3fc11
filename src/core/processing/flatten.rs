use image::DynamicImage;
use tracing::debug;

use crate::core::processing::resize::resize_image;
use crate::error::Result;
use crate::types::{FlattenMode, ResampleFilter};

/// Flatten an image into normalized intensities (`pixel / 255`), row-major.
///
/// `FlattenMode::Rgb` emits three full planes back to back: red, green, blue.
/// When `size` is given the image is first resized to a `size`x`size` square.
pub fn flatten_image(
    img: &DynamicImage,
    mode: FlattenMode,
    size: Option<u32>,
    filter: ResampleFilter,
) -> Result<Vec<f64>> {
    let resized;
    let img = match size {
        Some(side) => {
            resized = resize_image(img, side, side, filter)?;
            &resized
        }
        None => img,
    };

    debug!(
        "Flattening {}x{} image ({})",
        img.width(),
        img.height(),
        mode
    );

    let values = match mode {
        FlattenMode::Gray => img
            .to_luma8()
            .as_raw()
            .iter()
            .map(|&p| f64::from(p) / 255.0)
            .collect(),
        FlattenMode::Rgb => {
            let rgb = img.to_rgb8();
            let mut values = Vec::with_capacity(rgb.as_raw().len());
            for channel in 0..3 {
                values.extend(rgb.pixels().map(|p| f64::from(p.0[channel]) / 255.0));
            }
            values
        }
    };
    Ok(values)
}

/// Join values into a single comma-separated line, without a trailing newline.
pub fn format_pixel_row(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
