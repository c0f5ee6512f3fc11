use fast_image_resize::{PixelType, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, GrayImage, ImageBuffer, Pixel};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::ResampleFilter;

pub fn resize_u8_image(
    data: &[u8],
    pixel_type: PixelType,
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
    filter: ResampleFilter,
) -> Result<Vec<u8>> {
    let resize_options = ResizeOptions::new().resize_alg(filter.resize_alg());
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(original_cols, original_rows, data.to_vec(), pixel_type)
        .map_err(Error::resize)?;
    let mut dst_image = Image::new(target_cols, target_rows, pixel_type);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::resize)?;

    Ok(dst_image.into_vec())
}

pub fn resize_u16_image(
    data: &[u16],
    pixel_type: PixelType,
    original_cols: u32,
    original_rows: u32,
    target_cols: u32,
    target_rows: u32,
    filter: ResampleFilter,
) -> Result<Vec<u16>> {
    // fast_image_resize takes 16-bit samples as native-endian bytes
    let mut src_bytes = Vec::with_capacity(data.len() * 2);
    for &v in data {
        src_bytes.extend_from_slice(&v.to_ne_bytes());
    }

    let dst_bytes = resize_u8_image(
        &src_bytes,
        pixel_type,
        original_cols,
        original_rows,
        target_cols,
        target_rows,
        filter,
    )?;

    let mut out = Vec::with_capacity(dst_bytes.len() / 2);
    for chunk in dst_bytes.chunks_exact(2) {
        out.push(u16::from_ne_bytes([chunk[0], chunk[1]]));
    }
    Ok(out)
}

fn rebuild<P: Pixel>(
    width: u32,
    height: u32,
    data: Vec<P::Subpixel>,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>> {
    ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| Error::Resize(format!("resized buffer does not match {}x{}", width, height)))
}

/// Resize `img` to exactly `width`x`height`, keeping its pixel format.
///
/// 8- and 16-bit gray, gray+alpha, RGB and RGBA are resized natively; any
/// other layout (e.g. 32-bit float) is converted to RGBA8 first. An image that
/// already has the requested dimensions is returned unchanged.
pub fn resize_image(
    img: &DynamicImage,
    width: u32,
    height: u32,
    filter: ResampleFilter,
) -> Result<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(Error::ZeroSize {
            size: width.min(height) as usize,
        });
    }

    let (cols, rows) = (img.width(), img.height());
    if cols == width && rows == height {
        debug!("Image already {}x{}, skipping resample", width, height);
        return Ok(img.clone());
    }

    info!(
        "Original size: {}x{}, New size: {}x{} ({})",
        cols, rows, width, height, filter
    );

    let resized = match img {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(rebuild(
            width,
            height,
            resize_u8_image(buf.as_raw(), PixelType::U8, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(rebuild(
            width,
            height,
            resize_u8_image(buf.as_raw(), PixelType::U8x2, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(rebuild(
            width,
            height,
            resize_u8_image(buf.as_raw(), PixelType::U8x3, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(rebuild(
            width,
            height,
            resize_u8_image(buf.as_raw(), PixelType::U8x4, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(rebuild(
            width,
            height,
            resize_u16_image(buf.as_raw(), PixelType::U16, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageLumaA16(buf) => DynamicImage::ImageLumaA16(rebuild(
            width,
            height,
            resize_u16_image(buf.as_raw(), PixelType::U16x2, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(rebuild(
            width,
            height,
            resize_u16_image(buf.as_raw(), PixelType::U16x3, cols, rows, width, height, filter)?,
        )?),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(rebuild(
            width,
            height,
            resize_u16_image(buf.as_raw(), PixelType::U16x4, cols, rows, width, height, filter)?,
        )?),
        other => {
            debug!("Converting {:?} to RGBA8 before resizing", other.color());
            let rgba = DynamicImage::ImageRgba8(other.to_rgba8());
            return resize_image(&rgba, width, height, filter);
        }
    };

    Ok(resized)
}

/// Largest zoomed raster, in pixels.
pub const MAX_ZOOM_PIXELS: u64 = 1 << 28;

/// Upscale a grayscale image by an integer factor with nearest-neighbour sampling.
pub fn zoom_gray_image(img: &GrayImage, zoom: u32) -> Result<GrayImage> {
    if zoom == 0 {
        return Err(Error::ZeroSize { size: 0 });
    }
    if zoom == 1 {
        return Ok(img.clone());
    }
    let (cols, rows) = img.dimensions();
    let too_large = || Error::InvalidArgument {
        arg: "zoom",
        value: zoom.to_string(),
    };
    let new_cols = cols.checked_mul(zoom).ok_or_else(too_large)?;
    let new_rows = rows.checked_mul(zoom).ok_or_else(too_large)?;
    if u64::from(new_cols) * u64::from(new_rows) > MAX_ZOOM_PIXELS {
        return Err(too_large());
    }
    let data = resize_u8_image(
        img.as_raw(),
        PixelType::U8,
        cols,
        rows,
        new_cols,
        new_rows,
        ResampleFilter::Nearest,
    )?;
    rebuild(new_cols, new_rows, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, Rgba};

    fn gradient_rgb(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 3) as u8, (y * 2) as u8, 128])
        }))
    }

    #[test]
    fn downscale_hits_exact_target_dimensions() {
        let img = gradient_rgb(80, 50);
        let out = resize_image(&img, 64, 64, ResampleFilter::Lanczos3).unwrap();
        assert_eq!((out.width(), out.height()), (64, 64));
        assert!(matches!(out, DynamicImage::ImageRgb8(_)));
    }

    #[test]
    fn same_size_is_returned_unchanged() {
        let img = gradient_rgb(64, 64);
        let out = resize_image(&img, 64, 64, ResampleFilter::Lanczos3).unwrap();
        assert_eq!(out.as_bytes(), img.as_bytes());
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(100, 100, Luma([200])));
        let out = resize_image(&img, 64, 64, ResampleFilter::Lanczos3)
            .unwrap()
            .into_luma8();
        assert!(out.pixels().all(|p| p.0[0].abs_diff(200) <= 1));
    }

    #[test]
    fn sixteen_bit_gray_keeps_depth() {
        let img = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(32, 32, Luma([40_000u16])));
        let out = resize_image(&img, 16, 16, ResampleFilter::Lanczos3).unwrap();
        match out {
            DynamicImage::ImageLuma16(buf) => {
                assert_eq!(buf.dimensions(), (16, 16));
                assert!(buf.pixels().all(|p| p.0[0].abs_diff(40_000) <= 2));
            }
            other => panic!("unexpected layout {:?}", other.color()),
        }
    }

    #[test]
    fn float_images_are_converted_to_rgba8() {
        let img = DynamicImage::ImageRgba32F(ImageBuffer::from_pixel(
            10,
            10,
            Rgba([1.0f32, 0.0, 0.0, 1.0]),
        ));
        let out = resize_image(&img, 5, 5, ResampleFilter::Bilinear).unwrap();
        assert!(matches!(out, DynamicImage::ImageRgba8(_)));
        assert_eq!((out.width(), out.height()), (5, 5));
    }

    #[test]
    fn zero_target_is_rejected() {
        let img = gradient_rgb(8, 8);
        assert!(matches!(
            resize_image(&img, 0, 8, ResampleFilter::Nearest),
            Err(Error::ZeroSize { .. })
        ));
    }

    #[test]
    fn oversized_zoom_is_rejected() {
        let img = GrayImage::from_raw(2, 2, vec![0, 255, 0, 255]).unwrap();
        for zoom in [u32::MAX / 2 + 1, u32::MAX, 1 << 20] {
            assert!(matches!(
                zoom_gray_image(&img, zoom),
                Err(Error::InvalidArgument { arg: "zoom", .. })
            ));
        }
    }

    #[test]
    fn zoom_replicates_pixels_in_blocks() {
        let img = GrayImage::from_raw(2, 1, vec![0, 255]).unwrap();
        let out = zoom_gray_image(&img, 4).unwrap();
        assert_eq!(out.dimensions(), (8, 4));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(out.get_pixel(x, y).0[0], 0);
                assert_eq!(out.get_pixel(x + 4, y).0[0], 255);
            }
        }
    }
}
