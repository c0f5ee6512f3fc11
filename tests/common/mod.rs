use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

pub fn write_rgb_png(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img).save(path).unwrap();
}

#[allow(dead_code)]
pub fn write_rgba_png(path: &Path, width: u32, height: u32) {
    let img = ImageBuffer::from_pixel(width, height, Rgba([10u8, 20, 30, 255]));
    DynamicImage::ImageRgba8(img).save(path).unwrap();
}

#[allow(dead_code)]
pub fn dimensions(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).unwrap()
}
