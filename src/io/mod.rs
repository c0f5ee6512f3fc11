//! I/O layer: decoding images from disk, reading and writing pixel text
//! lines, and `writers` for encoded raster outputs.
pub mod pixel_text;
pub mod reader;
pub mod writers;

pub use pixel_text::{read_pixel_line, write_pixel_line};
pub use reader::open_image;
pub use writers::write_image;
