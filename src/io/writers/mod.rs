//! Output writers for encoded rasters.
pub mod raster;

pub use raster::write_image;
