//! Square pixel grids reconstructed from a flat row of intensities.
//!
//! A row such as `0,1,0,1` holds `side * side` values in [0, 1], row-major.
//! Each value becomes `trunc(255 * v)` in an 8-bit grid that can be rendered
//! as a grayscale raster.
use image::{GrayImage, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::RangePolicy;

/// Square grid of 8-bit intensities, indexed `[row, col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    data: Array2<u8>,
}

impl PixelGrid {
    pub fn side(&self) -> usize {
        self.data.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.data.get([row, col]).copied()
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.data
    }

    pub fn into_array(self) -> Array2<u8> {
        self.data
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    pub fn to_gray_image(&self) -> GrayImage {
        let side = self.side() as u32;
        GrayImage::from_fn(side, side, |x, y| Luma([self.data[[y as usize, x as usize]]]))
    }
}

/// Split one line of comma-separated text into finite floats.
pub fn parse_pixel_row(line: &str) -> Result<Vec<f64>> {
    line.trim()
        .split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            match token.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(Error::Parse {
                    index,
                    token: token.to_string(),
                }),
            }
        })
        .collect()
}

/// Side length of the square grid holding `count` values.
pub fn grid_side(count: usize) -> Result<usize> {
    let side = count.isqrt();
    if side == 0 || side * side != count {
        return Err(Error::Shape { count });
    }
    Ok(side)
}

pub fn scale_intensity(value: f64, index: usize, range: RangePolicy) -> Result<u8> {
    let v = match range {
        RangePolicy::Clamp => value.clamp(0.0, 1.0),
        RangePolicy::Reject if (0.0..=1.0).contains(&value) => value,
        RangePolicy::Reject => return Err(Error::OutOfRange { index, value }),
    };
    Ok((255.0 * v) as u8)
}

pub fn build_grid(values: &[f64], range: RangePolicy) -> Result<PixelGrid> {
    let side = grid_side(values.len())?;
    debug!("Building {}x{} grid from {} values", side, side, values.len());

    let scaled = values
        .iter()
        .enumerate()
        .map(|(index, &v)| scale_intensity(v, index, range))
        .collect::<Result<Vec<u8>>>()?;

    let data = Array2::from_shape_vec((side, side), scaled)
        .map_err(|_| Error::Shape { count: values.len() })?;
    Ok(PixelGrid { data })
}
