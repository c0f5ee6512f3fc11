//! High-level, ergonomic library API: batch-resize a directory, render a pixel
//! text line to an image, and flatten an image back to a pixel line. Prefer these
//! entrypoints over the low-level processing modules when integrating pixprep.
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::params::{RenderParams, ResizeParams};
use crate::core::processing::flatten::{flatten_image, format_pixel_row};
use crate::core::processing::grid::{PixelGrid, build_grid, parse_pixel_row};
use crate::core::processing::resize::{resize_image, zoom_gray_image};
use crate::core::processing::save::save_resized_image;
use crate::error::{Error, Result};
use crate::io::{open_image, read_pixel_line, write_image, write_pixel_line};
use crate::types::{FlattenMode, OutputPolicy, ResampleFilter};

/// One file of a batch that could not be resized
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub kind: &'static str,
    pub message: String,
}

impl FileFailure {
    fn new(path: PathBuf, error: &Error) -> Self {
        let kind = match error {
            Error::UnreadableFile { .. } => "unreadable_file",
            Error::UnsupportedFormat { .. } => "unsupported_format",
            Error::WriteFailure { .. } => "write_failure",
            Error::Resize(_) => "resize",
            _ => "other",
        };
        Self {
            path,
            kind,
            message: error.to_string(),
        }
    }
}

/// Batch processing report
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub outputs: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

fn scan_directory(input_dir: &Path, params: &ResizeParams) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut skipped = 0;

    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };

        if !path.is_file() || !params.matches_extension(&name) {
            debug!("Skipping non-image entry: {:?}", path);
            skipped += 1;
            continue;
        }
        if params.policy == OutputPolicy::Prefix
            && params.skip_prefixed
            && name.starts_with(&params.prefix)
        {
            debug!("Skipping already-prefixed file: {:?}", path);
            skipped += 1;
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok((files, skipped))
}

/// Return the recognized image files directly inside `input_dir`, sorted by path
pub fn iterate_image_files(input_dir: &Path, params: &ResizeParams) -> Result<Vec<PathBuf>> {
    scan_directory(input_dir, params).map(|(files, _)| files)
}

/// Resize a single image file according to `params`; returns the written path
pub fn resize_image_file(input: &Path, params: &ResizeParams) -> Result<PathBuf> {
    let img = open_image(input)?;
    let resized = resize_image(&img, params.width, params.height, params.filter)?;
    save_resized_image(&resized, input, params)
}

/// Resize every recognized image in `input_dir`.
///
/// A file that cannot be read, decoded, resized or written is recorded in the
/// report and the batch moves on; only a failure to list the directory itself
/// (or invalid parameters) is returned as an error.
pub fn resize_directory(input_dir: &Path, params: &ResizeParams) -> Result<BatchReport> {
    params.validate()?;
    if let (OutputPolicy::OutputDir, Some(dir)) = (params.policy, &params.output_dir) {
        std::fs::create_dir_all(dir)?;
    }

    info!("Starting batch resize in directory: {:?}", input_dir);
    info!(
        "Target size: {}x{}, policy: {}, filter: {}",
        params.width, params.height, params.policy, params.filter
    );

    let (files, skipped) = scan_directory(input_dir, params)?;
    let mut report = BatchReport {
        skipped,
        ..Default::default()
    };

    for path in files {
        info!("Processing {:?}", path);
        match resize_image_file(&path, params) {
            Ok(output) => {
                report.processed += 1;
                report.outputs.push(output);
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                report.failures.push(FileFailure::new(path, &e));
            }
        }
    }

    info!("Batch resize complete!");
    info!("Processed: {}", report.processed);
    info!("Skipped: {}", report.skipped);
    info!("Errors: {}", report.errors);
    Ok(report)
}

/// Build the pixel grid for one line of comma-separated intensities
pub fn pixel_grid_from_text(line: &str, params: &RenderParams) -> Result<PixelGrid> {
    let values = parse_pixel_row(line)?;
    build_grid(&values, params.range)
}

/// Render one line of comma-separated intensities to an in-memory grayscale image
pub fn render_pixel_text(line: &str, params: &RenderParams) -> Result<GrayImage> {
    let grid = pixel_grid_from_text(line, params)?;
    info!("Rendering {}x{} pixel grid", grid.side(), grid.side());
    zoom_gray_image(&grid.to_gray_image(), params.zoom)
}

/// Render the first line of the text file at `input`
pub fn render_pixel_file(input: &Path, params: &RenderParams) -> Result<GrayImage> {
    let line = read_pixel_line(input)?;
    render_pixel_text(&line, params)
}

/// Render the first line of `input` and save the image to `output`
pub fn render_pixel_file_to_path(
    input: &Path,
    output: &Path,
    params: &RenderParams,
) -> Result<GrayImage> {
    let img = render_pixel_file(input, params)?;
    write_image(output, &DynamicImage::ImageLuma8(img.clone()))?;
    info!("Rendered {:?} -> {:?}", input, output);
    Ok(img)
}

/// Flatten the image at `input` into normalized intensities
pub fn flatten_image_file(
    input: &Path,
    mode: FlattenMode,
    size: Option<u32>,
    filter: ResampleFilter,
) -> Result<Vec<f64>> {
    let img = open_image(input)?;
    flatten_image(&img, mode, size, filter)
}

/// Flatten the image at `input` and write it as one comma-separated line; returns the value count
pub fn flatten_image_file_to_path(
    input: &Path,
    output: &Path,
    mode: FlattenMode,
    size: Option<u32>,
    filter: ResampleFilter,
) -> Result<usize> {
    let values = flatten_image_file(input, mode, size, filter)?;
    write_pixel_line(output, &format_pixel_row(&values))?;
    info!("Flattened {:?} -> {:?} ({} values)", input, output, values.len());
    Ok(values.len())
}
