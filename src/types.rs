//! Shared types and enums used across pixprep.
//! Includes `OutputPolicy`, `ResampleFilter`, `RangePolicy` and `FlattenMode`.
use clap::ValueEnum;
use fast_image_resize::{FilterType, ResizeAlg};
use serde::{Deserialize, Serialize};

/// Where a resized image is written.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// New file next to the original, named `<prefix><name>`.
    Prefix,
    /// Replace the original under its own name.
    InPlace,
    /// Same name, written into a separate output directory.
    OutputDir,
}

impl std::fmt::Display for OutputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputPolicy::Prefix => write!(f, "prefix"),
            OutputPolicy::InPlace => write!(f, "in-place"),
            OutputPolicy::OutputDir => write!(f, "output-dir"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    Mitchell,
    Lanczos3,
}

impl ResampleFilter {
    pub fn resize_alg(self) -> ResizeAlg {
        match self {
            ResampleFilter::Nearest => ResizeAlg::Nearest,
            ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResampleFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResampleFilter::Mitchell => ResizeAlg::Convolution(FilterType::Mitchell),
            ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResampleFilter::Nearest => "Nearest",
            ResampleFilter::Bilinear => "Bilinear",
            ResampleFilter::CatmullRom => "CatmullRom",
            ResampleFilter::Mitchell => "Mitchell",
            ResampleFilter::Lanczos3 => "Lanczos3",
        };
        write!(f, "{}", s)
    }
}

/// How pixel values outside [0, 1] are treated when building a grid.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    Clamp,
    Reject,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlattenMode {
    /// One luma value per pixel.
    Gray,
    /// Red plane, then green, then blue.
    Rgb,
}

impl std::fmt::Display for FlattenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlattenMode::Gray => write!(f, "gray"),
            FlattenMode::Rgb => write!(f, "rgb"),
        }
    }
}
