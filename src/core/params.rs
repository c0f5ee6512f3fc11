use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{OutputPolicy, RangePolicy, ResampleFilter};

pub const DEFAULT_TARGET_SIZE: u32 = 64;
pub const DEFAULT_PREFIX: &str = "small_";

/// Batch resize parameters suitable for config files and CLI overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeParams {
    pub width: u32,
    pub height: u32,
    /// Recognized file suffixes, compared case-insensitively without the dot
    pub extensions: Vec<String>,
    pub policy: OutputPolicy,
    /// Name prefix used by `OutputPolicy::Prefix`
    pub prefix: String,
    /// Destination used by `OutputPolicy::OutputDir`
    pub output_dir: Option<PathBuf>,
    pub filter: ResampleFilter,
    /// In prefix mode, leave inputs that already carry the prefix alone
    pub skip_prefixed: bool,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_TARGET_SIZE,
            height: DEFAULT_TARGET_SIZE,
            extensions: vec!["png".to_string()],
            policy: OutputPolicy::Prefix,
            prefix: DEFAULT_PREFIX.to_string(),
            output_dir: None,
            filter: ResampleFilter::Lanczos3,
            skip_prefixed: true,
        }
    }
}

impl ResizeParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::ZeroSize { size: 0 });
        }
        if self.height == 0 {
            return Err(Error::ZeroSize { size: 0 });
        }
        if self.extensions.is_empty() {
            return Err(Error::InvalidArgument {
                arg: "extensions",
                value: "[]".to_string(),
            });
        }
        match self.policy {
            OutputPolicy::Prefix if self.prefix.is_empty() => Err(Error::InvalidArgument {
                arg: "prefix",
                value: String::new(),
            }),
            OutputPolicy::OutputDir if self.output_dir.is_none() => Err(Error::InvalidArgument {
                arg: "output_dir",
                value: "none".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// True if `name` ends in one of the recognized suffixes
    pub fn matches_extension(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        self.extensions.iter().any(|ext| {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            lower.len() > ext.len() + 1
                && lower.ends_with(&ext)
                && lower.as_bytes()[lower.len() - ext.len() - 1] == b'.'
        })
    }
}

/// Pixel-grid rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub range: RangePolicy,
    /// Integer upscale factor applied with nearest-neighbour sampling
    pub zoom: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            range: RangePolicy::Clamp,
            zoom: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        let params = ResizeParams::default();
        assert!(params.matches_extension("a.png"));
        assert!(params.matches_extension("B.PNG"));
        assert!(!params.matches_extension("apng"));
        assert!(!params.matches_extension(".png"));
        assert!(!params.matches_extension("a.jpg"));
    }

    #[test]
    fn extensions_accept_leading_dot() {
        let params = ResizeParams {
            extensions: vec![".jpg".to_string()],
            ..Default::default()
        };
        assert!(params.matches_extension("photo.JPG"));
    }

    #[test]
    fn output_dir_policy_requires_a_directory() {
        let params = ResizeParams {
            policy: OutputPolicy::OutputDir,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidArgument { arg: "output_dir", .. })
        ));
    }

    #[test]
    fn partial_json_config_keeps_defaults() {
        let params: ResizeParams =
            serde_json::from_str(r#"{ "width": 32, "policy": "in-place" }"#).unwrap();
        assert_eq!(params.width, 32);
        assert_eq!(params.height, DEFAULT_TARGET_SIZE);
        assert_eq!(params.policy, OutputPolicy::InPlace);
        assert_eq!(params.prefix, DEFAULT_PREFIX);
    }
}
