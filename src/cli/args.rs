use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pixprep::{FlattenMode, OutputPolicy, RangePolicy, RenderParams, ResampleFilter, ResizeParams};

use super::errors::AppError;

#[derive(Parser)]
#[command(name = "pixprep", version, about = "pixprep CLI")]
pub struct CliArgs {
    /// Enable debug logging (otherwise RUST_LOG, default info)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resize every recognized image in a directory to a fixed size
    Resize(ResizeArgs),
    /// Render a line of comma-separated intensities as a square grayscale image
    Render(RenderArgs),
    /// Write an image's intensities as one line of comma-separated values
    Flatten(FlattenArgs),
}

#[derive(Args)]
pub struct ResizeArgs {
    /// Directory containing the images
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// JSON file with resize parameters; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output size. Options:
    /// - Square: any positive integer (e.g., 64)
    /// - Rectangle: WIDTHxHEIGHT (e.g., 64x48)
    #[arg(long)]
    pub size: Option<String>,

    /// Output width in pixels
    #[arg(long, conflicts_with = "size", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long, conflicts_with = "size", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Where resized images go (prefix, in-place or output-dir)
    #[arg(long, value_enum)]
    pub policy: Option<OutputPolicy>,

    /// Name prefix for the prefix policy
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output directory; implies --policy output-dir when no policy is given
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Recognized file extension (repeatable)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Resampling filter
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// Also resize files that already carry the prefix
    #[arg(long, default_value_t = false)]
    pub include_prefixed: bool,

    /// Write the batch report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Text file whose first line holds the pixel values
    #[arg(default_value = "a.txt")]
    pub input: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "a.png")]
    pub output: PathBuf,

    /// Handling of values outside [0, 1] (clamp or reject)
    #[arg(long, value_enum, default_value_t = RangePolicy::Clamp)]
    pub range: RangePolicy,

    /// Integer upscale factor for easier viewing
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub zoom: u32,
}

#[derive(Args)]
pub struct FlattenArgs {
    /// Image to flatten
    pub input: PathBuf,

    /// Output text file (defaults to the input path with a .txt extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gray (one value per pixel) or rgb (three planes)
    #[arg(long, value_enum, default_value_t = FlattenMode::Gray)]
    pub mode: FlattenMode,

    /// Resize to a SIZExSIZE square before flattening
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub size: Option<u32>,

    /// Resampling filter used with --size
    #[arg(long, value_enum, default_value_t = ResampleFilter::Lanczos3)]
    pub filter: ResampleFilter,
}

/// Parse `64` or `64x48` into (width, height)
pub fn parse_size(size: &str) -> Result<(u32, u32), AppError> {
    let invalid = || AppError::InvalidSize {
        size: size.to_string(),
    };
    let parse = |s: &str| s.trim().parse::<u32>().map_err(|_| invalid());

    let (width, height) = match size.split_once(['x', 'X']) {
        Some((w, h)) => (parse(w)?, parse(h)?),
        None => {
            let side = parse(size)?;
            (side, side)
        }
    };

    if width == 0 || height == 0 {
        return Err(AppError::ZeroSize {
            size: size.to_string(),
        });
    }
    Ok((width, height))
}

impl ResizeArgs {
    /// Merge the optional config file with command-line overrides
    pub fn to_params(&self) -> Result<ResizeParams, AppError> {
        let mut params = match &self.config {
            Some(path) => ResizeParams::from_json_file(path)?,
            None => ResizeParams::default(),
        };

        if let Some(size) = &self.size {
            (params.width, params.height) = parse_size(size)?;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(prefix) = &self.prefix {
            params.prefix = prefix.clone();
        }
        if let Some(dir) = &self.output_dir {
            params.output_dir = Some(dir.clone());
            if self.policy.is_none() {
                params.policy = OutputPolicy::OutputDir;
            }
        }
        if let Some(policy) = self.policy {
            params.policy = policy;
        }
        if !self.extensions.is_empty() {
            params.extensions = self.extensions.clone();
        }
        if let Some(filter) = self.filter {
            params.filter = filter;
        }
        if self.include_prefixed {
            params.skip_prefixed = false;
        }

        if params.policy == OutputPolicy::OutputDir && params.output_dir.is_none() {
            return Err(AppError::MissingArgument {
                arg: "--output-dir".to_string(),
            });
        }
        Ok(params)
    }
}

impl RenderArgs {
    pub fn to_params(&self) -> RenderParams {
        RenderParams {
            range: self.range,
            zoom: self.zoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resize_args(argv: &[&str]) -> ResizeArgs {
        let mut full = vec!["pixprep", "resize"];
        full.extend_from_slice(argv);
        match CliArgs::try_parse_from(full).unwrap().command {
            Command::Resize(args) => args,
            _ => panic!("expected resize command"),
        }
    }

    #[test]
    fn size_accepts_square_and_rectangle() {
        assert_eq!(parse_size("64").unwrap(), (64, 64));
        assert_eq!(parse_size("32x48").unwrap(), (32, 48));
        assert!(matches!(parse_size("0"), Err(AppError::ZeroSize { .. })));
        assert!(matches!(parse_size("big"), Err(AppError::InvalidSize { .. })));
        assert!(matches!(parse_size("32x"), Err(AppError::InvalidSize { .. })));
    }

    #[test]
    fn bare_directory_uses_defaults() {
        let params = resize_args(&["imgs"]).to_params().unwrap();
        assert_eq!(params, ResizeParams::default());
    }

    #[test]
    fn output_dir_implies_policy() {
        let params = resize_args(&["imgs", "--output-dir", "out"])
            .to_params()
            .unwrap();
        assert_eq!(params.policy, OutputPolicy::OutputDir);
        assert_eq!(params.output_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn output_dir_policy_without_directory_is_rejected() {
        let err = resize_args(&["--policy", "output-dir"]).to_params().unwrap_err();
        assert!(matches!(err, AppError::MissingArgument { .. }));
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("resize.json");
        std::fs::write(&config, r#"{ "width": 28, "height": 28, "policy": "in-place" }"#).unwrap();

        let params = resize_args(&[
            "--config",
            config.to_str().unwrap(),
            "--height",
            "32",
            "--ext",
            "jpg",
        ])
        .to_params()
        .unwrap();
        assert_eq!((params.width, params.height), (28, 32));
        assert_eq!(params.policy, OutputPolicy::InPlace);
        assert_eq!(params.extensions, vec!["jpg".to_string()]);
    }

    #[test]
    fn render_defaults_match_script_paths() {
        let args = CliArgs::try_parse_from(["pixprep", "render"]).unwrap();
        match args.command {
            Command::Render(r) => {
                assert_eq!(r.input, PathBuf::from("a.txt"));
                assert_eq!(r.output, PathBuf::from("a.png"));
                assert_eq!(r.to_params(), RenderParams::default());
            }
            _ => panic!("expected render command"),
        }
    }
}
