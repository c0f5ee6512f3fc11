use std::fs::File;
use std::io::BufWriter;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pixprep::api::{flatten_image_file_to_path, render_pixel_file_to_path, resize_directory};

use super::args::{CliArgs, Command, FlattenArgs, RenderArgs, ResizeArgs};
use super::errors::AppError;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_resize(args: &ResizeArgs) -> Result<bool, AppError> {
    let params = args.to_params()?;
    let report = resize_directory(&args.dir, &params)?;

    for failure in &report.failures {
        warn!("Failed [{}]: {:?}: {}", failure.kind, failure.path, failure.message);
    }

    if let Some(path) = &args.report {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        info!("Report written to {:?}", path);
    }

    Ok(report.is_success())
}

fn run_render(args: &RenderArgs) -> Result<bool, AppError> {
    let img = render_pixel_file_to_path(&args.input, &args.output, &args.to_params())?;
    info!(
        "Successfully rendered {}x{} image: {:?}",
        img.width(),
        img.height(),
        args.output
    );
    Ok(true)
}

fn run_flatten(args: &FlattenArgs) -> Result<bool, AppError> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("txt"));
    if output == args.input {
        return Err(AppError::MissingArgument {
            arg: "--output".to_string(),
        });
    }
    let count =
        flatten_image_file_to_path(&args.input, &output, args.mode, args.size, args.filter)?;
    info!("Successfully flattened {} values: {:?}", count, output);
    Ok(true)
}

/// Run the selected command; `Ok(false)` means some files in a batch failed
pub fn run(args: CliArgs) -> Result<bool, AppError> {
    init_logging(args.log);

    match &args.command {
        Command::Resize(resize) => run_resize(resize),
        Command::Render(render) => run_render(render),
        Command::Flatten(flatten) => run_flatten(flatten),
    }
}
