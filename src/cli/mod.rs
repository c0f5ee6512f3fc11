//! Command Line Interface (CLI) layer for pixprep.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the `resize`, `render` and
//! `flatten` commands. It wires user-provided options to the underlying
//! library functionality exposed via `pixprep::api`.
//!
//! If you are embedding pixprep into another application, prefer using
//! the high-level `pixprep::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
