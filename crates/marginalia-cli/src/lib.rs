//! Marginalia CLI library.
//!
//! Runs the assist operations from the command line through the same action
//! boundary the server uses, and formats the outcome envelope.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::{Formatter, OutputFormat};
