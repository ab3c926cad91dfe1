//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marginalia CLI - AI writing tools for notes.
#[derive(Debug, Parser)]
#[command(name = "marginalia")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MARGINALIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Plain text (default)
    Text,
    /// The JSON outcome envelope
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Continue the text in its own style
    Continue(TextArgs),

    /// Summarize the text in one or two sentences
    Summarize(TextArgs),

    /// Fix grammar and clarity, keeping the meaning
    Enhance(TextArgs),

    /// Translate the text
    Translate(TranslateArgs),

    /// Extract topics, ideas, action items, dates and entities
    Analyze(TextArgs),

    /// Rank notes by relevance to a query
    Search(SearchArgs),
}

/// Text input shared by the single-note commands.
#[derive(Debug, Parser)]
pub struct TextArgs {
    /// Input text; read from stdin when omitted
    pub text: Option<String>,
}

/// Arguments for the translate command.
#[derive(Debug, Parser)]
pub struct TranslateArgs {
    /// Target language (e.g., Spanish)
    #[arg(short, long)]
    pub to: String,

    /// Input text; read from stdin when omitted
    pub text: Option<String>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query text
    pub query: String,

    /// JSON file with notes (`[{"id","content"}]` or full notes)
    #[arg(short, long)]
    pub notes: PathBuf,
}
