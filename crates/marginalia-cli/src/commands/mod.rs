//! Command implementations.
//!
//! Every command runs one action and renders its outcome envelope.

pub mod search;

use crate::cli::Command;
use crate::error::{CliError, Result};
use crate::output::{Formatter, TextRender};
use marginalia_assist::Assistant;
use marginalia_domain::InferenceProvider;
use marginalia_llm::LlmError;
use marginalia_server::actions;
use marginalia_server::outcome::OperationOutcome;
use serde::Serialize;
use std::io::Read;

pub use self::search::load_candidates;

/// Rendered result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Formatted outcome
    pub output: String,
    /// Whether the outcome was a success
    pub success: bool,
}

impl Report {
    fn from_outcome<T>(outcome: &OperationOutcome<T>, formatter: &Formatter) -> Result<Self>
    where
        T: Serialize + TextRender,
    {
        Ok(Self {
            output: formatter.format_outcome(outcome)?,
            success: outcome.is_success(),
        })
    }
}

/// Take the text argument, or read all of `stdin` when it is absent.
pub fn read_input<R: Read>(text: Option<String>, mut stdin: R) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Execute one command.
pub async fn execute<P, R>(
    command: Command,
    assistant: &Assistant<P>,
    formatter: &Formatter,
    stdin: R,
) -> Result<Report>
where
    P: InferenceProvider<Error = LlmError>,
    R: Read,
{
    match command {
        Command::Continue(args) => {
            let text = read_input(args.text, stdin)?;
            Report::from_outcome(&actions::continue_action(assistant, &text).await, formatter)
        }
        Command::Summarize(args) => {
            let text = read_input(args.text, stdin)?;
            Report::from_outcome(&actions::summarize_action(assistant, &text).await, formatter)
        }
        Command::Enhance(args) => {
            let text = read_input(args.text, stdin)?;
            Report::from_outcome(&actions::enhance_action(assistant, &text).await, formatter)
        }
        Command::Translate(args) => {
            if args.to.trim().is_empty() {
                return Err(CliError::InvalidInput("--to must name a language".to_string()));
            }
            let text = read_input(args.text, stdin)?;
            let outcome = actions::translate_action(assistant, &text, &args.to).await;
            Report::from_outcome(&outcome, formatter)
        }
        Command::Analyze(args) => {
            let text = read_input(args.text, stdin)?;
            Report::from_outcome(&actions::analyze_action(assistant, &text).await, formatter)
        }
        Command::Search(args) => {
            let candidates = load_candidates(&args.notes)?;
            let outcome = actions::semantic_search_action(assistant, &args.query, candidates).await;
            Report::from_outcome(&outcome, formatter)
        }
    }
}
