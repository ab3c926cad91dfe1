//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use marginalia_domain::AnalysisResult;
use marginalia_server::outcome::OperationOutcome;
use serde::{Deserialize, Serialize};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// The outcome envelope as JSON
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// Values that have a plain-text rendering.
pub trait TextRender {
    /// Render for a terminal
    fn render(&self, formatter: &Formatter) -> String;
}

impl TextRender for String {
    fn render(&self, _formatter: &Formatter) -> String {
        self.clone()
    }
}

impl TextRender for Vec<String> {
    fn render(&self, formatter: &Formatter) -> String {
        if self.is_empty() {
            return formatter.warning("No relevant notes found.");
        }
        self.iter()
            .enumerate()
            .map(|(rank, id)| format!("{}. {}", rank + 1, id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextRender for AnalysisResult {
    fn render(&self, formatter: &Formatter) -> String {
        let sections = [
            ("Key topics", &self.key_topics),
            ("Main ideas", &self.main_ideas),
            ("Action items", &self.action_items),
            ("Dates", &self.dates),
            ("Entities", &self.entities),
        ];

        let mut out = Vec::new();
        for (heading, items) in sections {
            out.push(formatter.heading(heading));
            if items.is_empty() {
                out.push("  (none)".to_string());
            }
            out.extend(items.iter().map(|item| format!("  - {}", item)));
        }
        out.join("\n")
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an outcome envelope.
    pub fn format_outcome<T>(&self, outcome: &OperationOutcome<T>) -> Result<String>
    where
        T: Serialize + TextRender,
    {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
            OutputFormat::Text => Ok(match outcome {
                OperationOutcome::Success { data, .. } => data.render(self),
                OperationOutcome::Failure { message, kind } => {
                    self.error(&format!("{} ({:?})", message, kind))
                }
            }),
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Format a section heading.
    pub fn heading(&self, text: &str) -> String {
        self.colorize(&format!("{}:", text), "cyan")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
