//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) for database summaries
//! and distributions, plus progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};
use std::time::Duration;
use tdbstats_core::{DatabaseSummary, Distribution};
use tracing::trace;

/// Trait for formatting output with specialized support for statistics
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a database summary
    fn format_summary(&self, summary: &DatabaseSummary) -> Result<String>;

    /// Format a distribution with the given column headers
    fn format_distribution<K>(&self, headers: [&str; 2], distribution: &Distribution<K>) -> Result<String>
    where
        K: Display + Serialize;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_summary(&self, summary: &DatabaseSummary) -> Result<String> {
        match self {
            OutputFormat::Human => {
                let rows = summary
                    .rows()
                    .into_iter()
                    .map(|(label, value)| vec![label.to_string(), value])
                    .collect();
                Ok(render_table(&["Statistic", "Value"], rows))
            }
            _ => self.format(summary),
        }
    }

    fn format_distribution<K>(&self, headers: [&str; 2], distribution: &Distribution<K>) -> Result<String>
    where
        K: Display + Serialize,
    {
        match self {
            OutputFormat::Human => {
                let rows = distribution
                    .iter()
                    .map(|(key, count)| vec![key.to_string(), count.to_string()])
                    .collect();
                Ok(render_table(&headers, rows))
            }
            _ => self.format(distribution),
        }
    }
}

/// Render rows as an aligned plain-text table
pub fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    // Calculate column widths
    let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let join_row = |cells: Vec<String>| cells.join(" │ ").trim_end().to_string();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(join_row(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect(),
    ));
    lines.push(
        widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─"),
    );
    for row in rows {
        lines.push(join_row(
            row.into_iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(&width) => format!("{:width$}", cell, width = width),
                    None => cell,
                })
                .collect(),
        ));
    }

    lines.join("\n")
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.emit(formatted)
    }

    /// Write a database summary
    pub fn summary(&mut self, summary: &DatabaseSummary) -> Result<()> {
        let formatted = self.format.format_summary(summary)?;
        self.emit(formatted)
    }

    /// Write a distribution
    pub fn distribution<K>(&mut self, headers: [&str; 2], distribution: &Distribution<K>) -> Result<()>
    where
        K: Display + Serialize,
    {
        let formatted = self.format.format_distribution(headers, distribution)?;
        self.emit(formatted)
    }

    fn emit(&mut self, formatted: String) -> Result<()> {
        // yaml already ends with a newline
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
