//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) for validation reports,
//! parsed rule expressions and the rule catalog.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use formcheck_core::{FieldError, RuleDefinition, RuleParam};
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Result of validating one record
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Where the record came from
    pub record: String,
    pub valid: bool,
    /// Number of field specs that were checked
    pub checked: usize,
    /// Whether a submission would proceed, when one was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<bool>,
    pub errors: Vec<FieldError>,
}

/// One rule token as understood by the parser
#[derive(Debug, Clone, Serialize)]
pub struct ParsedExpression {
    /// The token exactly as given
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    pub parameters: Vec<ParameterView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    /// Why the token was rejected, by the parser or by the registry check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedExpression {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A coerced rule parameter with its type spelled out
#[derive(Debug, Clone, Serialize)]
pub struct ParameterView {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: RuleParam,
}

impl From<&RuleParam> for ParameterView {
    fn from(param: &RuleParam) -> Self {
        Self {
            kind: param.type_name(),
            value: param.clone(),
        }
    }
}

/// Catalog entry for one rule
#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub name: String,
    pub parameter_count: usize,
    pub message: String,
}

impl From<&RuleDefinition> for RuleSummary {
    fn from(definition: &RuleDefinition) -> Self {
        Self {
            name: definition.name().to_string(),
            parameter_count: definition.parameter_count(),
            message: definition.message_template().to_string(),
        }
    }
}

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the outcome of validating a record
    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format parsed rule expressions
    fn format_parsed_expressions(&self, parsed: &[ParsedExpression]) -> Result<String>;
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

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_parsed_expressions(&self, parsed: &[ParsedExpression]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_parsed_expressions_human(parsed)),
            _ => self.format(&parsed),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Get verbosity level
    #[allow(dead_code)]
    pub fn verbosity(&self) -> u8 {
        self.verbose
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
        debug!("Output info: {}", message);

        if self.quiet {
            return Ok(());
        }

        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&format!("{} {}", "ℹ".blue(), message))
            } else {
                self.writeln(&format!("INFO: {}", message))
            }
        } else {
            Ok(())
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&message.green().to_string())
            } else {
                self.writeln(message)
            }
        } else {
            Ok(())
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&message.yellow().to_string())
            } else {
                self.writeln(&format!("WARNING: {}", message))
            }
        } else {
            Ok(())
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!("Outputting data: {} bytes", formatted.len());

        if self.format == OutputFormat::Human {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Write a validation report
    ///
    /// In quiet human mode only the failures are printed.
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        if self.format == OutputFormat::Human {
            if self.quiet && report.valid {
                return Ok(());
            }
            let formatted = format_validation_report_human(report);
            return if self.use_color {
                self.writeln(&colorize_report(&formatted, report.valid))
            } else {
                self.writeln(&formatted)
            };
        }

        let formatted = self.format.format_validation_report(report)?;
        self.writeln(&formatted)
    }

    /// Write parsed rule expressions
    pub fn parsed_expressions(&mut self, parsed: &[ParsedExpression]) -> Result<()> {
        let formatted = self.format.format_parsed_expressions(parsed)?;
        self.writeln(&formatted)
    }

    /// Write the rule catalog
    pub fn rules(&mut self, rules: &[RuleSummary]) -> Result<()> {
        if self.format != OutputFormat::Human {
            return self.data(&rules);
        }

        let rows = rules
            .iter()
            .map(|rule| {
                vec![
                    rule.name.clone(),
                    rule.parameter_count.to_string(),
                    rule.message.clone(),
                ]
            })
            .collect();
        self.table(&["Rule", "Parameters", "Message"], rows)
    }

    /// Write a table (for human format)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        // Calculate column widths
        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    if i < widths.len() {
                        format!("{:width$}", cell, width = widths[i])
                    } else {
                        cell.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }
}

fn colorize_report(formatted: &str, valid: bool) -> String {
    let mut lines = formatted.lines();
    let Some(headline) = lines.next() else {
        return String::new();
    };

    let headline = if valid {
        headline.green().bold().to_string()
    } else {
        headline.red().bold().to_string()
    };

    std::iter::once(headline)
        .chain(lines.map(str::to_string))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a validation report for human reading
fn format_validation_report_human(report: &ValidationReport) -> String {
    let mut output = String::new();

    if report.valid {
        output.push_str(&format!(
            "✅ {} is valid ({} field(s) checked)\n",
            report.record, report.checked
        ));
    } else {
        output.push_str(&format!(
            "❌ Validation Failed - {} Error(s)\n\n",
            report.errors.len()
        ));

        for (i, error) in report.errors.iter().enumerate() {
            output.push_str(&format!("{}. {}: {}\n", i + 1, error.field_name, error.message));
            output.push_str(&format!("   Rule: {}\n", error.rule_expression));
        }
    }

    match report.submitted {
        Some(true) => output.push_str("\n📨 Submission may proceed\n"),
        Some(false) => output.push_str("\n🚫 Submission blocked\n"),
        None => {}
    }

    output.trim_end().to_string()
}

/// Format parsed rule expressions for human reading
fn format_parsed_expressions_human(parsed: &[ParsedExpression]) -> String {
    let mut output = String::new();

    for (i, entry) in parsed.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        let display = if entry.expression.is_empty() {
            "(empty)"
        } else {
            entry.expression.as_str()
        };
        output.push_str(&format!("📝 {}\n", display));

        if let Some(rule) = &entry.rule_name {
            output.push_str(&format!("  Rule: {}\n", rule));
        }
        if !entry.parameters.is_empty() {
            let params = entry
                .parameters
                .iter()
                .map(|p| format!("{} ({})", p.value, p.kind))
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("  Parameters: {}\n", params));
        }
        if let Some(canonical) = &entry.canonical {
            output.push_str(&format!("  Canonical: {}\n", canonical));
        }
        if let Some(error) = &entry.error {
            output.push_str(&format!("  ❌ {}\n", error));
        }
    }

    output.trim_end().to_string()
}
