//! Output formatters for selection reports

use crate::config::OutputFormat;
use crate::error::{RankerError, Result};
use crate::output::report::{SelectionMode, SelectionReport};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting selection reports
pub trait OutputFormatter {
    fn format_report(&self, report: &SelectionReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for piping into prompt assembly
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn preview(text: &str, max_chars: usize) -> String {
        let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= max_chars {
            flat
        } else {
            let truncated: String = flat.chars().take(max_chars).collect();
            let cut = truncated.rfind(' ').unwrap_or(truncated.len());
            format!("{}...", &truncated[..cut])
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &SelectionReport) -> Result<String> {
        let selection = &report.selection;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME CHUNK SELECTION", 1));
        output.push_str(&format!("Source: {}\n", report.source));
        output.push_str(&format!(
            "Selected {} of {} chunks ({} chars) | mode: {:?}\n",
            selection.selected_count,
            selection.total_chunks,
            report.selected_chars(),
            report.mode
        ));
        output.push_str(&format!(
            "Bounds: {}..{} chars, cap {} | {} job keywords\n",
            report.settings.min_chars,
            report.settings.max_chars,
            report.settings.max_selected,
            report.keyword_count
        ));

        if !selection.matched_terms.is_empty() {
            let terms: Vec<&str> = selection.matched_terms.iter().map(String::as_str).collect();
            output.push_str(&format!(
                "Matched terms: {}\n",
                self.colorize(&terms.join(", "), Color::Cyan)
            ));
        }

        output.push_str(&self.format_header("Chunks", 2));
        for scored in &selection.chunks {
            let chunk = &scored.chunk;
            output.push_str(&format!(
                "#{} [{}] score {:.2} ({} chars)\n",
                chunk.order_index,
                self.colorize(chunk.source_section.as_str(), Color::Green),
                scored.score,
                chunk.char_length
            ));

            if self.detailed {
                for line in chunk.text.lines() {
                    output.push_str(&format!("    {}\n", line));
                }
                if !scored.matched_terms.is_empty() {
                    let terms: Vec<&str> = scored.matched_terms.iter().map(String::as_str).collect();
                    output.push_str(&format!(
                        "    {} {}\n",
                        self.colorize("matches:", Color::Yellow),
                        terms.join(", ")
                    ));
                }
            } else {
                output.push_str(&format!("    {}\n", Self::preview(&chunk.text, 100)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &SelectionReport) -> Result<String> {
        let payload = serde_json::json!({
            "source": report.source,
            "mode": report.mode,
            "settings": report.settings,
            "total_chunks": report.selection.total_chunks,
            "selected_count": report.selection.selected_count,
            "matched_terms": report.selection.matched_terms,
            "chunks": report.selection.selected_chunks(),
        });

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&payload)
        } else {
            serde_json::to_string(&payload)
        };
        rendered.map_err(|e| RankerError::OutputFormatting(format!("Failed to render JSON: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &SelectionReport) -> Result<String> {
        let selection = &report.selection;
        let mut output = String::from("# Selected Resume Chunks\n\n");

        if self.include_metadata {
            let mode = match report.mode {
                SelectionMode::Relevance => "relevance",
                SelectionMode::Coverage => "coverage",
            };
            output.push_str(&format!("- **Source:** {}\n", report.source));
            output.push_str(&format!("- **Mode:** {}\n", mode));
            output.push_str(&format!(
                "- **Selected:** {} of {} chunks\n",
                selection.selected_count, selection.total_chunks
            ));
            if !selection.matched_terms.is_empty() {
                let terms: Vec<String> = selection
                    .matched_terms
                    .iter()
                    .map(|term| format!("`{}`", term))
                    .collect();
                output.push_str(&format!("- **Matched terms:** {}\n", terms.join(", ")));
            }
            output.push('\n');
        }

        for scored in &selection.chunks {
            output.push_str(&format!(
                "## Chunk {} ({}, score {:.2})\n\n{}\n\n",
                scored.chunk.order_index,
                scored.chunk.source_section,
                scored.score,
                scored.chunk.text
            ));
        }

        Ok(output.trim_end().to_string() + "\n")
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &SelectionReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
