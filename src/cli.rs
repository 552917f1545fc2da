//! CLI interface for the chunk ranker

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-chunk-ranker")]
#[command(about = "Select the resume chunks most relevant to a job")]
#[command(long_about = "Split a resume into bounded chunks, score them against the job's hard skills and action verbs, and print the best chunks in reading order")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select relevant chunks from a resume
    Select {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Requirements JSON from the job analysis step
        #[arg(short = 'q', long)]
        requirements: Option<PathBuf>,

        /// Hard skill to match (repeatable)
        #[arg(short = 'k', long = "skill")]
        skills: Vec<String>,

        /// Action verb to match (repeatable)
        #[arg(short = 'b', long = "verb")]
        verbs: Vec<String>,

        /// Minimum chunk length in characters
        #[arg(long)]
        min_chars: Option<usize>,

        /// Maximum chunk length in characters
        #[arg(long)]
        max_chars: Option<usize>,

        /// Maximum number of chunks to return
        #[arg(short = 'n', long)]
        max_selected: Option<usize>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Pick one chunk per section instead of ranking by keywords
        #[arg(long)]
        coverage: bool,

        /// Print full chunk text
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
