//! Input manager for resume and requirement files

use crate::error::{RankerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::keywords::JobRequirements;
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a resume as plain text. Markdown is flattened; PDF is not handled here.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(RankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(RankerError::UnsupportedFormat(format!(
                    "Unsupported resume file type for: {} (expected .txt or .md)",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Read the requirement JSON produced by the job-analysis step.
    pub async fn load_requirements(&self, path: &Path) -> Result<JobRequirements> {
        if FileType::from_path(path) != FileType::Json {
            return Err(RankerError::UnsupportedFormat(format!(
                "Requirements must be a .json file: {}",
                path.display()
            )));
        }

        let content = tokio::fs::read_to_string(path).await?;
        let requirements = JobRequirements::from_json(&content)?;
        info!(
            "Loaded {} must-have and {} nice-to-have skills, {} action verbs and {} ATS keywords from {}",
            requirements.must_have_hard_skills.len(),
            requirements.nice_to_have_hard_skills.len(),
            requirements.action_verbs.len(),
            requirements.ats_keywords.len(),
            path.display()
        );
        Ok(requirements)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
