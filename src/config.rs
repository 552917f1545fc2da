//! Configuration management for the chunk ranker

use crate::error::{RankerError, Result};
use crate::processing::sections::SectionLabel;
use crate::processing::{chunker, selector};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub chunking: ChunkingConfig,
    pub scoring: ScoringWeights,
    pub output: OutputConfig,
}

/// Chunk size bounds and the selection cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub min_chars: usize,
    pub max_chars: usize,
    pub max_selected: usize,
}

/// Weights applied by the relevance scorer.
///
/// Must-have skills weigh more than nice-to-have skills, which weigh more than
/// action verbs. The defaults keep must-have to verb at 2:1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Per must-have hard skill.
    pub skill_weight: f32,
    #[serde(default = "default_nice_to_have_weight")]
    pub nice_to_have_weight: f32,
    pub verb_weight: f32,
    /// Per generic job keyword.
    #[serde(default = "default_ats_keyword_weight")]
    pub ats_keyword_weight: f32,
    pub section_bonuses: SectionBonuses,
}

/// Additive bonus per section label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionBonuses {
    pub header: f32,
    pub professional_summary: f32,
    pub experience: f32,
    pub skills: f32,
    pub projects: f32,
    pub education: f32,
    pub certifications: f32,
    pub languages: f32,
    pub other: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_chars: 260,
            max_chars: 1100,
            max_selected: 6,
        }
    }
}

impl ChunkingConfig {
    pub fn new(min_chars: usize, max_chars: usize, max_selected: usize) -> Self {
        Self {
            min_chars,
            max_chars,
            max_selected,
        }
    }

    pub fn validate(&self) -> Result<()> {
        chunker::check_bounds(self.min_chars, self.max_chars)?;
        selector::check_max_selected(self.max_selected)
    }
}

impl Default for SectionBonuses {
    fn default() -> Self {
        Self {
            header: 0.5,
            professional_summary: 1.5,
            experience: 2.0,
            skills: 1.5,
            projects: 1.0,
            education: 0.5,
            certifications: 0.5,
            languages: 0.5,
            other: 0.0,
        }
    }
}

impl SectionBonuses {
    /// No bonus for any section; ranking is driven by keyword matches alone.
    pub fn none() -> Self {
        Self {
            header: 0.0,
            professional_summary: 0.0,
            experience: 0.0,
            skills: 0.0,
            projects: 0.0,
            education: 0.0,
            certifications: 0.0,
            languages: 0.0,
            other: 0.0,
        }
    }

    pub fn bonus_for(&self, label: SectionLabel) -> f32 {
        match label {
            SectionLabel::Header => self.header,
            SectionLabel::ProfessionalSummary => self.professional_summary,
            SectionLabel::Experience => self.experience,
            SectionLabel::Skills => self.skills,
            SectionLabel::Projects => self.projects,
            SectionLabel::Education => self.education,
            SectionLabel::Certifications => self.certifications,
            SectionLabel::Languages => self.languages,
            SectionLabel::Other => self.other,
        }
    }

    fn values(&self) -> [(SectionLabel, f32); 9] {
        SectionLabel::ALL.map(|label| (label, self.bonus_for(label)))
    }
}

fn default_nice_to_have_weight() -> f32 {
    1.5
}

fn default_ats_keyword_weight() -> f32 {
    0.5
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_weight: 2.0,
            nice_to_have_weight: default_nice_to_have_weight(),
            verb_weight: 1.0,
            ats_keyword_weight: default_ats_keyword_weight(),
            section_bonuses: SectionBonuses::default(),
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("skill_weight", self.skill_weight),
            ("nice_to_have_weight", self.nice_to_have_weight),
            ("verb_weight", self.verb_weight),
            ("ats_keyword_weight", self.ats_keyword_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(RankerError::InvalidConfig(format!(
                    "{} must be a non-negative number (got {})",
                    name, value
                )));
            }
        }
        if self.skill_weight <= self.nice_to_have_weight {
            return Err(RankerError::InvalidConfig(format!(
                "skill_weight ({}) must be greater than nice_to_have_weight ({})",
                self.skill_weight, self.nice_to_have_weight
            )));
        }
        if self.nice_to_have_weight <= self.verb_weight {
            return Err(RankerError::InvalidConfig(format!(
                "nice_to_have_weight ({}) must be greater than verb_weight ({})",
                self.nice_to_have_weight, self.verb_weight
            )));
        }
        for (label, bonus) in self.section_bonuses.values() {
            if !bonus.is_finite() || bonus < 0.0 {
                return Err(RankerError::InvalidConfig(format!(
                    "section bonus for '{}' must be a non-negative number (got {})",
                    label, bonus
                )));
            }
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunking: ChunkingConfig::default(),
            scoring: ScoringWeights::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load the user config, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-chunk-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()?;
        self.scoring.validate()
    }
}
