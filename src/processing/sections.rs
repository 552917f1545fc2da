//! Section labels and heading detection

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Coarse classification of where a chunk came from in the resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    /// Content before the first recognized heading: name, contact line.
    Header,
    ProfessionalSummary,
    Experience,
    Skills,
    Projects,
    Education,
    Certifications,
    Languages,
    /// Recognized sections with no scoring role of their own: interests,
    /// awards, publications, references and the like.
    Other,
}

/// Heading names per section, compared after lower-casing and stripping punctuation.
const SECTION_HEADINGS: &[(SectionLabel, &[&str])] = &[
    (
        SectionLabel::ProfessionalSummary,
        &[
            "summary",
            "professional summary",
            "profile",
            "professional profile",
            "objective",
            "about me",
            "resumo",
            "resumo profissional",
        ],
    ),
    (
        SectionLabel::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment history",
            "work history",
            "experiencia",
            "experiencia profissional",
        ],
    ),
    (
        SectionLabel::Skills,
        &[
            "skills",
            "technical skills",
            "core competencies",
            "habilidades",
            "competencias",
        ],
    ),
    (
        SectionLabel::Education,
        &["education", "academic background", "educacao", "formacao"],
    ),
    (
        SectionLabel::Certifications,
        &["certifications", "certificates", "licenses", "certificacoes"],
    ),
    (SectionLabel::Languages, &["languages", "idiomas"]),
    (
        SectionLabel::Projects,
        &["projects", "notable projects", "projetos"],
    ),
    (
        SectionLabel::Other,
        &[
            "interests",
            "hobbies",
            "volunteering",
            "volunteer experience",
            "awards",
            "honors and awards",
            "publications",
            "references",
            "additional information",
            "interesses",
            "informacoes adicionais",
        ],
    ),
];

impl SectionLabel {
    pub const ALL: [SectionLabel; 9] = [
        SectionLabel::Header,
        SectionLabel::ProfessionalSummary,
        SectionLabel::Experience,
        SectionLabel::Skills,
        SectionLabel::Projects,
        SectionLabel::Education,
        SectionLabel::Certifications,
        SectionLabel::Languages,
        SectionLabel::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Header => "header",
            SectionLabel::ProfessionalSummary => "professional_summary",
            SectionLabel::Experience => "experience",
            SectionLabel::Skills => "skills",
            SectionLabel::Projects => "projects",
            SectionLabel::Education => "education",
            SectionLabel::Certifications => "certifications",
            SectionLabel::Languages => "languages",
            SectionLabel::Other => "other",
        }
    }

    /// Contact and summary chunks are kept in every selection.
    pub fn is_baseline(&self) -> bool {
        matches!(self, SectionLabel::Header | SectionLabel::ProfessionalSummary)
    }

    /// Classify heading text against the known section names.
    ///
    /// Returns `None` for headings that name no known section, such as a
    /// candidate's name or an employer.
    pub fn from_heading(text: &str) -> Option<SectionLabel> {
        let candidate = canonical_heading(text);
        if candidate.is_empty() {
            return None;
        }

        SECTION_HEADINGS
            .iter()
            .find(|(_, names)| names.iter().any(|name| *name == candidate))
            .map(|(label, _)| *label)
    }
}

impl std::fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn canonical_heading(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Portuguese headings are often written with or without accents.
fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' => 'a',
        'é' | 'ê' => 'e',
        'í' => 'i',
        'ó' | 'ô' | 'õ' => 'o',
        'ú' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

/// Decides whether a line of resume text reads like a section heading.
pub trait HeadingDetector: Send + Sync {
    fn looks_like_heading(&self, line: &str) -> bool;
}

impl<F> HeadingDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn looks_like_heading(&self, line: &str) -> bool {
        self(line)
    }
}

/// Short, unpunctuated lines whose first letter is upper-case are treated as headings.
#[derive(Debug, Clone)]
pub struct HeuristicHeadingDetector {
    max_chars: usize,
    max_words: usize,
}

impl Default for HeuristicHeadingDetector {
    fn default() -> Self {
        Self {
            max_chars: 40,
            max_words: 5,
        }
    }
}

impl HeuristicHeadingDetector {
    pub fn new(max_chars: usize, max_words: usize) -> Self {
        Self {
            max_chars,
            max_words,
        }
    }
}

impl HeadingDetector for HeuristicHeadingDetector {
    fn looks_like_heading(&self, line: &str) -> bool {
        let line = line.trim();
        let line = line.strip_suffix(':').unwrap_or(line).trim_end();

        if line.is_empty() || line.chars().count() > self.max_chars {
            return false;
        }
        if line.unicode_words().count() > self.max_words {
            return false;
        }
        if line.contains(['.', '!', '?', ';', ',']) {
            return false;
        }

        line.chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(char::is_uppercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_classification() {
        assert_eq!(SectionLabel::from_heading("EXPERIENCE"), Some(SectionLabel::Experience));
        assert_eq!(
            SectionLabel::from_heading("Professional Summary:"),
            Some(SectionLabel::ProfessionalSummary)
        );
        assert_eq!(
            SectionLabel::from_heading("Experiência Profissional"),
            Some(SectionLabel::Experience)
        );
        assert_eq!(SectionLabel::from_heading("Technical   Skills"), Some(SectionLabel::Skills));
        assert_eq!(SectionLabel::from_heading("Interests"), Some(SectionLabel::Other));
        assert_eq!(SectionLabel::from_heading("Honors and Awards:"), Some(SectionLabel::Other));
        assert_eq!(SectionLabel::from_heading("John Doe"), None);
        assert_eq!(SectionLabel::from_heading("---"), None);
    }

    #[test]
    fn test_heuristic_detector() {
        let detector = HeuristicHeadingDetector::default();

        assert!(detector.looks_like_heading("Experience"));
        assert!(detector.looks_like_heading("WORK HISTORY:"));
        assert!(detector.looks_like_heading("John Doe"));
        assert!(!detector.looks_like_heading("Summary."));
        assert!(!detector.looks_like_heading("Built scalable APIs with Python and led migration to SQL."));
        assert!(!detector.looks_like_heading("lowercase words here"));
        assert!(!detector.looks_like_heading("iOS Projects"));
        assert!(detector.looks_like_heading("2023 Awards"));
        assert!(!detector.looks_like_heading("2019 - 2023"));
        assert!(!detector.looks_like_heading(""));
    }

    #[test]
    fn test_closure_detector() {
        let detector = |line: &str| line.starts_with('#');
        assert!(detector.looks_like_heading("# Skills"));
        assert!(!detector.looks_like_heading("Skills"));
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&SectionLabel::ProfessionalSummary).unwrap();
        assert_eq!(json, "\"professional_summary\"");
        assert_eq!(SectionLabel::Other.to_string(), "other");
        assert!(SectionLabel::Header.is_baseline());
        assert!(!SectionLabel::Experience.is_baseline());
    }
}
