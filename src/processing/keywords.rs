//! Job keyword canonicalization and lookup

use crate::error::{RankerError, Result};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What a job term is, in precedence order.
///
/// A term supplied under several kinds keeps the earliest one, so it is only
/// ever counted once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKind {
    /// Must-have hard skill.
    HardSkill,
    NiceToHaveSkill,
    ActionVerb,
    /// Generic job-posting vocabulary.
    AtsKeyword,
}

impl TermKind {
    pub fn is_skill(&self) -> bool {
        matches!(self, TermKind::HardSkill | TermKind::NiceToHaveSkill)
    }
}

/// Normalized job terms, each under exactly one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    terms: BTreeMap<String, TermKind>,
}

impl KeywordSet {
    pub fn kind_of(&self, term: &str) -> Option<TermKind> {
        self.terms.get(term).copied()
    }

    /// Terms of one kind, in sorted order.
    pub fn terms_of(&self, kind: TermKind) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(move |(_, term_kind)| **term_kind == kind)
            .map(|(term, _)| term.as_str())
    }

    pub fn count_of(&self, kind: TermKind) -> usize {
        self.terms_of(kind).count()
    }

    /// Must-have or nice-to-have skill.
    pub fn contains_skill(&self, term: &str) -> bool {
        self.kind_of(term).is_some_and(|kind| kind.is_skill())
    }

    pub fn contains_verb(&self, term: &str) -> bool {
        self.kind_of(term) == Some(TermKind::ActionVerb)
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

/// A term that cannot match as one token: multi-word or punctuated.
#[derive(Debug, Clone)]
struct PhraseTerm {
    kind: TermKind,
    term: String,
    /// Neighbouring characters of a match must not be alphanumeric.
    word_bounded: bool,
}

/// Keyword set plus a phrase automaton for terms that cannot match as a single token.
#[derive(Debug, Clone)]
pub struct KeywordIndex {
    keywords: KeywordSet,
    phrases: Vec<PhraseTerm>,
    phrase_matcher: Option<AhoCorasick>,
}

/// Lower-case, trim and collapse inner whitespace.
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Single alphanumeric run, matched as a whole token.
pub fn is_token_term(term: &str) -> bool {
    !term.is_empty() && term.chars().all(char::is_alphanumeric)
}

fn at_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

impl KeywordIndex {
    /// Index must-have hard skills and action verbs.
    pub fn new<I, J, S, T>(hard_skills: I, action_verbs: J) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let skills = hard_skills
            .into_iter()
            .map(|term| (TermKind::HardSkill, term.as_ref().to_string()));
        let verbs = action_verbs
            .into_iter()
            .map(|term| (TermKind::ActionVerb, term.as_ref().to_string()));
        Self::from_terms(skills.chain(verbs))
    }

    /// Index terms of any kind. Blank terms are dropped.
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = (TermKind, S)>,
        S: AsRef<str>,
    {
        let mut canonical: BTreeMap<String, TermKind> = BTreeMap::new();
        for (kind, term) in terms {
            let term = normalize_term(term.as_ref());
            if term.is_empty() {
                continue;
            }
            canonical
                .entry(term)
                .and_modify(|existing| *existing = (*existing).min(kind))
                .or_insert(kind);
        }

        // Multi-word skills may match inside longer phrasing; everything else needs word boundaries.
        let phrases: Vec<PhraseTerm> = canonical
            .iter()
            .filter(|(term, _)| !is_token_term(term))
            .map(|(term, kind)| PhraseTerm {
                kind: *kind,
                term: term.clone(),
                word_bounded: !(kind.is_skill() && term.contains(' ')),
            })
            .collect();

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            let patterns: Vec<&str> = phrases.iter().map(|phrase| phrase.term.as_str()).collect();
            let matcher = AhoCorasick::new(&patterns).map_err(|e| {
                RankerError::Processing(format!("Failed to build keyword matcher: {}", e))
            })?;
            Some(matcher)
        };

        let keywords = KeywordSet { terms: canonical };
        log::debug!(
            "Keyword index: {} must-have, {} nice-to-have, {} verbs, {} ATS keywords, {} phrase terms",
            keywords.count_of(TermKind::HardSkill),
            keywords.count_of(TermKind::NiceToHaveSkill),
            keywords.count_of(TermKind::ActionVerb),
            keywords.count_of(TermKind::AtsKeyword),
            phrases.len()
        );

        Ok(Self {
            keywords,
            phrases,
            phrase_matcher,
        })
    }

    /// Index with no terms; scoring falls back to section bonuses alone.
    pub fn empty() -> Self {
        Self {
            keywords: KeywordSet::default(),
            phrases: Vec::new(),
            phrase_matcher: None,
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Classify a lower-cased token against the single-token terms.
    pub fn token_kind(&self, token: &str) -> Option<TermKind> {
        self.keywords.kind_of(token)
    }

    /// Phrase terms occurring in `haystack`, which must already be lower-cased.
    ///
    /// Overlapping occurrences are reported so that "machine learning" and
    /// "learning systems" can both match the same span. An occurrence glued to
    /// a letter or digit does not count unless the term is a multi-word skill.
    pub fn phrase_matches<'a>(&'a self, haystack: &str) -> Vec<(TermKind, &'a str)> {
        let Some(matcher) = &self.phrase_matcher else {
            return Vec::new();
        };

        let mut seen = BTreeSet::new();
        for found in matcher.find_overlapping_iter(haystack) {
            let phrase = &self.phrases[found.pattern().as_usize()];
            if !phrase.word_bounded || at_word_boundary(haystack, found.start(), found.end()) {
                seen.insert(found.pattern().as_usize());
            }
        }

        seen.into_iter()
            .map(|id| {
                let phrase = &self.phrases[id];
                (phrase.kind, phrase.term.as_str())
            })
            .collect()
    }
}

/// Requirement document returned by the job-analysis step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobRequirements {
    #[serde(alias = "hard_skills", deserialize_with = "list_or_delimited")]
    pub must_have_hard_skills: Vec<String>,
    #[serde(deserialize_with = "list_or_delimited")]
    pub nice_to_have_hard_skills: Vec<String>,
    #[serde(deserialize_with = "list_or_delimited")]
    pub action_verbs: Vec<String>,
    #[serde(deserialize_with = "list_or_delimited")]
    pub ats_keywords: Vec<String>,
}

impl JobRequirements {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// All hard skills, must-have first.
    pub fn hard_skills(&self) -> impl Iterator<Item = &String> {
        self.must_have_hard_skills
            .iter()
            .chain(self.nice_to_have_hard_skills.iter())
    }

    fn tagged_terms(&self) -> impl Iterator<Item = (TermKind, &String)> {
        tag(TermKind::HardSkill, &self.must_have_hard_skills)
            .chain(tag(TermKind::NiceToHaveSkill, &self.nice_to_have_hard_skills))
            .chain(tag(TermKind::ActionVerb, &self.action_verbs))
            .chain(tag(TermKind::AtsKeyword, &self.ats_keywords))
    }

    pub fn keyword_index(&self) -> Result<KeywordIndex> {
        KeywordIndex::from_terms(self.tagged_terms())
    }
}

fn tag(kind: TermKind, terms: &[String]) -> impl Iterator<Item = (TermKind, &String)> {
    terms.iter().map(move |term| (kind, term))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrDelimited {
    List(Vec<String>),
    Delimited(String),
    Missing(Option<()>),
}

/// Accept either a JSON list or a single comma/semicolon/newline separated string.
fn list_or_delimited<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match ListOrDelimited::deserialize(deserializer)? {
        ListOrDelimited::List(items) => items,
        ListOrDelimited::Delimited(text) => text
            .split([',', ';', '\n'])
            .map(str::to_string)
            .collect(),
        ListOrDelimited::Missing(_) => Vec::new(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
