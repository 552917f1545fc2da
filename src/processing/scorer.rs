//! Keyword and section based relevance scoring

use crate::config::ScoringWeights;
use crate::error::Result;
use crate::processing::chunker::Chunk;
use crate::processing::keywords::{KeywordIndex, TermKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A chunk with its relevance score. Built once; re-scoring yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
    /// Terms that contributed to the score, for logging only.
    pub matched_terms: BTreeSet<String>,
}

/// Distinct terms found in a chunk, by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchBreakdown {
    pub must_have: BTreeSet<String>,
    pub nice_to_have: BTreeSet<String>,
    pub verbs: BTreeSet<String>,
    pub ats_keywords: BTreeSet<String>,
}

impl MatchBreakdown {
    /// Must-have and nice-to-have skills together.
    pub fn skill_matches(&self) -> usize {
        self.must_have.len() + self.nice_to_have.len()
    }

    pub fn verb_matches(&self) -> usize {
        self.verbs.len()
    }

    fn record(&mut self, kind: TermKind, term: &str) {
        let terms = match kind {
            TermKind::HardSkill => &mut self.must_have,
            TermKind::NiceToHaveSkill => &mut self.nice_to_have,
            TermKind::ActionVerb => &mut self.verbs,
            TermKind::AtsKeyword => &mut self.ats_keywords,
        };
        terms.insert(term.to_string());
    }

    fn weighted(&self, weights: &ScoringWeights) -> f32 {
        self.must_have.len() as f32 * weights.skill_weight
            + self.nice_to_have.len() as f32 * weights.nice_to_have_weight
            + self.verbs.len() as f32 * weights.verb_weight
            + self.ats_keywords.len() as f32 * weights.ats_keyword_weight
    }

    fn into_terms(self) -> BTreeSet<String> {
        let mut terms = self.must_have;
        terms.extend(self.nice_to_have);
        terms.extend(self.verbs);
        terms.extend(self.ats_keywords);
        terms
    }
}

/// Lower-cased alphanumeric runs of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    weights: ScoringWeights,
}

impl RelevanceScorer {
    pub fn new(weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Find the distinct job terms present in `text`.
    pub fn find_matches(&self, text: &str, index: &KeywordIndex) -> MatchBreakdown {
        let mut breakdown = MatchBreakdown::default();

        for token in tokenize(text) {
            if let Some(kind) = index.token_kind(&token) {
                breakdown.record(kind, &token);
            }
        }

        let haystack = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        for (kind, term) in index.phrase_matches(&haystack) {
            breakdown.record(kind, term);
        }

        breakdown
    }

    pub fn score(&self, chunk: &Chunk, index: &KeywordIndex) -> ScoredChunk {
        let breakdown = self.find_matches(&chunk.text, index);

        let base = breakdown.weighted(&self.weights);
        let bonus = self.weights.section_bonuses.bonus_for(chunk.source_section);
        let score = base + bonus;
        let matched_terms = breakdown.into_terms();

        log::debug!(
            "Chunk {} [{}] scored {:.2} (base {:.2}, bonus {:.2}) matches: {:?}",
            chunk.order_index,
            chunk.source_section,
            score,
            base,
            bonus,
            matched_terms
        );

        ScoredChunk {
            chunk: chunk.clone(),
            score,
            matched_terms,
        }
    }

    pub fn score_all(&self, chunks: &[Chunk], index: &KeywordIndex) -> Vec<ScoredChunk> {
        chunks.iter().map(|chunk| self.score(chunk, index)).collect()
    }
}
