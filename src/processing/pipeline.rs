//! End-to-end chunk selection pipeline

use crate::config::{ChunkingConfig, ScoringWeights};
use crate::error::Result;
use crate::processing::chunker::ChunkBuilder;
use crate::processing::keywords::KeywordIndex;
use crate::processing::normalizer::normalize;
use crate::processing::scorer::RelevanceScorer;
use crate::processing::sections::HeadingDetector;
use crate::processing::selector::{self, SelectedChunk, SelectionResult};
use log::{debug, info};

/// Selects the resume chunks most relevant to a job.
///
/// Holds only validated configuration, so one ranker can serve any number of
/// independent requests.
#[derive(Debug)]
pub struct ChunkRanker {
    builder: ChunkBuilder,
    scorer: RelevanceScorer,
    max_selected: usize,
}

impl ChunkRanker {
    pub fn new(chunking: ChunkingConfig, weights: ScoringWeights) -> Result<Self> {
        let builder = ChunkBuilder::new(chunking.min_chars, chunking.max_chars)?;
        selector::check_max_selected(chunking.max_selected)?;

        Ok(Self {
            builder,
            scorer: RelevanceScorer::new(weights)?,
            max_selected: chunking.max_selected,
        })
    }

    pub fn with_heading_detector(mut self, detector: Box<dyn HeadingDetector>) -> Self {
        self.builder = self.builder.with_heading_detector(detector);
        self
    }

    pub fn max_selected(&self) -> usize {
        self.max_selected
    }

    /// Rank chunks by keyword relevance and keep the best `max_selected`.
    pub fn rank(&self, resume_text: &str, index: &KeywordIndex) -> Result<SelectionResult> {
        let blocks = normalize(resume_text)?;
        let chunks = self.builder.build(&blocks);
        let scored = self.scorer.score_all(&chunks, index);
        let result = selector::select(scored, self.max_selected)?;

        info!(
            "Selected {} of {} chunks ({} blocks, {} matched terms)",
            result.selected_count,
            result.total_chunks,
            blocks.len(),
            result.matched_terms.len()
        );
        debug!(
            "Selected chunk order: {:?}",
            result
                .chunks
                .iter()
                .map(|scored| scored.chunk.order_index)
                .collect::<Vec<_>>()
        );
        Ok(result)
    }

    /// Section-diverse selection for factual extraction; keyword scores are reported but not used.
    pub fn cover(&self, resume_text: &str, index: &KeywordIndex) -> Result<SelectionResult> {
        let blocks = normalize(resume_text)?;
        let chunks = self.builder.build(&blocks);
        let scored = self.scorer.score_all(&chunks, index);
        let result = selector::select_for_coverage(scored, self.max_selected)?;

        info!(
            "Coverage selection kept {} of {} chunks",
            result.selected_count, result.total_chunks
        );
        Ok(result)
    }
}

/// Select the resume chunks most relevant to the given job keywords.
///
/// Uses the default scoring weights. Fails with `InvalidConfig` for bad bounds
/// and `EmptyInput` for a resume with no content.
pub fn select_relevant_chunks<S, T>(
    resume_text: &str,
    hard_skills: &[S],
    action_verbs: &[T],
    min_chars: usize,
    max_chars: usize,
    max_selected: usize,
) -> Result<Vec<SelectedChunk>>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let ranker = ChunkRanker::new(
        ChunkingConfig::new(min_chars, max_chars, max_selected),
        ScoringWeights::default(),
    )?;
    let index = KeywordIndex::new(hard_skills, action_verbs)?;

    Ok(ranker.rank(resume_text, &index)?.selected_chunks())
}
