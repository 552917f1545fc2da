//! Top-N chunk selection with a baseline guarantee

use crate::error::{RankerError, Result};
use crate::processing::chunker::Chunk;
use crate::processing::scorer::ScoredChunk;
use crate::processing::sections::SectionLabel;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

/// Selected chunks in document order, the artifact handed to prompt assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub chunks: Vec<ScoredChunk>,
    pub selected_count: usize,
    pub total_chunks: usize,
    pub matched_terms: BTreeSet<String>,
}

/// External view of a selected chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedChunk {
    pub text: String,
    pub source_section: SectionLabel,
    pub order_index: usize,
}

impl From<&Chunk> for SelectedChunk {
    fn from(chunk: &Chunk) -> Self {
        Self {
            text: chunk.text.clone(),
            source_section: chunk.source_section,
            order_index: chunk.order_index,
        }
    }
}

impl SelectionResult {
    fn from_selected(mut chunks: Vec<ScoredChunk>, total_chunks: usize) -> Self {
        chunks.sort_by_key(|scored| scored.chunk.order_index);
        let matched_terms = chunks
            .iter()
            .flat_map(|scored| scored.matched_terms.iter().cloned())
            .collect();

        Self {
            selected_count: chunks.len(),
            total_chunks,
            matched_terms,
            chunks,
        }
    }

    pub fn selected_chunks(&self) -> Vec<SelectedChunk> {
        self.chunks
            .iter()
            .map(|scored| SelectedChunk::from(&scored.chunk))
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.chunks
            .iter()
            .map(|scored| scored.chunk.text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

pub(crate) fn check_max_selected(max_selected: usize) -> Result<()> {
    if max_selected < 1 {
        return Err(RankerError::InvalidConfig(
            "max_selected must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Score descending, then document order.
fn rank_order(a: &ScoredChunk, b: &ScoredChunk) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.chunk.order_index.cmp(&b.chunk.order_index))
}

/// Pick the `max_selected` best chunks, returned in document order.
///
/// The earliest contact or summary chunk is always kept; when it did not rank
/// into the selection it replaces the lowest-ranked pick.
pub fn select(scored: Vec<ScoredChunk>, max_selected: usize) -> Result<SelectionResult> {
    check_max_selected(max_selected)?;

    let total = scored.len();
    if max_selected >= total {
        return Ok(SelectionResult::from_selected(scored, total));
    }

    let baseline = scored
        .iter()
        .filter(|candidate| candidate.chunk.source_section.is_baseline())
        .map(|candidate| candidate.chunk.order_index)
        .min();

    let mut ranked = scored;
    ranked.sort_by(rank_order);

    let mut rest = ranked.split_off(max_selected);
    let mut selected = ranked;

    if let Some(order_index) = baseline {
        let included = selected
            .iter()
            .any(|candidate| candidate.chunk.order_index == order_index);
        if !included {
            if let Some(position) = rest
                .iter()
                .position(|candidate| candidate.chunk.order_index == order_index)
            {
                let forced = rest.swap_remove(position);
                if let Some(displaced) = selected.pop() {
                    log::debug!(
                        "Baseline chunk {} displaces chunk {} (score {:.2})",
                        forced.chunk.order_index,
                        displaced.chunk.order_index,
                        displaced.score
                    );
                }
                selected.push(forced);
            }
        }
    }

    Ok(SelectionResult::from_selected(selected, total))
}

/// Section-diverse selection that ignores scores.
///
/// Keeps the first chunk of every section in document order, then fills the
/// remaining slots in document order. The limit is `max_selected + 2`, at least
/// three, never more than the chunks available.
pub fn select_for_coverage(scored: Vec<ScoredChunk>, max_selected: usize) -> Result<SelectionResult> {
    check_max_selected(max_selected)?;

    let total = scored.len();
    let limit = max_selected.saturating_add(2).max(3).min(total);

    let mut ordered = scored;
    ordered.sort_by_key(|candidate| candidate.chunk.order_index);

    let mut picked: Vec<usize> = Vec::with_capacity(limit);
    let mut covered = HashSet::new();
    for (position, candidate) in ordered.iter().enumerate() {
        if picked.len() >= limit {
            break;
        }
        if covered.insert(candidate.chunk.source_section) {
            picked.push(position);
        }
    }
    for position in 0..ordered.len() {
        if picked.len() >= limit {
            break;
        }
        if !picked.contains(&position) {
            picked.push(position);
        }
    }

    let keep: HashSet<usize> = picked.into_iter().collect();
    let selected = ordered
        .into_iter()
        .enumerate()
        .filter(|(position, _)| keep.contains(position))
        .map(|(_, candidate)| candidate)
        .collect();

    Ok(SelectionResult::from_selected(selected, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(order_index: usize, section: SectionLabel, score: f32, terms: &[&str]) -> ScoredChunk {
        let text = format!("chunk {}", order_index);
        ScoredChunk {
            chunk: Chunk {
                char_length: text.chars().count(),
                text,
                source_section: section,
                order_index,
                blocks: order_index..order_index + 1,
            },
            score,
            matched_terms: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn order_of(result: &SelectionResult) -> Vec<usize> {
        result.chunks.iter().map(|c| c.chunk.order_index).collect()
    }

    #[test]
    fn test_zero_max_selected_is_rejected() {
        let chunks = vec![scored(0, SectionLabel::Header, 0.0, &[])];
        assert!(matches!(select(chunks.clone(), 0), Err(RankerError::InvalidConfig(_))));
        assert!(matches!(select_for_coverage(chunks, 0), Err(RankerError::InvalidConfig(_))));
    }

    #[test]
    fn test_top_scores_returned_in_document_order() {
        let chunks = vec![
            scored(0, SectionLabel::Header, 1.0, &[]),
            scored(1, SectionLabel::Experience, 3.0, &["rust"]),
            scored(2, SectionLabel::Experience, 0.5, &[]),
            scored(3, SectionLabel::Skills, 7.0, &["sql", "go"]),
        ];
        let result = select(chunks, 3).unwrap();

        assert_eq!(order_of(&result), vec![0, 1, 3]);
        assert_eq!(result.selected_count, 3);
        assert_eq!(result.total_chunks, 4);
        let terms: Vec<&str> = result.matched_terms.iter().map(String::as_str).collect();
        assert_eq!(terms, vec!["go", "rust", "sql"]);
    }

    #[test]
    fn test_ties_break_on_document_order() {
        let chunks = vec![
            scored(0, SectionLabel::Other, 2.0, &[]),
            scored(1, SectionLabel::Other, 2.0, &[]),
            scored(2, SectionLabel::Other, 2.0, &[]),
        ];
        assert_eq!(order_of(&select(chunks, 2).unwrap()), vec![0, 1]);
    }

    #[test]
    fn test_baseline_displaces_lowest_selected() {
        let chunks = vec![
            scored(0, SectionLabel::Header, 0.0, &[]),
            scored(1, SectionLabel::Experience, 6.0, &[]),
            scored(2, SectionLabel::Experience, 4.0, &[]),
            scored(3, SectionLabel::Skills, 5.0, &[]),
        ];
        let result = select(chunks, 2).unwrap();

        assert_eq!(order_of(&result), vec![0, 1]);
    }

    #[test]
    fn test_baseline_is_earliest_summary_or_contact() {
        let chunks = vec![
            scored(0, SectionLabel::Other, 0.0, &[]),
            scored(1, SectionLabel::ProfessionalSummary, 0.0, &[]),
            scored(2, SectionLabel::ProfessionalSummary, 0.0, &[]),
            scored(3, SectionLabel::Experience, 9.0, &[]),
        ];
        let result = select(chunks, 1).unwrap();

        assert_eq!(order_of(&result), vec![1]);
    }

    #[test]
    fn test_no_baseline_chunk() {
        let chunks = vec![
            scored(0, SectionLabel::Other, 1.0, &[]),
            scored(1, SectionLabel::Experience, 2.0, &[]),
        ];
        assert_eq!(order_of(&select(chunks, 1).unwrap()), vec![1]);
    }

    #[test]
    fn test_pass_through_when_capacity_exceeds_total() {
        let chunks = vec![
            scored(2, SectionLabel::Other, 5.0, &[]),
            scored(0, SectionLabel::Header, 0.0, &[]),
            scored(1, SectionLabel::Skills, 1.0, &[]),
        ];
        let result = select(chunks, 10).unwrap();

        assert_eq!(order_of(&result), vec![0, 1, 2]);
        assert_eq!(result.selected_count, 3);
    }

    #[test]
    fn test_selection_size_is_min_of_cap_and_total() {
        let chunks: Vec<ScoredChunk> = (0..7)
            .map(|i| scored(i, SectionLabel::Experience, (i % 3) as f32, &[]))
            .collect();
        for cap in 1..10 {
            let result = select(chunks.clone(), cap).unwrap();
            assert_eq!(result.selected_count, cap.min(chunks.len()));
            let order = order_of(&result);
            let mut sorted = order.clone();
            sorted.sort();
            assert_eq!(order, sorted);
        }
    }

    #[test]
    fn test_coverage_selection() {
        let chunks = vec![
            scored(0, SectionLabel::Header, 0.0, &[]),
            scored(1, SectionLabel::ProfessionalSummary, 0.0, &[]),
            scored(2, SectionLabel::Experience, 9.0, &[]),
            scored(3, SectionLabel::Experience, 9.0, &[]),
            scored(4, SectionLabel::Experience, 9.0, &[]),
            scored(5, SectionLabel::Skills, 0.0, &[]),
            scored(6, SectionLabel::Education, 0.0, &[]),
        ];
        let result = select_for_coverage(chunks.clone(), 3).unwrap();
        assert_eq!(order_of(&result), vec![0, 1, 2, 5, 6]);

        let result = select_for_coverage(chunks[..2].to_vec(), 1).unwrap();
        assert_eq!(order_of(&result), vec![0, 1]);

        let result = select_for_coverage(chunks, 1).unwrap();
        assert_eq!(order_of(&result), vec![0, 1, 2]);
    }

    #[test]
    fn test_coverage_with_unbounded_cap() {
        let chunks = vec![
            scored(0, SectionLabel::Header, 0.0, &[]),
            scored(1, SectionLabel::Experience, 3.0, &[]),
            scored(2, SectionLabel::Experience, 1.0, &[]),
        ];
        let result = select_for_coverage(chunks.clone(), usize::MAX).unwrap();
        assert_eq!(order_of(&result), vec![0, 1, 2]);

        let result = select(chunks, usize::MAX).unwrap();
        assert_eq!(result.selected_count, 3);
    }

    #[test]
    fn test_selected_chunk_view() {
        let result = select(vec![scored(0, SectionLabel::Header, 0.0, &[])], 1).unwrap();
        let view = result.selected_chunks();

        assert_eq!(
            view,
            vec![SelectedChunk {
                text: "chunk 0".to_string(),
                source_section: SectionLabel::Header,
                order_index: 0,
            }]
        );
        assert_eq!(result.texts(), vec!["chunk 0"]);
    }
}
