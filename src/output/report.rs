//! Report structures for a chunk selection run

use crate::config::ChunkingConfig;
use crate::processing::selector::SelectionResult;
use serde::{Deserialize, Serialize};

/// How chunks were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Keyword relevance with the baseline guarantee.
    Relevance,
    /// One chunk per section first, then document order.
    Coverage,
}

/// Everything a formatter needs to present one selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionReport {
    pub source: String,
    pub mode: SelectionMode,
    pub settings: ChunkingConfig,
    pub keyword_count: usize,
    pub selection: SelectionResult,
}

impl SelectionReport {
    pub fn new(
        source: impl Into<String>,
        mode: SelectionMode,
        settings: ChunkingConfig,
        keyword_count: usize,
        selection: SelectionResult,
    ) -> Self {
        Self {
            source: source.into(),
            mode,
            settings,
            keyword_count,
            selection,
        }
    }

    /// Characters handed on to prompt assembly.
    pub fn selected_chars(&self) -> usize {
        self.selection
            .chunks
            .iter()
            .map(|scored| scored.chunk.char_length)
            .sum()
    }
}
