//! Greedy block-to-chunk merging with section tracking

use crate::error::{RankerError, Result};
use crate::processing::normalizer::TextBlock;
use crate::processing::sections::{HeadingDetector, HeuristicHeadingDetector, SectionLabel};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Separator placed between blocks merged into one chunk.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// A bounded span of resume text, the unit of scoring and selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
    pub char_length: usize,
    pub source_section: SectionLabel,
    pub order_index: usize,
    /// Indexes of the blocks merged into this chunk.
    pub blocks: Range<usize>,
}

pub struct ChunkBuilder {
    min_chars: usize,
    max_chars: usize,
    heading_detector: Box<dyn HeadingDetector>,
}

impl std::fmt::Debug for ChunkBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkBuilder")
            .field("min_chars", &self.min_chars)
            .field("max_chars", &self.max_chars)
            .finish_non_exhaustive()
    }
}

/// Chunk under construction.
struct PendingChunk {
    parts: Vec<String>,
    char_length: usize,
    section: SectionLabel,
    first_block: usize,
    end_block: usize,
}

impl PendingChunk {
    fn start(block: &TextBlock, section: SectionLabel) -> Self {
        Self {
            parts: vec![block.text.clone()],
            char_length: block.char_length(),
            section,
            first_block: block.index,
            end_block: block.index + 1,
        }
    }

    fn length_with(&self, block: &TextBlock) -> usize {
        self.char_length + BLOCK_SEPARATOR.chars().count() + block.char_length()
    }

    fn push(&mut self, block: &TextBlock) {
        self.char_length = self.length_with(block);
        self.parts.push(block.text.clone());
        self.end_block = block.index + 1;
    }

    fn finish(self, order_index: usize) -> Chunk {
        Chunk {
            text: self.parts.join(BLOCK_SEPARATOR),
            char_length: self.char_length,
            source_section: self.section,
            order_index,
            blocks: self.first_block..self.end_block,
        }
    }
}

/// Chunk bounds must satisfy `0 < min_chars < max_chars`.
pub(crate) fn check_bounds(min_chars: usize, max_chars: usize) -> Result<()> {
    if min_chars == 0 || min_chars >= max_chars {
        return Err(RankerError::InvalidConfig(format!(
            "chunk bounds must satisfy 0 < min_chars < max_chars (got {} / {})",
            min_chars, max_chars
        )));
    }
    Ok(())
}

impl ChunkBuilder {
    /// Create a builder with the default heading heuristic.
    pub fn new(min_chars: usize, max_chars: usize) -> Result<Self> {
        check_bounds(min_chars, max_chars)?;

        Ok(Self {
            min_chars,
            max_chars,
            heading_detector: Box::new(HeuristicHeadingDetector::default()),
        })
    }

    pub fn with_heading_detector(mut self, detector: Box<dyn HeadingDetector>) -> Self {
        self.heading_detector = detector;
        self
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Section named by the block's first line, if it is a recognized heading.
    fn section_hint(&self, block: &TextBlock) -> Option<SectionLabel> {
        let line = block.first_line();
        if self.heading_detector.looks_like_heading(line) {
            SectionLabel::from_heading(line)
        } else {
            None
        }
    }

    /// Merge ordered blocks into chunks.
    ///
    /// Every block lands in exactly one chunk and blocks are never split, so a
    /// single block longer than `max_chars` becomes one oversized chunk.
    pub fn build(&self, blocks: &[TextBlock]) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut running_section = SectionLabel::Header;
        let mut pending: Option<PendingChunk> = None;

        for block in blocks {
            let hint = self.section_hint(block);

            if let Some(current) = pending.take() {
                let overflows = current.length_with(block) > self.max_chars;
                if current.char_length >= self.min_chars && (overflows || hint.is_some()) {
                    chunks.push(current.finish(chunks.len()));
                } else {
                    pending = Some(current);
                }
            }

            if let Some(section) = hint {
                running_section = section;
            }

            match pending.as_mut() {
                Some(current) => current.push(block),
                None => pending = Some(PendingChunk::start(block, running_section)),
            }
        }

        if let Some(current) = pending {
            chunks.push(current.finish(chunks.len()));
        }

        log::debug!(
            "Built {} chunks from {} blocks (bounds {}..={})",
            chunks.len(),
            blocks.len(),
            self.min_chars,
            self.max_chars
        );
        chunks
    }
}
