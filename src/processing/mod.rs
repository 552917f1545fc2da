//! Resume chunking, scoring and selection

pub mod normalizer;
pub mod sections;
pub mod chunker;
pub mod keywords;
pub mod scorer;
pub mod selector;
pub mod pipeline;

pub use pipeline::{select_relevant_chunks, ChunkRanker};
