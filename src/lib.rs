//! Resume chunk ranker library
//!
//! Splits resume text into bounded chunks, scores them against a job's hard
//! skills and action verbs, and returns the most relevant chunks in reading
//! order for prompt assembly.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{RankerError, Result};
pub use processing::keywords::{JobRequirements, KeywordIndex, KeywordSet};
pub use processing::selector::{SelectedChunk, SelectionResult};
pub use processing::{select_relevant_chunks, ChunkRanker};
