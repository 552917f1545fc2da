//! Report rendering for the CLI

pub mod formatter;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use report::{SelectionMode, SelectionReport};
