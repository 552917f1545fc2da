//! Input processing module
//! Reads resume and requirement files for the CLI

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
