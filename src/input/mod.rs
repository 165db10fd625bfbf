//! Reading résumé and job description text from files

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
