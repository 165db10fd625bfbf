//! Report generation and rendering

pub mod formatter;
pub mod report;

pub use formatter::{formatter_for, save_report, ConsoleFormatter, JsonFormatter, OutputFormatter};
pub use report::{MatchReport, Verdict};
