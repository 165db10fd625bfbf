//! Console and JSON rendering of match reports

use crate::config::OutputFormat;
use crate::error::{MatcherError, Result};
use crate::output::report::{MatchReport, Verdict};
use crate::processing::keywords::KeywordSet;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    show_highlights: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, show_highlights: bool) -> Self {
        Self {
            use_colors,
            detailed,
            show_highlights,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    fn verdict_color(verdict: Verdict) -> Color {
        match verdict {
            Verdict::Strong => Color::Green,
            Verdict::Moderate => Color::Cyan,
            Verdict::Weak => Color::Yellow,
            Verdict::Poor => Color::Red,
        }
    }
}

fn join_keywords(keywords: &KeywordSet) -> String {
    if keywords.is_empty() {
        "(none)".to_string()
    } else {
        keywords.as_slice().join(", ")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let analysis = &report.analysis;
        let result = &analysis.result;
        let mut out = String::new();

        out.push_str(&format!("{}\n\n", self.heading("Resume Match Report")));
        out.push_str(&format!(
            "Score: {}  {}\n",
            self.paint(&format!("{:.2}%", result.score), Self::verdict_color(report.verdict)),
            report.verdict.description()
        ));
        out.push_str(&format!("Keyword coverage: {:.1}%\n\n", report.keyword_coverage));

        out.push_str(&format!("{}\n", self.heading("Matching Keywords")));
        out.push_str(&format!("{}\n\n", join_keywords(&result.matching_keywords)));

        out.push_str(&format!("{}\n", self.heading("Suggested Keywords")));
        if result.missing_keywords.is_empty() {
            out.push_str("(none)\n");
        } else {
            for (i, keyword) in result.missing_keywords.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, self.paint(keyword, Color::Yellow)));
            }
            if analysis.total_missing > result.missing_keywords.len() {
                out.push_str(&format!(
                    "  ... and {} more job keywords not found in the resume\n",
                    analysis.total_missing - result.missing_keywords.len()
                ));
            }
        }

        if analysis.resume_truncated || analysis.job_truncated {
            out.push_str(&format!(
                "\n{}\n",
                self.paint("Note: input exceeded the length limit and was truncated", Color::Yellow)
            ));
        }

        if self.detailed {
            out.push_str(&format!("\n{}\n", self.heading("Resume Keywords")));
            out.push_str(&format!("{}\n", join_keywords(&analysis.resume_keywords)));
            out.push_str(&format!("\n{}\n", self.heading("Job Keywords")));
            out.push_str(&format!("{}\n", join_keywords(&analysis.job_keywords)));
            out.push_str(&format!("\n{}\n", self.heading("Key Job Terms")));
            out.push_str(&format!("{}\n", join_keywords(&analysis.important_job_terms)));
        }

        if self.show_highlights {
            out.push_str(&format!("\n{}\n{}\n", self.heading("Highlighted Resume"), result.highlighted_resume));
            out.push_str(&format!("\n{}\n{}\n", self.heading("Highlighted Job Description"), result.highlighted_job));
        }

        out.push_str(&format!(
            "\nEncoder: {} | {}ms | {}\n",
            report.metadata.encoder,
            report.metadata.processing_time_ms,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

/// Pick the formatter for the requested output format
pub fn formatter_for(format: OutputFormat, use_colors: bool, detailed: bool, show_highlights: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors, detailed, show_highlights)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

pub fn save_report(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)
        .map_err(|e| MatcherError::OutputFormatting(format!("Failed to write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{MatchAnalysis, MatchResult};

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn sample_report() -> MatchReport {
        let analysis = MatchAnalysis {
            result: MatchResult {
                score: 62.5,
                matching_keywords: keywords(&["python", "sql"]),
                missing_keywords: vec!["django".to_string(), "aws".to_string()],
                highlighted_resume: "<mark>Python</mark> and <mark>SQL</mark>".to_string(),
                highlighted_job: "<mark>Python</mark>, Django".to_string(),
            },
            resume_keywords: keywords(&["python", "sql", "flask"]),
            job_keywords: keywords(&["python", "django", "sql", "aws"]),
            important_job_terms: keywords(&["python", "sql"]),
            total_missing: 2,
            resume_truncated: false,
            job_truncated: true,
            encoder_name: "test-encoder".to_string(),
            processing_time_ms: 3,
        };
        MatchReport::new(analysis, "resume.txt", "job.txt")
    }

    #[test]
    fn test_console_output() {
        let output = ConsoleFormatter::new(false, true, true).format_report(&sample_report()).unwrap();

        assert!(output.contains("Score: 62.50%  Moderate match"));
        assert!(output.contains("Keyword coverage: 50.0%"));
        assert!(output.contains("python, sql"));
        assert!(output.contains("1. django"));
        assert!(output.contains("2. aws"));
        assert!(output.contains("truncated"));
        assert!(output.contains("Key Job Terms"));
        assert!(output.contains("<mark>Python</mark> and <mark>SQL</mark>"));
    }

    #[test]
    fn test_console_hides_details_by_default() {
        let output = ConsoleFormatter::new(false, false, false).format_report(&sample_report()).unwrap();
        assert!(!output.contains("Job Keywords"));
        assert!(!output.contains("<mark>"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["verdict"], "moderate");
        assert_eq!(value["analysis"]["result"]["missing_keywords"][0], "django");
        assert_eq!(value["analysis"]["result"]["matching_keywords"][1], "sql");
        assert_eq!(value["metadata"]["encoder"], "test-encoder");
    }

    #[test]
    fn test_formatter_selection() {
        assert_eq!(formatter_for(OutputFormat::Json, false, false, false).supports_format(), OutputFormat::Json);
        assert_eq!(formatter_for(OutputFormat::Console, true, false, false).supports_format(), OutputFormat::Console);
    }

    #[test]
    fn test_save_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("reports").join("match.json");
        save_report("{}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
