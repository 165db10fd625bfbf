//! Text extraction from various file formats

use crate::error::{MatcherError, Result};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// PDF text via pdf-extract, with an upper bound on file size
pub struct PdfExtractor {
    pub max_bytes: u64,
}

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let size = fs::metadata(path).await?.len();
        if size > self.max_bytes {
            return Err(MatcherError::FileTooLarge {
                path: path.display().to_string(),
                size,
                limit: self.max_bytes,
            });
        }

        let bytes = fs::read(path).await?;
        if !bytes.starts_with(b"%PDF-") {
            return Err(MatcherError::PdfExtraction(format!(
                "'{}' is not a PDF document",
                path.display()
            )));
        }

        // pdf-extract can panic on malformed documents; a blocking task contains it
        let display = path.display().to_string();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| MatcherError::PdfExtraction(format!("Extraction of '{}' aborted: {}", display, e)))?
            .map_err(|e| MatcherError::PdfExtraction(format!("Failed to extract text from '{}': {}", display, e)))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Keep text and code spans, drop markup and inline HTML
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(tag) => {
                if matches!(tag, Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# John Doe\n\n**Software Engineer** with `Node.js`\n\n- React\n- <b>Docker</b>\n";
        let text = markdown_to_text(markdown);

        assert_eq!(text, "John Doe\nSoftware Engineer with Node.js\nReact\nDocker");
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
        assert!(!text.contains("<b>"));
    }
}
