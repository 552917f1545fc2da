//! Text extraction from plain text and Markdown files

use crate::error::Result;
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::to_plain_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    /// Render Markdown as plain text, one blank line between paragraphs and headings.
    pub fn to_plain_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::Start(Tag::Item) => text.push_str("- "),
                Event::End(Tag::Item) => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::List(_))
                | Event::End(Tag::CodeBlock(_))
                | Event::Rule => text.push_str("\n\n"),
                _ => {}
            }
        }

        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_plain_text() {
        let markdown = "# Jane Roe\n\n## Experience\n\n**Acme Corp** built `Rust` services.\n\n- Led team\n- Shipped API\n";
        let text = MarkdownExtractor::to_plain_text(markdown);

        assert_eq!(
            text,
            "Jane Roe\n\nExperience\n\nAcme Corp built Rust services.\n\n- Led team\n- Shipped API"
        );
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }
}
