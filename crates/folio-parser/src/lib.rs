//! Folio Parser Library
//!
//! Renders Markdown and MDX project documents to HTML.

pub mod markdown;
pub mod syntax;

use std::path::Path;

use folio_core::content::{ContentType, ParsedContent};
pub use markdown::{MarkdownParser, slugify};
pub use syntax::SyntaxHighlighter;
use thiserror::Error;

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Markdown parsing error.
    #[error("markdown error: {0}")]
    Markdown(#[from] markdown::MarkdownError),

    /// Unknown file extension.
    #[error("unknown file extension: {0}")]
    UnknownExtension(String),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Trait for content parsers.
pub trait ContentParser {
    /// Parse content from a string and file path.
    fn parse(&self, content: &str, path: &Path) -> Result<ParsedContent>;
}

impl ContentParser for MarkdownParser {
    fn parse(&self, content: &str, path: &Path) -> Result<ParsedContent> {
        Ok(self.parse(content, path)?)
    }
}

/// Parser front door: picks the parser from the file extension.
#[derive(Debug, Default)]
pub struct ParserRegistry {
    markdown: MarkdownParser,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser registry with a custom syntax theme.
    pub fn with_theme(theme: &str) -> Self {
        Self {
            markdown: MarkdownParser::with_theme(theme),
        }
    }

    /// Parse content, auto-detecting the parser from file extension.
    pub fn parse(&self, content: &str, path: &Path) -> Result<ParsedContent> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ParserError::UnknownExtension("(none)".to_string()))?;

        match ContentType::from_extension(ext) {
            Some(ContentType::Mdx | ContentType::Markdown) => {
                ContentParser::parse(&self.markdown, content, path)
            }
            None => Err(ParserError::UnknownExtension(ext.to_string())),
        }
    }

    /// Render a markdown fragment, e.g. dialog content.
    pub fn render_fragment(&self, body: &str) -> String {
        self.markdown.parse_body(body).0
    }

    pub fn markdown(&self) -> &MarkdownParser {
        &self.markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_mdx() {
        let registry = ParserRegistry::new();
        let content = r#"---
title: "Test"
---

# Hello"#;

        let result = registry.parse(content, Path::new("test.mdx")).unwrap();
        assert_eq!(result.metadata.title, "Test");
        assert_eq!(result.toc.len(), 1);
    }

    #[test]
    fn test_registry_markdown() {
        let registry = ParserRegistry::with_theme("InspiredGitHub");
        let result = registry
            .parse("+++\ntitle = \"Toml\"\n+++\nBody", Path::new("notes.md"))
            .unwrap();
        assert_eq!(result.metadata.title, "Toml");
    }

    #[test]
    fn test_registry_unknown_extension() {
        let registry = ParserRegistry::new();
        let result = registry.parse("content", Path::new("test.xyz"));
        assert!(matches!(result, Err(ParserError::UnknownExtension(ext)) if ext == "xyz"));

        let result = registry.parse("content", Path::new("README"));
        assert!(matches!(result, Err(ParserError::UnknownExtension(_))));
    }

    #[test]
    fn test_registry_frontmatter_error() {
        let registry = ParserRegistry::new();
        let result = registry.parse("---\ntitle: [\n---\nBody", Path::new("bad.mdx"));
        assert!(matches!(result, Err(ParserError::Markdown(_))));
    }

    #[test]
    fn test_render_fragment() {
        let registry = ParserRegistry::new();
        let html = registry.render_fragment("Some **markdown**");
        assert_eq!(html, "<p>Some <strong>markdown</strong></p>\n");
    }
}
