//! Markdown and MDX rendering using pulldown-cmark.

use std::{collections::HashMap, path::Path};

use folio_core::{
    content::{ContentType, ParsedContent, TocEntry},
    frontmatter::parse_frontmatter,
};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use thiserror::Error;

use crate::syntax::SyntaxHighlighter;

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse frontmatter.
    #[error("frontmatter error: {0}")]
    Frontmatter(#[from] folio_core::error::CoreError),
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Markdown parser with syntax highlighting support.
#[derive(Debug)]
pub struct MarkdownParser {
    highlighter: SyntaxHighlighter,
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Heading being rendered; its markup is buffered until the id is known.
struct OpenHeading {
    level: HeadingLevel,
    explicit_id: Option<String>,
    text: String,
    html: String,
}

/// Image being rendered; its alt text is collected from the inner events.
struct OpenImage {
    src: String,
    title: String,
    alt: String,
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self {
            highlighter: SyntaxHighlighter::default(),
            options,
        }
    }

    /// Create a parser with a custom syntax theme.
    pub fn with_theme(theme: &str) -> Self {
        let mut parser = Self::new();
        parser.highlighter.set_theme(theme);
        parser
    }

    /// Parse a document with frontmatter.
    ///
    /// For `.mdx` files, top-level `import`/`export` statements are dropped
    /// before rendering; JSX elements pass through as raw HTML.
    pub fn parse(&self, content: &str, path: &Path) -> Result<ParsedContent> {
        let (metadata, body) = parse_frontmatter(content, path)?;

        let source = match ContentType::from_path(path) {
            Some(ContentType::Mdx) => strip_mdx_statements(&body),
            _ => body.clone(),
        };
        let (html, toc) = self.render_markdown(&source);

        Ok(ParsedContent {
            metadata,
            html,
            raw: body,
            toc,
        })
    }

    /// Render a body without frontmatter.
    pub fn parse_body(&self, body: &str) -> (String, Vec<TocEntry>) {
        self.render_markdown(body)
    }

    /// Render markdown to HTML with TOC extraction.
    fn render_markdown(&self, content: &str) -> (String, Vec<TocEntry>) {
        let parser = Parser::new_ext(content, self.options);
        let mut toc = Vec::new();
        let mut html = String::new();
        let mut used_ids: HashMap<String, usize> = HashMap::new();

        let mut heading: Option<OpenHeading> = None;
        let mut image: Option<OpenImage> = None;
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            // Alt text collects everything nested inside an image
            if let Some(img) = image.as_mut() {
                match event {
                    Event::End(TagEnd::Image) => {
                        let img = image.take().map(|img| render_image(&img)).unwrap_or_default();
                        push_html(&mut html, heading.as_mut(), &img);
                    }
                    Event::Text(text) | Event::Code(text) => img.alt.push_str(&text),
                    _ => {}
                }
                continue;
            }

            if let Some((_, code)) = code_block.as_mut() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        if let Some((lang, code)) = code_block.take() {
                            html.push_str(&self.highlighter.highlight(&code, lang.as_deref()));
                        }
                    }
                    Event::Text(text) => code.push_str(&text),
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    heading = Some(OpenHeading {
                        level,
                        explicit_id: id.map(|i| i.to_string()),
                        text: String::new(),
                        html: String::new(),
                    });
                }

                Event::End(TagEnd::Heading(_)) => {
                    if let Some(open) = heading.take() {
                        let base = open
                            .explicit_id
                            .clone()
                            .unwrap_or_else(|| slugify(&open.text));
                        let id = unique_id(&mut used_ids, base);
                        let lvl = open.level as u8;

                        html.push_str(&format!("<h{lvl} id=\"{id}\">{}</h{lvl}>\n", open.html));
                        toc.push(TocEntry {
                            level: lvl,
                            text: open.text.trim().to_string(),
                            id,
                        });
                    }
                }

                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string)
                            .filter(|l| !l.is_empty()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }

                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    image = Some(OpenImage {
                        src: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                    });
                }

                Event::Text(text) => {
                    if let Some(open) = heading.as_mut() {
                        open.text.push_str(&text);
                    }
                    push_html(&mut html, heading.as_mut(), &html_escape(&text));
                }

                Event::Code(code) => {
                    if let Some(open) = heading.as_mut() {
                        open.text.push_str(&code);
                    }
                    let markup = format!("<code>{}</code>", html_escape(&code));
                    push_html(&mut html, heading.as_mut(), &markup);
                }

                Event::SoftBreak => push_html(&mut html, heading.as_mut(), "\n"),
                Event::HardBreak => push_html(&mut html, heading.as_mut(), "<br />\n"),

                Event::Start(tag) => {
                    push_html(&mut html, heading.as_mut(), &tag_to_html_start(&tag));
                }

                Event::End(tag) => {
                    push_html(&mut html, heading.as_mut(), &tag_to_html_end(&tag));
                }

                Event::Html(raw) | Event::InlineHtml(raw) => {
                    push_html(&mut html, heading.as_mut(), &raw);
                }

                Event::FootnoteReference(name) => {
                    let markup = format!(
                        "<sup class=\"footnote-ref\"><a href=\"#fn-{name}\">[{name}]</a></sup>"
                    );
                    push_html(&mut html, heading.as_mut(), &markup);
                }

                Event::Rule => html.push_str("<hr />\n"),

                Event::TaskListMarker(checked) => {
                    html.push_str(if checked {
                        "<input type=\"checkbox\" checked disabled />"
                    } else {
                        "<input type=\"checkbox\" disabled />"
                    });
                }

                Event::InlineMath(math) => {
                    html.push_str(&format!("<span class=\"math inline\">\\({math}\\)</span>"));
                }

                Event::DisplayMath(math) => {
                    html.push_str(&format!("<div class=\"math display\">\\[{math}\\]</div>"));
                }
            }
        }

        (html, toc)
    }
}

fn push_html(out: &mut String, heading: Option<&mut OpenHeading>, markup: &str) {
    match heading {
        Some(open) => open.html.push_str(markup),
        None => out.push_str(markup),
    }
}

fn render_image(img: &OpenImage) -> String {
    let title_attr = if img.title.is_empty() {
        String::new()
    } else {
        format!(" title=\"{}\"", html_escape(&img.title))
    };
    format!(
        "<img src=\"{}\" alt=\"{}\"{title_attr} loading=\"lazy\" />",
        html_escape(&img.src),
        html_escape(&img.alt)
    )
}

/// Heading id not yet taken on this page.
///
/// `used` maps every emitted id to the last suffix tried for it, so an
/// explicit `{#overview-1}` never collides with a generated one.
fn unique_id(used: &mut HashMap<String, usize>, base: String) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let mut id = base.clone();
    if let Some(&last) = used.get(&base) {
        let mut n = last;
        loop {
            n += 1;
            id = format!("{base}-{n}");
            if !used.contains_key(&id) {
                break;
            }
        }
        used.insert(base, n);
    }

    used.entry(id.clone()).or_insert(0);
    id
}

/// Drop MDX `import`/`export` statements outside of fenced code.
///
/// A statement spans lines while its brackets are open, so a multi-line
/// `import { A, B } from "x";` goes as a whole.
fn strip_mdx_statements(body: &str) -> String {
    let mut in_fence = false;
    let mut open_brackets: Option<i32> = None;
    let mut kept = Vec::new();

    for line in body.lines() {
        if let Some(depth) = open_brackets.as_mut() {
            *depth += bracket_delta(line);
            if *depth <= 0 {
                open_brackets = None;
            }
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        } else if !in_fence && (line.starts_with("import ") || line.starts_with("export ")) {
            let depth = bracket_delta(line);
            if depth > 0 {
                open_brackets = Some(depth);
            }
            continue;
        }

        kept.push(line);
    }

    kept.join("\n")
}

fn bracket_delta(line: &str) -> i32 {
    line.chars()
        .map(|c| match c {
            '{' | '(' | '[' => 1,
            '}' | ')' | ']' => -1,
            _ => 0,
        })
        .sum()
}

/// Convert a pulldown-cmark tag to HTML opening tag.
fn tag_to_html_start(tag: &Tag) -> String {
    match tag {
        Tag::Paragraph => "<p>".to_string(),
        Tag::Heading { level, .. } => format!("<h{}>", *level as u8),
        Tag::BlockQuote(_) => "<blockquote>".to_string(),
        Tag::CodeBlock(_) | Tag::Image { .. } => String::new(),
        Tag::List(Some(start)) => format!("<ol start=\"{start}\">"),
        Tag::List(None) => "<ul>".to_string(),
        Tag::Item => "<li>".to_string(),
        Tag::FootnoteDefinition(name) => {
            format!("<div class=\"footnote\" id=\"fn-{name}\">")
        }
        Tag::Table(_) => "<table>".to_string(),
        Tag::TableHead => "<thead><tr>".to_string(),
        Tag::TableRow => "<tr>".to_string(),
        Tag::TableCell => "<td>".to_string(),
        Tag::Emphasis => "<em>".to_string(),
        Tag::Strong => "<strong>".to_string(),
        Tag::Strikethrough => "<del>".to_string(),
        Tag::Link {
            dest_url, title, ..
        } => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(" title=\"{}\"", html_escape(title))
            };
            let target = if dest_url.starts_with("http://") || dest_url.starts_with("https://") {
                " target=\"_blank\" rel=\"noopener noreferrer\""
            } else {
                ""
            };
            format!("<a href=\"{}\"{title_attr}{target}>", html_escape(dest_url))
        }
        Tag::HtmlBlock => String::new(),
        Tag::MetadataBlock(_) => String::new(),
        Tag::DefinitionList => "<dl>".to_string(),
        Tag::DefinitionListTitle => "<dt>".to_string(),
        Tag::DefinitionListDefinition => "<dd>".to_string(),
        Tag::Superscript => "<sup>".to_string(),
        Tag::Subscript => "<sub>".to_string(),
    }
}

/// Convert a pulldown-cmark tag end to HTML closing tag.
fn tag_to_html_end(tag: &TagEnd) -> String {
    match tag {
        TagEnd::Paragraph => "</p>\n".to_string(),
        TagEnd::Heading(level) => format!("</h{}>\n", *level as u8),
        TagEnd::BlockQuote(_) => "</blockquote>\n".to_string(),
        TagEnd::CodeBlock | TagEnd::Image => String::new(),
        TagEnd::List(ordered) => {
            if *ordered {
                "</ol>\n".to_string()
            } else {
                "</ul>\n".to_string()
            }
        }
        TagEnd::Item => "</li>\n".to_string(),
        TagEnd::FootnoteDefinition => "</div>\n".to_string(),
        TagEnd::Table => "</table>\n".to_string(),
        TagEnd::TableHead => "</tr></thead>\n".to_string(),
        TagEnd::TableRow => "</tr>\n".to_string(),
        TagEnd::TableCell => "</td>".to_string(),
        TagEnd::Emphasis => "</em>".to_string(),
        TagEnd::Strong => "</strong>".to_string(),
        TagEnd::Strikethrough => "</del>".to_string(),
        TagEnd::Link => "</a>".to_string(),
        TagEnd::HtmlBlock => String::new(),
        TagEnd::MetadataBlock(_) => String::new(),
        TagEnd::DefinitionList => "</dl>\n".to_string(),
        TagEnd::DefinitionListTitle => "</dt>\n".to_string(),
        TagEnd::DefinitionListDefinition => "</dd>\n".to_string(),
        TagEnd::Superscript => "</sup>".to_string(),
        TagEnd::Subscript => "</sub>".to_string(),
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_document() {
        let parser = MarkdownParser::new();
        let content = r#"---
title: "Drupal Portfolio"
publishedAt: "2024-04-01"
---

# Overview

This is a test."#;

        let result = parser.parse(content, Path::new("portfolio.mdx")).unwrap();

        assert_eq!(result.metadata.title, "Drupal Portfolio");
        assert!(result.html.contains("<h1 id=\"overview\">Overview</h1>"));
        assert!(result.html.contains("<p>This is a test.</p>"));
        assert!(result.raw.starts_with("# Overview"));
    }

    #[test]
    fn test_parse_code_block() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body(
            r#"```rust
fn main() {
    println!("Hello");
}
```"#,
        );

        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_indented_code_block_is_not_paragraph_text() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body("Intro\n\n    let x = 1;\n");

        assert!(html.contains("<pre"));
        assert!(!html.contains("<p>let x"));
    }

    #[test]
    fn test_toc_extraction() {
        let parser = MarkdownParser::new();
        let (html, toc) = parser.parse_body(
            r#"# Heading 1
## Heading `2`
### Heading 3 {#custom}"#,
        );

        assert_eq!(toc.len(), 3);
        assert_eq!(toc[0].level, 1);
        assert_eq!(toc[0].text, "Heading 1");
        assert_eq!(toc[0].id, "heading-1");
        assert_eq!(toc[1].text, "Heading 2");
        assert_eq!(toc[2].id, "custom");
        assert!(html.contains("<h2 id=\"heading-2\">Heading <code>2</code></h2>"));
        assert!(html.contains("<h3 id=\"custom\">"));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let parser = MarkdownParser::new();
        let (_, toc) = parser.parse_body("## Results\n\n## Results\n\n## Results");

        let ids: Vec<_> = toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["results", "results-1", "results-2"]);
    }

    #[test]
    fn test_image_alt_text() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body("![Home *page*](/images/home.png \"Cover\")");

        assert!(html.contains(
            "<img src=\"/images/home.png\" alt=\"Home page\" title=\"Cover\" loading=\"lazy\" />"
        ));
    }

    #[test]
    fn test_links() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body("[docs](https://drupal.org) and [about](/about)");

        assert!(html.contains(
            "<a href=\"https://drupal.org\" target=\"_blank\" rel=\"noopener noreferrer\">docs</a>"
        ));
        assert!(html.contains("<a href=\"/about\">about</a>"));
    }

    #[test]
    fn test_mdx_statements_stripped() {
        let parser = MarkdownParser::new();
        let content = r#"---
title: "MDX"
---
import { Chart } from "@/components";

Text

```js
import x from "y";
```"#;

        let result = parser.parse(content, Path::new("chart.mdx")).unwrap();
        assert!(!result.html.contains("@/components"));
        assert!(result.html.contains("import"));
        assert!(result.raw.contains("@/components"));
    }

    #[test]
    fn test_multiline_mdx_import_stripped() {
        let parser = MarkdownParser::new();
        let content = "---\ntitle: \"MDX\"\n---\nimport {\n  Media,\n  Text,\n} from \"@once-ui-system/core\";\nexport const meta = {\n  layout: \"wide\",\n};\n\n## Hello\n\n```js\nimport {\n  kept,\n} from \"z\";\n```";

        let result = parser.parse(content, Path::new("hello.mdx")).unwrap();
        assert!(!result.html.contains("Media"));
        assert!(!result.html.contains("once-ui-system"));
        assert!(!result.html.contains("layout"));
        assert!(result.html.starts_with("<h2 id=\"hello\">Hello</h2>"));
        assert!(result.html.contains("kept"));
    }

    #[test]
    fn test_explicit_id_does_not_collide() {
        let parser = MarkdownParser::new();
        let (html, toc) =
            parser.parse_body("## Overview\n\n## Overview\n\n## Later {#overview-1}\n\n## Overview");

        let ids: Vec<_> = toc.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["overview", "overview-1", "overview-1-1", "overview-2"]);
        assert_eq!(html.matches("id=\"overview-1\"").count(), 1);
    }

    #[test]
    fn test_raw_html_passthrough() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body("<div class=\"callout\">Note</div>");
        assert!(html.contains("<div class=\"callout\">Note</div>"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test 123 Post"), "test-123-post");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
    }

    #[test]
    fn test_table_rendering() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body(
            r#"| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |"#,
        );

        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert!(html.contains("<td>"));
    }

    #[test]
    fn test_task_list() {
        let parser = MarkdownParser::new();
        let (html, _) = parser.parse_body("- [x] Done\n- [ ] Not done");

        assert!(html.contains("checkbox"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_no_frontmatter() {
        let parser = MarkdownParser::new();
        let content = "# Just Content\n\nNo frontmatter here.";
        let result = parser.parse(content, Path::new("test.md")).unwrap();

        assert!(result.metadata.title.is_empty());
        assert!(result.html.contains("Just Content"));
    }
}
