//! Content types and structures.

use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::frontmatter::ProjectMetadata;

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// MDX documents (.mdx files).
    Mdx,
    /// Markdown documents (.md files).
    Markdown,
}

impl ContentType {
    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mdx" => Some(Self::Mdx),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Determine content type from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the file extension for this content type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mdx => "mdx",
            Self::Markdown => "md",
        }
    }
}

/// Document identifier: the path relative to the content root, without
/// extension, always `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into().trim_matches('/').to_string())
    }

    /// Build a slug from a path relative to the content root.
    ///
    /// `design/ui/forms.mdx` becomes `design/ui/forms`. Returns `None` for
    /// paths that escape the root or have no file stem.
    pub fn from_relative_path(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;

        let mut segments = Vec::new();
        if let Some(parent) = path.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(part) => segments.push(part.to_str()?),
                    Component::CurDir => {}
                    _ => return None,
                }
            }
        }
        segments.push(stem);

        Some(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Whether the slug lives in a sub-directory.
    pub fn is_nested(&self) -> bool {
        self.0.contains('/')
    }

    /// First segment of a nested slug.
    pub fn parent(&self) -> Option<&str> {
        self.0.split_once('/').map(|(first, _)| first)
    }

    /// Number of directory levels above the document.
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// Whether `self` sits directly below `other`.
    pub fn is_child_of(&self, other: &Slug) -> bool {
        self.0
            .strip_prefix(other.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turn a slug segment into a display name: `ui-kit` → `Ui Kit`.
pub fn format_name(segment: &str) -> String {
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Long display date, e.g. `January 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Parsed content with metadata and rendered HTML.
#[derive(Debug, Clone)]
pub struct ParsedContent {
    /// Parsed frontmatter metadata.
    pub metadata: ProjectMetadata,

    /// Rendered HTML content.
    pub html: String,

    /// Raw source content (without frontmatter).
    pub raw: String,

    /// Table of contents extracted from headings.
    pub toc: Vec<TocEntry>,
}

/// Table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,

    /// Heading text.
    pub text: String,

    /// Anchor ID for linking.
    pub id: String,
}

/// A loaded project document, ready for the page renderers.
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: Slug,
    pub metadata: ProjectMetadata,
    /// Raw body without front matter.
    pub content: String,
    /// Rendered body.
    pub html: String,
    pub toc: Vec<TocEntry>,
    pub source_path: PathBuf,
}

impl Post {
    pub fn from_parsed(slug: Slug, parsed: ParsedContent, source_path: PathBuf) -> Self {
        Self {
            slug,
            metadata: parsed.metadata,
            content: parsed.raw,
            html: parsed.html,
            toc: parsed.toc,
            source_path,
        }
    }

    pub fn published_date(&self) -> Option<NaiveDate> {
        self.metadata.published_date()
    }

    /// Title, falling back to the formatted last slug segment.
    pub fn display_title(&self) -> String {
        if self.metadata.title.trim().is_empty() {
            self.slug
                .segments()
                .last()
                .map(format_name)
                .unwrap_or_default()
        } else {
            self.metadata.title.clone()
        }
    }
}
