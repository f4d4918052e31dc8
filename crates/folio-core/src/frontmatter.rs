//! Frontmatter parsing for content files.

use std::{fmt, path::Path};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};

use crate::{
    action::ActionListItem,
    error::{CoreError, Result},
};

/// Frontmatter metadata of a project document.
///
/// Every key is optional; absent keys take their empty default so page
/// renderers never have to deal with missing metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProjectMetadata {
    /// Project title.
    #[serde(default)]
    pub title: String,

    /// Publication date as written (`2024-03-01` or RFC 3339).
    #[serde(default, alias = "publishedAt", deserialize_with = "deserialize_date")]
    pub published_at: Option<String>,

    /// One-line summary for cards and meta tags.
    #[serde(default)]
    pub summary: String,

    /// Social preview image.
    #[serde(default)]
    pub image: String,

    /// Gallery images; the first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub tag: Option<String>,

    /// People who worked on the project.
    #[serde(default)]
    pub team: Vec<TeamMember>,

    /// Source code URL.
    #[serde(default, alias = "codeLink")]
    pub code_link: String,

    /// Live project URL.
    #[serde(default)]
    pub link: String,

    /// Action list rendered below the document body.
    #[serde(default)]
    pub actions: Vec<ActionListItem>,

    /// Whether this is a draft.
    #[serde(default)]
    pub draft: bool,
}

/// A project team member.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub avatar: String,

    #[serde(default, alias = "linkedIn")]
    pub linked_in: String,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    // The closing delimiter must start a line
    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first
        .match_indices(delimiter)
        .map(|(pos, _)| pos)
        .find(|&pos| pos == 0 || after_first[..pos].ends_with('\n'))?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a string.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(ProjectMetadata, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((ProjectMetadata::default(), content.to_string()));
    };

    // An empty block is valid and means "all defaults"
    if fm_str.is_empty() {
        return Ok((ProjectMetadata::default(), body.to_string()));
    }

    let metadata: ProjectMetadata = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((metadata, body.to_string()))
}

impl ProjectMetadata {
    /// Validate required fields.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::frontmatter(path, "title is required"));
        }
        Ok(())
    }

    /// Publication date, if `published_at` holds a recognizable date.
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.published_at.as_deref()?.trim();

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
    }

    /// Cover image: the first gallery image.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str).filter(|s| !s.is_empty())
    }
}

/// Accepts a quoted date string or a bare TOML date (`published_at = 2023-11-02`),
/// keeping it as written.
fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DateVisitor;

    impl<'de> Visitor<'de> for DateVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a date string or a TOML date")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> std::result::Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_map<A>(self, map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let date = toml::value::Datetime::deserialize(de::value::MapAccessDeserializer::new(map))?;
            Ok(Some(date.to_string()))
        }
    }

    deserializer.deserialize_any(DateVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
title: "Hello World"
publishedAt: "2024-01-14"
---

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert!(fm.contains("title:"));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_toml_frontmatter() {
        let content = r#"+++
title = "Hello World"
+++

This is the body content."#;

        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Toml);
        assert!(fm.contains("title ="));
        assert!(body.starts_with("This is the body"));
    }

    #[test]
    fn test_split_ignores_delimiter_inside_line() {
        let content = "---\ntitle: \"a---b\"\n---\nBody";
        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "title: \"a---b\"");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just some content without frontmatter.";
        assert!(split_frontmatter(content).is_none());

        let (meta, body) = parse_frontmatter(content, Path::new("plain.mdx")).expect("parse");
        assert_eq!(meta, ProjectMetadata::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_camel_case_keys() {
        let content = r#"---
title: "Drupal 11 Portfolio"
publishedAt: "2024-04-01"
summary: "A portfolio built with Drupal 11"
images:
  - "/images/projects/portfolio/cover.jpg"
  - "/images/projects/portfolio/detail.jpg"
codeLink: "https://gitlab.com/me/portfolio"
team:
  - name: "Ada"
    role: "Developer"
    avatar: "/images/avatar.jpg"
    linkedIn: "https://linkedin.com/in/ada"
---

Content here."#;

        let (meta, body) = parse_frontmatter(content, Path::new("portfolio.mdx")).expect("parse");

        assert_eq!(meta.title, "Drupal 11 Portfolio");
        assert_eq!(meta.published_at.as_deref(), Some("2024-04-01"));
        assert_eq!(meta.summary, "A portfolio built with Drupal 11");
        assert_eq!(meta.images.len(), 2);
        assert_eq!(meta.cover_image(), Some("/images/projects/portfolio/cover.jpg"));
        assert_eq!(meta.code_link, "https://gitlab.com/me/portfolio");
        assert_eq!(meta.team[0].linked_in, "https://linkedin.com/in/ada");
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = r#"+++
title = "Test Project"
draft = true
published_at = "2023-11-02"
+++

Content here."#;

        let (meta, body) = parse_frontmatter(content, Path::new("test.md")).expect("parse");

        assert_eq!(meta.title, "Test Project");
        assert!(meta.draft);
        assert_eq!(
            meta.published_date(),
            NaiveDate::from_ymd_opt(2023, 11, 2)
        );
        assert_eq!(body, "Content here.");
    }

    #[test]
    fn test_parse_toml_bare_dates() {
        let content = "+++\ntitle = \"T\"\npublished_at = 2023-11-02\n+++\n\nBody";
        let (meta, _) = parse_frontmatter(content, Path::new("t.md")).expect("parse");
        assert_eq!(meta.published_at.as_deref(), Some("2023-11-02"));
        assert_eq!(meta.published_date(), NaiveDate::from_ymd_opt(2023, 11, 2));

        let content = "+++\ntitle = \"T\"\npublishedAt = 2024-01-05T10:00:00Z\n+++\n";
        let (meta, _) = parse_frontmatter(content, Path::new("t.md")).expect("parse");
        assert_eq!(meta.published_date(), NaiveDate::from_ymd_opt(2024, 1, 5));

        let content = "+++\ntitle = \"T\"\npublished_at = 2024-02-03T08:30:00\n+++\n";
        let (meta, _) = parse_frontmatter(content, Path::new("t.md")).expect("parse");
        assert_eq!(meta.published_date(), NaiveDate::from_ymd_opt(2024, 2, 3));
    }

    #[test]
    fn test_yaml_null_and_bare_dates() {
        let (meta, _) =
            parse_frontmatter("---\ntitle: T\npublishedAt: ~\n---\n", Path::new("t.mdx"))
                .expect("parse");
        assert!(meta.published_at.is_none());

        let (meta, _) =
            parse_frontmatter("---\ntitle: T\npublishedAt: 2024-04-01\n---\n", Path::new("t.mdx"))
                .expect("parse");
        assert_eq!(meta.published_date(), NaiveDate::from_ymd_opt(2024, 4, 1));
    }

    #[test]
    fn test_metadata_defaults() {
        let content = "---\ntitle: \"Minimal\"\n---\n\nBody";
        let (meta, _) = parse_frontmatter(content, Path::new("test.mdx")).expect("parse");

        assert_eq!(meta.title, "Minimal");
        assert!(meta.published_at.is_none());
        assert!(meta.summary.is_empty());
        assert!(meta.image.is_empty());
        assert!(meta.images.is_empty());
        assert!(meta.team.is_empty());
        assert!(meta.code_link.is_empty());
        assert!(meta.link.is_empty());
        assert!(meta.actions.is_empty());
        assert!(!meta.draft);
        assert!(meta.cover_image().is_none());
    }

    #[test]
    fn test_empty_frontmatter_block() {
        let content = "---\n---\nBody only";
        let (meta, body) = parse_frontmatter(content, Path::new("empty.mdx")).expect("parse");
        assert!(meta.title.is_empty());
        assert_eq!(body, "Body only");
    }

    #[test]
    fn test_malformed_frontmatter_names_file() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse_frontmatter(content, Path::new("broken.mdx")).unwrap_err();
        assert!(err.to_string().contains("broken.mdx"));
    }

    #[test]
    fn test_published_date_formats() {
        let mut meta = ProjectMetadata {
            published_at: Some("2024-01-05T10:00:00Z".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.published_date(), NaiveDate::from_ymd_opt(2024, 1, 5));

        meta.published_at = Some("sometime in 2024".to_string());
        assert!(meta.published_date().is_none());

        meta.published_at = None;
        assert!(meta.published_date().is_none());
    }

    #[test]
    fn test_validate_missing_title() {
        let meta = ProjectMetadata::default();
        let result = meta.validate(Path::new("test.mdx"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("title"));
    }
}
