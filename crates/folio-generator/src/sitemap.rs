//! Sitemap generation.

use std::io::Write;

use chrono::NaiveDate;
use folio_core::Config;
use thiserror::Error;
use tracing::debug;

use crate::collector::SiteContent;

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFreq {
    fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<NaiveDate>,
    pub changefreq: ChangeFreq,
    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Entries for every generated page: home, about, work index, projects.
    pub fn urls(&self, content: &SiteContent) -> Vec<SitemapUrl> {
        let entry = |route: &str, lastmod, changefreq, priority| SitemapUrl {
            loc: self.config.url_for(route),
            lastmod,
            changefreq,
            priority,
        };

        let mut urls = vec![
            entry(&self.config.home.path, None, ChangeFreq::Weekly, 1.0),
            entry(&self.config.about.path, None, ChangeFreq::Monthly, 0.8),
            entry(&self.config.work.path, None, ChangeFreq::Monthly, 0.8),
        ];

        urls.extend(content.projects.iter().map(|post| {
            entry(
                &self.config.project_url(post.slug.as_str()),
                post.published_date(),
                ChangeFreq::Yearly,
                0.6,
            )
        }));

        urls
    }

    /// Generate sitemap XML.
    pub fn generate(&self, content: &SiteContent) -> String {
        let urls = self.urls(content);
        debug!(count = urls.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in &urls {
            xml.push_str(&url_to_xml(url));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to a writer.
    pub fn write_to<W: Write>(&self, content: &SiteContent, writer: &mut W) -> Result<()> {
        writer.write_all(self.generate(content).as_bytes())?;
        Ok(())
    }
}

fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));

    if let Some(lastmod) = url.lastmod {
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            lastmod.format("%Y-%m-%d")
        ));
    }

    xml.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        url.changefreq.as_str()
    ));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));
    xml.push_str("  </url>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
