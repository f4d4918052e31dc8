//! Build orchestration.
//!
//! Coordinates the full site build: collect projects, render every page,
//! then write sitemap, feed, robots.txt and static assets.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use folio_core::{Config, Post};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{AssetCopier, AssetError},
    collector::{CollectorError, ContentCollector, SiteContent},
    html::{HtmlError, HtmlGenerator},
    robots::{RobotsError, RobotsGenerator},
    rss::{RssError, RssGenerator},
    sitemap::{SitemapError, SitemapGenerator},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// RSS generation error.
    #[error("RSS error: {0}")]
    Rss(#[from] RssError),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    #[error("robots error: {0}")]
    Robots(#[from] RobotsError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of HTML pages written.
    pub pages: usize,

    /// Number of projects collected.
    pub projects: usize,

    /// Number of static files copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// A page of the site, before rendering.
#[derive(Debug, Clone, Copy)]
enum Page<'a> {
    Home,
    About,
    Work,
    Project(&'a Post),
    NotFound,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    root: PathBuf,
    include_drafts: bool,
    live_reload: Option<String>,
}

impl Builder {
    /// Create a builder for the site rooted at `root`.
    #[must_use]
    pub fn new(config: Config, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            include_drafts: false,
            live_reload: None,
        }
    }

    #[must_use]
    pub fn include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    /// Inject `script` at the end of every page.
    #[must_use]
    pub fn with_live_reload(mut self, script: impl Into<String>) -> Self {
        self.live_reload = Some(script.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir(&self.root)
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let output_dir = self.output_dir();

        info!(
            root = %self.root.display(),
            output = %output_dir.display(),
            drafts = self.include_drafts,
            "starting build"
        );

        let content = ContentCollector::new(&self.config, self.config.projects_dir(&self.root))
            .include_drafts(self.include_drafts)
            .collect()?;

        clean_output(&output_dir)?;

        let mut stats = BuildStats {
            projects: content.len(),
            pages: self.generate_pages(&content, &output_dir)?,
            ..Default::default()
        };

        let mut sitemap = fs::File::create(output_dir.join("sitemap.xml"))?;
        SitemapGenerator::new(self.config.clone()).write_to(&content, &mut sitemap)?;

        if self.config.rss.enabled {
            let mut file = fs::File::create(output_dir.join("rss.xml"))?;
            RssGenerator::new(self.config.clone()).write_to(&content, &mut file)?;
        }

        RobotsGenerator::new(self.config.clone()).generate(&output_dir)?;

        stats.assets = AssetCopier::new().copy(&self.config.static_dir(&self.root), &output_dir)?;
        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            projects = stats.projects,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Render and write every page in parallel; returns the number written.
    fn generate_pages(&self, content: &SiteContent, output_dir: &Path) -> Result<usize> {
        let mut generator = HtmlGenerator::new(self.config.clone());
        if let Some(script) = &self.live_reload {
            generator.set_live_reload_script(script.as_str());
        }

        let mut pages = vec![Page::Home, Page::About, Page::Work, Page::NotFound];
        pages.extend(content.projects.iter().map(Page::Project));

        info!(count = pages.len(), "generating HTML pages");

        let results: Vec<_> = pages
            .par_iter()
            .map(|page| {
                let (route, html) = self.render(&generator, *page, content)?;
                let output_path = HtmlGenerator::output_path(&route, output_dir);

                if let Some(parent) = output_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_path, html)?;

                debug!(path = %output_path.display(), "wrote page");
                Ok::<_, BuildError>(())
            })
            .collect();

        let mut count = 0;
        for result in results {
            match result {
                Ok(()) => count += 1,
                Err(e) => warn!(error = %e, "failed to generate page"),
            }
        }

        Ok(count)
    }

    fn render(
        &self,
        generator: &HtmlGenerator,
        page: Page<'_>,
        content: &SiteContent,
    ) -> Result<(String, String)> {
        let config = &self.config;
        Ok(match page {
            Page::Home => (config.home.path.clone(), generator.generate_home(content)?),
            Page::About => (config.about.path.clone(), generator.generate_about()?),
            Page::Work => (
                config.work.path.clone(),
                generator.generate_work_index(content)?,
            ),
            Page::Project(post) => (
                config.project_url(post.slug.as_str()),
                generator.generate_project(post, content)?,
            ),
            Page::NotFound => ("/404.html".to_string(), generator.generate_not_found()?),
        })
    }
}

/// Remove and recreate the output directory.
fn clean_output(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        debug!(dir = %output_dir.display(), "cleaning output directory");
        fs::remove_dir_all(output_dir)?;
    }
    fs::create_dir_all(output_dir)?;
    Ok(())
}
