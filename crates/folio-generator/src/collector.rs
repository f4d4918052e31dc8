//! Project collection.
//!
//! Walks a projects directory, parses every document and exposes the result
//! as [`Post`] records ordered by slug.

use std::{
    cmp::Ordering,
    fs,
    path::{Path, PathBuf},
};

use folio_core::{Config, ContentType, Post, Slug};
use folio_parser::ParserRegistry;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The projects directory does not exist.
    #[error("content directory not found: {0}")]
    NotFound(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parser error.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Path that cannot be turned into a slug.
    #[error("invalid content path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// 1-based inclusive window over a sorted project listing.
///
/// `end: None` runs to the last project, so `ProjectRange::starting_at(2)` is
/// "everything but the first".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl ProjectRange {
    pub fn new(start: usize, end: Option<usize>) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: usize) -> Self {
        Self { start, end: None }
    }

    pub fn single(position: usize) -> Self {
        Self {
            start: position,
            end: Some(position),
        }
    }

    fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start.saturating_sub(1).min(items.len());
        let end = self.end.unwrap_or(items.len()).min(items.len());
        if start >= end {
            &[]
        } else {
            &items[start..end]
        }
    }
}

/// Collected projects.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Every project, sorted by slug.
    pub projects: Vec<Post>,
}

impl SiteContent {
    pub fn new(mut projects: Vec<Post>) -> Self {
        projects.sort_by(|a, b| a.slug.cmp(&b.slug));
        Self { projects }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.projects.iter().find(|p| p.slug.as_str() == slug)
    }

    /// Projects stored directly in the projects directory.
    pub fn top_level(&self) -> Vec<&Post> {
        self.projects.iter().filter(|p| !p.slug.is_nested()).collect()
    }

    /// Projects one level below `slug`.
    pub fn children_of(&self, slug: &Slug) -> Vec<&Post> {
        self.projects
            .iter()
            .filter(|p| p.slug.is_child_of(slug))
            .collect()
    }

    /// Projects with a publication date, newest first.
    pub fn by_date(&self) -> Vec<&Post> {
        let mut dated: Vec<&Post> = self
            .projects
            .iter()
            .filter(|p| p.published_date().is_some())
            .collect();
        sort_newest_first(&mut dated);
        dated
    }
}

/// Listing used by project grids: drops `exclude`, sorts newest first,
/// then applies `range`.
pub fn select_projects<'a>(
    candidates: Vec<&'a Post>,
    exclude: &[&str],
    range: Option<ProjectRange>,
) -> Vec<&'a Post> {
    let mut listed: Vec<&Post> = candidates
        .into_iter()
        .filter(|p| !exclude.contains(&p.slug.as_str()))
        .collect();
    sort_newest_first(&mut listed);

    match range {
        Some(range) => range.apply(&listed).to_vec(),
        None => listed,
    }
}

/// Newest first; undated projects go last, ties fall back to slug order.
fn sort_newest_first(posts: &mut [&Post]) {
    posts.sort_by(|a, b| match (b.published_date(), a.published_date()) {
        (Some(b_date), Some(a_date)) => b_date.cmp(&a_date).then_with(|| a.slug.cmp(&b.slug)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.slug.cmp(&b.slug),
    });
}

/// Walks a projects directory and parses its documents.
#[derive(Debug)]
pub struct ContentCollector {
    parser: ParserRegistry,
    root: PathBuf,
    include_drafts: bool,
}

impl ContentCollector {
    /// Create a collector for `root`, highlighting code with the configured theme.
    #[must_use]
    pub fn new(config: &Config, root: impl Into<PathBuf>) -> Self {
        Self {
            parser: ParserRegistry::with_theme(&config.build.syntax_theme),
            root: root.into(),
            include_drafts: false,
        }
    }

    #[must_use]
    pub fn include_drafts(mut self, include: bool) -> Self {
        self.include_drafts = include;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every document below the root, at any depth.
    ///
    /// Slugs are relative paths: `project-a`, `design/colors`.
    pub fn collect_recursive(&self) -> Result<Vec<Post>> {
        self.ensure_root()?;
        info!(dir = %self.root.display(), "collecting projects");

        let mut files = Vec::new();
        walk_dir(&self.root, &mut files)?;
        self.parse_all(files)
    }

    /// Only the documents directly inside the root; slugs are file stems.
    pub fn collect_top_level(&self) -> Result<Vec<Post>> {
        self.ensure_root()?;

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && is_content_file(&path) {
                files.push(path);
            }
        }
        self.parse_all(files)
    }

    /// Collect recursively into a [`SiteContent`].
    pub fn collect(&self) -> Result<SiteContent> {
        let content = SiteContent::new(self.collect_recursive()?);
        info!(projects = content.len(), "project collection complete");
        Ok(content)
    }

    fn ensure_root(&self) -> Result<()> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(CollectorError::NotFound(self.root.clone()))
        }
    }

    fn parse_all(&self, files: Vec<PathBuf>) -> Result<Vec<Post>> {
        debug!(count = files.len(), "found content files");

        let mut posts: Vec<Post> = files
            .par_iter()
            .filter_map(|path| match self.parse_file(path) {
                Ok(post) if post.metadata.draft && !self.include_drafts => {
                    debug!(slug = %post.slug, "skipping draft");
                    None
                }
                Ok(post) => Some(post),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse file");
                    None
                }
            })
            .collect();

        posts.sort_by(|a, b| {
            a.slug
                .cmp(&b.slug)
                .then_with(|| source_rank(a).cmp(&source_rank(b)))
                .then_with(|| a.source_path.cmp(&b.source_path))
        });

        // `shop.mdx` and `shop.md` share a slug; the first after sorting wins
        posts.dedup_by(|dropped, kept| {
            let same = dropped.slug == kept.slug;
            if same {
                warn!(
                    slug = %kept.slug,
                    kept = %kept.source_path.display(),
                    ignored = %dropped.source_path.display(),
                    "duplicate slug"
                );
            }
            same
        });

        Ok(posts)
    }

    /// Parse a single document into a [`Post`].
    pub fn parse_file(&self, path: &Path) -> Result<Post> {
        debug!(path = %path.display(), "parsing file");

        let content = fs::read_to_string(path)?;

        let relative = path
            .strip_prefix(&self.root)
            .map_err(|_| CollectorError::InvalidPath(path.to_path_buf()))?;
        let slug = Slug::from_relative_path(relative)
            .ok_or_else(|| CollectorError::InvalidPath(path.to_path_buf()))?;

        let parsed = self
            .parser
            .parse(&content, path)
            .map_err(|e| CollectorError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Post::from_parsed(slug, parsed, path.to_path_buf()))
    }
}

/// `.mdx` sources take precedence over Markdown ones with the same slug.
fn source_rank(post: &Post) -> u8 {
    match ContentType::from_path(&post.source_path) {
        Some(ContentType::Mdx) => 0,
        _ => 1,
    }
}

fn is_content_file(path: &Path) -> bool {
    !is_hidden(path) && ContentType::from_path(path).is_some()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().starts_with('.'))
}

/// Recursively walk a directory for content files.
fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            if !is_hidden(&path) {
                walk_dir(&path, files)?;
            }
        } else if path.is_file() && is_content_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use folio_core::ProjectMetadata;
    use tempfile::TempDir;

    use super::*;

    fn test_config() -> Config {
        Config::from_toml_str(
            "[site]\nbase_url = \"https://example.com\"\n\n[person]\nname = \"Test Person\"\n",
        )
        .expect("config")
    }

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, body).expect("write");
    }

    fn doc(title: &str, date: Option<&str>) -> String {
        match date {
            Some(date) => format!("---\ntitle: \"{title}\"\npublishedAt: \"{date}\"\n---\n\n{title} body"),
            None => format!("---\ntitle: \"{title}\"\n---\n\n{title} body"),
        }
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path();
        write(root, "project-a.mdx", &doc("A", Some("2024-01-10")));
        write(root, "project-b.mdx", &doc("B", Some("2024-03-01")));
        write(root, "design.mdx", &doc("Design", Some("2023-06-01")));
        write(root, "design/colors.mdx", &doc("Colors", None));
        write(root, "design/ui/forms.mdx", &doc("Forms", Some("2022-01-01")));
        write(root, "notes.txt", "not content");
        write(root, ".hidden/secret.mdx", &doc("Secret", None));
        write(
            root,
            "wip.mdx",
            "---\ntitle: \"WIP\"\ndraft: true\n---\n\nSoon",
        );
        dir
    }

    fn post(slug: &str, date: Option<&str>) -> Post {
        Post {
            slug: Slug::new(slug),
            metadata: ProjectMetadata {
                title: slug.to_string(),
                published_at: date.map(str::to_string),
                ..Default::default()
            },
            content: String::new(),
            html: String::new(),
            toc: Vec::new(),
            source_path: PathBuf::from(format!("{slug}.mdx")),
        }
    }

    #[test]
    fn test_collect_recursive() {
        let dir = fixture();
        let collector = ContentCollector::new(&test_config(), dir.path());

        let posts = collector.collect_recursive().expect("collect");
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(
            slugs,
            vec!["design", "design/colors", "design/ui/forms", "project-a", "project-b"]
        );
        assert_eq!(posts[0].content, "Design body");
        assert!(posts[0].html.contains("<p>Design body</p>"));
    }

    #[test]
    fn test_collect_includes_drafts_when_asked() {
        let dir = fixture();
        let collector = ContentCollector::new(&test_config(), dir.path()).include_drafts(true);

        let posts = collector.collect_recursive().expect("collect");
        assert!(posts.iter().any(|p| p.slug.as_str() == "wip"));
    }

    #[test]
    fn test_collect_top_level() {
        let dir = fixture();
        let collector = ContentCollector::new(&test_config(), dir.path());

        let posts = collector.collect_top_level().expect("collect");
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();

        assert_eq!(slugs, vec!["design", "project-a", "project-b"]);
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let collector = ContentCollector::new(&test_config(), dir.path().join("missing"));

        assert!(matches!(
            collector.collect_recursive(),
            Err(CollectorError::NotFound(_))
        ));
        assert!(matches!(
            collector.collect_top_level(),
            Err(CollectorError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_slug_prefers_mdx() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "shop.md", &doc("Markdown shop", None));
        write(dir.path(), "shop.mdx", &doc("MDX shop", None));
        write(dir.path(), "shop.markdown", &doc("Other shop", None));

        let content = ContentCollector::new(&test_config(), dir.path())
            .collect()
            .expect("collect");

        assert_eq!(content.len(), 1);
        let shop = content.get("shop").expect("shop");
        assert_eq!(shop.metadata.title, "MDX shop");
        assert_eq!(shop.source_path, dir.path().join("shop.mdx"));
    }

    #[test]
    fn test_duplicate_slug_without_mdx_is_deterministic() {
        let dir = TempDir::new().expect("tempdir");
        write(dir.path(), "notes.md", &doc("From md", None));
        write(dir.path(), "notes.markdown", &doc("From markdown", None));

        for _ in 0..3 {
            let posts = ContentCollector::new(&test_config(), dir.path())
                .collect_recursive()
                .expect("collect");
            assert_eq!(posts.len(), 1);
            assert_eq!(posts[0].metadata.title, "From markdown");
        }
    }

    #[test]
    fn test_broken_file_is_skipped() {
        let dir = fixture();
        write(dir.path(), "broken.mdx", "---\ntitle: [oops\n---\nBody");
        let collector = ContentCollector::new(&test_config(), dir.path());

        let posts = collector.collect_recursive().expect("collect");
        assert!(posts.iter().all(|p| p.slug.as_str() != "broken"));
        assert_eq!(posts.len(), 5);
    }

    #[test]
    fn test_site_content_queries() {
        let dir = fixture();
        let content = ContentCollector::new(&test_config(), dir.path())
            .collect()
            .expect("collect");

        assert_eq!(content.len(), 5);
        assert_eq!(content.get("design/colors").map(|p| p.metadata.title.as_str()), Some("Colors"));
        assert!(content.get("missing").is_none());

        let top: Vec<_> = content.top_level().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(top, vec!["design", "project-a", "project-b"]);

        let children: Vec<_> = content
            .children_of(&Slug::new("design"))
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(children, vec!["design/colors"]);
    }

    #[test]
    fn test_select_sorts_excludes_and_ranges() {
        let content = SiteContent::new(vec![
            post("old", Some("2021-05-01")),
            post("new", Some("2024-05-01")),
            post("mid", Some("2023-05-01")),
            post("undated", None),
        ]);
        let all = || content.projects.iter().collect::<Vec<_>>();
        let slugs = |posts: Vec<&Post>| {
            posts
                .iter()
                .map(|p| p.slug.as_str().to_string())
                .collect::<Vec<_>>()
        };

        assert_eq!(
            slugs(select_projects(all(), &[], None)),
            vec!["new", "mid", "old", "undated"]
        );
        assert_eq!(
            slugs(select_projects(all(), &[], Some(ProjectRange::single(1)))),
            vec!["new"]
        );
        assert_eq!(
            slugs(select_projects(all(), &[], Some(ProjectRange::starting_at(2)))),
            vec!["mid", "old", "undated"]
        );
        assert_eq!(
            slugs(select_projects(all(), &["mid"], Some(ProjectRange::starting_at(2)))),
            vec!["old", "undated"]
        );
        assert_eq!(
            slugs(select_projects(all(), &[], Some(ProjectRange::new(2, Some(3))))),
            vec!["mid", "old"]
        );
        assert!(select_projects(all(), &[], Some(ProjectRange::starting_at(9))).is_empty());
    }

    #[test]
    fn test_by_date_skips_undated() {
        let content = SiteContent::new(vec![
            post("a", Some("2022-01-01")),
            post("b", None),
            post("c", Some("2024-01-01")),
        ]);

        let slugs: Vec<_> = content.by_date().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a"]);
    }
}
