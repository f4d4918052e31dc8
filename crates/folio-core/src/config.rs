//! Site configuration management.
//!
//! A portfolio is described by a single TOML file (`folio.toml` by default):
//! who the author is, how the home/about/work pages read, and where content
//! and assets live. String fields of the page sections may reference the
//! author with `{name}`, `{first_name}`, `{last_name}`, `{role}`, `{email}`
//! and `{location}` placeholders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Folio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// The site's author.
    pub person: Person,

    /// Social links shown in the footer and on the about page.
    #[serde(default)]
    pub social: Vec<SocialLink>,

    /// Home page settings.
    #[serde(default)]
    pub home: HomeConfig,

    /// About/resume page settings.
    #[serde(default)]
    pub about: AboutConfig,

    /// Work (projects) section settings.
    #[serde(default)]
    pub work: WorkConfig,

    /// RSS feed settings.
    #[serde(default)]
    pub rss: RssConfig,

    /// robots.txt settings.
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Language code used for `<html lang>`.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Fallback description for meta tags.
    #[serde(default)]
    pub description: Option<String>,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding all content documents.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Project documents, relative to `content_dir`.
    #[serde(default = "default_projects_dir")]
    pub projects_dir: String,

    /// Static files copied verbatim into the output.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Syntax highlighting theme name.
    #[serde(default = "default_syntax_theme")]
    pub syntax_theme: String,

    /// Whether to collapse whitespace between tags in HTML output.
    #[serde(default)]
    pub minify: bool,
}

/// The site's author.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Display name.
    pub name: String,

    /// Job title, e.g. "Drupal Developer".
    #[serde(default)]
    pub role: String,

    /// Avatar image path.
    #[serde(default)]
    pub avatar: String,

    #[serde(default)]
    pub email: String,

    /// IANA time zone identifier, e.g. "Europe/Vienna".
    #[serde(default)]
    pub location: String,

    /// Spoken languages; empty hides the list.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// A social profile link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialLink {
    pub name: String,

    /// Icon identifier, rendered as a CSS class.
    #[serde(default)]
    pub icon: String,

    pub link: String,
}

/// Home page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub path: String,
    /// Open Graph image, also the fallback for pages without one.
    pub image: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub headline: String,
    pub subline: String,
}

/// About page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutConfig {
    pub path: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub table_of_content: TableOfContentConfig,
    pub avatar: DisplayToggle,
    pub calendar: CalendarConfig,
    pub intro: IntroSection,
    pub work: ExperienceSection,
    pub studies: StudiesSection,
    pub technical: TechnicalSection,
}

/// Table of contents on the about page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOfContentConfig {
    pub display: bool,
    /// Also list the entries of each section.
    pub sub_items: bool,
}

/// A section that can only be shown or hidden.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToggle {
    pub display: bool,
}

/// Booking link shown next to the avatar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub display: bool,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroSection {
    pub display: bool,
    pub title: String,
    /// Markdown.
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceSection {
    pub display: bool,
    pub title: String,
    pub experiences: Vec<Experience>,
}

/// One job on the resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    #[serde(default)]
    pub timeframe: String,
    #[serde(default)]
    pub role: String,
    /// Markdown, one entry per bullet.
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StudiesSection {
    pub display: bool,
    pub title: String,
    pub institutions: Vec<Institution>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalSection {
    pub display: bool,
    pub title: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skill {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<SkillTag>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillTag {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// An image shown inside a resume section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Work section configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkConfig {
    pub path: String,
    pub label: String,
    pub title: String,
    pub description: String,
}

/// RSS feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RssConfig {
    /// Whether RSS feed is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of items in feed.
    #[serde(default = "default_rss_limit")]
    pub limit: usize,
}

/// robots.txt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub allow: Vec<String>,

    #[serde(default)]
    pub disallow: Vec<String>,
}

// Default value functions
fn default_language() -> String {
    "en".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_projects_dir() -> String {
    "work/projects".to_string()
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_syntax_theme() -> String {
    "base16-ocean.dark".to_string()
}

fn default_true() -> bool {
    true
}

fn default_rss_limit() -> usize {
    20
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            projects_dir: default_projects_dir(),
            static_dir: default_static_dir(),
            output_dir: default_output_dir(),
            syntax_theme: default_syntax_theme(),
            minify: false,
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            image: String::new(),
            label: "Home".to_string(),
            title: "{name}'s Portfolio".to_string(),
            description: "Portfolio website showcasing my work as a {role}".to_string(),
            headline: String::new(),
            subline: String::new(),
        }
    }
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            path: "/about".to_string(),
            label: "About".to_string(),
            title: "About – {name}".to_string(),
            description: "Meet {name}, {role} from {location}".to_string(),
            table_of_content: TableOfContentConfig::default(),
            avatar: DisplayToggle::default(),
            calendar: CalendarConfig::default(),
            intro: IntroSection::default(),
            work: ExperienceSection::default(),
            studies: StudiesSection::default(),
            technical: TechnicalSection::default(),
        }
    }
}

impl Default for TableOfContentConfig {
    fn default() -> Self {
        Self {
            display: true,
            sub_items: false,
        }
    }
}

impl Default for DisplayToggle {
    fn default() -> Self {
        Self { display: true }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            display: false,
            link: String::new(),
        }
    }
}

impl Default for IntroSection {
    fn default() -> Self {
        Self {
            display: true,
            title: "Introduction".to_string(),
            description: String::new(),
        }
    }
}

impl Default for ExperienceSection {
    fn default() -> Self {
        Self {
            display: true,
            title: "Work Experience".to_string(),
            experiences: Vec::new(),
        }
    }
}

impl Default for StudiesSection {
    fn default() -> Self {
        Self {
            display: true,
            title: "Studies".to_string(),
            institutions: Vec::new(),
        }
    }
}

impl Default for TechnicalSection {
    fn default() -> Self {
        Self {
            display: true,
            title: "Technical Skills".to_string(),
            skills: Vec::new(),
        }
    }
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            path: "/work".to_string(),
            label: "Work".to_string(),
            title: "Projects – {name}".to_string(),
            description: "Design and dev projects by {name}".to_string(),
        }
    }
}

impl Default for RssConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: default_rss_limit(),
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow: Vec::new(),
            disallow: Vec::new(),
        }
    }
}

impl Person {
    /// Replace `{name}`-style placeholders with this person's details.
    pub fn interpolate(&self, text: &str) -> String {
        if !text.contains('{') {
            return text.to_string();
        }

        text.replace("{name}", &self.name)
            .replace("{first_name}", &self.first_name)
            .replace("{last_name}", &self.last_name)
            .replace("{role}", &self.role)
            .replace("{email}", &self.email)
            .replace("{location}", &self.location)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.finish()
    }

    /// Parse, resolve and validate configuration held in memory.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CoreError::config_with_source("Failed to parse config", e))?;
        config.finish()
    }

    /// Load configuration layered with `FOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.finish()
    }

    fn finish(mut self) -> Result<Self> {
        self.resolve_placeholders();
        self.validate()?;
        Ok(self)
    }

    /// Expand author placeholders in all page copy.
    fn resolve_placeholders(&mut self) {
        let person = self.person.clone();
        let expand = |s: &mut String| *s = person.interpolate(s);
        let expand_images = |images: &mut Vec<ImageRef>| {
            for image in images {
                expand(&mut image.alt);
            }
        };

        for link in &mut self.social {
            expand(&mut link.link);
        }

        let home = &mut self.home;
        for field in [
            &mut home.label,
            &mut home.title,
            &mut home.description,
            &mut home.headline,
            &mut home.subline,
        ] {
            expand(field);
        }

        let about = &mut self.about;
        for field in [
            &mut about.label,
            &mut about.title,
            &mut about.description,
            &mut about.calendar.link,
            &mut about.intro.title,
            &mut about.intro.description,
            &mut about.work.title,
            &mut about.studies.title,
            &mut about.technical.title,
        ] {
            expand(field);
        }

        for experience in &mut about.work.experiences {
            expand(&mut experience.company);
            expand(&mut experience.timeframe);
            expand(&mut experience.role);
            experience.achievements.iter_mut().for_each(expand);
            expand_images(&mut experience.images);
        }

        for institution in &mut about.studies.institutions {
            expand(&mut institution.name);
            expand(&mut institution.description);
        }

        for skill in &mut about.technical.skills {
            expand(&mut skill.title);
            expand(&mut skill.description);
            for tag in &mut skill.tags {
                expand(&mut tag.name);
            }
            expand_images(&mut skill.images);
        }

        let work = &mut self.work;
        for field in [&mut work.label, &mut work.title, &mut work.description] {
            expand(field);
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.person.name.trim().is_empty() {
            return Err(CoreError::config("person.name cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        for (key, path) in [
            ("home.path", &self.home.path),
            ("about.path", &self.about.path),
            ("work.path", &self.work.path),
        ] {
            if !path.starts_with('/') {
                return Err(CoreError::config(format!("{key} must start with '/'")));
            }
        }

        let about = normalize_route(&self.about.path);
        let work = normalize_route(&self.work.path);
        if about.is_empty() || work.is_empty() {
            return Err(CoreError::config(
                "about.path and work.path cannot be the site root",
            ));
        }
        if about == work {
            return Err(CoreError::config("about.path and work.path must differ"));
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Site path of a project page.
    pub fn project_url(&self, slug: &str) -> String {
        format!("/{}/{}", normalize_route(&self.work.path), slug.trim_matches('/'))
    }

    /// Directory holding project documents, resolved against the site root.
    pub fn projects_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build.content_dir)
            .join(&self.build.projects_dir)
    }

    /// Static asset directory, resolved against the site root.
    pub fn static_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build.static_dir)
    }

    /// Output directory, resolved against the site root.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.build.output_dir)
    }
}

/// Strip leading and trailing slashes from a route path.
pub fn normalize_route(path: &str) -> &str {
    path.trim_matches('/')
}
