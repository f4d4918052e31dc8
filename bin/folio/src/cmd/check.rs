//! Check command - validate configuration and content

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, bail};
use folio_core::{ActionListItem, Config, ContentType, DialogBody, ProjectMetadata, Slug};
use folio_parser::ParserRegistry;

use super::{load_config, site_root};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Errors always fail; warnings fail only in strict mode.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate the config file and everything it points at.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();
    let root = site_root(config_path);

    println!("Checking configuration...");
    let config = match load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid");
            result.add_error(format!("Configuration error: {e:#}"));
            return result;
        }
    };

    result.warnings.extend(quick_validate(&config, &root));

    println!("\nChecking projects...");
    validate_projects(&config, &root, &mut result);

    result
}

/// Non-fatal configuration issues, shown before build and watch.
pub fn quick_validate(config: &Config, root: &Path) -> Vec<String> {
    let mut warnings = Vec::new();

    if !config.site.base_url.starts_with("http://") && !config.site.base_url.starts_with("https://")
    {
        warnings.push("site.base_url should start with http:// or https://".to_string());
    }

    if config.about.calendar.display && config.about.calendar.link.is_empty() {
        warnings.push("about.calendar.display is set but about.calendar.link is empty".to_string());
    }

    let static_dir = config.static_dir(root);
    for (key, src) in [
        ("person.avatar", &config.person.avatar),
        ("home.image", &config.home.image),
    ] {
        if let Some(missing) = missing_local_file(&static_dir, src) {
            warnings.push(format!("{key}: {} does not exist", missing.display()));
        }
    }

    warnings
}

fn validate_projects(config: &Config, root: &Path, result: &mut ValidationResult) {
    let projects_dir = config.projects_dir(root);
    if !projects_dir.is_dir() {
        result.add_error(format!(
            "Projects directory missing: {}",
            projects_dir.display()
        ));
        return;
    }

    let registry = ParserRegistry::with_theme(&config.build.syntax_theme);
    let static_dir = config.static_dir(root);
    let mut checked = 0;
    let mut failed = 0;
    let mut slugs: HashMap<Slug, PathBuf> = HashMap::new();

    for entry in walkdir::WalkDir::new(&projects_dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();

        if ContentType::from_path(path).is_none() {
            result.add_warning(format!("{}: not a project document, ignored", path.display()));
            continue;
        }

        checked += 1;

        if let Some(slug) = path
            .strip_prefix(&projects_dir)
            .ok()
            .and_then(Slug::from_relative_path)
        {
            if let Some(other) = slugs.insert(slug.clone(), path.to_path_buf()) {
                result.add_warning(format!(
                    "{} and {}: both map to slug `{slug}`; only one is published",
                    other.display(),
                    path.display()
                ));
            }
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                result.add_error(format!("{}: Failed to read file: {e}", path.display()));
                failed += 1;
                continue;
            }
        };

        match registry.parse(&content, path) {
            Ok(parsed) => check_metadata(path, &parsed.metadata, &static_dir, result),
            Err(e) => {
                result.add_error(format!("{}: Parse error: {e}", path.display()));
                failed += 1;
            }
        }
    }

    if failed == 0 {
        println!("  ✓ All {checked} project files valid");
    } else {
        println!("  ✗ {failed}/{checked} project files have errors");
    }
}

fn check_metadata(
    path: &Path,
    metadata: &ProjectMetadata,
    static_dir: &Path,
    result: &mut ValidationResult,
) {
    if let Err(e) = metadata.validate(path) {
        result.add_error(e.to_string());
    }

    if metadata.published_at.is_some() && metadata.published_date().is_none() {
        result.add_warning(format!(
            "{}: publishedAt is not a valid date",
            path.display()
        ));
    }

    for src in referenced_images(metadata) {
        if let Some(missing) = missing_local_file(static_dir, src) {
            result.add_warning(format!(
                "{}: image {} does not exist",
                path.display(),
                missing.display()
            ));
        }
    }
}

/// Every image a project document points at: cover, gallery, team avatars
/// and carousel slides.
fn referenced_images(metadata: &ProjectMetadata) -> Vec<&str> {
    fn walk<'a>(items: &'a [ActionListItem], out: &mut Vec<&'a str>) {
        for item in items {
            for dialog in &item.dialogs {
                if let DialogBody::Carousel { items } = &dialog.body {
                    out.extend(items.iter().map(|s| s.slide.as_str()));
                }
            }
            walk(&item.items, out);
        }
    }

    let mut images: Vec<&str> = std::iter::once(metadata.image.as_str())
        .chain(metadata.images.iter().map(String::as_str))
        .chain(metadata.team.iter().map(|m| m.avatar.as_str()))
        .filter(|s| !s.is_empty())
        .collect();
    walk(&metadata.actions, &mut images);
    images
}

/// Site-absolute paths (`/images/a.png`) resolve under the static directory;
/// anything else is not checked.
fn missing_local_file(static_dir: &Path, src: &str) -> Option<PathBuf> {
    let relative = src.strip_prefix('/')?;
    if relative.is_empty() || src.starts_with("//") {
        return None;
    }

    let path = static_dir.join(relative);
    (!path.exists()).then_some(path)
}
