//! New command - scaffold a project document

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use folio_core::{ContentType, Slug, format_name};

use super::{load_config, site_root};

/// Run the new command.
///
/// Creates `<projects_dir>/<slug>.mdx` as a draft. Nested slugs
/// (`drupal/search`) create the parent directory.
pub fn run(config_path: &Path, slug: &str, title: Option<&str>) -> Result<PathBuf> {
    tracing::info!(?config_path, slug, ?title, "Creating new project");

    let config = load_config(config_path)?;
    let projects_dir = config.projects_dir(&site_root(config_path));

    let file_path = scaffold(&projects_dir, slug, title, Local::now().date_naive())?;

    tracing::info!(?file_path, "Created new project file");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

/// Write the draft document below `projects_dir`, refusing to overwrite.
pub fn scaffold(
    projects_dir: &Path,
    slug: &str,
    title: Option<&str>,
    today: NaiveDate,
) -> Result<PathBuf> {
    let relative = Path::new(slug.trim_matches('/'));
    let relative = match ContentType::from_path(relative) {
        Some(_) => relative.to_path_buf(),
        None => relative.with_extension(ContentType::Mdx.extension()),
    };

    let slug = Slug::from_relative_path(&relative)
        .filter(|s| !s.as_str().is_empty() && !s.as_str().contains('.'))
        .ok_or_else(|| eyre!("Invalid project slug: {slug}"))?;

    let file_path = projects_dir.join(&relative);
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    let last_segment = slug.segments().last().unwrap_or_default();
    let title = match title {
        Some(t) => t.to_string(),
        None => format_name(last_segment),
    };

    fs::write(&file_path, document(&title, today)).wrap_err("Failed to write file")?;
    Ok(file_path)
}

fn document(title: &str, today: NaiveDate) -> String {
    let title = title.replace('"', "\\\"");
    let date = today.format("%Y-%m-%d");

    format!(
        r#"---
title: "{title}"
publishedAt: "{date}"
summary: ""
images: []
draft: true
---

## Overview

Describe the project here.
"#
    )
}
