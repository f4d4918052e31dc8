//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use folio_generator::{BuildStats, Builder};

use super::{check::quick_validate, load_config, print_build_stats, print_warnings, site_root};

/// Run the build command.
///
/// `output` overrides `build.output_dir` and is taken relative to the current
/// directory; `base_url` overrides `site.base_url`.
pub fn run(
    config_path: &Path,
    output: Option<&Path>,
    drafts: bool,
    base_url: Option<&str>,
) -> Result<BuildStats> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, ?base_url, "Starting build");

    let mut config = load_config(config_path)?;
    let root = site_root(config_path);

    if let Some(output) = output {
        let output = std::path::absolute(output).wrap_err("Invalid output directory")?;
        config.build.output_dir = output.to_string_lossy().into_owned();
    }

    if let Some(url) = base_url {
        tracing::info!(base_url = url, "Overriding site base_url from CLI");
        config.site.base_url = url.trim_end_matches('/').to_string();
    }

    print_warnings(&quick_validate(&config, &root));
    tracing::debug!(?config, "Loaded configuration");

    let output_dir = config.output_dir(&root);
    let stats = Builder::new(config, &root)
        .include_drafts(drafts)
        .build()
        .wrap_err("Build failed")?;

    print_build_stats(&stats);
    println!("  Output:       {}", output_dir.display());
    println!();

    tracing::info!(?stats, elapsed = ?start.elapsed(), "Build completed successfully");
    Ok(stats)
}
