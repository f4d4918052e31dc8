//! Command implementations.

pub mod build;
pub mod check;
pub mod new;
pub mod watch;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::BuildStats;

/// Directory holding the config file; content and static paths resolve from it.
pub fn site_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load the config file with `FOLIO__*` environment overrides applied.
pub fn load_config(config_path: &Path) -> Result<Config> {
    Config::load_with_env(config_path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    println!();
    println!("  Warnings:");
    for warn in warnings {
        println!("  ⚠ {warn}");
    }
    println!();
}

fn print_build_stats(stats: &BuildStats) {
    println!();
    println!("  Build Statistics:");
    println!("  ─────────────────────────────────");
    println!("  Pages:        {:>6}", stats.pages);
    println!("  Projects:     {:>6}", stats.projects);
    println!("  Assets:       {:>6}", stats.assets);
    println!("  ─────────────────────────────────");
    println!("  Duration:     {:>6}ms", stats.duration_ms);
    println!();
}
