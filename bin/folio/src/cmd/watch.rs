//! Watch command - development server with live reload

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;
use folio_generator::{BuildStats, Builder};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher, event::ModifyKind};
use tokio::{net::TcpListener, sync::mpsc};

use super::{check::quick_validate, load_config, print_build_stats, print_warnings, site_root};
use crate::server::{LIVERELOAD_SCRIPT, ReloadMessage, ServerState, create_router};

/// Quiet period collecting file events into one rebuild.
const DEBOUNCE_MS: u64 = 200;

/// Run the watch command.
///
/// Builds with drafts, serves the output and rebuilds the whole site whenever
/// content, static files or the config file change.
pub async fn run(config_path: &Path, port: u16, open_browser: bool) -> Result<()> {
    tracing::info!(?config_path, port, "Starting watch mode");

    let root = site_root(config_path);
    let config = load_config(config_path)?;
    print_warnings(&quick_validate(&config, &root));

    let output_dir = config.output_dir(&root);

    tracing::info!("Running initial build...");
    let stats = rebuild(&config, &root)?;
    print_build_stats(&stats);

    let state = Arc::new(ServerState::new());

    let (tx, mut rx) = mpsc::channel::<Vec<PathBuf>>(16);
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<notify::Event>| {
            let Ok(event) = res else { return };
            if matches!(
                event.kind,
                EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_))
                    | EventKind::Create(_)
                    | EventKind::Remove(_)
            ) {
                let _ = tx.blocking_send(event.paths);
            }
        },
        notify::Config::default(),
    )
    .wrap_err("Failed to create file watcher")?;

    for dir in [
        root.join(&config.build.content_dir),
        config.static_dir(&root),
    ] {
        if dir.exists() {
            watcher
                .watch(&dir, RecursiveMode::Recursive)
                .wrap_err_with(|| format!("Failed to watch {}", dir.display()))?;
            tracing::debug!(dir = %dir.display(), "watching");
        }
    }
    watcher
        .watch(config_path, RecursiveMode::NonRecursive)
        .wrap_err("Failed to watch configuration file")?;

    let rebuild_state = state.clone();
    let config_path = config_path.to_path_buf();
    tokio::spawn(async move {
        let mut config = config;

        while let Some(mut paths) = rx.recv().await {
            tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)).await;
            while let Ok(more) = rx.try_recv() {
                paths.extend(more);
            }

            if touches_config(&paths, &config_path) {
                match load_config(&config_path) {
                    Ok(reloaded) => config = reloaded,
                    Err(e) => {
                        tracing::error!(error = %e, "config reload failed");
                        eprintln!("  ✗ Config reload failed: {e}");
                        continue;
                    }
                }
            }

            println!();
            println!("  Change detected, rebuilding...");

            match rebuild(&config, &root) {
                Ok(stats) => {
                    println!(
                        "  ✓ Rebuilt {} pages in {}ms",
                        stats.pages, stats.duration_ms
                    );
                    let clients = rebuild_state.notify(ReloadMessage::for_changes(&paths));
                    tracing::debug!(clients, "sent reload");
                }
                Err(e) => {
                    tracing::error!(error = %e, "rebuild failed");
                    eprintln!("  ✗ Rebuild failed: {e:?}");
                }
            }
        }
    });

    let app = create_router(&output_dir, state);
    let addr = format!("127.0.0.1:{port}");

    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Dev server running at http://{addr}");
    println!("  Press Ctrl+C to stop");
    println!();

    if open_browser {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    // dropping the watcher stops events
    let _watcher = watcher;

    axum::serve(listener, app).await.wrap_err("Server error")?;

    Ok(())
}

/// Full rebuild with drafts and the live reload script.
fn rebuild(config: &Config, root: &Path) -> Result<BuildStats> {
    let stats = Builder::new(config.clone(), root)
        .include_drafts(true)
        .with_live_reload(LIVERELOAD_SCRIPT)
        .build()
        .wrap_err("Build failed")?;

    tracing::debug!(?stats, "Build completed");
    Ok(stats)
}

fn touches_config(paths: &[PathBuf], config_path: &Path) -> bool {
    paths
        .iter()
        .any(|p| p.file_name().is_some() && p.file_name() == config_path.file_name())
}
