//! Development server with live reload.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use tokio::sync::broadcast;
use tokio_stream::{StreamExt, wrappers::BroadcastStream};
use tower_http::services::{ServeDir, ServeFile};

/// Route the live reload script subscribes to.
pub const LIVERELOAD_PATH: &str = "/__livereload";

/// What connected browsers should do after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadMessage {
    /// Full page reload.
    Reload,
    /// Only stylesheets changed; refetch them in place.
    CssReload,
}

impl ReloadMessage {
    /// Pick the lightest reload covering every changed path.
    pub fn for_changes(paths: &[PathBuf]) -> Self {
        let css_only = !paths.is_empty()
            && paths
                .iter()
                .all(|p| p.extension().is_some_and(|ext| ext == "css"));

        if css_only { Self::CssReload } else { Self::Reload }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Reload => "reload",
            Self::CssReload => "css-reload",
        }
    }
}

/// Shared state of the dev server.
#[derive(Debug, Clone)]
pub struct ServerState {
    reload_tx: broadcast::Sender<ReloadMessage>,
}

impl ServerState {
    pub fn new() -> Self {
        let (reload_tx, _) = broadcast::channel(16);
        Self { reload_tx }
    }

    /// Tell every connected browser to reload; returns how many were reached.
    pub fn notify(&self, message: ReloadMessage) -> usize {
        self.reload_tx.send(message).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadMessage> {
        self.reload_tx.subscribe()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Router serving the output directory, its `404.html` and the SSE endpoint.
pub fn create_router(output_dir: &Path, state: Arc<ServerState>) -> Router {
    let static_files =
        ServeDir::new(output_dir).not_found_service(ServeFile::new(output_dir.join("404.html")));

    Router::new()
        .route(LIVERELOAD_PATH, get(livereload_handler))
        .fallback_service(static_files)
        .with_state(state)
}

async fn livereload_handler(
    State(state): State<Arc<ServerState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let stream = BroadcastStream::new(state.subscribe()).filter_map(|msg| {
        // lagged receivers just miss a reload
        msg.ok().map(|m| Ok(Event::default().data(m.as_str())))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

/// Script appended to every page during `folio watch`.
pub const LIVERELOAD_SCRIPT: &str = r#"<script>
(function() {
    const source = new EventSource('/__livereload');
    source.onmessage = function(event) {
        if (event.data === 'reload') {
            window.location.reload();
        } else if (event.data === 'css-reload') {
            document.querySelectorAll('link[rel="stylesheet"]').forEach(function(link) {
                link.href = link.href.split('?')[0] + '?v=' + Date.now();
            });
        }
    };
    source.onerror = function() {
        console.log('[livereload] connection lost, retrying...');
    };
})();
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_for_changes() {
        let css = vec![PathBuf::from("public/css/site.css")];
        let mixed = vec![
            PathBuf::from("public/css/site.css"),
            PathBuf::from("content/work/projects/shop.mdx"),
        ];

        assert_eq!(ReloadMessage::for_changes(&css), ReloadMessage::CssReload);
        assert_eq!(ReloadMessage::for_changes(&mixed), ReloadMessage::Reload);
        assert_eq!(ReloadMessage::for_changes(&[]), ReloadMessage::Reload);
    }

    #[tokio::test]
    async fn test_notify_reaches_subscribers() {
        let state = ServerState::new();
        assert_eq!(state.notify(ReloadMessage::Reload), 0);

        let mut rx = state.subscribe();
        assert_eq!(state.notify(ReloadMessage::CssReload), 1);
        assert_eq!(rx.recv().await.expect("message"), ReloadMessage::CssReload);
    }

    #[test]
    fn test_livereload_script_uses_route() {
        assert!(LIVERELOAD_SCRIPT.contains(LIVERELOAD_PATH));
    }
}
