//! Court Caller Back binary entrypoint wiring the REST API, the SSE stream and the snapshot store.

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtcaller_back::{
    audio::AudioOutput,
    clients::{scrape::HttpMatchSource, tts::HttpSpeechSynthesizer},
    config::AppConfig,
    dao::snapshot_store::{SnapshotStore, file::FileSnapshotStore, memory::MemorySnapshotStore},
    routes,
    services::sse_events,
    state::{AppState, Backends, SharedState},
};

const DEFAULT_CACHE_DIR: &str = "data";
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let client = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()
        .context("building HTTP client")?;

    let backends = Backends {
        snapshots: snapshot_store().await?,
        source: Arc::new(HttpMatchSource::new(client.clone(), &config.api_base_url)),
        synthesizer: Arc::new(HttpSpeechSynthesizer::new(client, &config.api_base_url)),
        output: audio_output(),
    };
    info!(api_base_url = %config.api_base_url, "upstream services configured");

    let app_state = AppState::new(config, backends);
    sse_events::spawn_forwarders(&app_state);
    app_state.matches().load_cached_matches().await;

    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Pick the snapshot backend from `COURTCALLER_STORE` (`file`, `memory` or `couch`).
async fn snapshot_store() -> anyhow::Result<Arc<dyn SnapshotStore>> {
    let kind = env::var("COURTCALLER_STORE").unwrap_or_else(|_| "file".into());
    match kind.as_str() {
        "memory" => {
            info!("keeping match cache in memory only");
            Ok(Arc::new(MemorySnapshotStore::new()))
        }
        "couch" => couch_store().await,
        "file" => {
            let dir = env::var_os("COURTCALLER_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));
            info!(dir = %dir.display(), "caching matches on disk");
            Ok(Arc::new(FileSnapshotStore::new(dir)))
        }
        other => anyhow::bail!("unknown COURTCALLER_STORE `{other}` (expected file, memory or couch)"),
    }
}

#[cfg(feature = "couch-store")]
async fn couch_store() -> anyhow::Result<Arc<dyn SnapshotStore>> {
    use courtcaller_back::dao::snapshot_store::couchdb::{CouchConfig, CouchSnapshotStore};

    let config = CouchConfig::from_env().context("reading CouchDB configuration")?;
    info!(base_url = %config.base_url, database = %config.database, "caching matches in CouchDB");
    let store = CouchSnapshotStore::connect(config)
        .await
        .context("connecting to CouchDB")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "couch-store"))]
async fn couch_store() -> anyhow::Result<Arc<dyn SnapshotStore>> {
    anyhow::bail!("this build does not include CouchDB support (feature `couch-store`)")
}

#[cfg(feature = "speaker")]
fn audio_output() -> Arc<dyn AudioOutput> {
    info!("announcements play on the default audio device");
    Arc::new(courtcaller_back::audio::speaker::SpeakerOutput)
}

#[cfg(not(feature = "speaker"))]
fn audio_output() -> Arc<dyn AudioOutput> {
    info!("built without speaker support; announcements are only logged");
    Arc::new(courtcaller_back::audio::silent::SilentOutput)
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = match signal(SignalKind::terminate()) {
            Ok(term) => term,
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
