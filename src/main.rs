use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use gridgame::config::Config;
use gridgame::server::{build_router, AppState};
use gridgame::{Catalog, PuzzleGenerator, Roster, Vocabulary};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gridgame::logging::init("info");
    let config = Config::parse();

    let roster = Roster::load(&config.champions)?;
    let vocab = Vocabulary::load(&config.categories)?;
    for (group, labels) in vocab.by_group() {
        debug!(group, labels = labels.len(), "vocabulary group");
    }
    let catalog = Catalog::compile(&vocab, &roster);

    let coverage = catalog.coverage();
    if coverage.empty.is_empty() {
        info!("all categories have at least one entity");
    } else {
        warn!(count = coverage.empty.len(), empty = ?coverage.empty, "categories no entity satisfies");
    }

    let origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("invalid allowed origin {:?}", config.allowed_origin))?;
    let state = AppState::new(PuzzleGenerator::new(Arc::new(catalog)), &config.icon_base_url);
    let app = build_router(state, origin);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(bind = %config.bind, "grid server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
