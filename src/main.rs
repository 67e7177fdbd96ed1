// src/main.rs
//
// Smoke harness for the client core: restore the stored session, pull the
// catalog once and log what the dashboard would show.

use anyhow::Context;
use std::sync::Arc;

use cinestream_core::application::{AppState, ErrorResponse};
use cinestream_core::config::ClientConfig;
use cinestream_core::domain::TRENDING_LIMIT;
use cinestream_core::events::{CatalogRefreshed, SessionRestored};
use cinestream_core::integrations::HeadlessRuntime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 1. CONFIGURATION
    let config = ClientConfig::load().context("Failed to load configuration")?;
    log::info!("api: {} | media: {}", config.api_base_url, config.media_base_url);

    // 2. COMPOSITION
    let state = AppState::bootstrap(config, Arc::new(HeadlessRuntime::new()))
        .context("Failed to initialize client core")?;

    state.event_bus.subscribe::<SessionRestored, _>(|event| {
        log::debug!("session restored (authenticated: {})", event.is_authenticated());
    });
    state.event_bus.subscribe::<CatalogRefreshed, _>(|event| {
        log::debug!("catalog #{} applied", event.request_seq);
    });

    // 3. SESSION
    state.session_service.restore().await;
    let session = state.session();
    match &session.username {
        Some(username) => log::info!("signed in as {}", username),
        None => log::info!("no stored session"),
    }

    // 4. CATALOG
    if let Err(e) = state.catalog_service.fetch_all().await {
        let response = ErrorResponse::from_app_error(&e);
        log::warn!(
            "catalog unavailable: {} (retryable: {})",
            response.message,
            response.retryable
        );
        return Ok(());
    }

    let dashboard = state.dashboard();
    for section in &dashboard.sections {
        log::info!("{} ({} titles)", section.title, section.movies.len());
    }
    if dashboard.sections.is_empty() {
        log::info!("catalog is empty");
    }

    let trending = state.catalog_service.trending(TRENDING_LIMIT);
    if let Some(top) = trending.first() {
        log::info!("trending: {} ({})", top.title, top.release_year);
    }

    Ok(())
}
