//! Portfolio backend
//!
//! This is the composition root that wires together all the components.

use portfolio_edge::{
    load_config, AppState, ChatService, CountryDatabase, CountryResolver, HttpServer,
    MaxMindCountryDb, OpenAiChatClient, OpenAiConfig, SiteContent,
};
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!("starting portfolio listen={}", cfg.listen_addr);

    // ===== COMPOSITION ROOT =====

    // GeoIP database (MaxMind). A missing file degrades every lookup to
    // the unknown-country sentinel instead of failing startup.
    let database: Option<Arc<dyn CountryDatabase>> = match MaxMindCountryDb::open(&cfg.geoip_path) {
        Ok(db) => {
            tracing::info!("GeoIP DB loaded from {} ({})", cfg.geoip_path, db.database_type());
            Some(Arc::new(db) as Arc<dyn CountryDatabase>)
        }
        Err(e) => {
            tracing::error!("failed to load GeoIP DB from {}: {:?}", cfg.geoip_path, e);
            None
        }
    };
    let resolver = Arc::new(CountryResolver::new(database, cfg.geoip_cache_capacity));

    // Chat model (OpenAI)
    let chat_client = OpenAiChatClient::new(OpenAiConfig {
        base_url: cfg.openai_base_url.clone(),
        api_key: cfg.openai_api_key.clone(),
        model: cfg.openai_model.clone(),
        timeout: cfg.openai_timeout(),
    })?;
    if !chat_client.has_credentials() {
        tracing::warn!("OPENAI_API_KEY is not set; /api/gpt/ will return errors");
    }
    let chat = Arc::new(ChatService::new(Arc::new(chat_client)));

    // Landing page content
    let site = match &cfg.site_content_path {
        Some(path) => SiteContent::from_file(path)?,
        None => SiteContent::builtin()?,
    };

    let state = AppState::new(resolver, chat, &site, cfg.unknown_country_label.clone());
    let server = HttpServer::new(cfg.listen_addr.clone(), cfg.static_dir.clone(), state);

    server.run().await
}
