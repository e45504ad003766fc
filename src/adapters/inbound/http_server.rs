//! Portfolio HTTP Server
//!
//! Landing page, visitor IP / country endpoints and the chat proxy.

use crate::adapters::inbound::client_ip::extract_client_ip;
use crate::application::{ChatService, CountryResolver};
use crate::domain::entities::ClientAddress;
use crate::error::ApiError;
use crate::infrastructure::shutdown_signal;
use crate::site::{render_home, SiteContent};
use axum::{
    body::Bytes,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// `GET /api/visitor-ip/` response.
#[derive(Debug, Serialize)]
pub struct VisitorIpResponse {
    pub ip: Option<ClientAddress>,
}

/// `GET /geoip/` response.
#[derive(Debug, Serialize)]
pub struct GeoIpResponse {
    pub ip: Option<ClientAddress>,
    pub country: String,
}

/// `POST /api/gpt/` response.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub geoip_loaded: bool,
    pub cached_countries: usize,
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<CountryResolver>,
    pub chat: Arc<ChatService>,
    /// Landing page, rendered once at startup
    pub home_page: Arc<str>,
    /// Shown by `/geoip/` when no country could be attributed
    pub unknown_country_label: Arc<str>,
}

impl AppState {
    pub fn new(
        resolver: Arc<CountryResolver>,
        chat: Arc<ChatService>,
        site: &SiteContent,
        unknown_country_label: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            chat,
            home_page: render_home(site).into(),
            unknown_country_label: unknown_country_label.into().into(),
        }
    }
}

/// Build the API routes (no static files, no tracing layer).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/api/visitor-ip/", get(visitor_ip_handler))
        .route("/geoip/", get(geoip_handler))
        .route("/api/gpt/", post(gpt_handler))
        .with_state(state)
}

/// HTTP server for the portfolio site.
pub struct HttpServer {
    listen_addr: String,
    static_dir: String,
    state: AppState,
}

impl HttpServer {
    pub fn new(listen_addr: String, static_dir: String, state: AppState) -> Self {
        Self {
            listen_addr,
            static_dir,
            state,
        }
    }

    /// Full application: API routes, static assets and request tracing.
    pub fn app(&self) -> Router {
        router(self.state.clone())
            .nest_service("/static", ServeDir::new(&self.static_dir))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or SIGTERM.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!("portfolio listening on {}", self.listen_addr);

        axum::serve(
            listener,
            self.app().into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

// Handler functions

async fn home_handler(State(state): State<AppState>) -> impl IntoResponse {
    Html(state.home_page.to_string())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        geoip_loaded: state.resolver.has_database(),
        cached_countries: state.resolver.cached_entries(),
    };
    Json(response)
}

async fn visitor_ip_handler(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let ip = extract_client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    Json(VisitorIpResponse { ip })
}

async fn geoip_handler(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let ip = extract_client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    let country = state
        .resolver
        .country_for(ip.as_ref().map(ClientAddress::as_str));

    let country = if country.is_unknown() {
        state.unknown_country_label.to_string()
    } else {
        country.country_name
    };

    Json(GeoIpResponse { ip, country })
}

async fn gpt_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReplyResponse>, ApiError> {
    let reply = state.chat.reply(&body).await?;
    Ok(Json(ReplyResponse { reply }))
}
