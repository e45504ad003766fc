mod client_ip;
mod http_server;

pub use client_ip::{extract_client_ip, CF_CONNECTING_IP, X_FORWARDED_FOR, X_REAL_IP};
pub use http_server::{
    router, AppState, GeoIpResponse, HealthResponse, HttpServer, ReplyResponse, VisitorIpResponse,
};
