use crate::infrastructure::DEFAULT_CACHE_CAPACITY;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // HTTP server
    pub listen_addr: String,
    pub static_dir: String,
    pub site_content_path: Option<String>,
    pub debug: bool,

    // GeoIP
    pub geoip_path: String,
    pub geoip_cache_capacity: usize,
    pub unknown_country_label: String,

    // Chat proxy
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub openai_timeout_secs: u64,
}

impl Config {
    pub fn openai_timeout(&self) -> Duration {
        Duration::from_secs(self.openai_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            static_dir: "static".to_string(),
            site_content_path: None,
            debug: false,
            geoip_path: "geoip/GeoLite2-Country.mmdb".to_string(),
            geoip_cache_capacity: DEFAULT_CACHE_CAPACITY,
            unknown_country_label: "unknown location".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_timeout_secs: 30,
        }
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> anyhow::Result<Config> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration from an arbitrary variable source.
///
/// Unset variables and unparsable numbers fall back to the defaults.
pub fn load_config_from<F>(var: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = Config::default();

    let listen_addr = var("PORTFOLIO_LISTEN_ADDR").unwrap_or(defaults.listen_addr);

    let static_dir = var("PORTFOLIO_STATIC_DIR").unwrap_or(defaults.static_dir);

    let site_content_path = var("PORTFOLIO_SITE_CONTENT_PATH");

    let debug = var("DEBUG").is_some();

    let geoip_path = var("PORTFOLIO_GEOIP_PATH").unwrap_or(defaults.geoip_path);

    let geoip_cache_capacity = var("PORTFOLIO_GEOIP_CACHE_CAPACITY")
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.geoip_cache_capacity);

    let unknown_country_label =
        var("PORTFOLIO_UNKNOWN_COUNTRY_LABEL").unwrap_or(defaults.unknown_country_label);

    let openai_api_key = var("OPENAI_API_KEY").filter(|k| !k.is_empty());

    let openai_base_url = var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url);

    let openai_model = var("OPENAI_MODEL").unwrap_or(defaults.openai_model);

    let openai_timeout_secs = var("PORTFOLIO_OPENAI_TIMEOUT_SECS")
        .and_then(|v| v.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(defaults.openai_timeout_secs);

    Ok(Config {
        listen_addr,
        static_dir,
        site_content_path,
        debug,
        geoip_path,
        geoip_cache_capacity,
        unknown_country_label,
        openai_api_key,
        openai_base_url,
        openai_model,
        openai_timeout_secs,
    })
}
