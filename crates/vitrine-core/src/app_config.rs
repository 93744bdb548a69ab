use std::net::SocketAddr;

/// Application configuration, built once at startup and passed explicitly to
/// the content-source client and the server.
///
/// Every field has a default so the service can run locally with no env vars
/// set at all.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the headless content source (no trailing slash required).
    pub cms_url: String,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cms_timeout_secs: u64,
    pub cms_user_agent: String,
    /// `Cache-Control: max-age` for product listings.
    pub products_max_age_secs: u64,
    /// `Cache-Control: max-age` for banner/category/home responses.
    pub home_max_age_secs: u64,
}
