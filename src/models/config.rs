//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Base URL of the backend REST API every repository call proxies to.
    pub backend_url: String,
    /// Service token sent as a bearer header on backend calls.
    pub backend_token: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
}
