//! Configuration loading and resolution.

use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

use rc_lookup::fetch::{FetchConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "HOST";
/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "PORT";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid port {0:?} in $PORT")]
    InvalidPort(String),

    #[error("cannot resolve bind address {host}:{port}")]
    InvalidHost { host: String, port: u16 },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub fetch: FetchConfig,
}

impl ServerConfig {
    pub fn new(addr: SocketAddr, base_url: &str, timeout_secs: u64) -> Self {
        Self {
            addr,
            fetch: fetch_config(base_url, timeout_secs),
        }
    }
}

/// Build the fetcher settings from CLI values.
pub fn fetch_config(base_url: &str, timeout_secs: u64) -> FetchConfig {
    let base_url = if base_url.trim().is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        base_url.trim().to_string()
    };
    let timeout = if timeout_secs == 0 {
        DEFAULT_TIMEOUT
    } else {
        Duration::from_secs(timeout_secs)
    };
    FetchConfig { base_url, timeout }
}

/// Resolve the bind address: explicit value, then `$HOST`/`$PORT`, then
/// `0.0.0.0:5000`.
pub fn resolve_bind_addr(
    host: Option<&str>,
    port: Option<u16>,
) -> Result<SocketAddr, ConfigError> {
    resolve_bind_addr_with(
        host,
        port,
        std::env::var(HOST_ENV).ok(),
        std::env::var(PORT_ENV).ok(),
    )
}

fn resolve_bind_addr_with(
    host: Option<&str>,
    port: Option<u16>,
    env_host: Option<String>,
    env_port: Option<String>,
) -> Result<SocketAddr, ConfigError> {
    let host = host
        .map(str::to_string)
        .or(env_host.filter(|h| !h.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match (port, env_port) {
        (Some(p), _) => p,
        (None, Some(raw)) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
        _ => DEFAULT_PORT,
    };

    let resolved = (host.as_str(), port)
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next());
    resolved.ok_or(ConfigError::InvalidHost { host, port })
}
