//! Application configuration management.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Host/domain resolution configuration.
    #[serde(default)]
    pub domains: DomainConfig,
    /// Report defaults.
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Domain configuration for the `solvy.chain` ecosystem.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Root domain.
    #[serde(default = "default_root_domain")]
    pub root: String,
    /// Subdomain labels served under the root (e.g. `education`).
    #[serde(default = "default_subdomains")]
    pub subdomains: Vec<String>,
    /// Reject hosts outside the root domain. Off in development.
    #[serde(default)]
    pub enforce: bool,
    /// Name servers that resolve the root domain.
    #[serde(default)]
    pub dns: DnsConfig,
}

/// DNS servers published for the `solvy.chain` domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsConfig {
    /// DNS-over-HTTPS endpoint.
    #[serde(default = "default_doh")]
    pub doh: String,
    /// Plain DNS resolver addresses.
    #[serde(default = "default_ipv4")]
    pub ipv4: Vec<Ipv4Addr>,
}

fn default_doh() -> String {
    "https://dns1.noto.network".to_string()
}

fn default_ipv4() -> Vec<Ipv4Addr> {
    vec![
        Ipv4Addr::new(34, 154, 40, 173),
        Ipv4Addr::new(34, 154, 254, 177),
    ]
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            doh: default_doh(),
            ipv4: default_ipv4(),
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportingConfig {
    /// Organization reported on when a request names none.
    #[serde(default)]
    pub default_organization: Option<Uuid>,
}

fn default_root_domain() -> String {
    "solvy.chain".to_string()
}

fn default_subdomains() -> Vec<String> {
    ["education", "decidey", "solvy", "business"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            root: default_root_domain(),
            subdomains: default_subdomains(),
            enforce: false,
            dns: DnsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("SOLVY")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("domains.subdomains")
                    .with_list_parse_key("domains.dns.ipv4")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
