//! Command-line interface argument parsing.
//!
//! Flags (or their environment variables) override values from the
//! optional TOML config file; the merged result is validated once.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, ConfigError, ProxyConfig};

/// siege-proxy - JSON proxy for the Siege public API
///
/// Forwards user and leaderboard lookups upstream and expands each user's
/// project references into full project details.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "SIEGE_PROXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:3031
    #[arg(long, value_name = "ADDR", env = "SIEGE_PROXY_BIND")]
    pub bind: Option<String>,

    /// Listen port; replaces only the port of the listen address
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the Siege API
    #[arg(long, value_name = "URL", env = "SIEGE_UPSTREAM_URL")]
    pub upstream_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SIEGE_PROXY_LOG")]
    pub log_level: Option<String>,
}

impl Args {
    /// Load the config file (or defaults), apply overrides, validate.
    pub fn resolve_config(&self) -> Result<ProxyConfig, ConfigError> {
        let config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProxyConfig::default(),
        };

        let config = self.apply_overrides(config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: ProxyConfig) -> ProxyConfig {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }

        if let Some(port) = self.port {
            // An unparseable address is left for validation to report.
            if let Ok(mut addr) = config.listener.bind_address.parse::<SocketAddr>() {
                addr.set_port(port);
                config.listener.bind_address = addr.to_string();
            }
        }

        if let Some(url) = &self.upstream_url {
            config.upstream.base_url = url.clone();
        }

        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        config
    }
}
