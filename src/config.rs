use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

use crate::services::hyperliquid::HYPERLIQUID_API_URL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process-level settings read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub hyperliquid_url: String,
    /// Directory for daily rolling log files, stdout only when unset
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid BIND_ADDR: {bind_addr}"))?;

        Ok(Self {
            bind_addr,
            hyperliquid_url: lookup("HYPERLIQUID_API_URL")
                .unwrap_or_else(|| HYPERLIQUID_API_URL.to_string()),
            log_dir: lookup("LOG_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.hyperliquid_url, HYPERLIQUID_API_URL);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("HYPERLIQUID_API_URL", "http://localhost:9999/info"),
            ("LOG_DIR", "/tmp/levels"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.hyperliquid_url, "http://localhost:9999/info");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/levels")));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let error = ServerConfig::from_lookup(lookup_from(&[("BIND_ADDR", "nope")])).unwrap_err();
        assert!(error.to_string().contains("BIND_ADDR"));
    }
}
