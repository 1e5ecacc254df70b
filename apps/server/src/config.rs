use std::net::{SocketAddr, ToSocketAddrs};

use anyhow::{anyhow, Context};
use axum::http::HeaderValue;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port_raw = lookup("PORT").unwrap_or_else(|| "3000".into());
        let port: u16 = port_raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid PORT '{}'", port_raw))?;
        let listen_addr = (host.as_str(), port)
            .to_socket_addrs()
            .with_context(|| format!("Invalid HOST '{}'", host))?
            .next()
            .ok_or_else(|| anyhow!("HOST '{}' did not resolve to an address", host))?;

        let db_path = lookup("DATABASE_URL")
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "./db/investment_goals.db".into());

        let cors_allow: Vec<String> = lookup("IG_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_allow.iter().filter(|o| o.as_str() != "*") {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid origin '{}' in IG_CORS_ALLOW_ORIGINS", origin))?;
        }

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.db_path, "./db/investment_goals.db");
        assert_eq!(config.cors_allow, vec!["*"]);
    }

    #[test]
    fn host_port_and_origins_are_read() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("DATABASE_URL", "/tmp/goals.db"),
            ("IG_CORS_ALLOW_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:8081".parse().unwrap());
        assert_eq!(config.db_path, "/tmp/goals.db");
        assert_eq!(config.cors_allow, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn invalid_port_fails_startup() {
        let err = config_from(&[("PORT", "eighty")]).err().unwrap();
        assert!(err.to_string().contains("Invalid PORT"));
    }
}
