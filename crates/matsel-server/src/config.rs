use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use matsel_classifiers::bundle::DEFAULT_BUNDLE_PATH;

pub const MODEL_PATH_ENV: &str = "MODEL_PATH";
pub const BIND_ENV: &str = "MATSEL_BIND";
pub const DEFAULT_MODEL_PATH: &str = DEFAULT_BUNDLE_PATH;
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup` so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_path = lookup(MODEL_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let bind = lookup(BIND_ENV).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid {} address: {}", BIND_ENV, bind))?;

        Ok(Self {
            model_path: PathBuf::from(model_path),
            bind_addr,
        })
    }
}
