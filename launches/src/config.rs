use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const DEFAULT_TABLE_NAME: &str = "spacex_launches";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Runtime settings read from the Lambda environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub static_dir: PathBuf,
    /// When set the read API serves over plain TCP instead of the Lambda runtime.
    pub bind_addr: Option<SocketAddr>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let table_name = lookup("LAUNCHES_TABLE_NAME").unwrap_or_else(|| DEFAULT_TABLE_NAME.into());
        if table_name.trim().is_empty() {
            bail!("LAUNCHES_TABLE_NAME env var is set but empty");
        }

        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let bind_addr = match lookup("API_BIND_ADDR") {
            Some(addr) => Some(
                addr.parse::<SocketAddr>()
                    .with_context(|| format!("invalid API_BIND_ADDR '{addr}'"))?,
            ),
            None => None,
        };

        Ok(Self {
            table_name,
            static_dir,
            bind_addr,
        })
    }
}
