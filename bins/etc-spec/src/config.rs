//! Configuration for the `etc-spec` tool.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable consulted when `--chain-spec` is not given.
pub const CHAIN_SPEC_ENV: &str = "ETC_CHAIN_SPEC";

#[derive(Debug, Clone)]
pub struct SpecToolConfig {
    /// Chain-spec JSON document to load.
    pub chain_spec: Option<PathBuf>,
    /// Log level filter string (e.g. "info", "etc_core=debug").
    pub log_level: String,
    /// Log output format ("text" or "json").
    pub log_format: String,
}

impl Default for SpecToolConfig {
    fn default() -> Self {
        Self {
            chain_spec: None,
            log_level: "warn".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl SpecToolConfig {
    /// The chain-spec path, falling back to [`CHAIN_SPEC_ENV`].
    pub fn chain_spec_path(&self) -> Result<PathBuf> {
        self.chain_spec_path_with(|key| std::env::var(key).ok())
    }

    /// Like [`chain_spec_path`](Self::chain_spec_path) with an explicit
    /// environment lookup.
    pub fn chain_spec_path_with(&self, env: impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
        if let Some(path) = &self.chain_spec {
            return Ok(path.clone());
        }
        env(CHAIN_SPEC_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .with_context(|| format!("no chain spec given: pass --chain-spec or set {CHAIN_SPEC_ENV}"))
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}
