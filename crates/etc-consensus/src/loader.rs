//! Chain-spec document loading.
//!
//! A chain spec names its engines under `engine`, each with a `params`
//! object:
//!
//! ```json
//! {
//!   "name": "Ethereum Classic",
//!   "engine": { "Etchash": { "params": { "homesteadTransition": "0x118c30" } } }
//! }
//! ```
//!
//! Only the engine section is read here; genesis, accounts, and node lists
//! belong to other parts of the host client.

use std::path::Path;

use etc_core::ChainSpecError;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::registry::EngineRegistry;
use crate::schedule::ForkSchedule;

#[derive(Debug, Deserialize)]
struct ChainSpecDocument {
    #[serde(default)]
    name: String,
    engine: Option<Map<String, Value>>,
}

/// Parse `json` and resolve every engine through `registry`.
///
/// # Errors
///
/// Malformed JSON, a missing or empty engine section, an engine without a
/// `params` object, an unregistered engine, or invalid parameter values.
pub fn load_chain_spec(json: &str, registry: &EngineRegistry) -> Result<ForkSchedule, ChainSpecError> {
    let doc: ChainSpecDocument = serde_json::from_str(json)?;
    let section = doc.engine.ok_or(ChainSpecError::MissingEngine)?;
    if section.is_empty() {
        return Err(ChainSpecError::MissingEngine);
    }

    let mut engines = Vec::with_capacity(section.len());
    for (name, body) in section {
        let params = match body {
            Value::Object(mut fields) => fields
                .remove("params")
                .ok_or_else(|| ChainSpecError::MissingParams(name.clone()))?,
            _ => return Err(ChainSpecError::MissingParams(name)),
        };
        let engine = registry.resolve(&name, params)?;
        info!(chain = %doc.name, engine = %name, seal = engine.seal_engine_type(), "engine loaded");
        engines.push(engine);
    }

    Ok(ForkSchedule::new(doc.name, engines))
}

/// Read the chain spec at `path` and load it with [`load_chain_spec`].
pub fn load_chain_spec_from_path(
    path: impl AsRef<Path>,
    registry: &EngineRegistry,
) -> Result<ForkSchedule, ChainSpecError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|e| ChainSpecError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    load_chain_spec(&json, registry)
}
