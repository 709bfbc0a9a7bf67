//! Explicit engine registry.
//!
//! Engines are entered here by name; nothing is discovered automatically.
//! The shared Ethash base parameters are never registered, so a chain spec
//! naming `Ethash` is left to whatever built-in engine the host already has
//! and cannot collide with the Classic engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use etc_core::constants::ETCHASH_ENGINE;
use etc_core::{ChainSpecEngineParameters, ChainSpecError};
use serde_json::Value;

use crate::etchash::EtchashParameters;

/// Builds an engine's parameters from its `params` object.
pub type EngineFactory = fn(Value) -> Result<Arc<dyn ChainSpecEngineParameters>, ChainSpecError>;

#[derive(Debug, Clone)]
pub struct EngineRegistry {
    factories: BTreeMap<String, EngineFactory>,
}

fn etchash_factory(params: Value) -> Result<Arc<dyn ChainSpecEngineParameters>, ChainSpecError> {
    let parsed: EtchashParameters =
        serde_json::from_value(params).map_err(|e| ChainSpecError::InvalidParams {
            engine: ETCHASH_ENGINE.to_string(),
            message: e.to_string(),
        })?;
    Ok(Arc::new(parsed))
}

impl EngineRegistry {
    /// A registry with no engines at all.
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Enter `factory` under `name`.
    ///
    /// # Errors
    ///
    /// [`ChainSpecError::DuplicateEngine`] if `name` is already taken.
    pub fn register(&mut self, name: &str, factory: EngineFactory) -> Result<(), ChainSpecError> {
        if self.factories.contains_key(name) {
            return Err(ChainSpecError::DuplicateEngine(name.to_string()));
        }
        self.factories.insert(name.to_string(), factory);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered engine names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    /// Build the parameters of engine `name` from its `params` object.
    ///
    /// # Errors
    ///
    /// [`ChainSpecError::UnknownEngine`] for an unregistered name, or
    /// whatever the engine's factory reports for malformed params.
    pub fn resolve(
        &self,
        name: &str,
        params: Value,
    ) -> Result<Arc<dyn ChainSpecEngineParameters>, ChainSpecError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ChainSpecError::UnknownEngine(name.to_string()))?;
        factory(params)
    }
}

impl Default for EngineRegistry {
    /// The Classic engine only.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .factories
            .insert(ETCHASH_ENGINE.to_string(), etchash_factory);
        registry
    }
}
