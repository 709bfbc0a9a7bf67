//! Error types for chain-spec loading.
//!
//! The parameter folding itself never fails; everything here belongs to the
//! layer that turns a chain-spec document into parameter sets.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("empty number")] Empty,
    #[error("invalid hex number: {0}")] InvalidHex(String),
    #[error("invalid decimal number: {0}")] InvalidDecimal(String),
    #[error("number out of range: {0}")] OutOfRange(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainSpecError {
    #[error("malformed chain spec: {0}")] Json(String),
    #[error("cannot read {path}: {message}")] Io { path: String, message: String },
    #[error("chain spec has no engine section")] MissingEngine,
    #[error("unknown engine: {0}")] UnknownEngine(String),
    #[error("engine already registered: {0}")] DuplicateEngine(String),
    #[error("engine {0} has no params object")] MissingParams(String),
    #[error("invalid params for engine {engine}: {message}")] InvalidParams { engine: String, message: String },
    #[error(transparent)] Number(#[from] NumberError),
}

impl From<serde_json::Error> for ChainSpecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
