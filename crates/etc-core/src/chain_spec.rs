//! Document-level fork landmarks.

use serde::Serialize;

/// Landmark block numbers derived once per loaded chain.
///
/// Engines fill in the landmarks they know about during initialization;
/// anything left `None` is simply not configured for this chain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSpec {
    pub name: String,
    pub seal_engine_type: Option<String>,
    pub homestead_block_number: Option<u64>,
    pub dao_fork_block_number: Option<u64>,
    pub muir_glacier_number: Option<u64>,
    pub arrow_glacier_block_number: Option<u64>,
    pub gray_glacier_block_number: Option<u64>,
    pub ecip1041_block_number: Option<u64>,
    pub ecip1099_block_number: Option<u64>,
}

impl ChainSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
