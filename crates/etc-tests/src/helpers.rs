//! Shared fixtures and builders for the integration tests.

use std::sync::Arc;

use etc_consensus::{load_chain_spec, EngineRegistry, EtchashParameters, ForkSchedule};
use etc_core::{ChainSpecEngineParameters, EthashParameters, U256};

/// Ethereum Classic mainnet engine section.
pub const CLASSIC_JSON: &str = include_str!("../fixtures/classic.json");

/// Etchash section carrying the six historical bomb-delay entries.
pub const GLACIER_DELAYS_JSON: &str = include_str!("../fixtures/glacier_delays.json");

/// One ether (and one ETC) in wei.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

/// Load a fixture with the default registry.
pub fn load(json: &str) -> ForkSchedule {
    load_chain_spec(json, &EngineRegistry::default()).expect("fixture chain spec loads")
}

/// Base parameters with the given reward and bomb-delay entries.
pub fn params(rewards: &[(u64, u64)], delays: &[(u64, i64)]) -> EthashParameters {
    EthashParameters {
        block_reward: (!rewards.is_empty())
            .then(|| rewards.iter().map(|&(h, r)| (h, U256::from(r))).collect()),
        difficulty_bomb_delays: (!delays.is_empty()).then(|| delays.iter().copied().collect()),
        ..EthashParameters::default()
    }
}

/// Wrap base parameters as a registered engine.
pub fn engine(base: EthashParameters) -> Arc<dyn ChainSpecEngineParameters> {
    Arc::new(EtchashParameters::new(base))
}
