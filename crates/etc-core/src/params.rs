//! Base Ethash engine parameters.
//!
//! [`EthashParameters`] is the parameter store read from the `params` object
//! of an Ethash-family engine in a chain spec. It is read-only once loaded and
//! can be shared across any number of concurrent projections.
//!
//! The type deliberately does not implement
//! [`ChainSpecEngineParameters`](crate::traits::ChainSpecEngineParameters):
//! it is the shared base of an engine family, not an engine of its own. Only
//! a distinguishing wrapper is registered with the host.

use std::collections::BTreeSet;

use ethereum_types::{Address, U256};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::chain_spec::ChainSpec;
use crate::constants::{
    ARROW_GLACIER_DELAY_INDEX, DEFAULT_DIFFICULTY_BOUND_DIVISOR, DEFAULT_DURATION_LIMIT,
    DEFAULT_HOMESTEAD_TRANSITION, ETHASH_ENGINE, GRAY_GLACIER_DELAY_INDEX,
    MUIR_GLACIER_DELAY_INDEX,
};
use crate::number;
use crate::release_spec::ReleaseSpec;
use crate::schedules::{BlockRewardSchedule, BombDelaySchedule};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EthashParameters {
    #[serde(deserialize_with = "number::u64_from")]
    pub homestead_transition: u64,
    #[serde(deserialize_with = "number::opt_u64_from")]
    pub dao_hardfork_transition: Option<u64>,
    pub dao_hardfork_beneficiary: Option<Address>,
    pub dao_hardfork_accounts: Vec<Address>,
    #[serde(deserialize_with = "number::opt_u64_from")]
    pub eip100b_transition: Option<u64>,
    #[serde(deserialize_with = "number::opt_u64_from")]
    pub fixed_difficulty: Option<u64>,
    #[serde(deserialize_with = "number::u64_from")]
    pub difficulty_bound_divisor: u64,
    #[serde(deserialize_with = "number::u64_from")]
    pub duration_limit: u64,
    #[serde(deserialize_with = "number::u256_from")]
    pub minimum_difficulty: U256,
    pub block_reward: Option<BlockRewardSchedule>,
    pub difficulty_bomb_delays: Option<BombDelaySchedule>,
}

impl Default for EthashParameters {
    fn default() -> Self {
        Self {
            homestead_transition: DEFAULT_HOMESTEAD_TRANSITION,
            dao_hardfork_transition: None,
            dao_hardfork_beneficiary: None,
            dao_hardfork_accounts: Vec::new(),
            eip100b_transition: None,
            fixed_difficulty: None,
            difficulty_bound_divisor: DEFAULT_DIFFICULTY_BOUND_DIVISOR,
            duration_limit: DEFAULT_DURATION_LIMIT,
            minimum_difficulty: U256::zero(),
            block_reward: None,
            difficulty_bomb_delays: None,
        }
    }
}

impl EthashParameters {
    pub fn engine_name(&self) -> &'static str {
        ETHASH_ENGINE
    }

    pub fn seal_engine_type(&self) -> &'static str {
        ETHASH_ENGINE
    }

    /// Record every block height at which one of these parameters changes.
    ///
    /// Ethash is keyed by block number only, so `_timestamps` is never
    /// written. Both sets absorb duplicates, so calling this repeatedly is
    /// harmless.
    pub fn add_transitions(&self, block_numbers: &mut BTreeSet<u64>, _timestamps: &mut BTreeSet<u64>) {
        if let Some(delays) = &self.difficulty_bomb_delays {
            block_numbers.extend(delays.keys());
        }
        if let Some(rewards) = &self.block_reward {
            block_numbers.extend(rewards.keys());
        }

        block_numbers.insert(self.homestead_transition);
        if let Some(dao) = self.dao_hardfork_transition {
            block_numbers.insert(dao);
        }
        if let Some(eip100b) = self.eip100b_transition {
            block_numbers.insert(eip100b);
        }
    }

    /// Fold these parameters into the release spec for `start_block`.
    ///
    /// The reward is the one at the greatest configured height not above
    /// `start_block`. Bomb delays are added onto whatever the spec already
    /// carries. Divisor and fixed difficulty are not transition-gated.
    pub fn apply_to_release_spec(
        &self,
        spec: &mut ReleaseSpec,
        start_block: u64,
        _start_timestamp: Option<u64>,
    ) {
        if let Some(reward) = self.block_reward.as_ref().and_then(|r| r.reward_at(start_block)) {
            spec.block_reward = reward;
        }
        if let Some(delays) = &self.difficulty_bomb_delays {
            spec.difficulty_bomb_delay = spec
                .difficulty_bomb_delay
                .saturating_add(delays.cumulative_delay_at(start_block));
        }

        spec.is_eip2_enabled = self.homestead_transition <= start_block;
        spec.is_eip7_enabled = self.homestead_transition <= start_block;
        spec.is_eip100_enabled = self.eip100b_transition.unwrap_or(0) <= start_block;
        spec.difficulty_bound_divisor = self.difficulty_bound_divisor;
        spec.fixed_difficulty = self.fixed_difficulty;

        debug!(
            start_block,
            reward = %spec.block_reward,
            bomb_delay = spec.difficulty_bomb_delay,
            eip100 = spec.is_eip100_enabled,
            "ethash: release spec projected"
        );
    }

    /// Derive the document-level landmarks.
    ///
    /// Glacier fork numbers are read by position from the declared bomb-delay
    /// keys. Landmarks whose position is missing are left untouched.
    pub fn apply_to_chain_spec(&self, chain_spec: &mut ChainSpec) {
        if let Some(delays) = &self.difficulty_bomb_delays {
            if !delays.is_ascending() {
                warn!(
                    keys = ?delays.keys().collect::<Vec<_>>(),
                    "ethash: bomb delay heights are not ascending, glacier landmarks follow declaration order"
                );
            }
            if let Some(muir) = delays.key_at(MUIR_GLACIER_DELAY_INDEX) {
                chain_spec.muir_glacier_number = Some(muir);
            }
            if let Some(arrow) = delays.key_at(ARROW_GLACIER_DELAY_INDEX) {
                chain_spec.arrow_glacier_block_number = Some(arrow);
            }
            if let Some(gray) = delays.key_at(GRAY_GLACIER_DELAY_INDEX) {
                chain_spec.gray_glacier_block_number = Some(gray);
            }
        }
        chain_spec.homestead_block_number = Some(self.homestead_transition);
        chain_spec.dao_fork_block_number = self.dao_hardfork_transition;

        debug!(
            homestead = self.homestead_transition,
            dao = ?chain_spec.dao_fork_block_number,
            muir = ?chain_spec.muir_glacier_number,
            arrow = ?chain_spec.arrow_glacier_block_number,
            gray = ?chain_spec.gray_glacier_block_number,
            "ethash: chain spec landmarks derived"
        );
    }
}
