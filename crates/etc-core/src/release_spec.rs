//! Per-height effective consensus parameters.

use ethereum_types::U256;
use serde::Serialize;

/// The consensus rules in force at one block height.
///
/// A fresh `ReleaseSpec` is built for every height query: each engine's
/// parameters are folded into it, and the result is handed to block
/// validation. Fields default to "nothing activated" so that an engine only
/// touches what it is responsible for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSpec {
    /// Block reward in wei.
    pub block_reward: U256,
    /// Cumulative difficulty bomb delay in blocks.
    pub difficulty_bomb_delay: i64,
    pub is_eip2_enabled: bool,
    pub is_eip7_enabled: bool,
    pub is_eip100_enabled: bool,
    pub difficulty_bound_divisor: u64,
    pub fixed_difficulty: Option<u64>,
    /// ECIP-1010: difficulty bomb paused.
    pub is_ecip1010_paused: bool,
    /// ECIP-1041: difficulty bomb removed.
    pub is_ecip1041_enabled: bool,
    /// ECIP-1099: Etchash epoch length doubled.
    pub is_ecip1099_enabled: bool,
    /// ECIP-1017: blocks per monetary-policy era.
    pub ecip1017_era_rounds: Option<u64>,
}

impl ReleaseSpec {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_nothing_enabled() {
        let spec = ReleaseSpec::new();
        assert!(spec.block_reward.is_zero());
        assert_eq!(spec.difficulty_bomb_delay, 0);
        assert!(!spec.is_eip2_enabled);
        assert!(!spec.is_eip7_enabled);
        assert!(!spec.is_eip100_enabled);
        assert!(!spec.is_ecip1099_enabled);
        assert_eq!(spec.fixed_difficulty, None);
    }

    #[test]
    fn serializes_camel_case() {
        let spec = ReleaseSpec {
            block_reward: U256::from(5u64),
            is_eip2_enabled: true,
            ..ReleaseSpec::default()
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["isEip2Enabled"], true);
        assert_eq!(json["blockReward"], "0x5");
        assert_eq!(json["difficultyBombDelay"], 0);
    }
}
