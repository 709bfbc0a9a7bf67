//! Ethereum Classic (Etchash) engine parameters.
//!
//! Wraps the shared [`EthashParameters`] and adds the ECIP transitions that
//! only Classic networks configure. This is the type registered with the
//! host; the Ethash base never is.

use std::collections::BTreeSet;

use etc_core::constants::ETCHASH_ENGINE;
use etc_core::number;
use etc_core::{ChainSpec, ChainSpecEngineParameters, EthashParameters, ReleaseSpec};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EtchashParameters {
    pub base: EthashParameters,
    /// ECIP-1010: difficulty bomb paused from this height.
    pub ecip1010_pause_transition: Option<u64>,
    /// ECIP-1010: difficulty bomb resumes from this height.
    pub ecip1010_continue_transition: Option<u64>,
    /// ECIP-1017: blocks per monetary-policy era.
    pub ecip1017_era_rounds: Option<u64>,
    /// ECIP-1041: difficulty bomb removed from this height.
    pub ecip1041_transition: Option<u64>,
    /// ECIP-1099: Etchash epoch length doubled from this height.
    pub ecip1099_transition: Option<u64>,
}

/// Classic-only fields, read from the same `params` object as the base.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassicTransitions {
    #[serde(default, deserialize_with = "number::opt_u64_from")]
    ecip1010_pause_transition: Option<u64>,
    #[serde(default, deserialize_with = "number::opt_u64_from")]
    ecip1010_continue_transition: Option<u64>,
    #[serde(default, deserialize_with = "number::opt_u64_from")]
    ecip1017_era_rounds: Option<u64>,
    #[serde(default, deserialize_with = "number::opt_u64_from")]
    ecip1041_transition: Option<u64>,
    #[serde(default, deserialize_with = "number::opt_u64_from")]
    ecip1099_transition: Option<u64>,
}

impl<'de> Deserialize<'de> for EtchashParameters {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        // Buffered as a `Value`, not `#[serde(flatten)]`: serde's flatten
        // buffer has no room for integers wider than u64.
        let fields = Value::deserialize(d)?;
        let base = EthashParameters::deserialize(&fields).map_err(de::Error::custom)?;
        let classic = ClassicTransitions::deserialize(&fields).map_err(de::Error::custom)?;
        Ok(Self {
            base,
            ecip1010_pause_transition: classic.ecip1010_pause_transition,
            ecip1010_continue_transition: classic.ecip1010_continue_transition,
            ecip1017_era_rounds: classic.ecip1017_era_rounds,
            ecip1041_transition: classic.ecip1041_transition,
            ecip1099_transition: classic.ecip1099_transition,
        })
    }
}

fn activated(transition: Option<u64>, block: u64) -> bool {
    transition.is_some_and(|t| t <= block)
}

impl EtchashParameters {
    pub fn new(base: EthashParameters) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Whether the ECIP-1010 bomb pause is in effect at `block`.
    pub fn is_bomb_paused_at(&self, block: u64) -> bool {
        activated(self.ecip1010_pause_transition, block)
            && !activated(self.ecip1010_continue_transition, block)
    }
}

impl ChainSpecEngineParameters for EtchashParameters {
    fn engine_name(&self) -> &str {
        ETCHASH_ENGINE
    }

    fn seal_engine_type(&self) -> &str {
        ETCHASH_ENGINE
    }

    fn add_transitions(&self, block_numbers: &mut BTreeSet<u64>, timestamps: &mut BTreeSet<u64>) {
        self.base.add_transitions(block_numbers, timestamps);
        block_numbers.extend(
            [
                self.ecip1010_pause_transition,
                self.ecip1010_continue_transition,
                self.ecip1041_transition,
                self.ecip1099_transition,
            ]
            .into_iter()
            .flatten(),
        );
    }

    fn apply_to_release_spec(&self, spec: &mut ReleaseSpec, start_block: u64, start_timestamp: Option<u64>) {
        self.base.apply_to_release_spec(spec, start_block, start_timestamp);

        spec.is_ecip1010_paused = self.is_bomb_paused_at(start_block);
        spec.is_ecip1041_enabled = activated(self.ecip1041_transition, start_block);
        spec.is_ecip1099_enabled = activated(self.ecip1099_transition, start_block);
        spec.ecip1017_era_rounds = self.ecip1017_era_rounds;

        debug!(
            start_block,
            ecip1010_paused = spec.is_ecip1010_paused,
            ecip1041 = spec.is_ecip1041_enabled,
            ecip1099 = spec.is_ecip1099_enabled,
            "etchash: classic transitions applied"
        );
    }

    fn apply_to_chain_spec(&self, chain_spec: &mut ChainSpec) {
        self.base.apply_to_chain_spec(chain_spec);
        chain_spec.seal_engine_type = Some(ETCHASH_ENGINE.to_string());
        chain_spec.ecip1041_block_number = self.ecip1041_transition;
        chain_spec.ecip1099_block_number = self.ecip1099_transition;
    }
}
