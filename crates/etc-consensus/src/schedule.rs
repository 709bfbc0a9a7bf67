//! Host-side fork schedule across every installed engine.
//!
//! The schedule gathers each engine's transitions into one sorted set of fork
//! boundaries, derives the chain spec landmarks once, and builds a release
//! spec on demand for any height.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use etc_core::{ChainSpec, ChainSpecEngineParameters, ReleaseSpec};
use tracing::debug;

pub struct ForkSchedule {
    engines: Vec<Arc<dyn ChainSpecEngineParameters>>,
    block_numbers: BTreeSet<u64>,
    timestamps: BTreeSet<u64>,
    chain_spec: ChainSpec,
}

impl fmt::Debug for ForkSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForkSchedule")
            .field("chain", &self.chain_spec.name)
            .field("engines", &self.engines.len())
            .field("block_transitions", &self.block_numbers.len())
            .finish_non_exhaustive()
    }
}

impl ForkSchedule {
    /// Collect transitions from `engines` and apply them to a new chain spec.
    pub fn new(name: impl Into<String>, engines: Vec<Arc<dyn ChainSpecEngineParameters>>) -> Self {
        let mut block_numbers = BTreeSet::new();
        let mut timestamps = BTreeSet::new();
        let mut chain_spec = ChainSpec::new(name);

        for engine in &engines {
            engine.add_transitions(&mut block_numbers, &mut timestamps);
            engine.apply_to_chain_spec(&mut chain_spec);
        }

        debug!(
            chain = %chain_spec.name,
            engines = engines.len(),
            block_transitions = block_numbers.len(),
            timestamp_transitions = timestamps.len(),
            "fork schedule built"
        );

        Self {
            engines,
            block_numbers,
            timestamps,
            chain_spec,
        }
    }

    pub fn chain_spec(&self) -> &ChainSpec {
        &self.chain_spec
    }

    pub fn engines(&self) -> &[Arc<dyn ChainSpecEngineParameters>] {
        &self.engines
    }

    /// Block-number fork boundaries in ascending order.
    pub fn block_transitions(&self) -> impl Iterator<Item = u64> + '_ {
        self.block_numbers.iter().copied()
    }

    /// Timestamp fork boundaries in ascending order.
    pub fn timestamp_transitions(&self) -> impl Iterator<Item = u64> + '_ {
        self.timestamps.iter().copied()
    }

    /// The rules in force at `block` (and `timestamp`, for engines keyed by time).
    pub fn release_spec_at(&self, block: u64, timestamp: Option<u64>) -> ReleaseSpec {
        let mut spec = ReleaseSpec::new();
        for engine in &self.engines {
            engine.apply_to_release_spec(&mut spec, block, timestamp);
        }
        spec
    }

    /// The fork boundary governing `block`: the greatest transition `<= block`.
    ///
    /// Two heights with the same activation share identical release specs.
    pub fn fork_activation(&self, block: u64) -> Option<u64> {
        self.block_numbers.range(..=block).next_back().copied()
    }

    /// The first transition strictly after `block`.
    pub fn next_transition(&self, block: u64) -> Option<u64> {
        self.block_numbers
            .range((std::ops::Bound::Excluded(block), std::ops::Bound::Unbounded))
            .next()
            .copied()
    }
}
