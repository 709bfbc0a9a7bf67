//! The engine seam between chain-spec parameters and the host client.

use std::collections::BTreeSet;
use std::fmt;

use crate::chain_spec::ChainSpec;
use crate::release_spec::ReleaseSpec;

/// A consensus engine's chain-spec parameters as seen by the host.
///
/// The host collects transitions from every installed engine to build its
/// global fork boundaries, applies each engine once to the [`ChainSpec`]
/// during initialization, and applies each engine to a fresh
/// [`ReleaseSpec`] for every height it needs rules for.
///
/// Implementations are read-only after loading and shared across threads.
pub trait ChainSpecEngineParameters: fmt::Debug + Send + Sync {
    /// Name of the engine section in the chain spec.
    fn engine_name(&self) -> &str;

    /// Seal engine the host should use to verify blocks.
    fn seal_engine_type(&self) -> &str;

    /// Add every block number and timestamp at which a parameter changes.
    fn add_transitions(&self, block_numbers: &mut BTreeSet<u64>, timestamps: &mut BTreeSet<u64>);

    /// Fold parameters effective at `start_block` into `spec`.
    fn apply_to_release_spec(&self, spec: &mut ReleaseSpec, start_block: u64, start_timestamp: Option<u64>);

    /// Fill in document-level landmarks.
    fn apply_to_chain_spec(&self, chain_spec: &mut ChainSpec);
}
