//! # etc-consensus — Classic engine parameters and fork scheduling.
//!
//! This crate provides the Etchash engine, the only Ethash-family engine
//! exposed to the host through [`ChainSpecEngineParameters`](etc_core::ChainSpecEngineParameters),
//! together with the explicit [`EngineRegistry`], the chain-spec loader, and
//! the [`ForkSchedule`] that aggregates transitions across engines.

pub mod etchash;
pub mod loader;
pub mod registry;
pub mod schedule;

pub use etchash::EtchashParameters;
pub use loader::{load_chain_spec, load_chain_spec_from_path};
pub use registry::{EngineFactory, EngineRegistry};
pub use schedule::ForkSchedule;
