//! # etc-core
//! Ethash-family chain-spec parameters: transition collection, per-height
//! release spec projection, and chain-spec landmark derivation.

pub mod chain_spec;
pub mod constants;
pub mod error;
pub mod number;
pub mod params;
pub mod release_spec;
pub mod schedules;
pub mod traits;

pub use chain_spec::ChainSpec;
pub use error::{ChainSpecError, NumberError};
pub use ethereum_types::{Address, U256};
pub use params::EthashParameters;
pub use release_spec::ReleaseSpec;
pub use traits::ChainSpecEngineParameters;
