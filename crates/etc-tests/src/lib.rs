//! Integration test suite for the Ethash-family chain-spec parameters.
//!
//! Property tests check the projection invariants under randomized parameter
//! sets; fixture tests load real-world chain-spec shapes end to end.

pub mod helpers;
