//! Engine names and parameter defaults.

/// Seal engine type and engine name reported by the base Ethash parameters.
pub const ETHASH_ENGINE: &str = "Ethash";

/// Engine name of the Ethereum Classic parameter set.
pub const ETCHASH_ENGINE: &str = "Etchash";

/// Default `difficultyBoundDivisor` (2048).
pub const DEFAULT_DIFFICULTY_BOUND_DIVISOR: u64 = 0x0800;

/// Default `durationLimit` in seconds.
pub const DEFAULT_DURATION_LIMIT: u64 = 13;

/// Default `homesteadTransition`: Homestead rules apply from genesis.
pub const DEFAULT_HOMESTEAD_TRANSITION: u64 = 0;

/// Position of Muir Glacier among the declared bomb-delay keys.
///
/// The landmark positions follow the historical fork order of the
/// bomb-delay entries in published chain specs (Byzantium, Constantinople,
/// Muir Glacier, London, Arrow Glacier, Gray Glacier). A spec that omits or
/// reorders an entry shifts every later landmark.
pub const MUIR_GLACIER_DELAY_INDEX: usize = 2;

/// Position of Arrow Glacier among the declared bomb-delay keys.
pub const ARROW_GLACIER_DELAY_INDEX: usize = 4;

/// Position of Gray Glacier among the declared bomb-delay keys.
pub const GRAY_GLACIER_DELAY_INDEX: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_divisor_is_2048() {
        assert_eq!(DEFAULT_DIFFICULTY_BOUND_DIVISOR, 2048);
    }

    #[test]
    fn glacier_indices_are_ordered() {
        assert!(MUIR_GLACIER_DELAY_INDEX < ARROW_GLACIER_DELAY_INDEX);
        assert!(ARROW_GLACIER_DELAY_INDEX < GRAY_GLACIER_DELAY_INDEX);
    }

    #[test]
    fn engine_names_differ() {
        assert_ne!(ETHASH_ENGINE, ETCHASH_ENGINE);
    }
}
