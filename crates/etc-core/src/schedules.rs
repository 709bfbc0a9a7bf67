//! Height-keyed parameter schedules.
//!
//! Two schedules with deliberately different ordering rules:
//!
//! - [`BlockRewardSchedule`] is sorted by height. The reward in force at a
//!   height is the value at the greatest key not above it.
//! - [`BombDelaySchedule`] keeps the order in which the chain spec declared
//!   its entries. Delays are summed over every key not above a height, which
//!   is order-independent, but the glacier landmarks are read by position
//!   (see [`crate::params::EthashParameters::apply_to_chain_spec`]).

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::fmt;

use ethereum_types::U256;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::number::{parse_u256, parse_u64, SpecI64, SpecU256, JSON_NUMBER_TOKEN};

/// Block reward by activation height.
///
/// In JSON either a single value (the reward from genesis) or an object
/// mapping heights to rewards:
///
/// ```
/// use etc_core::schedules::BlockRewardSchedule;
/// use etc_core::U256;
///
/// let single: BlockRewardSchedule = serde_json::from_str("\"0x4563918244f40000\"").unwrap();
/// assert_eq!(single.keys().collect::<Vec<_>>(), vec![0]);
///
/// let map: BlockRewardSchedule =
///     serde_json::from_str(r#"{"0x0": "0x5", "0x3e8": "0x3"}"#).unwrap();
/// assert_eq!(map.reward_at(999), Some(U256::from(5u64)));
/// assert_eq!(map.reward_at(1000), Some(U256::from(3u64)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockRewardSchedule(BTreeMap<u64, U256>);

impl BlockRewardSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, height: u64, reward: U256) -> Option<U256> {
        self.0.insert(height, reward)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Heights in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.keys().copied()
    }

    /// The reward at the greatest height `<= block`, if any entry applies.
    pub fn reward_at(&self, block: u64) -> Option<U256> {
        self.0.range(..=block).next_back().map(|(_, r)| *r)
    }
}

impl FromIterator<(u64, U256)> for BlockRewardSchedule {
    fn from_iter<I: IntoIterator<Item = (u64, U256)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

struct RewardVisitor;

impl<'de> Visitor<'de> for RewardVisitor {
    type Value = BlockRewardSchedule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a reward value or an object of height => reward")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(std::iter::once((0, U256::from(v))).collect())
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
        Ok(std::iter::once((0, U256::from(v))).collect())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let reward = parse_u256(v).map_err(E::custom)?;
        Ok(std::iter::once((0, reward)).collect())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut schedule = BlockRewardSchedule::new();
        let mut next = map.next_key::<String>()?;
        if next.as_deref() == Some(JSON_NUMBER_TOKEN) {
            // A single reward written as a number wider than u64.
            let text: String = map.next_value()?;
            return self.visit_str(&text);
        }
        while let Some(key) = next {
            let height = parse_u64(&key).map_err(de::Error::custom)?;
            let value: SpecU256 = map.next_value()?;
            if schedule.insert(height, value.0).is_some() {
                return Err(de::Error::custom(format!(
                    "duplicate block reward height {height}"
                )));
            }
            next = map.next_key()?;
        }
        Ok(schedule)
    }
}

impl<'de> Deserialize<'de> for BlockRewardSchedule {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_any(RewardVisitor)
    }
}

/// Difficulty bomb delays in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BombDelaySchedule(Vec<(u64, i64)>);

impl BombDelaySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Heights in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|(h, _)| *h)
    }

    /// The `index`-th declared height.
    pub fn key_at(&self, index: usize) -> Option<u64> {
        self.0.get(index).map(|(h, _)| *h)
    }

    /// Sum of every delay activated at or before `block`.
    pub fn cumulative_delay_at(&self, block: u64) -> i64 {
        self.0
            .iter()
            .filter(|(h, _)| *h <= block)
            .fold(0i64, |acc, (_, delay)| acc.saturating_add(*delay))
    }

    /// Whether the declared heights are strictly ascending.
    pub fn is_ascending(&self) -> bool {
        self.0.windows(2).all(|w| w[0].0 < w[1].0)
    }
}

impl FromIterator<(u64, i64)> for BombDelaySchedule {
    fn from_iter<I: IntoIterator<Item = (u64, i64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

struct DelayVisitor;

impl<'de> Visitor<'de> for DelayVisitor {
    type Value = BombDelaySchedule;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of height => bomb delay")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();
        while let Some((key, value)) = map.next_entry::<String, SpecI64>()? {
            let height = parse_u64(&key).map_err(de::Error::custom)?;
            if !seen.insert(height) {
                return Err(de::Error::custom(format!(
                    "duplicate bomb delay height {height}"
                )));
            }
            entries.push((height, value.0));
        }
        Ok(BombDelaySchedule(entries))
    }
}

impl<'de> Deserialize<'de> for BombDelaySchedule {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_map(DelayVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewards(entries: &[(u64, u64)]) -> BlockRewardSchedule {
        entries.iter().map(|&(h, r)| (h, U256::from(r))).collect()
    }

    // ------------------------------------------------------------------
    // BlockRewardSchedule
    // ------------------------------------------------------------------

    #[test]
    fn reward_last_applicable_wins() {
        let s = rewards(&[(0, 5), (1000, 3)]);
        assert_eq!(s.reward_at(0), Some(U256::from(5u64)));
        assert_eq!(s.reward_at(999), Some(U256::from(5u64)));
        assert_eq!(s.reward_at(1000), Some(U256::from(3u64)));
        assert_eq!(s.reward_at(u64::MAX), Some(U256::from(3u64)));
    }

    #[test]
    fn reward_before_first_entry_is_none() {
        let s = rewards(&[(10, 5)]);
        assert_eq!(s.reward_at(9), None);
    }

    #[test]
    fn reward_keys_sorted_regardless_of_input_order() {
        let s = rewards(&[(500, 1), (0, 3), (100, 2)]);
        assert_eq!(s.keys().collect::<Vec<_>>(), vec![0, 100, 500]);
    }

    #[test]
    fn reward_map_with_unsorted_json_keys() {
        let s: BlockRewardSchedule =
            serde_json::from_str(r#"{"0x3e8": 3, "0x0": "5"}"#).unwrap();
        assert_eq!(s.keys().collect::<Vec<_>>(), vec![0, 1000]);
        assert_eq!(s.reward_at(1000), Some(U256::from(3u64)));
    }

    #[test]
    fn reward_single_number_starts_at_genesis() {
        let s: BlockRewardSchedule = serde_json::from_str("7").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.reward_at(0), Some(U256::from(7u64)));
    }

    #[test]
    fn reward_single_wide_number_starts_at_genesis() {
        let s: BlockRewardSchedule = serde_json::from_str("100000000000000000000").unwrap();
        assert_eq!(s.keys().collect::<Vec<_>>(), vec![0]);
        assert_eq!(s.reward_at(0), U256::from_dec_str("100000000000000000000").ok());
    }

    #[test]
    fn reward_duplicate_height_rejected() {
        let r = serde_json::from_str::<BlockRewardSchedule>(r#"{"0x0": 1, "0": 2}"#);
        assert!(r.is_err());
    }

    #[test]
    fn reward_bad_key_rejected() {
        let r = serde_json::from_str::<BlockRewardSchedule>(r#"{"genesis": 1}"#);
        assert!(r.is_err());
    }

    // ------------------------------------------------------------------
    // BombDelaySchedule
    // ------------------------------------------------------------------

    #[test]
    fn delays_accumulate() {
        let s: BombDelaySchedule = [(100, 3_000_000), (200, 2_000_000)].into_iter().collect();
        assert_eq!(s.cumulative_delay_at(50), 0);
        assert_eq!(s.cumulative_delay_at(100), 3_000_000);
        assert_eq!(s.cumulative_delay_at(150), 3_000_000);
        assert_eq!(s.cumulative_delay_at(250), 5_000_000);
    }

    #[test]
    fn delays_keep_declaration_order() {
        let s: BombDelaySchedule =
            serde_json::from_str(r#"{"0x64": 1, "0xa": 2, "0x32": 3}"#).unwrap();
        assert_eq!(s.keys().collect::<Vec<_>>(), vec![100, 10, 50]);
        assert_eq!(s.key_at(1), Some(10));
        assert!(!s.is_ascending());
    }

    #[test]
    fn delays_sum_is_order_independent() {
        let a: BombDelaySchedule = [(10, 1), (20, 2), (30, 4)].into_iter().collect();
        let b: BombDelaySchedule = [(30, 4), (10, 1), (20, 2)].into_iter().collect();
        for block in [0, 10, 15, 20, 29, 30, 1000] {
            assert_eq!(a.cumulative_delay_at(block), b.cumulative_delay_at(block));
        }
    }

    #[test]
    fn delays_duplicate_height_rejected() {
        let r = serde_json::from_str::<BombDelaySchedule>(r#"{"0x64": 1, "100": 2}"#);
        assert!(r.is_err());
    }

    #[test]
    fn delays_accept_negative_values() {
        let s: BombDelaySchedule = serde_json::from_str(r#"{"10": 5, "20": "-3"}"#).unwrap();
        assert_eq!(s.cumulative_delay_at(20), 2);
    }

    #[test]
    fn delays_saturate_instead_of_overflowing() {
        let s: BombDelaySchedule = [(0, i64::MAX), (1, i64::MAX)].into_iter().collect();
        assert_eq!(s.cumulative_delay_at(1), i64::MAX);
    }

    #[test]
    fn empty_schedule_is_ascending() {
        assert!(BombDelaySchedule::new().is_ascending());
        assert_eq!(BombDelaySchedule::new().key_at(0), None);
    }
}
