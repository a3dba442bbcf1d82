//! Parameter sets and fingerprinting.
//!
//! A `ParamSet` is one fully-specified candidate: strategy, interval,
//! position lifecycle settings, and the strategy's tuning values. The
//! `tuning` map is a `BTreeMap` so serialization is canonical (key-sorted)
//! and fingerprints are independent of insertion order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Interval, PositionMode};
use crate::strategy::StrategyId;

/// Deterministic identity for a `ParamSet`, used for deduplication.
///
/// Truncated hex of the blake3 hash of the canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    const HEX_LEN: usize = 16;

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let hash = blake3::hash(bytes);
        Fingerprint(hash.to_hex()[..Self::HEX_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate configuration: strategy, interval, position lifecycle
/// settings, and strategy-specific tuning values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSet {
    pub strategy: StrategyId,
    pub interval: Interval,
    pub position_mode: PositionMode,
    pub max_pyramid: usize,
    pub take_profit_pct: f64,
    pub stop_loss_pct: f64,
    /// Strategy-specific keys (key-sorted for canonical serialization).
    pub tuning: BTreeMap<String, f64>,
}

impl ParamSet {
    pub fn new(
        strategy: StrategyId,
        interval: Interval,
        position_mode: PositionMode,
        max_pyramid: usize,
        take_profit_pct: f64,
        stop_loss_pct: f64,
    ) -> Self {
        Self {
            strategy,
            interval,
            position_mode,
            max_pyramid,
            take_profit_pct,
            stop_loss_pct,
            tuning: BTreeMap::new(),
        }
    }

    /// Deterministic fingerprint over the canonical serialization.
    ///
    /// Equal param sets produce equal fingerprints regardless of the order
    /// in which tuning keys were inserted.
    pub fn fingerprint(&self) -> Fingerprint {
        let json = serde_json::to_string(self).expect("ParamSet must serialize");
        Fingerprint::from_bytes(json.as_bytes())
    }

    /// Tuning value as f64, with the strategy's documented default.
    pub fn tuning_f64(&self, key: &str, default: f64) -> f64 {
        self.tuning.get(key).copied().unwrap_or(default)
    }

    /// Tuning value as a window/period length, with default.
    pub fn tuning_usize(&self, key: &str, default: usize) -> usize {
        self.tuning
            .get(key)
            .map(|v| v.round() as usize)
            .unwrap_or(default)
    }

    pub fn set(&mut self, key: &str, value: f64) -> &mut Self {
        self.tuning.insert(key.to_string(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParamSet {
        let mut p = ParamSet::new(
            StrategyId::MaCross,
            Interval::H1,
            PositionMode::Basic,
            3,
            0.01,
            0.005,
        );
        p.set("ma_fast", 9.0).set("ma_slow", 21.0);
        p
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let p = sample();
        assert_eq!(p.fingerprint(), p.fingerprint());
    }

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let mut a = ParamSet::new(
            StrategyId::MaCross,
            Interval::H1,
            PositionMode::Basic,
            3,
            0.01,
            0.005,
        );
        a.set("ma_fast", 9.0).set("ma_slow", 21.0);

        let mut b = ParamSet::new(
            StrategyId::MaCross,
            Interval::H1,
            PositionMode::Basic,
            3,
            0.01,
            0.005,
        );
        b.set("ma_slow", 21.0).set("ma_fast", 9.0);

        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn fingerprint_differs_on_any_field() {
        let base = sample();

        let mut other = base.clone();
        other.interval = Interval::M15;
        assert_ne!(base.fingerprint(), other.fingerprint());

        let mut other = base.clone();
        other.set("ma_fast", 12.0);
        assert_ne!(base.fingerprint(), other.fingerprint());

        let mut other = base.clone();
        other.position_mode = PositionMode::Doten;
        assert_ne!(base.fingerprint(), other.fingerprint());
    }

    #[test]
    fn serde_roundtrip_preserves_fingerprint() {
        let p = sample();
        let json = serde_json::to_string(&p).unwrap();
        let back: ParamSet = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
        assert_eq!(p.fingerprint(), back.fingerprint());
    }

    #[test]
    fn tuning_accessors_fall_back_to_defaults() {
        let p = sample();
        assert_eq!(p.tuning_usize("ma_fast", 9), 9);
        assert_eq!(p.tuning_usize("missing", 14), 14);
        assert_eq!(p.tuning_f64("missing", 0.002), 0.002);
    }
}
