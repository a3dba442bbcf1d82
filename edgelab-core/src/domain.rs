//! Core domain types: candles, intervals, signals, positions, trades.
//!
//! Candle sequences are always time-ascending and never reordered. Everything
//! downstream (indicators, strategies, the simulator) relies on that ordering.

use serde::{Deserialize, Serialize};

/// A single OHLCV candle. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Candle interval. Wire names match the exchange API ("1m", "4h", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "4h")]
    H4,
    #[serde(rename = "1d")]
    D1,
}

impl Interval {
    pub const ALL: [Interval; 6] = [
        Interval::M1,
        Interval::M5,
        Interval::M15,
        Interval::H1,
        Interval::H4,
        Interval::D1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1d",
        }
    }

    /// How many candles of this interval make up one day.
    pub fn candles_per_day(&self) -> f64 {
        match self {
            Interval::M1 => 1440.0,
            Interval::M5 => 288.0,
            Interval::M15 => 96.0,
            Interval::H1 => 24.0,
            Interval::H4 => 6.0,
            Interval::D1 => 1.0,
        }
    }

    /// Fetch window length in days appropriate for this interval.
    ///
    /// Short intervals use short windows so candle counts stay comparable
    /// across timeframes.
    pub fn window_days(&self) -> u32 {
        match self {
            Interval::M1 => 3,
            Interval::M5 => 7,
            Interval::M15 => 14,
            Interval::H1 => 30,
            Interval::H4 => 60,
            Interval::D1 => 90,
        }
    }

    /// Candle count converted to elapsed days for this interval.
    pub fn candles_to_days(&self, candle_count: usize) -> f64 {
        candle_count as f64 / self.candles_per_day()
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Long => Direction::Short,
            Direction::Short => Direction::Long,
        }
    }
}

/// Strategy output for a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Long,
    Short,
    None,
}

impl Signal {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Signal::Long => Some(Direction::Long),
            Signal::Short => Some(Direction::Short),
            Signal::None => None,
        }
    }
}

impl From<Direction> for Signal {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Long => Signal::Long,
            Direction::Short => Signal::Short,
        }
    }
}

/// Position lifecycle mode: how the simulator reacts to signals while a
/// position is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Exit only via TP/SL; signals are ignored while in a position.
    Basic,
    /// Same-direction signals add entries up to the pyramid cap.
    Pyramid,
    /// Opposite signals close and immediately reverse.
    Doten,
    /// Both pyramiding and reversal.
    Full,
}

impl PositionMode {
    pub const ALL: [PositionMode; 4] = [
        PositionMode::Basic,
        PositionMode::Pyramid,
        PositionMode::Doten,
        PositionMode::Full,
    ];

    pub fn allows_pyramid(&self) -> bool {
        matches!(self, PositionMode::Pyramid | PositionMode::Full)
    }

    pub fn allows_reversal(&self) -> bool {
        matches!(self, PositionMode::Doten | PositionMode::Full)
    }
}

/// A single fill within an open position. All fills are unit-sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryFill {
    pub price: f64,
    pub index: usize,
}

/// Open-trade state tracked by the simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub direction: Direction,
    pub entries: Vec<EntryFill>,
}

impl Position {
    pub fn open(direction: Direction, price: f64, index: usize) -> Self {
        Self {
            direction,
            entries: vec![EntryFill { price, index }],
        }
    }

    /// Number of unit entries currently held.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Size-weighted mean entry price. Entries are unit-sized, so this is
    /// the arithmetic mean.
    pub fn avg_entry(&self) -> f64 {
        let sum: f64 = self.entries.iter().map(|e| e.price).sum();
        sum / self.entries.len() as f64
    }

    /// Unrealized pnl fraction at `price`, relative to the average entry.
    pub fn pnl_fraction(&self, price: f64) -> f64 {
        let avg = self.avg_entry();
        match self.direction {
            Direction::Long => (price - avg) / avg,
            Direction::Short => (avg - price) / avg,
        }
    }
}

/// Why a position was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    TakeProfit,
    StopLoss,
    Reversal,
}

/// A closed trade record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub direction: Direction,
    pub avg_entry: f64,
    pub exit: f64,
    /// Net pnl fraction after fees, scaled by entry count.
    pub pnl: f64,
    pub size: usize,
    pub entry_index: usize,
    pub exit_index: usize,
    pub exit_reason: ExitReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_roundtrip_through_serde() {
        for iv in Interval::ALL {
            let json = serde_json::to_string(&iv).unwrap();
            assert_eq!(json, format!("\"{}\"", iv.as_str()));
            let back: Interval = serde_json::from_str(&json).unwrap();
            assert_eq!(back, iv);
        }
    }

    #[test]
    fn candles_to_days_uses_interval_density() {
        assert_eq!(Interval::H1.candles_to_days(24), 1.0);
        assert_eq!(Interval::M15.candles_to_days(96), 1.0);
        assert_eq!(Interval::D1.candles_to_days(30), 30.0);
    }

    #[test]
    fn every_interval_has_a_fetch_window() {
        for iv in Interval::ALL {
            assert!(iv.window_days() > 0);
        }
    }

    #[test]
    fn avg_entry_is_mean_of_fills() {
        let mut pos = Position::open(Direction::Long, 100.0, 0);
        pos.entries.push(EntryFill {
            price: 110.0,
            index: 5,
        });
        assert_eq!(pos.avg_entry(), 105.0);
        assert_eq!(pos.size(), 2);
    }

    #[test]
    fn pnl_fraction_respects_direction() {
        let long = Position::open(Direction::Long, 100.0, 0);
        assert!((long.pnl_fraction(110.0) - 0.1).abs() < 1e-12);

        let short = Position::open(Direction::Short, 100.0, 0);
        assert!((short.pnl_fraction(110.0) + 0.1).abs() < 1e-12);
    }

    #[test]
    fn mode_capability_flags() {
        assert!(PositionMode::Full.allows_pyramid());
        assert!(PositionMode::Full.allows_reversal());
        assert!(PositionMode::Pyramid.allows_pyramid());
        assert!(!PositionMode::Pyramid.allows_reversal());
        assert!(!PositionMode::Basic.allows_pyramid());
        assert!(!PositionMode::Basic.allows_reversal());
    }
}
