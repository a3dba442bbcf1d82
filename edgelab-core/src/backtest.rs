//! Bar-by-bar position simulator.
//!
//! Exit checks run before signal evaluation on every bar: a bar that
//! crosses the take-profit or stop-loss band closes the position and
//! consumes the bar, so a same-bar signal never acts. Reversal and
//! pyramid behavior is gated by the position mode.

use serde::{Deserialize, Serialize};

use crate::domain::{Candle, ExitReason, Position, Signal, Trade};
use crate::params::ParamSet;
use crate::strategy::{lookup, SeriesView};

/// Bars skipped at the head of the series so every strategy has history.
pub const WARMUP_BARS: usize = 50;

/// Flat fee fraction charged per round trip, per unit entry.
pub const ROUND_TRIP_FEE: f64 = 0.0007;

/// Aggregate outcome of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    pub trades: Vec<Trade>,
    pub trade_count: usize,
    pub wins: usize,
    /// Percent of trades with positive net pnl; 0 when no trades.
    pub win_rate: f64,
    /// Sum of net trade pnl, as a percentage.
    pub total_pnl_pct: f64,
    /// Mean net trade pnl, as a percentage; 0 when no trades.
    pub avg_pnl_pct: f64,
    pub candle_count: usize,
}

fn close_position(position: &Position, price: f64, index: usize, reason: ExitReason) -> Trade {
    let gross = position.pnl_fraction(price);
    Trade {
        direction: position.direction,
        avg_entry: position.avg_entry(),
        exit: price,
        pnl: (gross - ROUND_TRIP_FEE) * position.size() as f64,
        size: position.size(),
        entry_index: position.entries[0].index,
        exit_index: index,
        exit_reason: reason,
    }
}

/// Run the simulator over a candle series with the given parameters.
///
/// A position still open at the last bar is abandoned, not force-closed;
/// only completed round trips count toward the report.
pub fn run(candles: &[Candle], params: &ParamSet) -> BacktestReport {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();
    let series = SeriesView {
        closes: &closes,
        highs: &highs,
        lows: &lows,
    };
    let strategy = lookup(params.strategy);

    let mut trades: Vec<Trade> = Vec::new();
    let mut position: Option<Position> = None;

    for i in WARMUP_BARS..candles.len() {
        let price = closes[i];

        if let Some(pos) = &position {
            let pnl = pos.pnl_fraction(price);
            if pnl >= params.take_profit_pct {
                trades.push(close_position(pos, price, i, ExitReason::TakeProfit));
                position = None;
                continue;
            }
            if pnl <= -params.stop_loss_pct {
                trades.push(close_position(pos, price, i, ExitReason::StopLoss));
                position = None;
                continue;
            }
        }

        let signal = strategy.evaluate(&series, i, params);
        let Some(wanted) = signal.direction() else {
            continue;
        };

        match &mut position {
            Some(pos) if pos.direction == wanted => {
                if params.position_mode.allows_pyramid() && pos.size() < params.max_pyramid {
                    pos.entries.push(crate::domain::EntryFill { price, index: i });
                }
            }
            Some(pos) if params.position_mode.allows_reversal() => {
                trades.push(close_position(pos, price, i, ExitReason::Reversal));
                position = Some(Position::open(wanted, price, i));
            }
            Some(_) => {}
            None => {
                position = Some(Position::open(wanted, price, i));
            }
        }
    }

    let trade_count = trades.len();
    let wins = trades.iter().filter(|t| t.pnl > 0.0).count();
    let total_pnl: f64 = trades.iter().map(|t| t.pnl).sum();
    BacktestReport {
        win_rate: if trade_count > 0 {
            wins as f64 / trade_count as f64 * 100.0
        } else {
            0.0
        },
        total_pnl_pct: total_pnl * 100.0,
        avg_pnl_pct: if trade_count > 0 {
            total_pnl / trade_count as f64 * 100.0
        } else {
            0.0
        },
        trades,
        trade_count,
        wins,
        candle_count: candles.len(),
    }
}
