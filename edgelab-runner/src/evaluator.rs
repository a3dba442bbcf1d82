//! Multi-period evaluation: run one parameter set against several
//! historical windows and fold the results into one score.
//!
//! Periods that fail to fetch or come back too thin are skipped, not
//! fatal; a set scored on fewer periods simply averages over fewer.

use std::time::Duration;

use chrono::Utc;
use edgelab_core::backtest;
use edgelab_core::data::CandleProvider;
use edgelab_core::params::ParamSet;

use crate::pacer::Pacer;
use crate::variation::Variation;

/// A period is too thin to score below this many candles.
pub const MIN_PERIOD_CANDLES: usize = 100;

/// Historical windows a candidate is scored against, identified by how
/// many days ago each window ends.
pub const PERIODS: &[Period] = &[
    Period {
        label: "recent",
        days_ago: 0,
    },
    Period {
        label: "1m_ago",
        days_ago: 30,
    },
    Period {
        label: "2m_ago",
        days_ago: 60,
    },
    Period {
        label: "3m_ago",
        days_ago: 90,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct Period {
    pub label: &'static str,
    pub days_ago: u32,
}

/// Outcome of one period's backtest, normalized to a 30-day rate.
#[derive(Debug, Clone)]
pub struct PeriodResult {
    pub label: &'static str,
    /// Raw total pnl over the window, in percent.
    pub raw_pnl: f64,
    /// Raw pnl scaled to a 30-day window, in percent.
    pub monthly_pnl: f64,
    pub win_rate: f64,
    pub trade_count: usize,
    pub candle_count: usize,
}

/// Why a period produced no result.
#[derive(Debug, Clone)]
pub enum PeriodSkip {
    FetchFailed(String),
    TooFewCandles(usize),
}

/// Run the simulator over every period window, pausing between fetches.
pub fn evaluate_periods(
    provider: &dyn CandleProvider,
    symbol: &str,
    params: &ParamSet,
    pacer: &dyn Pacer,
    fetch_delay_ms: u64,
    mut on_skip: impl FnMut(&'static str, &PeriodSkip),
) -> Vec<PeriodResult> {
    let interval = params.interval;
    let days = interval.window_days();
    let mut results = Vec::with_capacity(PERIODS.len());

    for (i, period) in PERIODS.iter().enumerate() {
        if i > 0 {
            pacer.pause(Duration::from_millis(fetch_delay_ms));
        }
        let candles = match provider.fetch(symbol, interval, days, period.days_ago) {
            Ok(candles) => candles,
            Err(e) => {
                on_skip(period.label, &PeriodSkip::FetchFailed(e.to_string()));
                continue;
            }
        };
        if candles.len() < MIN_PERIOD_CANDLES {
            on_skip(period.label, &PeriodSkip::TooFewCandles(candles.len()));
            continue;
        }

        let report = backtest::run(&candles, params);
        let actual_days = interval.candles_to_days(report.candle_count);
        let monthly_pnl = monthly_rate(report.total_pnl_pct, actual_days);
        results.push(PeriodResult {
            label: period.label,
            raw_pnl: report.total_pnl_pct,
            monthly_pnl,
            win_rate: report.win_rate,
            trade_count: report.trade_count,
            candle_count: report.candle_count,
        });
    }
    results
}

/// Scale a period's raw percentage return to a 30-day rate so windows of
/// unequal length rank against each other fairly.
pub fn monthly_rate(raw_pnl_pct: f64, actual_days: f64) -> f64 {
    if actual_days > 0.0 {
        raw_pnl_pct / actual_days * 30.0
    } else {
        0.0
    }
}

/// Fold period results into one scored variation. Returns None when every
/// period was skipped.
pub fn summarize(params: &ParamSet, periods: &[PeriodResult]) -> Option<Variation> {
    if periods.is_empty() {
        return None;
    }
    let n = periods.len() as f64;
    let monthly_pnl = periods.iter().map(|p| p.monthly_pnl).sum::<f64>() / n;
    let win_rate = periods.iter().map(|p| p.win_rate).sum::<f64>() / n;
    let positive = periods.iter().filter(|p| p.monthly_pnl > 0.0).count();
    let total_raw: f64 = periods.iter().map(|p| p.raw_pnl).sum();
    let trade_count: usize = periods.iter().map(|p| p.trade_count).sum();
    let pnl_per_trade = if trade_count > 0 {
        total_raw / trade_count as f64
    } else {
        0.0
    };

    Some(Variation {
        fingerprint: params.fingerprint(),
        params: params.clone(),
        monthly_pnl,
        win_rate,
        consistency: positive as f64 / n,
        pnl_per_trade,
        trade_count,
        walk_forward: None,
        evaluated_at: Utc::now(),
    })
}
