//! Walk-forward split: score the recent window's first half against its
//! second half to flag parameter sets that only worked in-sample.

use serde::{Deserialize, Serialize};

use edgelab_core::backtest;
use edgelab_core::data::CandleProvider;
use edgelab_core::params::ParamSet;

/// Minimum candles in the recent window for a meaningful split.
pub const MIN_SPLIT_CANDLES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkForwardCheck {
    /// 30-day-normalized pnl over the first half, in percent.
    pub train_monthly: f64,
    /// 30-day-normalized pnl over the second half, in percent.
    pub test_monthly: f64,
    /// Profitable in train, unprofitable in test.
    pub overfit: bool,
}

fn monthly_pnl(candles: &[edgelab_core::domain::Candle], params: &ParamSet) -> f64 {
    let report = backtest::run(candles, params);
    let days = params.interval.candles_to_days(report.candle_count);
    if days > 0.0 {
        report.total_pnl_pct / days * 30.0
    } else {
        0.0
    }
}

/// Fetch the recent window and score both halves. Returns None when the
/// fetch fails or the window is too thin to split.
pub fn check(
    provider: &dyn CandleProvider,
    symbol: &str,
    params: &ParamSet,
) -> Option<WalkForwardCheck> {
    let interval = params.interval;
    let candles = provider
        .fetch(symbol, interval, interval.window_days(), 0)
        .ok()?;
    if candles.len() < MIN_SPLIT_CANDLES {
        return None;
    }

    let mid = candles.len() / 2;
    let train_monthly = monthly_pnl(&candles[..mid], params);
    let test_monthly = monthly_pnl(&candles[mid..], params);
    Some(WalkForwardCheck {
        train_monthly,
        test_monthly,
        overfit: train_monthly > 0.0 && test_monthly < 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgelab_core::data::DataError;
    use edgelab_core::domain::{Candle, Interval, PositionMode};
    use edgelab_core::strategy::StrategyId;

    struct FixedProvider {
        candles: Vec<Candle>,
    }

    impl CandleProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(
            &self,
            _symbol: &str,
            _interval: Interval,
            _days: u32,
            _days_ago: u32,
        ) -> Result<Vec<Candle>, DataError> {
            if self.candles.is_empty() {
                return Err(DataError::Network("down".into()));
            }
            Ok(self.candles.clone())
        }
    }

    fn candles_from_closes(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                time_ms: i as i64 * 3_600_000,
                open: close,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1.0,
            })
            .collect()
    }

    fn flat_candles(n: usize) -> Vec<Candle> {
        candles_from_closes(&vec![100.0; n])
    }

    fn params() -> ParamSet {
        ParamSet::new(
            StrategyId::MaCross,
            Interval::H1,
            PositionMode::Basic,
            3,
            0.01,
            0.005,
        )
    }

    #[test]
    fn fetch_failure_yields_none() {
        let provider = FixedProvider { candles: vec![] };
        assert!(check(&provider, "BTC", &params()).is_none());
    }

    #[test]
    fn thin_window_yields_none() {
        let provider = FixedProvider {
            candles: flat_candles(MIN_SPLIT_CANDLES - 1),
        };
        assert!(check(&provider, "BTC", &params()).is_none());
    }

    #[test]
    fn profitable_train_and_losing_test_flag_overfit() {
        // First half: a steady trend the cross rides into a take-profit
        // win. Second half: the same cross entry runs straight into the
        // stop, so train is positive and test negative.
        let mut closes = vec![100.0; 60];
        for i in 1..=50 {
            closes.push(100.0 + 0.2 * i as f64);
        }
        closes.extend(vec![100.0; 60]);
        closes.extend([100.2, 100.4, 100.6, 100.8, 99.8, 98.8]);
        closes.extend(vec![98.8; 44]);
        assert_eq!(closes.len(), 220);

        let provider = FixedProvider {
            candles: candles_from_closes(&closes),
        };
        let wf = check(&provider, "BTC", &params()).unwrap();
        assert!(wf.train_monthly > 0.0);
        assert!(wf.test_monthly < 0.0);
        assert!(wf.overfit);
    }

    #[test]
    fn flat_market_splits_to_zero_without_overfit() {
        let provider = FixedProvider {
            candles: flat_candles(400),
        };
        let wf = check(&provider, "BTC", &params()).unwrap();
        assert_eq!(wf.train_monthly, 0.0);
        assert_eq!(wf.test_monthly, 0.0);
        assert!(!wf.overfit);
    }
}
