//! Candidate generation: uniform random draws from the legal space, and
//! hill-climb perturbation around a known-good seed.
//!
//! Both generators refuse to emit a fingerprint the tested set already
//! holds. Each gives up after a fixed attempt budget so a saturated
//! neighborhood surfaces as exhaustion instead of a spin loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use edgelab_core::domain::PositionMode;
use edgelab_core::params::ParamSet;
use edgelab_core::space;
use edgelab_core::strategy::StrategyId;

use crate::history::TestedSet;

/// Fresh-fingerprint attempts before a generator reports exhaustion.
pub const ATTEMPT_BUDGET: usize = 50;

/// Probability that hill-climbing resamples the position mode or cap.
const MODE_RESAMPLE_P: f64 = 0.2;

/// Where a candidate came from, for progress output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    Random,
    HillClimb,
}

pub struct Generator {
    rng: StdRng,
}

impl Generator {
    /// Entropy-seeded unless a seed is given for a reproducible run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn choose<T: Copy>(&mut self, domain: &[T]) -> T {
        domain[self.rng.gen_range(0..domain.len())]
    }

    /// Uniform pick from a non-empty slice, drawn from the run's RNG
    /// stream so hill-climb seed selection stays reproducible under a
    /// fixed seed.
    pub fn pick<'s, T>(&mut self, items: &'s [T]) -> &'s T {
        &items[self.rng.gen_range(0..items.len())]
    }

    /// Fast/slow pairs must stay ordered or the strategy can never cross.
    fn is_coherent(params: &ParamSet) -> bool {
        for (fast, slow) in [("ma_fast", "ma_slow"), ("ec_fast_ema", "ec_slow_ema")] {
            if let (Some(&f), Some(&s)) = (params.tuning.get(fast), params.tuning.get(slow)) {
                if f >= s {
                    return false;
                }
            }
        }
        true
    }

    fn draw(&mut self) -> ParamSet {
        let strategy = self.choose(&StrategyId::ALL);
        let mut params = ParamSet::new(
            strategy,
            self.choose(space::INTERVALS),
            self.choose(space::POSITION_MODES),
            self.choose(space::MAX_PYRAMID),
            self.choose(space::TAKE_PROFIT),
            self.choose(space::STOP_LOSS),
        );
        for &key in space::keys(strategy) {
            let value = self.choose(space::values(key));
            params.set(key, value);
        }
        params
    }

    /// Draw a novel random candidate, or None when the budget runs out.
    pub fn random(&mut self, tested: &TestedSet) -> Option<ParamSet> {
        for _ in 0..ATTEMPT_BUDGET {
            let params = self.draw();
            if !Self::is_coherent(&params) {
                continue;
            }
            if tested.contains(&params.fingerprint()) {
                continue;
            }
            return Some(params);
        }
        None
    }

    /// Scale by a factor in [0.8, 1.2] and snap back onto the domain.
    fn perturb(&mut self, domain: &'static [f64], value: f64) -> f64 {
        let factor = self.rng.gen_range(0.8..=1.2);
        space::snap_to(domain, value * factor)
    }

    /// Perturb a seed into a nearby novel candidate. Strategy and interval
    /// are pinned; every tuning value and both exit bands wander to a
    /// neighboring legal value, and the lifecycle settings occasionally
    /// resample outright.
    pub fn hill_climb(&mut self, seed: &ParamSet, tested: &TestedSet) -> Option<ParamSet> {
        for _ in 0..ATTEMPT_BUDGET {
            let mut params = seed.clone();
            if self.rng.gen_bool(MODE_RESAMPLE_P) {
                params.position_mode = self.choose(space::POSITION_MODES);
            }
            if self.rng.gen_bool(MODE_RESAMPLE_P) {
                params.max_pyramid = self.choose(space::MAX_PYRAMID);
            }
            params.take_profit_pct = self.perturb(space::TAKE_PROFIT, params.take_profit_pct);
            params.stop_loss_pct = self.perturb(space::STOP_LOSS, params.stop_loss_pct);

            let keys: Vec<String> = params.tuning.keys().cloned().collect();
            for key in keys {
                let value = params.tuning[&key];
                let factor = self.rng.gen_range(0.8..=1.2);
                params.set(&key, space::snap(&key, value * factor));
            }

            if !Self::is_coherent(&params) {
                continue;
            }
            if tested.contains(&params.fingerprint()) {
                continue;
            }
            return Some(params);
        }
        None
    }
}
