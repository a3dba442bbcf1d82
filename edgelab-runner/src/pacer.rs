//! Pacing between API calls and iterations.
//!
//! The explorer sleeps between fetches and between iterations to stay
//! polite to the exchange API. Tests swap in the no-op pacer so the full
//! loop runs instantly.

use std::time::Duration;

pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Real wall-clock pacing.
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// No pacing at all.
pub struct NoopPacer;

impl Pacer for NoopPacer {
    fn pause(&self, _duration: Duration) {}
}
