use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Failure-tripped switch in front of the text provider. One instance per
/// gateway, injected so tests construct their own instead of sharing
/// process-wide state.
///
/// Counters are plain atomics; concurrent requests may observe the trip one
/// check late, which is tolerated.
pub struct CircuitBreaker {
    threshold: u32,
    cooldown: Duration,
    started: Instant,
    consecutive_failures: AtomicU32,
    /// Milliseconds since `started` until which the circuit is open.
    /// Zero means closed.
    open_until_ms: AtomicU64,
}

impl CircuitBreaker {
    pub fn new(threshold: u32, cooldown: Duration) -> Self {
        Self {
            threshold,
            cooldown,
            started: Instant::now(),
            consecutive_failures: AtomicU32::new(0),
            open_until_ms: AtomicU64::new(0),
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Whether calls should fail fast right now.
    pub fn is_open(&self) -> bool {
        self.open_until_ms.load(Ordering::Relaxed) > self.now_ms()
    }

    /// A post-retry failure. Trips the circuit once the consecutive count
    /// reaches the threshold; the counter is not reset on trip, so a single
    /// failed probe after the cooldown re-opens immediately.
    pub fn record_failure(&self) {
        let failures = self.consecutive_failures.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.threshold {
            let until = self.now_ms() + self.cooldown.as_millis() as u64;
            self.open_until_ms.store(until, Ordering::Relaxed);
            log::warn!(
                "AI gateway circuit opened after {} consecutive failures",
                failures
            );
        }
    }

    /// A successful call closes the circuit and clears the count.
    pub fn record_success(&self) {
        self.consecutive_failures.store(0, Ordering::Relaxed);
        self.open_until_ms.store(0, Ordering::Relaxed);
    }
}

impl Default for CircuitBreaker {
    /// Production tuning: open after 5 consecutive failures, hold for 60s.
    fn default() -> Self {
        Self::new(5, Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_closed_below_threshold() {
        let breaker = CircuitBreaker::new(5, Duration::from_secs(60));
        for _ in 0..4 {
            breaker.record_failure();
        }
        assert!(!breaker.is_open());
    }

    #[test]
    fn opens_at_threshold() {
        let breaker = CircuitBreaker::new(5, Duration::from_secs(60));
        for _ in 0..5 {
            breaker.record_failure();
        }
        assert!(breaker.is_open());
    }

    #[test]
    fn success_resets_the_count() {
        let breaker = CircuitBreaker::new(5, Duration::from_secs(60));
        for _ in 0..4 {
            breaker.record_failure();
        }
        breaker.record_success();
        for _ in 0..4 {
            breaker.record_failure();
        }
        assert!(!breaker.is_open());
    }

    #[test]
    fn closes_after_cooldown_elapses() {
        let breaker = CircuitBreaker::new(2, Duration::from_millis(20));
        breaker.record_failure();
        breaker.record_failure();
        assert!(breaker.is_open());

        std::thread::sleep(Duration::from_millis(30));
        assert!(!breaker.is_open());
    }

    #[test]
    fn failed_probe_after_cooldown_reopens_immediately() {
        let breaker = CircuitBreaker::new(2, Duration::from_millis(20));
        breaker.record_failure();
        breaker.record_failure();
        std::thread::sleep(Duration::from_millis(30));
        assert!(!breaker.is_open());

        breaker.record_failure();
        assert!(breaker.is_open());
    }

    #[test]
    fn success_while_open_closes_the_circuit() {
        let breaker = CircuitBreaker::new(1, Duration::from_secs(60));
        breaker.record_failure();
        assert!(breaker.is_open());
        breaker.record_success();
        assert!(!breaker.is_open());
    }
}
