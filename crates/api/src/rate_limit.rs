use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Client count at which stale entries are swept regardless of elapsed time.
const SWEEP_THRESHOLD: usize = 1_024;

/// Sliding-window limiter keyed by client address.
#[derive(Debug, Clone)]
pub struct ClientRateLimiter {
    state: Arc<Mutex<LimiterState>>,
    window: Duration,
    max_requests: usize,
}

#[derive(Debug)]
struct LimiterState {
    hits: HashMap<String, VecDeque<Instant>>,
    last_sweep: Option<Instant>,
    sweep_at: usize,
}

impl ClientRateLimiter {
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(LimiterState {
                hits: HashMap::new(),
                last_sweep: None,
                sweep_at: SWEEP_THRESHOLD,
            })),
            window,
            max_requests,
        }
    }

    /// Records a hit for `client`, or returns how long it must wait before
    /// the oldest hit leaves the window.
    pub fn check(&self, client: &str) -> Result<(), Duration> {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> Result<(), Duration> {
        let mut state = self.state.lock();
        self.sweep_if_due(&mut state, now);

        let queue = state.hits.entry(client.to_string()).or_default();
        while queue
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= self.window)
        {
            queue.pop_front();
        }

        if queue.len() >= self.max_requests {
            let retry_after = queue
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(self.window);
            return Err(retry_after);
        }

        queue.push_back(now);
        Ok(())
    }

    /// Drops clients whose newest hit has left the window. Runs once per
    /// window, or earlier when the map outgrows `sweep_at`.
    fn sweep_if_due(&self, state: &mut LimiterState, now: Instant) {
        let window_elapsed = state
            .last_sweep
            .map_or(true, |last| now.duration_since(last) >= self.window);
        if !window_elapsed && state.hits.len() < state.sweep_at {
            return;
        }

        let window = self.window;
        state.hits.retain(|_, queue| {
            queue
                .back()
                .is_some_and(|newest| now.duration_since(*newest) < window)
        });
        state.last_sweep = Some(now);
        state.sweep_at = SWEEP_THRESHOLD.max(state.hits.len() * 2);
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.state.lock().hits.len()
    }
}
