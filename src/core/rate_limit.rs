

use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use super::error::SearchError;


/// Sliding-window call budget: at most `max_calls` admissions per rolling `period`.
///
/// Callers that would exceed the budget are suspended until the oldest admission
/// leaves the window. Waiters are admitted in arrival order.
#[derive(Debug)]
pub struct RateGovernor {
    max_calls: usize,
    period: Duration,
    admitted: Mutex<VecDeque<Instant>>,
}

impl RateGovernor {
    pub fn new(max_calls: usize, period: Duration) -> Result<Self, SearchError> {
        if max_calls == 0 {
            return Err(SearchError::InvalidInput(
                "rate governor needs at least one call per period".to_string(),
            ));
        }
        if period.is_zero() {
            return Err(SearchError::InvalidInput(
                "rate governor period must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            max_calls,
            period,
            admitted: Mutex::new(VecDeque::with_capacity(max_calls)),
        })
    }

    /// Waits until the window admits another call, then records it.
    pub async fn acquire(&self) {
        // The lock is held across the sleep so later callers queue behind this one.
        let mut admitted = self.admitted.lock().await;
        loop {
            let now = Instant::now();
            while admitted
                .front()
                .is_some_and(|oldest| now.duration_since(*oldest) >= self.period)
            {
                admitted.pop_front();
            }

            if admitted.len() < self.max_calls {
                admitted.push_back(now);
                return;
            }

            let Some(oldest) = admitted.front().copied() else {
                continue;
            };
            let ready_at = oldest + self.period;
            debug!(
                "Rate budget of {} calls per {:?} spent, waiting {:?}",
                self.max_calls,
                self.period,
                ready_at.saturating_duration_since(now)
            );
            sleep_until(ready_at).await;
        }
    }

    /// Calls admitted within the current window.
    pub async fn in_window(&self) -> usize {
        let admitted = self.admitted.lock().await;
        let now = Instant::now();
        admitted
            .iter()
            .filter(|at| now.duration_since(**at) < self.period)
            .count()
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}
