//! Fixed-spacing request throttle.
//!
//! Requests are spaced `60_000 / R` ms apart for a ceiling of `R` requests
//! per minute. There is no burst allowance. The first request of a limiter's
//! lifetime goes out immediately.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::SyncError;

const MILLIS_PER_MINUTE: u64 = 60_000;

#[derive(Debug)]
pub struct RateLimiter {
    spacing: Duration,
    last_issued: Option<Instant>,
    waits: u32,
}

impl RateLimiter {
    /// Limiter for `requests_per_minute`, clamped to at least 1.
    #[must_use]
    pub fn per_minute(requests_per_minute: u32) -> Self {
        let rpm = u64::from(requests_per_minute.max(1));
        Self {
            spacing: Duration::from_millis(MILLIS_PER_MINUTE / rpm),
            last_issued: None,
            waits: 0,
        }
    }

    #[must_use]
    pub const fn spacing(&self) -> Duration {
        self.spacing
    }

    /// Number of times a caller actually had to sleep.
    #[must_use]
    pub const fn waits(&self) -> u32 {
        self.waits
    }

    /// Block until the next request may be issued, then claim the slot.
    ///
    /// This is the only suspension point of a sync run and therefore the
    /// only place cancellation is observed.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Cancelled`] if `cancel` fires before or during
    /// the wait. The slot is not claimed in that case.
    pub async fn wait_for_slot(&mut self, cancel: &CancellationToken) -> Result<(), SyncError> {
        if cancel.is_cancelled() {
            return Err(SyncError::Cancelled);
        }

        if let Some(last) = self.last_issued {
            let deadline = last + self.spacing;
            if deadline > Instant::now() {
                self.waits += 1;
                tracing::trace!(wait_ms = self.spacing.as_millis(), "waiting for rate limit slot");
                tokio::select! {
                    () = cancel.cancelled() => return Err(SyncError::Cancelled),
                    () = tokio::time::sleep_until(deadline) => {}
                }
            }
        }

        self.last_issued = Some(Instant::now());
        Ok(())
    }
}
