use std::time::Duration;

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Spaces out request starts by at least `interval`, however many
/// requests are in flight.
pub struct RateLimitMiddleware {
    interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimitMiddleware {
    pub fn new(interval: Duration) -> Self {
        RateLimitMiddleware {
            interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Reserves the next free slot and sleeps until it arrives.
    pub async fn wait_turn(&self) {
        let wait = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.interval);
            start - now
        };

        if !wait.is_zero() {
            log::trace!("rate limit: waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }
}

#[async_trait::async_trait]
impl Middleware for RateLimitMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        self.wait_turn().await;
        next.run(req, extensions).await
    }
}
