//! Randomized request throttling.
//!
//! The crawler pauses for a random whole number of seconds between page
//! loads so its request rate looks less mechanical to the site.

use rand::Rng;
use std::time::Duration;
use vipon_core::CrawlConfig;

/// Random delay drawn uniformly from an inclusive range of seconds.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    min_secs: u64,
    max_secs: u64,
}

impl Throttle {
    /// Create a throttle; bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }

    #[must_use]
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self::new(config.delay_min_secs, config.delay_max_secs)
    }

    /// A throttle that never sleeps.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    /// Draw the next delay.
    pub fn next_delay(&self) -> Duration {
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }

    /// Sleep for a freshly drawn delay.
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if delay.is_zero() {
            return;
        }
        tracing::debug!("Throttling for {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}
