use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// A repeating timer that emits the current [`Instant`] every `interval`.
///
/// The `key` keeps several timers apart; two `Every` values with the same key
/// are the same subscription as far as reconciliation is concerned.
///
/// ```rust,ignore
/// let sub = subscribe(Every::new(Duration::from_millis(80), "spinner"))
///     .map(|_| Msg::Tick);
/// ```
pub struct Every {
    /// The interval between ticks.
    pub interval: Duration,
    /// Identity key.
    pub key: &'static str,
}

impl Every {
    /// Create a new repeating timer.
    pub fn new(interval: Duration, key: &'static str) -> Self {
        Self { interval, key }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        SubscriptionId::with_str::<Self>(self.key)
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Box::pin(tokio_stream::wrappers::IntervalStream::new(interval).map(|tick| tick.into_std()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_identity_follows_key() {
        let a = Every::new(Duration::from_millis(80), "spinner");
        let b = Every::new(Duration::from_millis(500), "spinner");
        let c = Every::new(Duration::from_millis(80), "clock");
        assert_eq!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
    }

    #[tokio::test]
    async fn every_emits_ticks() {
        let mut stream = Every::new(Duration::from_millis(1), "t").stream();
        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_some());
    }
}
