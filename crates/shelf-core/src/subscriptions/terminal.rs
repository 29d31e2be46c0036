use crate::event::TerminalEvent;
use crate::subscription::{forward, Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Marker type giving terminal input its [`SubscriptionId`].
pub struct TerminalEvents;

/// Subscribe to terminal input, mapping each event through `map`.
///
/// `map` returns `None` to discard an event. Read errors from crossterm are
/// logged and skipped.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);

    // The EventStream is created inside the spawned task. Building one on
    // every `subscriptions()` call would poke crossterm's global reader while
    // the live stream is polling it.
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| {
            let stream = EventStream::new().filter_map(move |result| {
                let map = map.clone();
                async move {
                    match result {
                        Ok(event) => map(TerminalEvent::from(event)),
                        Err(err) => {
                            tracing::warn!(%err, "terminal event read failed");
                            None
                        }
                    }
                }
            });
            forward(stream, tx)
        }),
    }
}
