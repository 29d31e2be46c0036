//! Runtime for the **shelf** catalog browser.
//!
//! `shelf-core` is a small [Elm Architecture] loop over ratatui: the
//! application is an **init -> update -> view** cycle and every side effect
//! (an HTTP request, a timer, a quit) is described as a [`Command`] or a
//! [`Subscription`] and carried out by the runtime.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | One-shot side effect, usually an async fetch mapped back to a message |
//! | [`Subscription`] | Long-lived event source (terminal input, timers) |
//! | [`Program`] | Wires a [`Model`] to the terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness that can settle async commands in any order |
//!
//! Async commands run as tokio tasks and report back over a channel, so their
//! results reach [`Model::update`] in completion order, not dispatch order.
//! Models that care about ordering tag their requests and check the tag when
//! the response message arrives.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod event;
pub mod model;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run an application until it quits, handing back the final model.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
