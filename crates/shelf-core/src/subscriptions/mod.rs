//! Built-in subscription sources: terminal input ([`terminal_events`]) and a
//! repeating timer ([`Every`]).

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
