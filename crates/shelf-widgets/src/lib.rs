//! Widgets for the **shelf** catalog browser.
//!
//! Each widget implements [`shelf_core::Component`] and is composed by the
//! application model.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`search_box`] | Single-line input that reports every edit |
//! | [`product_pane`] | Scrollable product list with near-bottom detection |
//! | [`spinner`] | Animated loading indicator |

pub mod product_pane;
pub mod search_box;
pub mod spinner;

pub use product_pane::ProductPane;
pub use search_box::SearchBox;
pub use spinner::Spinner;
