//! **shelf**: browse a paginated remote product catalog in the terminal.
//!
//! The list loads one page at startup and the next page whenever the view is
//! scrolled close to the end. Typing in the search box replaces the list with
//! the results for the current text; clearing it goes back to the first page.
//! Responses to requests that a newer keystroke has superseded are dropped.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`list_state`] | The I/O-free controller deciding what to fetch and what to keep |
//! | [`app`] | The [`Shelf`] model wiring the controller to the widgets and the catalog |
//! | [`config`] | Command-line flags |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`error`] | [`AppError`] |

pub mod app;
pub mod config;
pub mod error;
pub mod list_state;
pub mod logging;

pub use app::{Flags, Msg, Shelf};
pub use config::Cli;
pub use error::AppError;
pub use list_state::ListState;

use std::sync::Arc;

use shelf_client::HttpCatalog;

/// Build the catalog client from `cli` and run the browser until the user
/// quits.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let catalog = HttpCatalog::new(&cli.base_url)?;
    tracing::info!(
        base_url = %catalog.base_url(),
        page_size = cli.page_size,
        keep_results_while_searching = cli.keep_results_while_searching,
        sticky_errors = cli.sticky_errors,
        "starting"
    );

    let flags = Flags {
        catalog: Arc::new(catalog),
        page_size: cli.page_size,
        search: cli.search_options(),
    };
    shelf_core::run_with::<Shelf>(flags, cli.program_options()).await?;
    tracing::info!("exited");
    Ok(())
}
