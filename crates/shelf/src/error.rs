//! Startup and runtime failures of the `shelf` binary.

use std::io;
use std::path::PathBuf;

use shelf_client::FetchError;
use shelf_core::ProgramError;
use thiserror::Error;

/// Anything that stops the browser from starting or keeps it from exiting
/// cleanly. Fetch failures during browsing are shown in the UI instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog client could not be built from the configuration.
    #[error("invalid catalog configuration: {0}")]
    Catalog(#[from] FetchError),

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global tracing subscriber was already installed.
    #[error("cannot install logger: {0}")]
    Logger(#[from] tracing_subscriber::util::TryInitError),

    #[error(transparent)]
    Program(#[from] ProgramError),
}
