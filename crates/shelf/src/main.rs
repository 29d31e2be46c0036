use clap::Parser;
use shelf::config::Cli;
use shelf::logging::{self, LogConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(error) = logging::init(&LogConfig::from_cli(&cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
    if let Err(error) = shelf::run(cli).await {
        tracing::error!(%error, "shelf failed");
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
