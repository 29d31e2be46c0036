//! Command-line configuration.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use shelf_client::DEFAULT_BASE_URL;
use shelf_core::ProgramOptions;

use crate::list_state::{ErrorPolicy, SearchOptions, PAGE_SIZE};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "shelf",
    version,
    about = "Browse a remote product catalog in the terminal",
    long_about = "Browse a remote product catalog in the terminal.\n\n\
                  Scroll to the end of the list to load the next page; type to search."
)]
pub struct Cli {
    /// Root URL of the catalog service.
    #[arg(long, env = "SHELF_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Products requested per page.
    #[arg(long, value_name = "N", default_value_t = PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Keep showing the current list until search results arrive.
    #[arg(long)]
    pub keep_results_while_searching: bool,

    /// Keep error messages on screen after later requests succeed.
    #[arg(long)]
    pub sticky_errors: bool,

    /// Write logs to this file. Without it logs are discarded.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Maximum redraws per second.
    #[arg(long, value_name = "N", default_value_t = 60,
          value_parser = clap::value_parser!(u32).range(1..=120))]
    pub fps: u32,
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            clear_on_keystroke: !self.keep_results_while_searching,
            error_policy: if self.sticky_errors {
                ErrorPolicy::Sticky
            } else {
                ErrorPolicy::ClearOnSuccess
            },
        }
    }

    pub fn program_options(&self) -> ProgramOptions {
        ProgramOptions {
            fps: self.fps,
            title: Some("shelf".to_string()),
            ..ProgramOptions::default()
        }
    }
}
