//! Main entry point for the embeddable adapter CLI
//!
//! Reads widget events as JSON lines on stdin and writes every message the
//! adapter posts to its host frame as JSON lines on stdout.

mod cli;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        match e.downcast_ref::<embeddable_adapter::AdapterError>() {
            Some(adapter_error) => eprintln!("Error: {}", adapter_error.user_message()),
            None => eprintln!("Error: {:#}", e),
        }
        std::process::exit(1);
    }
}
