pub mod cli;
pub mod commands;
pub mod display;
pub mod prompt;

use clap::Parser;
use cli::Codestash;
use codestash_core::{SnippetStore, StoreConfig};
use commands::{handle_subcommand, report_error};
use prompt::Prompter;
use std::io;

/// Run the codestash CLI application
pub fn run_main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Bad arguments exit non-zero from inside clap; errors raised by a
    // command are reported and the process ends normally.
    let args = Codestash::parse();
    let config = match args.store {
        Some(path) => StoreConfig::at(path),
        None => StoreConfig::from_env(),
    };
    log::debug!("using snippet store at {}", config.path().display());

    let store = SnippetStore::new(config);
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock());

    if let Err(e) = handle_subcommand(&store, args.commands, &mut prompter) {
        report_error(&e);
    }
}
