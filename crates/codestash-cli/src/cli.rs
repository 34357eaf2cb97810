use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "codestash",
    version = env!("CARGO_PKG_VERSION"),
    about = "codestash - Your local code snippet manager",
    long_about = "codestash is a local-first CLI tool to store, find, copy and execute code snippets."
)]
pub struct Codestash {
    #[clap(
        long,
        global = true,
        value_name = "FILE",
        help = "Snippet store to use instead of ~/.codestash/snippets.json"
    )]
    pub store: Option<PathBuf>,

    #[clap(subcommand)]
    pub commands: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add a new snippet interactively
    Add,
    /// Edit an existing snippet
    Edit {
        #[clap(help = "ID or title of the snippet")]
        token: String,

        #[clap(
            long,
            short,
            help = "Edit a single field (title, description, language, tags, executable, code)"
        )]
        field: Option<String>,
    },
    /// List all snippets
    List {
        #[clap(long, short, help = "Filter by language")]
        language: Option<String>,

        #[clap(long, short, help = "Filter by tag")]
        tag: Option<String>,

        #[clap(long, short, help = "Show code content for each snippet")]
        expanded: bool,
    },
    /// Print, copy, or execute a snippet
    Use {
        #[clap(help = "ID or title of the snippet")]
        token: String,

        #[clap(long, short, help = "Copy snippet to clipboard")]
        copy: bool,

        #[clap(long = "execute", short = 'x', help = "Execute snippet")]
        execute: bool,

        #[clap(long, short, help = "Force execution even if not marked as executable")]
        force: bool,
    },
    /// Delete a snippet
    Delete {
        #[clap(help = "ID or title of the snippet")]
        token: String,

        #[clap(long, short, help = "Delete without confirmation")]
        force: bool,
    },
    /// Search snippets by id, title, description, tags, language or content
    Search {
        query: String,

        #[clap(long, short, help = "Show full code content for each snippet")]
        expanded: bool,

        #[clap(long = "executable", short = 'x', help = "Show only executable snippets")]
        executable: bool,
    },
    /// Execute a snippet
    Exec {
        #[clap(help = "ID or title of the snippet")]
        token: String,

        #[clap(long, short, help = "Force execution even if not marked as executable")]
        force: bool,
    },
    /// Copy a snippet to the clipboard
    Copy {
        #[clap(help = "ID or title of the snippet")]
        token: String,
    },
    /// Print a snippet to the terminal
    Print {
        #[clap(help = "ID or title of the snippet")]
        token: String,
    },
    /// Show usage statistics
    Stats {
        #[clap(long, short, help = "Include unused snippets and full breakdowns")]
        detailed: bool,
    },
}
