pub mod clipboard;
pub mod config;
pub mod error;
pub mod execution;
pub mod models;
pub mod resolver;
pub mod search;
pub mod stats;
pub mod storage;

// Re-export common items for convenience
pub use clipboard::set_clipboard_text;
pub use config::{get_config_dir, get_db_file_path, StoreConfig};
pub use error::{CodestashError, Result};
pub use execution::{check_gate, plan_execution, run_snippet, GateDecision, TargetOs};
pub use models::{parse_tags, parse_yes_no, EditField, EditOutcome, Snippet, SnippetEdit};
pub use resolver::{resolve, resolve_index, resolve_mut};
pub use stats::{format_time_ago, Stats};
pub use storage::SnippetStore;
