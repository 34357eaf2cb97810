use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = ".codestash";
pub const DB_FILENAME: &str = "snippets.json";
pub const STORE_ENV_VAR: &str = "CODESTASH_STORE";

/// Get the codestash configuration directory
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
}

/// Get the path to the database file
pub fn get_db_file_path() -> PathBuf {
    get_config_dir().join(DB_FILENAME)
}

/// Where the snippet collection lives on disk.
///
/// Passed explicitly into [`crate::storage::SnippetStore`] so callers (and
/// tests) decide the location instead of reading it from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    path: PathBuf,
}

impl StoreConfig {
    /// A store rooted at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default per-user location, unless `CODESTASH_STORE` points elsewhere.
    pub fn from_env() -> Self {
        match env::var_os(STORE_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::at(path),
            _ => Self::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::at(get_db_file_path())
    }
}
