use crate::config::StoreConfig;
use crate::error::{CodestashError, Result};
use crate::models::Snippet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads and writes the whole snippet collection as one JSON file.
///
/// There is no locking: two invocations racing on the same file end with
/// whichever saved last.
#[derive(Debug, Clone)]
pub struct SnippetStore {
    config: StoreConfig,
}

impl SnippetStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        self.config.path()
    }

    /// Load all snippets from the database
    pub fn load(&self) -> Result<Vec<Snippet>> {
        let path = self.path();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no store at {}, starting empty", path.display());
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };

        // Handle empty database file
        if content.trim().is_empty() {
            return Ok(vec![]);
        }

        let snippets: Vec<Snippet> =
            serde_json::from_str(&content).map_err(|source| CodestashError::CorruptStore {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded {} snippets from {}", snippets.len(), path.display());
        Ok(snippets)
    }

    /// Save snippets to the database file, replacing it in one rename.
    pub fn save(&self, snippets: &[Snippet]) -> Result<()> {
        let serialized = serde_json::to_string_pretty(snippets)?;

        let path = self.path();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(serialized.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;

        log::debug!("saved {} snippets to {}", snippets.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SnippetStore {
        SnippetStore::new(StoreConfig::at(dir.path().join("nested").join("snippets.json")))
    }

    fn snippet(title: &str) -> Snippet {
        Snippet::new(
            title.to_string(),
            "echo hi\nexit 0\n".to_string(),
            "desc".to_string(),
            "sh".to_string(),
            vec!["a".to_string(), "a".to_string()],
            true,
        )
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().unwrap().is_empty());
    }

    #[test]
    fn blank_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippets.json");
        fs::write(&path, "  \n").unwrap();
        let store = SnippetStore::new(StoreConfig::at(&path));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippets.json");
        fs::write(&path, "[{\"id\": ").unwrap();
        let store = SnippetStore::new(StoreConfig::at(&path));
        assert!(matches!(store.load(), Err(CodestashError::CorruptStore { .. })));
    }

    #[test]
    fn wrong_shape_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snippets.json");
        fs::write(&path, "{\"id\": \"a1b2\"}").unwrap();
        let store = SnippetStore::new(StoreConfig::at(&path));
        assert!(matches!(store.load(), Err(CodestashError::CorruptStore { .. })));
    }

    #[test]
    fn save_creates_directory_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut first = snippet("one");
        first.record_use();
        let snippets = vec![first, snippet("two")];

        store.save(&snippets).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, snippets);

        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), snippets);
    }

    #[test]
    fn saved_file_uses_known_field_names() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&[snippet("one")]).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let record = &value[0];
        for key in [
            "id",
            "title",
            "code",
            "tags",
            "executable",
            "language",
            "description",
            "usage_count",
            "last_used",
            "created_at",
        ] {
            assert!(record.get(key).is_some(), "missing {}", key);
        }
        assert!(record["usage_count"].is_u64());
        assert!(raw.contains("\n  {"));
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&[snippet("one"), snippet("two")]).unwrap();
        store.save(&[snippet("three")]).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "three");
        let leftovers: Vec<_> = fs::read_dir(store.path().parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn empty_collection_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&[]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
        assert!(store.load().unwrap().is_empty());
    }
}
