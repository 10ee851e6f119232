use anyhow::{Context, Result};
use statement_core::error::{Result as StoreResult, StatementError};
use statement_core::{KeyValueStore, StatementSnapshot};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// `$STATEMENT_HOME`, else `~/.statement`
pub fn statement_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STATEMENT_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".statement"))
}

pub fn ensure_statement_home() -> Result<PathBuf> {
    let dir = statement_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Snapshot written by the last `upload`, used when no `--statement` is given
pub fn current_statement_path() -> Result<PathBuf> {
    Ok(ensure_statement_home()?.join("current.json"))
}

pub fn store_path() -> Result<PathBuf> {
    Ok(ensure_statement_home()?.join("store.json"))
}

/// Key-value store persisted as one JSON object, rewritten on every change.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(store_path()?)
    }

    fn flush(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .map_err(|e| StatementError::Store(format!("write {}: {e}", self.path.display())))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Resolve the statement a command works on: explicit path, else the last
/// upload, else the built-in sample.
pub fn resolve_statement(path: Option<&Path>) -> Result<StatementSnapshot> {
    if let Some(p) = path {
        return statement_ingest::open_statement(p);
    }
    let current = current_statement_path()?;
    if current.exists() {
        return statement_ingest::load_snapshot(&current);
    }
    Ok(statement_ingest::sample_statement())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_persists() {
        let path = std::env::temp_dir().join(format!("statement-cli-store-{}.json", std::process::id()));
        {
            let mut s = FileStore::open(&path).unwrap();
            s.set("currentUser", "alex".to_string()).unwrap();
        }
        let mut s = FileStore::open(&path).unwrap();
        assert_eq!(s.get("currentUser").unwrap().as_deref(), Some("alex"));
        s.remove("currentUser").unwrap();
        assert_eq!(FileStore::open(&path).unwrap().get("currentUser").unwrap(), None);
        fs::remove_file(&path).ok();
    }
}
