use std::path::PathBuf;

use formbench_core::Result;
use tracing::warn;

/// String-keyed key-value store over a directory: key `k` lives in
/// `<root>/<k>.json`. Reads never fail toward the caller; a missing or
/// unreadable key is absent.
#[derive(Debug, Clone)]
pub struct KvStore {
  root: PathBuf,
}

impl KvStore {
  /// Open the store, creating the directory if needed
  pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
    let root = root.into();
    std::fs::create_dir_all(&root)?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &PathBuf {
    &self.root
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.root.join(format!("{}.json", key))
  }

  /// Read the value for `key`, if any
  pub fn get(&self, key: &str) -> Option<String> {
    let path = self.path_for(key);
    match std::fs::read_to_string(&path) {
      Ok(value) => Some(value),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
      Err(e) => {
        warn!("Failed to read {}: {}", path.display(), e);
        None
      }
    }
  }

  /// Rewrite the full value for `key`
  pub fn set(&self, key: &str, value: &str) -> Result<()> {
    std::fs::write(self.path_for(key), value)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_key_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let kv = KvStore::open(dir.path()).unwrap();
    assert_eq!(kv.get("templates"), None);
  }

  #[test]
  fn test_set_then_get_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let kv = KvStore::open(dir.path()).unwrap();
    kv.set("templates", "[]").unwrap();
    assert_eq!(kv.get("templates").as_deref(), Some("[]"));
  }

  #[test]
  fn test_set_rewrites_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let kv = KvStore::open(dir.path()).unwrap();
    kv.set("k", "a long first value").unwrap();
    kv.set("k", "short").unwrap();
    assert_eq!(kv.get("k").as_deref(), Some("short"));
  }

  #[test]
  fn test_open_creates_nested_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");
    let kv = KvStore::open(&root).unwrap();
    kv.set("k", "v").unwrap();
    assert!(root.join("k.json").exists());
  }
}
