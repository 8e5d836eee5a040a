use formbench_core::{Result, Submission};
use tracing::warn;

use crate::kv::KvStore;

/// Storage key for a template's submission log
pub fn submissions_key(template_id: &str) -> String {
  format!("form_data_{}", template_id)
}

/// Persists per-template submission logs, one JSON sequence per template
/// under `form_data_<template-id>`. Appending reads the existing log,
/// pushes one entry, and rewrites the whole log.
#[derive(Debug, Clone)]
pub struct SubmissionStore {
  kv: KvStore,
}

impl SubmissionStore {
  pub fn new(kv: KvStore) -> Self {
    Self { kv }
  }

  /// Load a template's log; missing or corrupt values yield an empty log
  pub fn load(&self, template_id: &str) -> Vec<Submission> {
    let Some(raw) = self.kv.get(&submissions_key(template_id)) else {
      return Vec::new();
    };
    match serde_json::from_str(&raw) {
      Ok(submissions) => submissions,
      Err(e) => {
        warn!("Ignoring corrupt submission log for {}: {}", template_id, e);
        Vec::new()
      }
    }
  }

  /// Append one submission and return the new log length
  pub fn append(&self, template_id: &str, submission: Submission) -> Result<usize> {
    let mut log = self.load(template_id);
    log.push(submission);
    let raw = serde_json::to_string(&log)?;
    self.kv.set(&submissions_key(template_id), &raw)?;
    Ok(log.len())
  }

  pub fn count(&self, template_id: &str) -> usize {
    self.load(template_id).len()
  }
}

#[cfg(test)]
mod tests {
  use formbench_core::Answer;

  use super::*;

  fn store() -> (tempfile::TempDir, SubmissionStore) {
    let dir = tempfile::tempdir().unwrap();
    let kv = KvStore::open(dir.path()).unwrap();
    (dir, SubmissionStore::new(kv))
  }

  #[test]
  fn test_missing_log_is_empty() {
    let (_dir, store) = store();
    assert!(store.load("t1").is_empty());
  }

  #[test]
  fn test_append_adds_exactly_one_entry() {
    let (_dir, store) = store();
    let mut submission = Submission::new();
    submission.set("field1", Answer::Text("hello".into()));

    let count = store.append("t1", submission.clone()).unwrap();
    assert_eq!(count, 1);

    let log = store.load("t1");
    assert_eq!(log, vec![submission]);
  }

  #[test]
  fn test_logs_are_keyed_per_template() {
    let (_dir, store) = store();
    store.append("t1", Submission::new()).unwrap();
    store.append("t1", Submission::new()).unwrap();
    store.append("t2", Submission::new()).unwrap();

    assert_eq!(store.count("t1"), 2);
    assert_eq!(store.count("t2"), 1);
  }

  #[test]
  fn test_key_format_is_stable() {
    assert_eq!(submissions_key("abc"), "form_data_abc");
  }

  #[test]
  fn test_corrupt_log_resets_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let kv = KvStore::open(dir.path()).unwrap();
    kv.set(&submissions_key("t1"), "not json").unwrap();
    let store = SubmissionStore::new(kv);
    assert!(store.load("t1").is_empty());

    let count = store.append("t1", Submission::new()).unwrap();
    assert_eq!(count, 1);
  }
}
