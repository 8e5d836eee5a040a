use formbench_core::{Result, Template};
use tracing::warn;

use crate::kv::KvStore;

/// Storage key for the full template set
pub const TEMPLATES_KEY: &str = "templates";

/// Persists the template set as one JSON sequence under
/// [`TEMPLATES_KEY`], rewritten wholesale after every edit.
#[derive(Debug, Clone)]
pub struct TemplateStore {
  kv: KvStore,
}

impl TemplateStore {
  pub fn new(kv: KvStore) -> Self {
    Self { kv }
  }

  /// Load the full set; a missing or corrupt value yields an empty set
  pub fn load_all(&self) -> Vec<Template> {
    let Some(raw) = self.kv.get(TEMPLATES_KEY) else {
      return Vec::new();
    };
    match serde_json::from_str(&raw) {
      Ok(templates) => templates,
      Err(e) => {
        warn!("Ignoring corrupt template set: {}", e);
        Vec::new()
      }
    }
  }

  /// Rewrite the full set
  pub fn save_all(&self, templates: &[Template]) -> Result<()> {
    let raw = serde_json::to_string(templates)?;
    self.kv.set(TEMPLATES_KEY, &raw)
  }
}
