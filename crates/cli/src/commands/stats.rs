//! Aggregate statistics across templates and submission logs

use anyhow::{Context, Result};
use formbench_core::{Config, MAX_TEMPLATES};
use store::{KvStore, SubmissionStore, TemplateStore};

/// Show per-template section/field/submission counts
pub fn cmd_stats(config: &Config) -> Result<()> {
  let kv = KvStore::open(config.data_dir()).context("Failed to open data directory")?;
  let templates = TemplateStore::new(kv.clone()).load_all();
  let submissions = SubmissionStore::new(kv);

  println!("Formbench Statistics");
  println!("====================\n");

  println!("Templates: {}/{}", templates.len(), MAX_TEMPLATES);
  println!();

  if templates.is_empty() {
    println!("No templates saved.");
    return Ok(());
  }

  for template in &templates {
    println!("{}", template.name);
    println!("  Sections:    {}", template.sections.len());
    println!("  Fields:      {}", template.field_count());
    println!("  Submissions: {}", submissions.count(&template.id));
    println!();
  }

  Ok(())
}
