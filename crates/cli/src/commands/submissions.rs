//! Submission inspection commands

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use formbench_core::{Config, Template};
use store::{KvStore, SubmissionStore, TemplateStore};
use tracing::error;

use super::templates::resolve_template;

/// Field id -> label lookup across all of a template's sections
fn label_map(template: &Template) -> BTreeMap<&str, &str> {
  let mut labels = BTreeMap::new();
  for section in &template.sections {
    for field in &section.fields {
      labels.insert(field.id.as_str(), field.label.as_str());
    }
  }
  labels
}

/// List a template's submissions with answers resolved to field labels
pub fn cmd_submissions_list(config: &Config, needle: &str, json_output: bool) -> Result<()> {
  let kv = KvStore::open(config.data_dir()).context("Failed to open data directory")?;
  let templates = TemplateStore::new(kv.clone()).load_all();

  let Some(template) = resolve_template(&templates, needle) else {
    error!("No template matches '{}'", needle);
    std::process::exit(1);
  };

  let submissions = SubmissionStore::new(kv).load(&template.id);

  if json_output {
    println!("{}", serde_json::to_string_pretty(&submissions)?);
    return Ok(());
  }

  if submissions.is_empty() {
    println!("No submissions for '{}'.", template.name);
    return Ok(());
  }

  println!("Submissions for {} ({})", template.name, submissions.len());
  println!("===============\n");

  let labels = label_map(template);
  for (i, submission) in submissions.iter().enumerate() {
    println!("#{}", i + 1);
    if submission.is_empty() {
      println!("  (no answers)");
    }
    for (field_id, answer) in &submission.answers {
      // Fields deleted since submission keep their raw id
      let label = labels
        .get(field_id.as_str())
        .copied()
        .filter(|l| !l.is_empty())
        .unwrap_or(field_id);
      println!("  {}: {}", label, answer);
    }
    println!();
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use formbench_core::Field;

  use super::*;

  #[test]
  fn test_label_map_spans_sections() {
    let mut template = Template::new("T");
    let mut first = Field::new();
    first.label = "Name".into();
    template.sections[0].fields.push(first.clone());

    template.sections.push(formbench_core::Section::new());
    let mut second = Field::new();
    second.label = "Age".into();
    template.sections[1].fields.push(second.clone());

    let labels = label_map(&template);
    assert_eq!(labels.get(first.id.as_str()), Some(&"Name"));
    assert_eq!(labels.get(second.id.as_str()), Some(&"Age"));
  }
}
