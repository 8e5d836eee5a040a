//! Template inspection commands (list, show, export)

use anyhow::{Context, Result};
use formbench_core::{Config, FieldKind, Template};
use store::{KvStore, TemplateStore};
use tracing::error;

pub(super) fn load_templates(config: &Config) -> Result<Vec<Template>> {
  let kv = KvStore::open(config.data_dir()).context("Failed to open data directory")?;
  Ok(TemplateStore::new(kv).load_all())
}

/// Find a template by exact id, exact name, or id prefix
pub(super) fn resolve_template<'a>(templates: &'a [Template], needle: &str) -> Option<&'a Template> {
  templates
    .iter()
    .find(|t| t.id == needle || t.name == needle)
    .or_else(|| templates.iter().find(|t| t.id.starts_with(needle)))
}

/// List all saved templates
pub fn cmd_templates_list(config: &Config, json_output: bool) -> Result<()> {
  let templates = load_templates(config)?;

  if json_output {
    println!("{}", serde_json::to_string_pretty(&templates)?);
    return Ok(());
  }

  if templates.is_empty() {
    println!("No templates saved.");
    return Ok(());
  }

  println!("Templates ({})", templates.len());
  println!("=========\n");

  for template in &templates {
    // Truncate ID for display
    let short_id = if template.id.len() > 8 {
      &template.id[..8]
    } else {
      &template.id
    };

    println!("{} [{}]", template.name, short_id);
    println!(
      "  Sections: {}  Fields: {}",
      template.sections.len(),
      template.field_count()
    );
    println!();
  }

  Ok(())
}

/// Show one template's full structure
pub fn cmd_templates_show(config: &Config, id: &str, json_output: bool) -> Result<()> {
  let templates = load_templates(config)?;

  let Some(template) = resolve_template(&templates, id) else {
    error!("No template matches '{}'", id);
    std::process::exit(1);
  };

  if json_output {
    println!("{}", serde_json::to_string_pretty(template)?);
    return Ok(());
  }

  println!("Template Details");
  println!("================\n");

  println!("ID:       {}", template.id);
  println!("Name:     {}", template.name);
  println!("Sections: {}", template.sections.len());
  println!();

  for section in &template.sections {
    let title = if section.title.is_empty() {
      "(untitled section)"
    } else {
      &section.title
    };
    println!("{}", title);

    for field in &section.fields {
      let label = if field.label.is_empty() { "(unlabeled)" } else { &field.label };
      match field.kind {
        FieldKind::Enum => println!("  [{}] {} {{{}}}", field.kind.as_str(), label, field.options().join(", ")),
        _ => println!("  [{}] {}", field.kind.as_str(), label),
      }
    }
    println!();
  }

  Ok(())
}

/// Export the full template set as pretty-printed JSON
pub fn cmd_templates_export(config: &Config, output: Option<&str>) -> Result<()> {
  let templates = load_templates(config)?;
  let json = serde_json::to_string_pretty(&templates)?;

  match output {
    Some(path) => {
      std::fs::write(path, &json).with_context(|| format!("Failed to write {}", path))?;
      println!("Exported {} templates to {}", templates.len(), path);
    }
    None => println!("{}", json),
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn named(name: &str) -> Template {
    Template::new(name)
  }

  #[test]
  fn test_resolve_by_exact_name() {
    let templates = vec![named("Intake"), named("Survey")];
    let found = resolve_template(&templates, "Survey").unwrap();
    assert_eq!(found.name, "Survey");
  }

  #[test]
  fn test_resolve_by_id_prefix() {
    let templates = vec![named("Intake"), named("Survey")];
    let prefix = &templates[1].id[..8];
    let found = resolve_template(&templates, prefix).unwrap();
    assert_eq!(found.id, templates[1].id);
  }

  #[test]
  fn test_exact_match_beats_prefix() {
    let templates = vec![named("Intake"), named("Survey")];
    let full_id = templates[0].id.clone();
    let found = resolve_template(&templates, &full_id).unwrap();
    assert_eq!(found.id, full_id);
  }

  #[test]
  fn test_resolve_unknown_is_none() {
    let templates = vec![named("Intake")];
    assert!(resolve_template(&templates, "zzz").is_none());
  }
}
