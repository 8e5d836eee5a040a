use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::Field;

/// Upper bound on templates held in the persisted set
pub const MAX_TEMPLATES: usize = 5;

/// A titled, ordered group of fields within a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
  pub id: String,
  pub title: String,
  pub fields: Vec<Field>,
}

impl Section {
  pub fn new() -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      title: String::new(),
      fields: Vec::new(),
    }
  }
}

impl Default for Section {
  fn default() -> Self {
    Self::new()
  }
}

/// A named form schema composed of ordered sections; the unit of persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
  pub id: String,
  pub name: String,
  pub sections: Vec<Section>,
}

impl Template {
  /// Create a template with one default section
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      name: name.into(),
      sections: vec![Section::new()],
    }
  }

  pub fn section(&self, section_id: &str) -> Option<&Section> {
    self.sections.iter().find(|s| s.id == section_id)
  }

  pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
    self.sections.iter_mut().find(|s| s.id == section_id)
  }

  pub fn field_count(&self) -> usize {
    self.sections.iter().map(|s| s.fields.len()).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_template_has_default_section() {
    let template = Template::new("Intake");
    assert_eq!(template.name, "Intake");
    assert_eq!(template.sections.len(), 1);
    assert!(template.sections[0].fields.is_empty());
  }

  #[test]
  fn test_section_lookup_by_id() {
    let mut template = Template::new("T");
    template.sections.push(Section::new());
    let id = template.sections[1].id.clone();
    assert!(template.section(&id).is_some());
    assert!(template.section("missing").is_none());
  }

  #[test]
  fn test_field_count_spans_sections() {
    let mut template = Template::new("T");
    template.sections[0].fields.push(Field::new());
    template.sections.push(Section::new());
    template.sections[1].fields.push(Field::new());
    template.sections[1].fields.push(Field::new());
    assert_eq!(template.field_count(), 3);
  }
}
