//! Canonical application state and the single edit pathway over it.
//!
//! Every mutation of the template set is an [`Edit`] applied through
//! [`AppState::apply`]. Callers persist the set afterwards; views derive the
//! current template from the canonical set by id rather than holding copies.

use tracing::warn;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::template::{MAX_TEMPLATES, Section, Template};

/// An edit operation over the template set
#[derive(Debug, Clone)]
pub enum Edit {
  /// Append a new template with a generated name and one default section.
  /// No-op once [`MAX_TEMPLATES`] exist.
  CreateTemplate,
  RenameTemplate {
    template_id: String,
    name: String,
  },
  /// Append an empty section to the template
  AddSection {
    template_id: String,
  },
  SetSectionTitle {
    template_id: String,
    section_id: String,
    title: String,
  },
  /// Append a field with a fresh id, default kind, empty label
  AddField {
    template_id: String,
    section_id: String,
  },
  /// Whole-object replacement of the field at `index`
  UpdateField {
    template_id: String,
    section_id: String,
    index: usize,
    field: Field,
  },
  RemoveField {
    template_id: String,
    section_id: String,
    index: usize,
  },
}

/// The full template set, canonical for every view
#[derive(Debug, Default)]
pub struct AppState {
  pub templates: Vec<Template>,
}

impl AppState {
  pub fn new(templates: Vec<Template>) -> Self {
    Self { templates }
  }

  pub fn template(&self, template_id: &str) -> Option<&Template> {
    self.templates.iter().find(|t| t.id == template_id)
  }

  fn template_mut(&mut self, template_id: &str) -> Result<&mut Template> {
    self
      .templates
      .iter_mut()
      .find(|t| t.id == template_id)
      .ok_or_else(|| Error::NotFound {
        entity: "template",
        id: template_id.to_string(),
      })
  }

  fn section_mut(&mut self, template_id: &str, section_id: &str) -> Result<&mut Section> {
    self
      .template_mut(template_id)?
      .section_mut(section_id)
      .ok_or_else(|| Error::NotFound {
        entity: "section",
        id: section_id.to_string(),
      })
  }

  /// Apply one edit. The caller persists the set after a successful return.
  pub fn apply(&mut self, edit: Edit) -> Result<()> {
    match edit {
      Edit::CreateTemplate => {
        if self.templates.len() >= MAX_TEMPLATES {
          warn!("Template limit of {} reached, ignoring create", MAX_TEMPLATES);
          return Ok(());
        }
        let name = format!("Template {}", self.templates.len() + 1);
        self.templates.push(Template::new(name));
      }
      Edit::RenameTemplate { template_id, name } => {
        self.template_mut(&template_id)?.name = name;
      }
      Edit::AddSection { template_id } => {
        self.template_mut(&template_id)?.sections.push(Section::new());
      }
      Edit::SetSectionTitle {
        template_id,
        section_id,
        title,
      } => {
        self.section_mut(&template_id, &section_id)?.title = title;
      }
      Edit::AddField { template_id, section_id } => {
        self.section_mut(&template_id, &section_id)?.fields.push(Field::new());
      }
      Edit::UpdateField {
        template_id,
        section_id,
        index,
        field,
      } => {
        let section = self.section_mut(&template_id, &section_id)?;
        let slot = section.fields.get_mut(index).ok_or(Error::NotFound {
          entity: "field",
          id: index.to_string(),
        })?;
        *slot = field;
      }
      Edit::RemoveField {
        template_id,
        section_id,
        index,
      } => {
        let section = self.section_mut(&template_id, &section_id)?;
        if index >= section.fields.len() {
          return Err(Error::NotFound {
            entity: "field",
            id: index.to_string(),
          });
        }
        section.fields.remove(index);
      }
    }
    Ok(())
  }
}
