use formbench_core::{FieldKind, Template};
use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::Style,
  widgets::{Block, Borders, Widget},
};

use crate::tui::{theme::Theme, widgets::TextField};

/// One selectable row in the builder tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderRow {
  /// The template name line
  Name,
  /// A section title line
  Section(usize),
  /// A field line within a section
  Field { section: usize, field: usize },
}

/// What the edit buffer is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
  TemplateName,
  SectionTitle { section: usize },
  FieldLabel { section: usize, field: usize },
  /// Comma-separated option list of an enum field
  FieldOptions { section: usize, field: usize },
}

/// Template builder view state
#[derive(Debug, Default)]
pub struct BuilderState {
  pub template_id: String,
  pub selected: usize,
  pub input: String,
  pub editing: Option<EditTarget>,
}

impl BuilderState {
  pub fn open(template_id: String) -> Self {
    Self {
      template_id,
      ..Default::default()
    }
  }

  /// Flatten the template into its ordered row list
  pub fn rows(template: &Template) -> Vec<BuilderRow> {
    let mut rows = vec![BuilderRow::Name];
    for (si, section) in template.sections.iter().enumerate() {
      rows.push(BuilderRow::Section(si));
      for fi in 0..section.fields.len() {
        rows.push(BuilderRow::Field { section: si, field: fi });
      }
    }
    rows
  }

  pub fn selected_row(&self, template: &Template) -> Option<BuilderRow> {
    Self::rows(template).get(self.selected).copied()
  }

  /// The section the cursor sits in, for appending fields
  pub fn selected_section(&self, template: &Template) -> Option<usize> {
    match self.selected_row(template)? {
      BuilderRow::Name => (!template.sections.is_empty()).then_some(0),
      BuilderRow::Section(section) => Some(section),
      BuilderRow::Field { section, .. } => Some(section),
    }
  }

  pub fn select_next(&mut self, template: &Template) {
    let len = Self::rows(template).len();
    if len == 0 {
      return;
    }
    self.selected = (self.selected + 1).min(len - 1);
  }

  pub fn select_prev(&mut self) {
    self.selected = self.selected.saturating_sub(1);
  }

  pub fn clamp(&mut self, template: &Template) {
    let len = Self::rows(template).len();
    if len > 0 && self.selected >= len {
      self.selected = len - 1;
    }
  }

  pub fn begin_edit(&mut self, target: EditTarget, current: String) {
    self.input = current;
    self.editing = Some(target);
  }

  pub fn cancel_edit(&mut self) {
    self.editing = None;
    self.input.clear();
  }
}

/// Template builder view widget
pub struct BuilderView<'a> {
  template: &'a Template,
  state: &'a BuilderState,
}

impl<'a> BuilderView<'a> {
  pub fn new(template: &'a Template, state: &'a BuilderState) -> Self {
    Self { template, state }
  }
}

impl Widget for BuilderView<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let title = format!("BUILDER - {}", display_or(&self.template.name, "(unnamed)"));
    let block = Block::default()
      .title(title)
      .title_style(Style::default().fg(Theme::ACCENT).bold())
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Theme::ACCENT));

    let inner = block.inner(area);
    block.render(area, buf);

    let rows = BuilderState::rows(self.template);
    let visible_height = inner.height as usize;
    let start = if self.state.selected >= visible_height {
      self.state.selected - visible_height + 1
    } else {
      0
    };

    for (i, row) in rows.iter().enumerate().skip(start).take(visible_height) {
      let y = inner.y + (i - start) as u16;
      let is_selected = i == self.state.selected;
      self.render_row(*row, inner.x, y, inner.width, is_selected, buf);
    }
  }
}

impl BuilderView<'_> {
  fn render_row(&self, row: BuilderRow, x: u16, y: u16, width: u16, selected: bool, buf: &mut Buffer) {
    let bg = if selected { Theme::SURFACE } else { Theme::BG };
    for i in 0..width {
      buf[(x + i, y)].set_bg(bg);
    }

    let indicator = if selected { "▶ " } else { "  " };
    buf.set_string(x, y, indicator, Style::default().fg(Theme::ACCENT));

    // A row being edited shows the edit buffer instead of its stored text
    if selected && let Some(target) = self.state.editing {
      let label = match target {
        EditTarget::TemplateName => "Name",
        EditTarget::SectionTitle { .. } => "Title",
        EditTarget::FieldLabel { .. } => "Label",
        EditTarget::FieldOptions { .. } => "Options",
      };
      let field_area = Rect::new(x + 2, y, width.saturating_sub(2), 1);
      TextField::new(label, &self.state.input).active(true).render(field_area, buf);
      return;
    }

    match row {
      BuilderRow::Name => {
        buf.set_string(x + 2, y, "Name: ", Style::default().fg(Theme::SUBTEXT));
        buf.set_string(
          x + 8,
          y,
          display_or(&self.template.name, "(unnamed)"),
          Style::default().fg(Theme::TEXT).bold(),
        );
      }
      BuilderRow::Section(si) => {
        let Some(section) = self.template.sections.get(si) else {
          return;
        };
        let text = format!("▸ {}", display_or(&section.title, "(untitled section)"));
        buf.set_string(x + 2, y, &text, Style::default().fg(Theme::INFO).bold());
      }
      BuilderRow::Field { section, field } => {
        let Some(f) = self.template.sections.get(section).and_then(|s| s.fields.get(field)) else {
          return;
        };

        let badge = format!("[{:>7}] ", f.kind.as_str());
        buf.set_string(x + 4, y, &badge, Style::default().fg(Theme::kind_color(f.kind)).bold());

        let label = display_or(&f.label, "(unlabeled)");
        let label_x = x + 4 + badge.len() as u16;
        let fg = if selected { Theme::TEXT } else { Theme::SUBTEXT };
        buf.set_string(label_x, y, label, Style::default().fg(fg));

        // Option lists ride along even when the kind is no longer enum
        if let Some(options) = &f.options
          && f.kind == FieldKind::Enum
        {
          let text = format!("  {{{}}}", options.join(", "));
          buf.set_string(label_x + label.len() as u16, y, &text, Style::default().fg(Theme::MUTED));
        }
      }
    }
  }
}

fn display_or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
  if s.is_empty() { fallback } else { s }
}

#[cfg(test)]
mod tests {
  use formbench_core::{Field, Section};

  use super::*;

  fn template_with_layout() -> Template {
    let mut template = Template::new("T");
    template.sections[0].fields.push(Field::new());
    template.sections[0].fields.push(Field::new());
    template.sections.push(Section::new());
    template.sections[1].fields.push(Field::new());
    template
  }

  #[test]
  fn test_rows_flatten_in_document_order() {
    let template = template_with_layout();
    let rows = BuilderState::rows(&template);
    assert_eq!(
      rows,
      vec![
        BuilderRow::Name,
        BuilderRow::Section(0),
        BuilderRow::Field { section: 0, field: 0 },
        BuilderRow::Field { section: 0, field: 1 },
        BuilderRow::Section(1),
        BuilderRow::Field { section: 1, field: 0 },
      ]
    );
  }

  #[test]
  fn test_selected_section_follows_cursor() {
    let template = template_with_layout();
    let mut state = BuilderState::open(template.id.clone());

    // Name row targets the first section
    assert_eq!(state.selected_section(&template), Some(0));

    state.selected = 4; // second section header
    assert_eq!(state.selected_section(&template), Some(1));

    state.selected = 5; // field in second section
    assert_eq!(state.selected_section(&template), Some(1));
  }

  #[test]
  fn test_clamp_after_field_removal() {
    let mut template = template_with_layout();
    let mut state = BuilderState::open(template.id.clone());
    state.selected = BuilderState::rows(&template).len() - 1;

    template.sections[1].fields.clear();
    state.clamp(&template);
    assert_eq!(state.selected, BuilderState::rows(&template).len() - 1);
  }

  #[test]
  fn test_cancel_edit_clears_buffer() {
    let mut state = BuilderState::open("t".into());
    state.begin_edit(EditTarget::TemplateName, "Draft".into());
    assert_eq!(state.input, "Draft");
    state.cancel_edit();
    assert!(state.editing.is_none());
    assert!(state.input.is_empty());
  }
}
