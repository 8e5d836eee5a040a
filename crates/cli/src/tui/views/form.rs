use formbench_core::{Answer, Field, FieldKind, Submission, Template};
use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::Style,
  widgets::{Block, Borders, Widget},
};

use crate::tui::{theme::Theme, widgets::TextField};

/// One selectable row in the fill view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
  /// An answer-collecting field
  Field { section: usize, field: usize },
  /// The submit button
  Submit,
}

/// Form fill view state
#[derive(Debug, Default)]
pub struct FormState {
  pub template_id: String,
  pub selected: usize,
  /// In-memory answers, keyed by field id; cleared after submit
  pub answers: Submission,
  pub input: String,
  pub editing: bool,
  /// Acknowledgment shown after a submit; the next key press dismisses it
  pub ack: Option<String>,
}

impl FormState {
  pub fn open(template_id: String) -> Self {
    Self {
      template_id,
      ..Default::default()
    }
  }

  /// Selectable rows: one per answer-collecting field, plus the submit
  /// button. Label fields render but are skipped for navigation.
  pub fn rows(template: &Template) -> Vec<FormRow> {
    let mut rows = Vec::new();
    for (si, section) in template.sections.iter().enumerate() {
      for (fi, field) in section.fields.iter().enumerate() {
        if field.kind.collects_answer() {
          rows.push(FormRow::Field { section: si, field: fi });
        }
      }
    }
    rows.push(FormRow::Submit);
    rows
  }

  pub fn selected_row(&self, template: &Template) -> Option<FormRow> {
    Self::rows(template).get(self.selected).copied()
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

  /// Flip the checkbox answer of a boolean field
  pub fn toggle_boolean(&mut self, field: &Field) {
    let on = matches!(self.answers.get(&field.id), Some(Answer::Bool(true)));
    self.answers.set(field.id.clone(), Answer::Bool(!on));
  }

  /// Step an enum field's choice through its options, wrapping around.
  /// A field with no options is left unanswered.
  pub fn cycle_choice(&mut self, field: &Field, step: isize) {
    let options = field.options();
    if options.is_empty() {
      return;
    }
    let current = match self.answers.get(&field.id) {
      Some(Answer::Text(choice)) => options.iter().position(|o| o == choice),
      _ => None,
    };
    let next = match current {
      Some(i) => (i as isize + step).rem_euclid(options.len() as isize) as usize,
      None if step < 0 => options.len() - 1,
      None => 0,
    };
    self.answers.set(field.id.clone(), Answer::Text(options[next].clone()));
  }

  /// Start editing a text or number field, seeded with the current answer
  pub fn begin_edit(&mut self, field: &Field) {
    self.input = match self.answers.get(&field.id) {
      Some(answer) => answer.to_string(),
      None => String::new(),
    };
    self.editing = true;
  }

  /// Commit the edit buffer as the field's answer. Empty text and
  /// unparseable numbers drop the answer instead of storing it.
  pub fn commit_input(&mut self, field: &Field) {
    let raw = std::mem::take(&mut self.input);
    self.editing = false;
    match field.kind {
      FieldKind::Number => match raw.trim().parse::<f64>() {
        Ok(n) => self.answers.set(field.id.clone(), Answer::Number(n)),
        Err(_) => self.answers.remove(&field.id),
      },
      _ => {
        if raw.is_empty() {
          self.answers.remove(&field.id);
        } else {
          self.answers.set(field.id.clone(), Answer::Text(raw));
        }
      }
    }
  }

  pub fn cancel_edit(&mut self) {
    self.editing = false;
    self.input.clear();
  }
}

/// Display lines derived from the template, including non-selectable rows
enum DisplayLine<'a> {
  SectionTitle(&'a str),
  Field {
    field: &'a Field,
    row: FormRow,
  },
  Blank,
  Submit,
}

/// Form fill view widget
pub struct FormView<'a> {
  template: &'a Template,
  state: &'a FormState,
}

impl<'a> FormView<'a> {
  pub fn new(template: &'a Template, state: &'a FormState) -> Self {
    Self { template, state }
  }

  fn display_lines(&self) -> Vec<DisplayLine<'a>> {
    let mut lines = Vec::new();
    for (si, section) in self.template.sections.iter().enumerate() {
      if !section.title.is_empty() {
        lines.push(DisplayLine::SectionTitle(&section.title));
      }
      for (fi, field) in section.fields.iter().enumerate() {
        lines.push(DisplayLine::Field {
          field,
          row: FormRow::Field { section: si, field: fi },
        });
      }
      lines.push(DisplayLine::Blank);
    }
    lines.push(DisplayLine::Submit);
    lines
  }
}

impl Widget for FormView<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let name = if self.template.name.is_empty() {
      "(unnamed)"
    } else {
      &self.template.name
    };
    let title = format!("FILL - {}", name);
    let block = Block::default()
      .title(title)
      .title_style(Style::default().fg(Theme::ACCENT).bold())
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Theme::ACCENT));

    let inner = block.inner(area);
    block.render(area, buf);

    let selected = self.state.selected_row(self.template);
    let lines = self.display_lines();

    // Scroll so the selected line stays visible
    let visible_height = inner.height as usize;
    let selected_line = lines
      .iter()
      .position(|line| match line {
        DisplayLine::Field { row, .. } => selected == Some(*row),
        DisplayLine::Submit => selected == Some(FormRow::Submit),
        _ => false,
      })
      .unwrap_or(0);
    let start = if selected_line >= visible_height {
      selected_line - visible_height + 1
    } else {
      0
    };

    for (i, line) in lines.iter().enumerate().skip(start).take(visible_height) {
      let y = inner.y + (i - start) as u16;
      match line {
        DisplayLine::SectionTitle(title) => {
          buf.set_string(inner.x + 1, y, title.to_uppercase(), Style::default().fg(Theme::ACCENT).bold());
        }
        DisplayLine::Field { field, row } => {
          let is_selected = selected == Some(*row);
          self.render_field(field, is_selected, inner.x, y, inner.width, buf);
        }
        DisplayLine::Blank => {}
        DisplayLine::Submit => {
          let is_selected = selected == Some(FormRow::Submit);
          let style = if is_selected {
            Style::default().fg(Theme::BG).bg(Theme::SUCCESS).bold()
          } else {
            Style::default().fg(Theme::SUCCESS)
          };
          buf.set_string(inner.x + 2, y, "[ Submit ]", style);
        }
      }
    }
  }
}

impl FormView<'_> {
  fn render_field(&self, field: &Field, selected: bool, x: u16, y: u16, width: u16, buf: &mut Buffer) {
    let bg = if selected { Theme::SURFACE } else { Theme::BG };
    for i in 0..width {
      buf[(x + i, y)].set_bg(bg);
    }

    let indicator = if selected { "▶ " } else { "  " };
    buf.set_string(x, y, indicator, Style::default().fg(Theme::ACCENT));

    let label = if field.label.is_empty() { "(unlabeled)" } else { &field.label };

    match field.kind {
      FieldKind::Label => {
        buf.set_string(x + 2, y, label, Style::default().fg(Theme::SUBTEXT).italic());
      }
      FieldKind::Text | FieldKind::Number => {
        let field_area = Rect::new(x + 2, y, width.saturating_sub(2), 1);
        if selected && self.state.editing {
          TextField::new(label, &self.state.input).active(true).render(field_area, buf);
        } else {
          let value = self
            .state
            .answers
            .get(&field.id)
            .map(|a| a.to_string())
            .unwrap_or_default();
          TextField::new(label, &value).render(field_area, buf);
        }
      }
      FieldKind::Boolean => {
        let on = matches!(self.state.answers.get(&field.id), Some(Answer::Bool(true)));
        let mark = if on { "[x] " } else { "[ ] " };
        let mark_color = if on { Theme::SUCCESS } else { Theme::MUTED };
        buf.set_string(x + 2, y, mark, Style::default().fg(mark_color));
        buf.set_string(x + 6, y, label, Style::default().fg(Theme::TEXT));
      }
      FieldKind::Enum => {
        let prefix = format!("{}: ", label);
        buf.set_string(x + 2, y, &prefix, Style::default().fg(Theme::SUBTEXT));

        let choice = match self.state.answers.get(&field.id) {
          Some(Answer::Text(choice)) => choice.clone(),
          _ => String::new(),
        };
        let display = if selected { format!("◂ {} ▸", choice) } else { choice };
        buf.set_string(
          x + 2 + prefix.len() as u16,
          y,
          &display,
          Style::default().fg(Theme::kind_color(field.kind)),
        );
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn field_of(kind: FieldKind) -> Field {
    let mut field = Field::new();
    field.kind = kind;
    field
  }

  fn template_with_kinds() -> Template {
    let mut template = Template::new("T");
    template.sections[0].fields.push(field_of(FieldKind::Label));
    template.sections[0].fields.push(field_of(FieldKind::Text));
    template.sections[0].fields.push(field_of(FieldKind::Boolean));
    template
  }

  #[test]
  fn test_rows_skip_labels_and_end_with_submit() {
    let template = template_with_kinds();
    let rows = FormState::rows(&template);
    assert_eq!(
      rows,
      vec![
        FormRow::Field { section: 0, field: 1 },
        FormRow::Field { section: 0, field: 2 },
        FormRow::Submit,
      ]
    );
  }

  #[test]
  fn test_toggle_boolean_flips() {
    let field = field_of(FieldKind::Boolean);
    let mut state = FormState::open("t".into());

    state.toggle_boolean(&field);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Bool(true)));

    state.toggle_boolean(&field);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Bool(false)));
  }

  #[test]
  fn test_cycle_choice_wraps() {
    let mut field = field_of(FieldKind::Enum);
    field.options = Some(vec!["low".into(), "high".into()]);
    let mut state = FormState::open("t".into());

    state.cycle_choice(&field, 1);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Text("low".into())));

    state.cycle_choice(&field, 1);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Text("high".into())));

    state.cycle_choice(&field, 1);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Text("low".into())));

    state.cycle_choice(&field, -1);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Text("high".into())));
  }

  #[test]
  fn test_cycle_choice_without_options_is_noop() {
    let field = field_of(FieldKind::Enum);
    let mut state = FormState::open("t".into());
    state.cycle_choice(&field, 1);
    assert!(state.answers.is_empty());
  }

  #[test]
  fn test_commit_drops_unparseable_number() {
    let field = field_of(FieldKind::Number);
    let mut state = FormState::open("t".into());

    state.begin_edit(&field);
    state.input = "42".into();
    state.commit_input(&field);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Number(42.0)));

    state.begin_edit(&field);
    state.input = "not a number".into();
    state.commit_input(&field);
    assert_eq!(state.answers.get(&field.id), None);
  }

  #[test]
  fn test_commit_empty_text_clears_answer() {
    let field = field_of(FieldKind::Text);
    let mut state = FormState::open("t".into());

    state.input = "hello".into();
    state.editing = true;
    state.commit_input(&field);
    assert_eq!(state.answers.get(&field.id), Some(&Answer::Text("hello".into())));

    state.begin_edit(&field);
    assert_eq!(state.input, "hello");
    state.input.clear();
    state.commit_input(&field);
    assert_eq!(state.answers.get(&field.id), None);
  }
}
