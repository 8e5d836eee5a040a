use formbench_core::{MAX_TEMPLATES, Template};
use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::Style,
  widgets::{Block, Borders, Widget},
};

use crate::tui::theme::Theme;

/// Template list view state
#[derive(Debug, Default)]
pub struct TemplatesState {
  pub selected: usize,
  /// Submission counts per template, refreshed on entry to the view
  pub submission_counts: Vec<usize>,
}

impl TemplatesState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn select_next(&mut self, len: usize) {
    if len == 0 {
      return;
    }
    self.selected = (self.selected + 1).min(len - 1);
  }

  pub fn select_prev(&mut self) {
    self.selected = self.selected.saturating_sub(1);
  }

  pub fn clamp(&mut self, len: usize) {
    if len == 0 {
      self.selected = 0;
    } else if self.selected >= len {
      self.selected = len - 1;
    }
  }
}

/// Template list view widget
pub struct TemplatesView<'a> {
  templates: &'a [Template],
  state: &'a TemplatesState,
}

impl<'a> TemplatesView<'a> {
  pub fn new(templates: &'a [Template], state: &'a TemplatesState) -> Self {
    Self { templates, state }
  }
}

impl Widget for TemplatesView<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let title = format!("TEMPLATES ({}/{})", self.templates.len(), MAX_TEMPLATES);
    let block = Block::default()
      .title(title)
      .title_style(Style::default().fg(Theme::ACCENT).bold())
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Theme::ACCENT));

    let inner = block.inner(area);
    block.render(area, buf);

    if self.templates.is_empty() {
      buf.set_string(
        inner.x,
        inner.y,
        "No templates yet - press n to create one",
        Style::default().fg(Theme::MUTED),
      );
      return;
    }

    let visible_height = inner.height as usize;
    let start = if self.state.selected >= visible_height {
      self.state.selected - visible_height + 1
    } else {
      0
    };

    for (i, template) in self.templates.iter().enumerate().skip(start).take(visible_height) {
      let y = inner.y + (i - start) as u16;
      let is_selected = i == self.state.selected;
      self.render_template_item(template, i, inner.x, y, inner.width, is_selected, buf);
    }
  }
}

impl TemplatesView<'_> {
  fn render_template_item(
    &self,
    template: &Template,
    index: usize,
    x: u16,
    y: u16,
    width: u16,
    selected: bool,
    buf: &mut Buffer,
  ) {
    let bg = if selected { Theme::SURFACE } else { Theme::BG };
    let fg = if selected { Theme::TEXT } else { Theme::SUBTEXT };

    // Clear line with background
    for i in 0..width {
      buf[(x + i, y)].set_bg(bg);
    }

    // Selection indicator
    let indicator = if selected { "▶ " } else { "  " };
    buf.set_string(x, y, indicator, Style::default().fg(Theme::ACCENT));

    let name = if template.name.is_empty() {
      "(unnamed)"
    } else {
      &template.name
    };
    buf.set_string(x + 2, y, name, Style::default().fg(fg).bold());

    // Counts right-aligned
    let submissions = self.state.submission_counts.get(index).copied().unwrap_or(0);
    let counts = format!(
      "{} sections  {} fields  {} submissions",
      template.sections.len(),
      template.field_count(),
      submissions
    );
    let counts_x = x + width.saturating_sub(counts.len() as u16 + 2);
    if counts_x > x + 2 + name.len() as u16 {
      buf.set_string(counts_x, y, &counts, Style::default().fg(Theme::MUTED));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_selection_clamps_to_list() {
    let mut state = TemplatesState::new();
    state.select_next(3);
    state.select_next(3);
    state.select_next(3);
    assert_eq!(state.selected, 2);

    state.clamp(1);
    assert_eq!(state.selected, 0);
  }

  #[test]
  fn test_select_prev_saturates() {
    let mut state = TemplatesState::new();
    state.select_prev();
    assert_eq!(state.selected, 0);
  }
}
