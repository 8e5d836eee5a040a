use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::tui::theme::Theme;

/// A single-line labeled input widget.
/// Renders `label: value` with a trailing cursor when active.
/// Example: Title: Customer intake_
pub struct TextField<'a> {
  label: &'a str,
  value: &'a str,
  active: bool,
}

impl<'a> TextField<'a> {
  pub fn new(label: &'a str, value: &'a str) -> Self {
    Self {
      label,
      value,
      active: false,
    }
  }

  pub fn active(mut self, active: bool) -> Self {
    self.active = active;
    self
  }
}

impl Widget for TextField<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
      return;
    }

    let label = format!("{}: ", self.label);
    let label_width = label.width() as u16;
    buf.set_string(area.x, area.y, &label, Style::default().fg(Theme::SUBTEXT));

    // Leave one cell for the cursor when active
    let avail = area.width.saturating_sub(label_width + u16::from(self.active)) as usize;
    let chars: Vec<char> = self.value.chars().collect();
    let display: String = if chars.len() > avail {
      if self.active {
        // Keep the tail visible while typing
        chars[chars.len() - avail..].iter().collect()
      } else {
        let mut head: String = chars[..avail.saturating_sub(3)].iter().collect();
        head.push_str("...");
        head
      }
    } else {
      self.value.to_string()
    };

    let value_style = if self.active {
      Style::default().fg(Theme::TEXT)
    } else {
      Style::default().fg(Theme::SUBTEXT)
    };
    buf.set_string(area.x + label_width, area.y, &display, value_style);

    if self.active {
      let cursor_x = area.x + label_width + display.width() as u16;
      if cursor_x < area.x + area.width {
        buf.set_string(cursor_x, area.y, "_", Style::default().fg(Theme::ACCENT));
      }
    }
  }
}
