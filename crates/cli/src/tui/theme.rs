use formbench_core::FieldKind;
use ratatui::style::Color;

/// Catppuccin-inspired theme colors
pub struct Theme;

impl Theme {
  // Base colors
  pub const BG: Color = Color::Rgb(30, 30, 46); // Base
  pub const SURFACE: Color = Color::Rgb(49, 50, 68); // Surface0
  pub const OVERLAY: Color = Color::Rgb(69, 71, 90); // Surface1
  pub const TEXT: Color = Color::Rgb(205, 214, 244); // Text
  pub const SUBTEXT: Color = Color::Rgb(166, 173, 200); // Subtext0
  pub const MUTED: Color = Color::Rgb(108, 112, 134); // Overlay1

  // Accent colors
  pub const ACCENT: Color = Color::Rgb(137, 180, 250); // Blue
  pub const SUCCESS: Color = Color::Rgb(166, 227, 161); // Green
  pub const WARNING: Color = Color::Rgb(249, 226, 175); // Yellow
  pub const ERROR: Color = Color::Rgb(243, 139, 168); // Red
  pub const INFO: Color = Color::Rgb(148, 226, 213); // Teal

  /// Get color for a field kind
  pub fn kind_color(kind: FieldKind) -> Color {
    match kind {
      FieldKind::Label => Self::MUTED,
      FieldKind::Text => Self::ACCENT,
      FieldKind::Number => Color::Rgb(250, 179, 135), // Peach
      FieldKind::Boolean => Self::SUCCESS,
      FieldKind::Enum => Color::Rgb(203, 166, 247), // Mauve
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_kind_colors_are_distinct() {
    let colors: Vec<Color> = FieldKind::ALL.iter().map(|k| Theme::kind_color(*k)).collect();
    for (i, a) in colors.iter().enumerate() {
      for b in colors.iter().skip(i + 1) {
        assert_ne!(a, b);
      }
    }
  }
}
