use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be performed in the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  /// Quit the application
  Quit,
  /// Navigate up in a list
  NavigateUp,
  /// Navigate down in a list
  NavigateDown,
  /// Cycle the selected value backward
  NavigateLeft,
  /// Cycle the selected value forward
  NavigateRight,
  /// Select/Enter on current item
  Select,
  /// Go back (Escape)
  Back,
  /// Toggle help overlay
  ToggleHelp,
  /// Create a new template
  NewTemplate,
  /// Open the fill view for the current template
  FillForm,
  /// Append a section to the current template
  AddSection,
  /// Append a field to the current section
  AddField,
  /// Start editing the current row's text
  Edit,
  /// Cycle the selected field's kind
  CycleKind,
  /// Edit the selected field's option list
  EditOptions,
  /// Delete the selected field, or clear the selected answer
  Delete,
  /// Commit the edit buffer
  Submit,
  /// Character input while editing
  Input(char),
  /// Delete character in the edit buffer
  DeleteChar,
  /// Go to top of list
  GoToTop,
  /// Go to bottom of list
  GoToBottom,
  /// No action
  None,
}

/// Convert a key event to an action based on the current input mode
pub fn key_to_action(key: KeyEvent, editing: bool) -> Action {
  if editing {
    // In edit mode, most keys are text input
    match key.code {
      KeyCode::Esc => Action::Back,
      KeyCode::Enter => Action::Submit,
      KeyCode::Backspace => Action::DeleteChar,
      KeyCode::Char(c) => Action::Input(c),
      _ => Action::None,
    }
  } else {
    // Normal mode keybindings (vim-style)
    match key.code {
      // Quit
      KeyCode::Char('q') => Action::Quit,
      KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,

      // Navigation
      KeyCode::Char('j') | KeyCode::Down => Action::NavigateDown,
      KeyCode::Char('k') | KeyCode::Up => Action::NavigateUp,
      KeyCode::Char('h') | KeyCode::Left => Action::NavigateLeft,
      KeyCode::Char('l') | KeyCode::Right => Action::NavigateRight,
      KeyCode::Enter | KeyCode::Char(' ') => Action::Select,
      KeyCode::Esc => Action::Back,
      KeyCode::Char('g') => Action::GoToTop,
      KeyCode::Char('G') => Action::GoToBottom,

      // Actions
      KeyCode::Char('n') => Action::NewTemplate,
      KeyCode::Char('f') => Action::FillForm,
      KeyCode::Char('s') => Action::AddSection,
      KeyCode::Char('a') => Action::AddField,
      KeyCode::Char('e') => Action::Edit,
      KeyCode::Char('t') => Action::CycleKind,
      KeyCode::Char('o') => Action::EditOptions,
      KeyCode::Char('d') => Action::Delete,
      KeyCode::Char('?') => Action::ToggleHelp,

      _ => Action::None,
    }
  }
}
