use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
  event::{self, Event as CrosstermEvent, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use formbench_core::{Config, Edit, FieldKind};
use ratatui::{
  Terminal,
  backend::CrosstermBackend,
  buffer::Buffer,
  layout::{Constraint, Direction, Layout, Rect},
  style::Style,
  widgets::{Block, Borders, Clear, Widget},
};
use store::{KvStore, SubmissionStore, TemplateStore};
use tracing::{info, warn};

use crate::tui::{
  event::{Action, key_to_action},
  theme::Theme,
  views::{
    BuilderView, FormView, TemplatesView,
    builder::{BuilderRow, BuilderState, EditTarget},
    form::{FormRow, FormState},
    templates::TemplatesState,
  },
};

/// The current view being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
  #[default]
  Templates,
  Builder,
  Form,
}

impl View {
  pub fn name(&self) -> &'static str {
    match self {
      View::Templates => "Templates",
      View::Builder => "Builder",
      View::Form => "Fill",
    }
  }
}

/// Input mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
  #[default]
  Normal,
  Edit,
}

/// Main application state.
///
/// Holds the canonical template set; every mutation goes through
/// [`formbench_core::AppState::apply`] and is followed by a wholesale
/// rewrite of the persisted set. The builder and fill views address their
/// template by id and look it up here on every access.
pub struct App {
  pub current_view: View,
  pub input_mode: InputMode,
  pub should_quit: bool,
  pub show_help: bool,

  pub state: formbench_core::AppState,
  pub template_store: TemplateStore,
  pub submission_store: SubmissionStore,

  // View states
  pub templates_view: TemplatesState,
  pub builder: BuilderState,
  pub form: FormState,
}

impl App {
  pub fn new(template_store: TemplateStore, submission_store: SubmissionStore) -> Self {
    let state = formbench_core::AppState::new(template_store.load_all());
    info!("Loaded {} templates", state.templates.len());

    let mut app = Self {
      current_view: View::Templates,
      input_mode: InputMode::Normal,
      should_quit: false,
      show_help: false,
      state,
      template_store,
      submission_store,
      templates_view: TemplatesState::new(),
      builder: BuilderState::default(),
      form: FormState::default(),
    };
    app.refresh_counts();
    app
  }

  pub fn handle_action(&mut self, action: Action) {
    // A pending acknowledgment swallows the next key press
    if self.form.ack.is_some() {
      self.form.ack = None;
      return;
    }

    match action {
      Action::Quit => self.should_quit = true,
      Action::ToggleHelp => self.show_help = !self.show_help,
      Action::NavigateUp => self.navigate_up(),
      Action::NavigateDown => self.navigate_down(),
      Action::NavigateLeft => self.cycle_selected_choice(-1),
      Action::NavigateRight => self.cycle_selected_choice(1),
      Action::GoToTop => self.go_to_top(),
      Action::GoToBottom => self.go_to_bottom(),
      Action::Select => self.select(),
      Action::Back => self.back(),
      Action::NewTemplate => self.create_template(),
      Action::FillForm => self.open_form(),
      Action::AddSection => self.add_section(),
      Action::AddField => self.add_field(),
      Action::Edit => self.edit(),
      Action::CycleKind => self.cycle_kind(),
      Action::EditOptions => self.edit_options(),
      Action::Delete => self.delete(),
      Action::Submit => self.submit_input(),
      Action::Input(c) => self.input_char(c),
      Action::DeleteChar => self.delete_char(),
      Action::None => {}
    }
  }

  /// Apply one edit through the reducer, then rewrite the persisted set
  fn dispatch(&mut self, edit: Edit) {
    match self.state.apply(edit) {
      Ok(()) => self.persist(),
      Err(e) => warn!("Edit rejected: {}", e),
    }
  }

  fn persist(&self) {
    if let Err(e) = self.template_store.save_all(&self.state.templates) {
      warn!("Failed to persist templates: {}", e);
    }
  }

  fn refresh_counts(&mut self) {
    let store = &self.submission_store;
    let counts: Vec<usize> = self.state.templates.iter().map(|t| store.count(&t.id)).collect();
    self.templates_view.submission_counts = counts;
    self.templates_view.clamp(self.state.templates.len());
  }

  fn navigate_up(&mut self) {
    match self.current_view {
      View::Templates => self.templates_view.select_prev(),
      View::Builder => self.builder.select_prev(),
      View::Form => self.form.select_prev(),
    }
  }

  fn navigate_down(&mut self) {
    match self.current_view {
      View::Templates => self.templates_view.select_next(self.state.templates.len()),
      View::Builder => {
        if let Some(template) = self.state.template(&self.builder.template_id) {
          self.builder.select_next(template);
        }
      }
      View::Form => {
        if let Some(template) = self.state.template(&self.form.template_id) {
          self.form.select_next(template);
        }
      }
    }
  }

  fn go_to_top(&mut self) {
    match self.current_view {
      View::Templates => self.templates_view.selected = 0,
      View::Builder => self.builder.selected = 0,
      View::Form => self.form.selected = 0,
    }
  }

  fn go_to_bottom(&mut self) {
    match self.current_view {
      View::Templates => {
        if !self.state.templates.is_empty() {
          self.templates_view.selected = self.state.templates.len() - 1;
        }
      }
      View::Builder => {
        if let Some(template) = self.state.template(&self.builder.template_id) {
          self.builder.selected = BuilderState::rows(template).len() - 1;
        }
      }
      View::Form => {
        if let Some(template) = self.state.template(&self.form.template_id) {
          self.form.selected = FormState::rows(template).len() - 1;
        }
      }
    }
  }

  fn select(&mut self) {
    match self.current_view {
      View::Templates => self.open_builder(),
      View::Builder => self.edit_builder_row(),
      View::Form => self.form_select(true),
    }
  }

  fn edit(&mut self) {
    match self.current_view {
      View::Templates => self.open_builder(),
      View::Builder => self.edit_builder_row(),
      // Same interaction as Enter, but never submits
      View::Form => self.form_select(false),
    }
  }

  fn back(&mut self) {
    if self.input_mode == InputMode::Edit {
      self.builder.cancel_edit();
      self.form.cancel_edit();
      self.input_mode = InputMode::Normal;
      return;
    }
    if self.show_help {
      self.show_help = false;
      return;
    }
    match self.current_view {
      View::Builder | View::Form => {
        self.current_view = View::Templates;
        self.refresh_counts();
      }
      View::Templates => {}
    }
  }

  fn create_template(&mut self) {
    if self.current_view != View::Templates {
      return;
    }
    let before = self.state.templates.len();
    self.dispatch(Edit::CreateTemplate);
    if self.state.templates.len() > before {
      self.templates_view.selected = self.state.templates.len() - 1;
      self.refresh_counts();
    }
  }

  fn open_builder(&mut self) {
    if self.current_view != View::Templates {
      return;
    }
    let Some(template) = self.state.templates.get(self.templates_view.selected) else {
      return;
    };
    self.builder = BuilderState::open(template.id.clone());
    self.current_view = View::Builder;
  }

  fn open_form(&mut self) {
    let template_id = match self.current_view {
      View::Templates => match self.state.templates.get(self.templates_view.selected) {
        Some(template) => template.id.clone(),
        None => return,
      },
      View::Builder => self.builder.template_id.clone(),
      View::Form => return,
    };
    self.form = FormState::open(template_id);
    self.current_view = View::Form;
  }

  fn add_section(&mut self) {
    if self.current_view != View::Builder {
      return;
    }
    let template_id = self.builder.template_id.clone();
    self.dispatch(Edit::AddSection { template_id });

    // Move the cursor to the new section header
    if let Some(template) = self.state.template(&self.builder.template_id) {
      let section = template.sections.len() - 1;
      if let Some(pos) = BuilderState::rows(template)
        .iter()
        .position(|r| *r == BuilderRow::Section(section))
      {
        self.builder.selected = pos;
      }
    }
  }

  fn add_field(&mut self) {
    if self.current_view != View::Builder {
      return;
    }
    let Some(template) = self.state.template(&self.builder.template_id) else {
      return;
    };
    let Some(section) = self.builder.selected_section(template) else {
      return;
    };
    let template_id = self.builder.template_id.clone();
    let section_id = template.sections[section].id.clone();
    self.dispatch(Edit::AddField { template_id, section_id });

    // Move the cursor to the appended field
    if let Some(template) = self.state.template(&self.builder.template_id) {
      let field = template.sections[section].fields.len() - 1;
      if let Some(pos) = BuilderState::rows(template)
        .iter()
        .position(|r| *r == BuilderRow::Field { section, field })
      {
        self.builder.selected = pos;
      }
    }
  }

  fn edit_builder_row(&mut self) {
    let Some(template) = self.state.template(&self.builder.template_id) else {
      return;
    };
    let Some(row) = self.builder.selected_row(template) else {
      return;
    };
    let (target, current) = match row {
      BuilderRow::Name => (EditTarget::TemplateName, template.name.clone()),
      BuilderRow::Section(section) => {
        let Some(s) = template.sections.get(section) else {
          return;
        };
        (EditTarget::SectionTitle { section }, s.title.clone())
      }
      BuilderRow::Field { section, field } => {
        let Some(f) = template.sections.get(section).and_then(|s| s.fields.get(field)) else {
          return;
        };
        (EditTarget::FieldLabel { section, field }, f.label.clone())
      }
    };
    self.builder.begin_edit(target, current);
    self.input_mode = InputMode::Edit;
  }

  fn cycle_kind(&mut self) {
    if self.current_view != View::Builder {
      return;
    }
    let Some(template) = self.state.template(&self.builder.template_id) else {
      return;
    };
    let Some(BuilderRow::Field { section, field }) = self.builder.selected_row(template) else {
      return;
    };
    let Some(s) = template.sections.get(section) else {
      return;
    };
    let Some(f) = s.fields.get(field) else {
      return;
    };

    // Whole-object replacement; any option list rides along unchanged
    let mut updated = f.clone();
    updated.kind = updated.kind.next();
    let edit = Edit::UpdateField {
      template_id: self.builder.template_id.clone(),
      section_id: s.id.clone(),
      index: field,
      field: updated,
    };
    self.dispatch(edit);
  }

  fn edit_options(&mut self) {
    if self.current_view != View::Builder {
      return;
    }
    let Some(template) = self.state.template(&self.builder.template_id) else {
      return;
    };
    let Some(BuilderRow::Field { section, field }) = self.builder.selected_row(template) else {
      return;
    };
    let Some(f) = template.sections.get(section).and_then(|s| s.fields.get(field)) else {
      return;
    };
    if f.kind != FieldKind::Enum {
      return;
    }
    let current = f.options().join(", ");
    self.builder.begin_edit(EditTarget::FieldOptions { section, field }, current);
    self.input_mode = InputMode::Edit;
  }

  fn delete(&mut self) {
    match self.current_view {
      View::Builder => {
        let Some(template) = self.state.template(&self.builder.template_id) else {
          return;
        };
        let Some(BuilderRow::Field { section, field }) = self.builder.selected_row(template) else {
          return;
        };
        let template_id = self.builder.template_id.clone();
        let section_id = template.sections[section].id.clone();
        self.dispatch(Edit::RemoveField {
          template_id,
          section_id,
          index: field,
        });
        if let Some(template) = self.state.template(&self.builder.template_id) {
          self.builder.clamp(template);
        }
      }
      View::Form => {
        // Clear the selected answer
        let Some(template) = self.state.template(&self.form.template_id) else {
          return;
        };
        let Some(FormRow::Field { section, field }) = self.form.selected_row(template) else {
          return;
        };
        let Some(f) = template.sections.get(section).and_then(|s| s.fields.get(field)) else {
          return;
        };
        let field_id = f.id.clone();
        self.form.answers.remove(&field_id);
      }
      View::Templates => {}
    }
  }

  fn form_select(&mut self, allow_submit: bool) {
    let Some(template) = self.state.template(&self.form.template_id) else {
      return;
    };
    match self.form.selected_row(template) {
      Some(FormRow::Field { section, field }) => {
        let Some(f) = template.sections.get(section).and_then(|s| s.fields.get(field)) else {
          return;
        };
        let f = f.clone();
        match f.kind {
          FieldKind::Text | FieldKind::Number => {
            self.form.begin_edit(&f);
            self.input_mode = InputMode::Edit;
          }
          FieldKind::Boolean => self.form.toggle_boolean(&f),
          FieldKind::Enum => self.form.cycle_choice(&f, 1),
          FieldKind::Label => {}
        }
      }
      Some(FormRow::Submit) if allow_submit => self.submit_form(),
      _ => {}
    }
  }

  fn cycle_selected_choice(&mut self, step: isize) {
    if self.current_view != View::Form {
      return;
    }
    let Some(template) = self.state.template(&self.form.template_id) else {
      return;
    };
    let Some(FormRow::Field { section, field }) = self.form.selected_row(template) else {
      return;
    };
    let Some(f) = template.sections.get(section).and_then(|s| s.fields.get(field)) else {
      return;
    };
    if f.kind == FieldKind::Enum {
      let f = f.clone();
      self.form.cycle_choice(&f, step);
    }
  }

  /// Append the in-memory answers to the template's submission log,
  /// acknowledge, and clear the form
  fn submit_form(&mut self) {
    let template_id = self.form.template_id.clone();
    match self.submission_store.append(&template_id, self.form.answers.clone()) {
      Ok(count) => {
        self.form.answers.clear();
        self.form.ack = Some(format!("Submission #{} saved", count));
      }
      Err(e) => warn!("Failed to save submission: {}", e),
    }
  }

  fn submit_input(&mut self) {
    match self.current_view {
      View::Builder => {
        let Some(target) = self.builder.editing else {
          return;
        };
        let text = std::mem::take(&mut self.builder.input);
        self.builder.editing = None;
        self.input_mode = InputMode::Normal;
        let template_id = self.builder.template_id.clone();

        let edit = {
          let Some(template) = self.state.template(&template_id) else {
            return;
          };
          match target {
            EditTarget::TemplateName => Edit::RenameTemplate {
              template_id: template_id.clone(),
              name: text,
            },
            EditTarget::SectionTitle { section } => {
              let Some(s) = template.sections.get(section) else {
                return;
              };
              Edit::SetSectionTitle {
                template_id: template_id.clone(),
                section_id: s.id.clone(),
                title: text,
              }
            }
            EditTarget::FieldLabel { section, field } => {
              let Some(s) = template.sections.get(section) else {
                return;
              };
              let Some(f) = s.fields.get(field) else {
                return;
              };
              let mut updated = f.clone();
              updated.label = text;
              Edit::UpdateField {
                template_id: template_id.clone(),
                section_id: s.id.clone(),
                index: field,
                field: updated,
              }
            }
            EditTarget::FieldOptions { section, field } => {
              let Some(s) = template.sections.get(section) else {
                return;
              };
              let Some(f) = s.fields.get(field) else {
                return;
              };
              let options: Vec<String> = text
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
              let mut updated = f.clone();
              updated.options = if options.is_empty() { None } else { Some(options) };
              Edit::UpdateField {
                template_id: template_id.clone(),
                section_id: s.id.clone(),
                index: field,
                field: updated,
              }
            }
          }
        };
        self.dispatch(edit);
      }
      View::Form => {
        if !self.form.editing {
          return;
        }
        let Some(template) = self.state.template(&self.form.template_id) else {
          return;
        };
        let Some(FormRow::Field { section, field }) = self.form.selected_row(template) else {
          return;
        };
        let Some(f) = template.sections.get(section).and_then(|s| s.fields.get(field)) else {
          return;
        };
        let f = f.clone();
        self.form.commit_input(&f);
        self.input_mode = InputMode::Normal;
      }
      View::Templates => {}
    }
  }

  fn input_char(&mut self, c: char) {
    match self.current_view {
      View::Builder => self.builder.input.push(c),
      View::Form => self.form.input.push(c),
      View::Templates => {}
    }
  }

  fn delete_char(&mut self) {
    match self.current_view {
      View::Builder => {
        self.builder.input.pop();
      }
      View::Form => {
        self.form.input.pop();
      }
      View::Templates => {}
    }
  }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<()> {
  let kv = KvStore::open(config.data_dir())?;
  let template_store = TemplateStore::new(kv.clone());
  let submission_store = SubmissionStore::new(kv);
  let mut app = App::new(template_store, submission_store);

  // Setup terminal
  enable_raw_mode()?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend)?;

  loop {
    // Draw
    terminal.draw(|f| {
      render_app(&app, f.area(), f.buffer_mut());
    })?;

    // Handle events; every action completes before the next is read
    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
          let action = key_to_action(key, app.input_mode == InputMode::Edit);
          app.handle_action(action);
        }
        CrosstermEvent::Resize(_, _) => {
          // Terminal will redraw on next loop
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  // Cleanup
  disable_raw_mode()?;
  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  Ok(())
}

/// Render the application
fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
  // Clear with background
  Clear.render(area, buf);
  for y in area.y..area.y + area.height {
    for x in area.x..area.x + area.width {
      buf[(x, y)].set_bg(Theme::BG);
    }
  }

  // Layout: header + content + footer
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2), // Header with breadcrumb
      Constraint::Min(10),   // Content
      Constraint::Length(1), // Footer with keybindings
    ])
    .split(area);

  render_header(app, chunks[0], buf);

  match app.current_view {
    View::Templates => TemplatesView::new(&app.state.templates, &app.templates_view).render(chunks[1], buf),
    View::Builder => {
      if let Some(template) = app.state.template(&app.builder.template_id) {
        BuilderView::new(template, &app.builder).render(chunks[1], buf);
      }
    }
    View::Form => {
      if let Some(template) = app.state.template(&app.form.template_id) {
        FormView::new(template, &app.form).render(chunks[1], buf);
      }
    }
  }

  render_footer(app, chunks[2], buf);

  if app.show_help {
    render_help_overlay(area, buf);
  }

  // The acknowledgment draws last so it blocks everything beneath it
  if let Some(ref message) = app.form.ack {
    render_ack_overlay(message, area, buf);
  }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
  let title = "Formbench";
  buf.set_string(area.x + 1, area.y, title, Style::default().fg(Theme::ACCENT).bold());

  // Breadcrumb for the current view
  let crumb = match app.current_view {
    View::Templates => View::Templates.name().to_string(),
    View::Builder | View::Form => {
      let id = if app.current_view == View::Builder {
        &app.builder.template_id
      } else {
        &app.form.template_id
      };
      let name = app
        .state
        .template(id)
        .map(|t| t.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("(unnamed)");
      format!("{} ▸ {} ▸ {}", View::Templates.name(), name, app.current_view.name())
    }
  };
  let crumb_x = area.x + title.len() as u16 + 3;
  buf.set_string(crumb_x, area.y, &crumb, Style::default().fg(Theme::SUBTEXT));

  // Template count on the right
  let count = format!("{}/{} templates", app.state.templates.len(), formbench_core::MAX_TEMPLATES);
  let count_x = area.x + area.width.saturating_sub(count.len() as u16 + 2);
  buf.set_string(count_x, area.y, &count, Style::default().fg(Theme::MUTED));

  // Separator
  for x in area.x..area.x + area.width {
    buf[(x, area.y + 1)].set_char('─').set_fg(Theme::OVERLAY);
  }
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
  let keybindings = match app.input_mode {
    InputMode::Normal => match app.current_view {
      View::Templates => "q:Quit  n:New  j/k:Nav  Enter:Build  f:Fill  ?:Help",
      View::Builder => "j/k:Nav  e:Edit  a:Field  s:Section  t:Kind  o:Options  d:Delete  f:Fill  Esc:Back",
      View::Form => "j/k:Nav  Enter:Edit/Toggle  h/l:Choice  d:Clear  Esc:Back  ?:Help",
    },
    InputMode::Edit => "Enter:Save  Esc:Cancel  Type to edit...",
  };

  buf.set_string(area.x + 1, area.y, keybindings, Style::default().fg(Theme::MUTED));
}

fn render_help_overlay(area: Rect, buf: &mut Buffer) {
  // Center the help box
  let help_width = 48;
  let help_height = 22;
  let x = area.x + (area.width.saturating_sub(help_width)) / 2;
  let y = area.y + (area.height.saturating_sub(help_height)) / 2;

  let help_area = Rect::new(x, y, help_width, help_height);

  for hy in help_area.y..help_area.y + help_area.height {
    for hx in help_area.x..help_area.x + help_area.width {
      buf[(hx, hy)].set_bg(Theme::SURFACE).set_char(' ');
    }
  }

  let block = Block::default()
    .title("Help")
    .title_style(Style::default().fg(Theme::ACCENT).bold())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Theme::ACCENT));
  let inner = block.inner(help_area);
  block.render(help_area, buf);

  let help_text = [
    "NAVIGATION",
    "  j/k      Navigate up/down",
    "  g/G      Jump to top/bottom",
    "  Enter    Select/edit/toggle",
    "  Esc      Back/cancel edit",
    "",
    "TEMPLATES",
    "  n        New template",
    "  f        Fill the selected template",
    "",
    "BUILDER",
    "  e        Edit name/title/label",
    "  s        Add section",
    "  a        Add field",
    "  t        Cycle field kind",
    "  o        Edit enum options",
    "  d        Delete field",
    "",
    "FORM",
    "  h/l      Cycle enum choice",
    "  d        Clear answer",
  ];

  for (i, line) in help_text.iter().enumerate() {
    if i as u16 >= inner.height {
      break;
    }
    let style = if line.starts_with(|c: char| c.is_uppercase()) {
      Style::default().fg(Theme::ACCENT).bold()
    } else {
      Style::default().fg(Theme::TEXT)
    };
    buf.set_string(inner.x, inner.y + i as u16, line, style);
  }
}

fn render_ack_overlay(message: &str, area: Rect, buf: &mut Buffer) {
  let width = (message.len() as u16 + 6).max(30);
  let height = 5;
  let x = area.x + (area.width.saturating_sub(width)) / 2;
  let y = area.y + (area.height.saturating_sub(height)) / 2;

  let ack_area = Rect::new(x, y, width.min(area.width), height.min(area.height));

  for ay in ack_area.y..ack_area.y + ack_area.height {
    for ax in ack_area.x..ack_area.x + ack_area.width {
      buf[(ax, ay)].set_bg(Theme::SURFACE).set_char(' ');
    }
  }

  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Theme::SUCCESS));
  let inner = block.inner(ack_area);
  block.render(ack_area, buf);

  let msg_x = inner.x + (inner.width.saturating_sub(message.len() as u16)) / 2;
  buf.set_string(msg_x, inner.y + 1, message, Style::default().fg(Theme::SUCCESS).bold());

  let hint = "press any key to continue";
  let hint_x = inner.x + (inner.width.saturating_sub(hint.len() as u16)) / 2;
  buf.set_string(hint_x, inner.y + 2, hint, Style::default().fg(Theme::MUTED));
}

#[cfg(test)]
mod tests {
  use formbench_core::{Answer, MAX_TEMPLATES};

  use super::*;

  fn test_app() -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let kv = KvStore::open(dir.path()).unwrap();
    let app = App::new(TemplateStore::new(kv.clone()), SubmissionStore::new(kv));
    (dir, app)
  }

  #[test]
  fn test_create_template_selects_it() {
    let (_dir, mut app) = test_app();
    app.handle_action(Action::NewTemplate);
    app.handle_action(Action::NewTemplate);
    assert_eq!(app.state.templates.len(), 2);
    assert_eq!(app.templates_view.selected, 1);
  }

  #[test]
  fn test_create_at_cap_is_ignored() {
    let (_dir, mut app) = test_app();
    for _ in 0..7 {
      app.handle_action(Action::NewTemplate);
    }
    assert_eq!(app.state.templates.len(), MAX_TEMPLATES);
  }

  #[test]
  fn test_rename_persists_across_reload() {
    let (dir, mut app) = test_app();
    app.handle_action(Action::NewTemplate);
    app.handle_action(Action::Select);
    assert_eq!(app.current_view, View::Builder);

    app.handle_action(Action::Edit);
    assert_eq!(app.input_mode, InputMode::Edit);
    app.builder.input.clear();
    for c in "Intake".chars() {
      app.handle_action(Action::Input(c));
    }
    app.handle_action(Action::Submit);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.state.templates[0].name, "Intake");

    let kv = KvStore::open(dir.path()).unwrap();
    let reloaded = TemplateStore::new(kv).load_all();
    assert_eq!(reloaded, app.state.templates);
  }

  #[test]
  fn test_add_and_delete_field_via_actions() {
    let (_dir, mut app) = test_app();
    app.handle_action(Action::NewTemplate);
    app.handle_action(Action::Select);

    app.handle_action(Action::AddField);
    app.handle_action(Action::AddField);
    assert_eq!(app.state.templates[0].sections[0].fields.len(), 2);
    // Cursor follows the appended field
    assert_eq!(app.builder.selected, 3);

    app.handle_action(Action::Delete);
    assert_eq!(app.state.templates[0].sections[0].fields.len(), 1);
  }

  #[test]
  fn test_cycle_kind_keeps_options() {
    let (_dir, mut app) = test_app();
    app.handle_action(Action::NewTemplate);
    app.handle_action(Action::Select);
    app.handle_action(Action::AddField);

    // Text -> Number -> Boolean -> Enum
    app.handle_action(Action::CycleKind);
    app.handle_action(Action::CycleKind);
    app.handle_action(Action::CycleKind);
    assert_eq!(app.state.templates[0].sections[0].fields[0].kind, FieldKind::Enum);

    app.handle_action(Action::EditOptions);
    for c in "red, blue".chars() {
      app.handle_action(Action::Input(c));
    }
    app.handle_action(Action::Submit);

    // Enum -> Label leaves the option list in place
    app.handle_action(Action::CycleKind);
    let field = &app.state.templates[0].sections[0].fields[0];
    assert_eq!(field.kind, FieldKind::Label);
    assert_eq!(field.options, Some(vec!["red".to_string(), "blue".to_string()]));
  }

  #[test]
  fn test_submit_appends_and_clears_form() {
    let (_dir, mut app) = test_app();
    app.handle_action(Action::NewTemplate);
    app.handle_action(Action::Select);
    app.handle_action(Action::AddField);

    app.handle_action(Action::FillForm);
    assert_eq!(app.current_view, View::Form);

    // Type an answer into the text field
    app.handle_action(Action::Select);
    assert_eq!(app.input_mode, InputMode::Edit);
    for c in "hello".chars() {
      app.handle_action(Action::Input(c));
    }
    app.handle_action(Action::Submit);

    // Submit the form
    app.handle_action(Action::GoToBottom);
    app.handle_action(Action::Select);

    let field_id = app.state.templates[0].sections[0].fields[0].id.clone();
    let log = app.submission_store.load(&app.form.template_id);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].get(&field_id), Some(&Answer::Text("hello".into())));
    assert!(app.form.answers.is_empty());
    assert!(app.form.ack.is_some());
  }

  #[test]
  fn test_ack_swallows_next_key() {
    let (_dir, mut app) = test_app();
    app.form.ack = Some("Submission #1 saved".into());
    app.handle_action(Action::Quit);
    assert!(app.form.ack.is_none());
    assert!(!app.should_quit);
  }

  #[test]
  fn test_view_switching_is_pure_ui_state() {
    let (dir, mut app) = test_app();
    app.handle_action(Action::NewTemplate);
    let persisted_before = std::fs::read_to_string(dir.path().join("templates.json")).unwrap();

    app.handle_action(Action::Select);
    app.handle_action(Action::FillForm);
    app.handle_action(Action::Back);
    app.handle_action(Action::Back);

    let persisted_after = std::fs::read_to_string(dir.path().join("templates.json")).unwrap();
    assert_eq!(persisted_before, persisted_after);
  }
}
