//! Formbench CLI - compose form templates and fill them from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use formbench_core::Config;

mod commands;
mod logging;
mod tui;

use commands::{cmd_stats, cmd_submissions_list, cmd_templates_export, cmd_templates_list, cmd_templates_show};
use logging::{init_cli_logging, init_tui_logging};

#[derive(Parser)]
#[command(name = "formbench")]
#[command(about = "Compose form templates and fill them from the terminal")]
#[command(after_help = "\
QUICK START:
  formbench tui                       # Build templates and fill forms
  formbench templates list            # List saved templates
  formbench submissions list <name>   # Show a template's submissions
  formbench stats                     # Per-template counts")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `formbench templates`
#[derive(Subcommand)]
pub enum TemplatesCommand {
  /// List saved templates
  List {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Show one template's full structure
  Show {
    /// Template ID (prefix accepted) or name
    id: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Export the full template set as pretty-printed JSON
  Export {
    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
  },
}

/// Subcommands for `formbench submissions`
#[derive(Subcommand)]
pub enum SubmissionsCommand {
  /// List a template's submissions with answers resolved to field labels
  List {
    /// Template ID (prefix accepted) or name
    template: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

#[derive(Subcommand)]
enum Commands {
  /// Launch the interactive TUI
  Tui,
  /// Inspect saved templates
  #[command(after_help = "\
EXAMPLES:
  formbench templates list
  formbench templates show 4fa2 --json
  formbench templates export -o templates.json")]
  Templates {
    #[command(subcommand)]
    command: TemplatesCommand,
  },
  /// Inspect saved form submissions
  Submissions {
    #[command(subcommand)]
    command: SubmissionsCommand,
  },
  /// Show per-template statistics
  Stats,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  let config = Config::load();

  // File logging for the TUI (stdout belongs to the terminal UI), console otherwise
  let _guard = match &cli.command {
    Commands::Tui => init_tui_logging(&config),
    _ => {
      init_cli_logging();
      None
    }
  };

  match cli.command {
    Commands::Tui => tui::run(&config),

    Commands::Templates { command } => match command {
      TemplatesCommand::List { json } => cmd_templates_list(&config, json),
      TemplatesCommand::Show { id, json } => cmd_templates_show(&config, &id, json),
      TemplatesCommand::Export { output } => cmd_templates_export(&config, output.as_deref()),
    },

    Commands::Submissions { command } => match command {
      SubmissionsCommand::List { template, json } => cmd_submissions_list(&config, &template, json),
    },

    Commands::Stats => cmd_stats(&config),
  }
}
