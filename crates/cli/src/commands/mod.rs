//! CLI command implementations

mod stats;
mod submissions;
mod templates;

pub use stats::cmd_stats;
pub use submissions::cmd_submissions_list;
pub use templates::{cmd_templates_export, cmd_templates_list, cmd_templates_show};
