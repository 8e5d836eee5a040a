//! Core types for formbench: the form-template data model, the edit
//! reducer, configuration, and the shared error type.

pub mod config;
pub mod error;
pub mod field;
pub mod state;
pub mod submission;
pub mod template;

pub use config::Config;
pub use error::{Error, Result};
pub use field::{Field, FieldKind};
pub use state::{AppState, Edit};
pub use submission::{Answer, Submission};
pub use template::{MAX_TEMPLATES, Section, Template};
