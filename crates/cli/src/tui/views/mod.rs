pub mod builder;
pub mod form;
pub mod templates;

pub use builder::BuilderView;
pub use form::FormView;
pub use templates::TemplatesView;
