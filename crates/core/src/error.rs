use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Not found: {entity} {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("Serialization: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("IO: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
