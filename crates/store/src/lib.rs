//! File-backed persistence for formbench.
//!
//! A string-keyed key-value store (one JSON document per key) with typed
//! stores for the template set and per-template submission logs layered on
//! top. Every write rewrites the full value for its key.

pub mod kv;
pub mod submissions;
pub mod templates;

pub use kv::KvStore;
pub use submissions::SubmissionStore;
pub use templates::TemplateStore;
