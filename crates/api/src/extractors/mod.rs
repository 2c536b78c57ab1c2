//! Custom Axum extractors.
//!
//! Extractors for parsing and validating request data.

pub mod admin_session;
pub mod json;

pub use admin_session::CurrentAdmin;
pub use json::{JsonBody, ValidatedJson};
