//! Domain services for the portfolio CMS.

pub mod slug;

pub use slug::{is_valid_slug, slugify, validate_slug};
