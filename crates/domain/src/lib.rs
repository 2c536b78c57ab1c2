//! Domain layer for the portfolio CMS backend.
//!
//! This crate contains:
//! - Content models (Profile, Skill, Project, ...) and their request/patch payloads
//! - The admin identity and session records
//! - Storage port traits implemented by the persistence layer
//! - Slug derivation
//! - Domain error types

pub mod errors;
pub mod models;
pub mod ports;
pub mod services;
