//! Shared utilities for the portfolio CMS backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Password hashing with Argon2id
//! - Session token generation and hashing
//! - Common field validators
//! - Serde helpers for partial-update payloads

pub mod crypto;
pub mod password;
pub mod patch;
pub mod validation;
