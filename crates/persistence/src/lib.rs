//! Persistence layer for the portfolio CMS backend.
//!
//! This crate contains:
//! - Database connection management and migrations
//! - Entity definitions (database row mappings)
//! - PostgreSQL repositories implementing the domain storage ports
//! - In-memory adapters implementing the same ports
//! - Query metrics

pub mod db;
pub mod entities;
pub mod memory;
pub mod metrics;
pub mod repositories;
