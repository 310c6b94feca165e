//! Shared infrastructure for the field-service backend.
//!
//! This crate holds the pieces every service-level crate leans on: the
//! PostgreSQL connection pool and its configuration, and the database
//! error taxonomy.

pub mod database;
pub mod error;
