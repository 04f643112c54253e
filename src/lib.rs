//! Deskmate library
//!
//! Core of a local-first personal productivity dashboard: named record
//! collections over a SQLite-backed key-value store, pure aggregation
//! helpers, a subject/folder/material organizer, and the alarm scheduler.

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod store;
