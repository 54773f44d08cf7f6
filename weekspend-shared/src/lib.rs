//! # Weekspend Shared Library
//!
//! This crate contains the types, persistence layer, and business logic shared
//! between the weekspend API server and its test suites.
//!
//! ## Module Organization
//!
//! - `auth`: Session tokens, PIN verification, and the session lifecycle
//! - `db`: Connection pool and migration runner
//! - `models`: Database models (session, transaction, preset, budget)
//! - `week`: Week bucketing and the yearly spend aggregation

pub mod auth;
pub mod db;
pub mod models;
pub mod week;

/// Current version of the weekspend shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
