//! # Weekspend API Server Library
//!
//! This library provides the HTTP layer of the weekspend budgeting service.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `cookie`: Session cookie encoding and extraction
//! - `error`: Error handling and HTTP response mapping
//! - `middleware`: Session resolution and enforcement
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod cookie;
pub mod error;
pub mod middleware;
pub mod routes;
