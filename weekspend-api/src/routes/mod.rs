/// API route handlers
///
/// Organized by resource:
///
/// - `health`: Liveness and database connectivity
/// - `auth`: PIN sign-in and sign-out
/// - `user`: Current session user (read and reassign)
/// - `transactions`: Spending records and weekly summaries
/// - `presets`: Shortcut amounts
/// - `budget`: Weekly budget caps

pub mod auth;
pub mod budget;
pub mod health;
pub mod presets;
pub mod transactions;
pub mod user;
