/// Middleware for the API server
///
/// - `session`: resolves the session cookie into a request-scoped context
///   and enforces it on protected routes

pub mod session;
