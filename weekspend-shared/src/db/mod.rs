/// Database layer for weekspend
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Embedded migration runner
///
/// The database is the sole owner of mutable state; every request re-reads
/// it and the engine's own isolation is the only concurrency guard.

pub mod migrations;
pub mod pool;
