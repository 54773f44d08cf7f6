/// Authentication primitives for weekspend
///
/// This module provides the session/auth building blocks:
///
/// # Modules
///
/// - [`token`]: Session token generation, one-way session-id derivation, and
///   constant-time PIN verification
/// - [`session`]: Session lifecycle (sign-in, validation, lazy expiry,
///   sliding-window renewal, invalidation)
///
/// # Security Model
///
/// The bearer token lives only in the client cookie. The server stores the
/// SHA-256 digest of the token as the session id, so a leaked store never
/// yields usable tokens. PIN comparison is constant-time.

pub mod session;
pub mod token;
