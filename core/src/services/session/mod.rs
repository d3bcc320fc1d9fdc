//! Session token service.

pub mod token;

pub use token::{SessionClaims, SessionTokenService};
