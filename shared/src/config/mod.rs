//! Configuration structs for the SoulSignal backend.
//!
//! Each struct is constructed once at startup (usually via `from_env`) and
//! handed to the services that need it. Handler logic never reads the
//! environment directly.

pub mod auth;
pub mod database;
pub mod server;

pub use auth::{OtpConfig, SessionConfig};
pub use database::DatabaseConfig;
pub use server::{CorsConfig, ServerConfig};
