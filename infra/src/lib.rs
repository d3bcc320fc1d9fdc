//! # Infrastructure Layer
//!
//! Concrete implementations of the core repository and gateway traits:
//! MySQL-backed stores via SQLx and the Twilio SMS gateway via its REST
//! API, plus a recording mock gateway for tests and local runs.

pub mod database;
pub mod sms;
