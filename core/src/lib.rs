//! # SoulSignal Core
//!
//! Core business logic and domain layer for the SoulSignal backend.
//! This crate contains domain entities, the OTP issuer and verifier
//! services, repository interfaces, the client auth-flow state machine,
//! and error types shared by the other layers.

pub mod domain;
pub mod errors;
pub mod flow;
pub mod repositories;
pub mod services;
