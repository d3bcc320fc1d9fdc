//! Domain-specific error types and error handling.

mod domain_error;

pub use domain_error::{AuthError, DomainError, DomainResult, TokenError};
