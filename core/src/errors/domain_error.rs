//! Domain-specific error types for OTP authentication.
//!
//! The variants stay deliberately coarser on the wire than they are here:
//! wrong, expired, and already-consumed codes all surface as
//! `InvalidOrExpiredCode` so a caller cannot probe which attribute failed,
//! while infrastructure failures keep their detail for server-side logs.

use thiserror::Error;

/// Result type used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;

/// User-correctable authentication errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Phone number is required")]
    MissingPhone,

    #[error("Phone number and code are required")]
    MissingFields,

    #[error("Invalid phone number format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Invalid or expired OTP")]
    InvalidOrExpiredCode,

    #[error("Too many codes requested. Please try again in {seconds} seconds")]
    IssuanceLimitExceeded { seconds: u64 },
}

/// Session token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

/// Top-level domain error wrapping the taxonomy
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("SMS delivery error: {message}")]
    Delivery { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Build a storage error from any displayable cause
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        DomainError::Storage {
            message: cause.to_string(),
        }
    }

    /// Build a delivery error from any displayable cause
    pub fn delivery(cause: impl std::fmt::Display) -> Self {
        DomainError::Delivery {
            message: cause.to_string(),
        }
    }

    /// Whether the error is caused by user input rather than infrastructure
    pub fn is_user_error(&self) -> bool {
        matches!(self, DomainError::Auth(_))
    }
}
