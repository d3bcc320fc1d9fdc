//! Request and response data transfer objects.

pub mod auth;

pub use auth::{
    ErrorResponse, SendOtpRequest, SendOtpResponse, VerifiedUserDto, VerifyOtpRequest,
    VerifyOtpResponse,
};
