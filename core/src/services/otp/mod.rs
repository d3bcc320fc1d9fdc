//! OTP issuance and verification services.
//!
//! The issuer and verifier are the two halves of the phone verification
//! protocol: the issuer generates and dispatches codes, the verifier
//! consumes them and resolves the caller's identity.

pub mod config;
pub mod issuer;
pub mod policy;
pub mod traits;
pub mod types;
pub mod verifier;

pub use config::OtpServiceConfig;
pub use issuer::OtpIssuer;
pub use policy::{FixedWindowIssuance, IssuancePolicy, UnlimitedIssuance};
pub use traits::SmsGateway;
pub use types::IssueResult;
pub use verifier::OtpVerifier;

#[cfg(test)]
mod tests;
