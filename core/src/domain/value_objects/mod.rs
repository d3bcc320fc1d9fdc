//! Value objects returned by the domain services.

pub mod verification;

pub use verification::{VerificationOutcome, VerifiedUser};
