//! Tests for the OTP issuer and verifier services.

mod mocks;
