//! SMS gateway implementations.

pub mod mock;
pub mod twilio;

pub use mock::MockSmsGateway;
pub use twilio::{TwilioConfig, TwilioSmsGateway};
