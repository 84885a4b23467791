//! Backend test support utilities
//!
//! Logging initialization shared by unit and integration tests, a fixed
//! signing secret, and assertions for the JSON response envelope.

pub mod envelope;
pub mod logging;
pub mod secrets;

pub use envelope::{assert_error_envelope, assert_success_envelope};
pub use secrets::TEST_JWT_SECRET;
