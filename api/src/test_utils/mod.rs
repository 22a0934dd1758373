//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - mockall has lifetime issues with traits containing `&str` parameters
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! Adapter tests talk HTTP to a stub axum server instead of mocking reqwest.

pub mod fixtures;
pub mod mocks;
pub mod stub_server;

pub use fixtures::*;
pub use mocks::*;
pub use stub_server::spawn_stub;
