//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod platforms;
pub mod repositories;

pub use platforms::{ContestSource, PlatformAdapter};
pub use repositories::ProfileRepository;
