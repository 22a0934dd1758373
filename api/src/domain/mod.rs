//! Domain layer
//!
//! Profiles, judge stats and tournament listings, free of HTTP and database
//! concerns.
//! - `entities`: Domain models representing core business concepts
//! - `ports`: Trait definitions for judges, contest sources and the profile store

pub mod entities;
pub mod ports;
