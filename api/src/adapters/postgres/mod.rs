//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod profile_repo;


pub use profile_repo::PostgresProfileRepository;
