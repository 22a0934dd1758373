//! Contest listing adapters
//!
//! Implementations of `ContestSource` for upstream contest aggregators.

pub mod codeforces;
pub mod kontests;

pub use codeforces::CodeforcesContestSource;
pub use kontests::KontestsContestSource;
