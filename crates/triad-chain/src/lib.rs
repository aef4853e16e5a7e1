//! Hash-chained append-only logs.
//!
//! This crate provides the data layer of the triad simulator: immutable
//! [`ChainEntry`] records whose hashes commit to their content and link
//! each entry to its predecessor, and [`ChainLog`], the non-empty
//! append-only sequence a replica owns. [`ChainLog::verify`] walks a log
//! and reports the first integrity violation as a [`ChainError`].

pub mod entry;
pub mod error;
pub mod log;

pub use entry::{ChainEntry, rfc3339_now};
pub use error::ChainError;
pub use log::ChainLog;

#[cfg(test)]
mod tests;
