//! Record-import verification core.
//!
//! Pure logic for deciding whether externally supplied candidate records may
//! be committed: an ordered chain of invariant verifiers, typed rejection
//! reasons, and batch reporting. No database, no async, no I/O.

pub mod config;
pub mod error;
pub mod types;
pub mod verification;
