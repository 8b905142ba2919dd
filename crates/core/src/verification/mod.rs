//! Import verification engine.
//!
//! Provides the candidate record model, typed outcomes, the built-in
//! invariant verifiers, the ordered verifier chain, and batch reporting.

pub mod chain;
pub mod outcome;
pub mod record;
pub mod report;
pub mod verifier;
