//! Invariant verifiers.
//!
//! Verifiers hold no state of their own. The session permission and the
//! evaluation instant arrive through [`VerifyContext`], which the chain builds
//! from its configuration, so every verifier in a chain enforces the same
//! permission. Expected business failures come back as
//! [`VerificationOutcome::Rejected`]; only a broken reader contract produces
//! a [`VerifyError`].

use crate::error::VerifyError;
use crate::types::Timestamp;

use super::outcome::{ReasonCode, VerificationOutcome};
use super::record::{CandidateRecord, FIELD_EFFECTIVE_DATE, FIELD_END_DATE, FIELD_START_DATE};

/// Session-level inputs shared by every verifier in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyContext {
    /// Whether the session may modify existing rows.
    pub allow_updates: bool,
    /// Evaluation instant for date checks.
    pub now: Timestamp,
}

impl VerifyContext {
    pub fn new(allow_updates: bool, now: Timestamp) -> Self {
        Self { allow_updates, now }
    }
}

/// A single invariant check applied to one candidate record.
///
/// The result is a function of the record and `ctx` alone.
pub trait Verifier: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    fn verify(
        &self,
        record: &CandidateRecord,
        ctx: &VerifyContext,
    ) -> Result<VerificationOutcome, VerifyError>;
}

// ---------------------------------------------------------------------------
// Effective date
// ---------------------------------------------------------------------------

/// Rejects back-dated records unless the session may update existing rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectiveDateVerifier;

impl EffectiveDateVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl Verifier for EffectiveDateVerifier {
    fn name(&self) -> &'static str {
        "effective_date"
    }

    fn verify(
        &self,
        record: &CandidateRecord,
        ctx: &VerifyContext,
    ) -> Result<VerificationOutcome, VerifyError> {
        let effective = record.temporal(FIELD_EFFECTIVE_DATE, record.effective_date)?;
        if ctx.allow_updates {
            // Corrections may legitimately carry past effective dates.
            return Ok(VerificationOutcome::Accepted);
        }
        match effective {
            Some(at) if at < ctx.now => {
                Ok(VerificationOutcome::rejected(ReasonCode::DatePassed))
            }
            _ => Ok(VerificationOutcome::Accepted),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Gates update records on session permission, then on identifier presence.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityVerifier;

impl IdentityVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl Verifier for IdentityVerifier {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn verify(
        &self,
        record: &CandidateRecord,
        ctx: &VerifyContext,
    ) -> Result<VerificationOutcome, VerifyError> {
        if !record.is_update {
            return Ok(VerificationOutcome::Accepted);
        }
        if !ctx.allow_updates {
            return Ok(VerificationOutcome::rejected(ReasonCode::Forbidden));
        }
        if record.row_id.is_none() || record.target_row_id.is_none() {
            return Ok(VerificationOutcome::rejected(ReasonCode::MissingRowId));
        }
        Ok(VerificationOutcome::Accepted)
    }
}

// ---------------------------------------------------------------------------
// Availability window
// ---------------------------------------------------------------------------

/// Checks `available_date <= start_date <= end_date`, in that order.
///
/// Both comparisons are strict: equal timestamps pass. A comparison whose
/// operands are not both present is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityWindowVerifier;

impl AvailabilityWindowVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl Verifier for AvailabilityWindowVerifier {
    fn name(&self) -> &'static str {
        "availability_window"
    }

    fn verify(
        &self,
        record: &CandidateRecord,
        _ctx: &VerifyContext,
    ) -> Result<VerificationOutcome, VerifyError> {
        let start = record.temporal(FIELD_START_DATE, record.start_date)?;
        let end = record.temporal(FIELD_END_DATE, record.end_date)?;

        if let (Some(available), Some(start)) = (record.available_date, start) {
            if available > start {
                return Ok(VerificationOutcome::rejected(
                    ReasonCode::AvailableDatePassed,
                ));
            }
        }
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Ok(VerificationOutcome::rejected(ReasonCode::InvalidTimeRange));
            }
        }
        Ok(VerificationOutcome::Accepted)
    }
}
