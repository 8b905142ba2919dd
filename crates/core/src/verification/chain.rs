//! Ordered verifier chain.
//!
//! The chain runs its verifiers strictly in configured order and stops at the
//! first rejection, so each record gets exactly one prioritized reason. The
//! chain is immutable once configured and may be shared across threads.

use chrono::Utc;

use crate::error::VerifyError;
use crate::types::Timestamp;

use super::outcome::VerificationOutcome;
use super::record::CandidateRecord;
use super::report::BatchReport;
use super::verifier::{
    AvailabilityWindowVerifier, EffectiveDateVerifier, IdentityVerifier, Verifier, VerifyContext,
};

/// An ordered, immutable list of verifiers sharing one session permission.
///
/// The `allow_updates` flag given to [`VerifierChain::configure`] is the only
/// permission any verifier in the chain sees: it reaches them through the
/// [`VerifyContext`] built for each record.
pub struct VerifierChain {
    allow_updates: bool,
    verifiers: Vec<Box<dyn Verifier>>,
}

impl VerifierChain {
    /// Build a chain from an ordered list of verifiers.
    ///
    /// `allow_updates` is threaded into every verifier on every call and is
    /// never re-derived per record.
    pub fn configure(allow_updates: bool, verifiers: Vec<Box<dyn Verifier>>) -> Self {
        Self {
            allow_updates,
            verifiers,
        }
    }

    /// The built-in verifiers in their canonical order: identity, effective
    /// date, availability window.
    pub fn standard(allow_updates: bool) -> Self {
        Self::configure(
            allow_updates,
            vec![
                Box::new(IdentityVerifier::new()),
                Box::new(EffectiveDateVerifier::new()),
                Box::new(AvailabilityWindowVerifier::new()),
            ],
        )
    }

    pub fn allow_updates(&self) -> bool {
        self.allow_updates
    }

    pub fn len(&self) -> usize {
        self.verifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verifiers.is_empty()
    }

    /// Names of the configured verifiers, in evaluation order.
    pub fn verifier_names(&self) -> Vec<&'static str> {
        self.verifiers.iter().map(|v| v.name()).collect()
    }

    /// Verify a record against the current time.
    pub fn verify(&self, record: &CandidateRecord) -> Result<VerificationOutcome, VerifyError> {
        self.verify_at(record, Utc::now())
    }

    /// Verify a record against a fixed evaluation instant.
    pub fn verify_at(
        &self,
        record: &CandidateRecord,
        now: Timestamp,
    ) -> Result<VerificationOutcome, VerifyError> {
        let ctx = VerifyContext::new(self.allow_updates, now);
        for verifier in &self.verifiers {
            let outcome = verifier.verify(record, &ctx).inspect_err(|err| {
                tracing::warn!(
                    verifier = verifier.name(),
                    error = %err,
                    "Record violates reader contract"
                );
            })?;
            if let VerificationOutcome::Rejected { reason } = outcome {
                tracing::debug!(verifier = verifier.name(), reason = %reason, "Record rejected");
                return Ok(outcome);
            }
        }
        Ok(VerificationOutcome::Accepted)
    }

    /// Verify every record independently, one result per record in input
    /// order. Faults are returned in place so the caller can skip and log.
    pub fn verify_all(
        &self,
        records: &[CandidateRecord],
        now: Timestamp,
    ) -> Vec<Result<VerificationOutcome, VerifyError>> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                self.verify_at(record, now)
                    .map_err(|err| err.at_record(index))
            })
            .collect()
    }

    /// Verify a batch against a single captured instant.
    ///
    /// The first fault aborts the batch and reports the record index.
    pub fn verify_batch(&self, records: &[CandidateRecord]) -> Result<BatchReport, VerifyError> {
        let now = Utc::now();
        let mut report = BatchReport::new(records.len());
        for (index, record) in records.iter().enumerate() {
            let outcome = self
                .verify_at(record, now)
                .map_err(|err| err.at_record(index))?;
            report.push(index, outcome);
        }
        tracing::info!(
            total = report.total_records,
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            allow_updates = self.allow_updates,
            "Batch verified"
        );
        Ok(report)
    }
}

impl std::fmt::Debug for VerifierChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierChain")
            .field("allow_updates", &self.allow_updates)
            .field("verifiers", &self.verifier_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::outcome::ReasonCode;
    use crate::verification::record::RecordKind;
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// Counts invocations and always returns a fixed outcome.
    struct CountingVerifier {
        calls: Arc<AtomicUsize>,
        outcome: VerificationOutcome,
    }

    impl Verifier for CountingVerifier {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn verify(
            &self,
            _record: &CandidateRecord,
            _ctx: &VerifyContext,
        ) -> Result<VerificationOutcome, VerifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome)
        }
    }

    fn counting(outcome: VerificationOutcome) -> (Box<dyn Verifier>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let verifier = CountingVerifier {
            calls: Arc::clone(&calls),
            outcome,
        };
        (Box::new(verifier), calls)
    }

    #[test]
    fn empty_chain_accepts() {
        let chain = VerifierChain::configure(false, Vec::new());
        assert!(chain.is_empty());
        let record = CandidateRecord::new(RecordKind::Plain);
        assert_matches!(chain.verify_at(&record, now()), Ok(VerificationOutcome::Accepted));
    }

    #[test]
    fn first_rejection_short_circuits() {
        let (first, first_calls) = counting(VerificationOutcome::rejected(ReasonCode::Forbidden));
        let (second, second_calls) = counting(VerificationOutcome::rejected(ReasonCode::DatePassed));
        let chain = VerifierChain::configure(false, vec![first, second]);

        let outcome = chain
            .verify_at(&CandidateRecord::new(RecordKind::Plain), now())
            .unwrap();
        assert_eq!(outcome.reason_code(), Some(ReasonCode::Forbidden));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn all_verifiers_run_when_accepting() {
        let (first, first_calls) = counting(VerificationOutcome::Accepted);
        let (second, second_calls) = counting(VerificationOutcome::Accepted);
        let chain = VerifierChain::configure(true, vec![first, second]);

        let outcome = chain
            .verify_at(&CandidateRecord::new(RecordKind::Plain), now())
            .unwrap();
        assert!(outcome.is_accepted());
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn configured_permission_reaches_verifiers() {
        let record = CandidateRecord::new(RecordKind::Plain).as_update(Some(1), Some(2));

        let permitted = VerifierChain::configure(true, vec![Box::new(IdentityVerifier::new())]);
        assert!(permitted.allow_updates());
        assert_matches!(
            permitted.verify_at(&record, now()),
            Ok(VerificationOutcome::Accepted)
        );

        let insert_only = VerifierChain::configure(false, vec![Box::new(IdentityVerifier::new())]);
        assert!(!insert_only.allow_updates());
        assert_matches!(
            insert_only.verify_at(&record, now()),
            Ok(VerificationOutcome::Rejected {
                reason: ReasonCode::Forbidden
            })
        );
    }

    /// A verifier that reports the permission it was handed.
    struct PermissionEcho;

    impl Verifier for PermissionEcho {
        fn name(&self) -> &'static str {
            "permission_echo"
        }

        fn verify(
            &self,
            _record: &CandidateRecord,
            ctx: &VerifyContext,
        ) -> Result<VerificationOutcome, VerifyError> {
            if ctx.allow_updates {
                Ok(VerificationOutcome::Accepted)
            } else {
                Ok(VerificationOutcome::rejected(ReasonCode::Forbidden))
            }
        }
    }

    #[test]
    fn every_verifier_sees_chain_permission_and_instant() {
        let record = CandidateRecord::new(RecordKind::Dated).with_effective_date(now());
        let chain = VerifierChain::configure(
            true,
            vec![
                Box::new(PermissionEcho),
                Box::new(EffectiveDateVerifier::new()),
                Box::new(PermissionEcho),
            ],
        );
        assert_matches!(chain.verify_at(&record, now()), Ok(VerificationOutcome::Accepted));

        let later = now() + Duration::seconds(1);
        let strict = VerifierChain::configure(false, vec![Box::new(EffectiveDateVerifier::new())]);
        assert_matches!(
            strict.verify_at(&record, later),
            Ok(VerificationOutcome::Rejected {
                reason: ReasonCode::DatePassed
            })
        );
    }

    #[test]
    fn standard_chain_order() {
        let chain = VerifierChain::standard(true);
        assert!(chain.allow_updates());
        assert_eq!(
            chain.verifier_names(),
            vec!["identity", "effective_date", "availability_window"]
        );
    }

    #[test]
    fn fault_stops_chain() {
        let (after, after_calls) = counting(VerificationOutcome::Accepted);
        let chain = VerifierChain::configure(
            false,
            vec![Box::new(AvailabilityWindowVerifier::new()), after],
        );
        let record = CandidateRecord::new(RecordKind::Windowed);
        assert_matches!(
            chain.verify_at(&record, now()),
            Err(VerifyError::MissingField { field: "start_date", .. })
        );
        assert_eq!(after_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn verify_all_keeps_order_and_indexes_faults() {
        let chain = VerifierChain::standard(false);
        let records = vec![
            CandidateRecord::new(RecordKind::Plain),
            CandidateRecord::new(RecordKind::Dated),
            CandidateRecord::new(RecordKind::Plain).as_update(Some(1), Some(2)),
        ];
        let results = chain.verify_all(&records, now());
        assert_eq!(results.len(), 3);
        assert_matches!(results[0], Ok(VerificationOutcome::Accepted));
        assert_matches!(results[1], Err(VerifyError::Record { index: 1, .. }));
        assert_matches!(
            results[2],
            Ok(VerificationOutcome::Rejected {
                reason: ReasonCode::Forbidden
            })
        );
    }

    #[test]
    fn verify_batch_builds_report() {
        let chain = VerifierChain::standard(false);
        let future = Utc::now() + Duration::days(30);
        let records = vec![
            CandidateRecord::new(RecordKind::Dated).with_effective_date(future),
            CandidateRecord::new(RecordKind::Plain).as_update(Some(1), Some(2)),
            CandidateRecord::new(RecordKind::Windowed).with_window(future, future),
        ];
        let report = chain.verify_batch(&records).unwrap();
        assert_eq!(report.total_records, 3);
        assert_eq!(report.accepted, vec![0, 2]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].record_index, 1);
        assert_eq!(report.rejected[0].reason, ReasonCode::Forbidden);
    }

    #[test]
    fn verify_batch_aborts_on_fault() {
        let chain = VerifierChain::standard(true);
        let records = vec![
            CandidateRecord::new(RecordKind::Plain),
            CandidateRecord::new(RecordKind::Plain),
            CandidateRecord::new(RecordKind::Windowed),
        ];
        let err = chain.verify_batch(&records).unwrap_err();
        assert_matches!(err, VerifyError::Record { index: 2, .. });
    }

    #[test]
    fn debug_lists_verifier_names() {
        let chain = VerifierChain::standard(false);
        let rendered = format!("{chain:?}");
        assert!(rendered.contains("identity"));
        assert!(rendered.contains("allow_updates: false"));
    }
}
