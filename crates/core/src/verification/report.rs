//! Batch report types for a verified import.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::outcome::{ReasonCode, VerificationOutcome};

/// A record that failed verification, by position in the input batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub record_index: usize,
    pub reason: ReasonCode,
}

/// Aggregated outcome of verifying a batch, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub total_records: usize,
    pub accepted: Vec<usize>,
    pub rejected: Vec<RejectedRecord>,
}

impl BatchReport {
    /// Create an empty report for a given record count.
    pub fn new(total_records: usize) -> Self {
        Self {
            total_records,
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// File an outcome under the appropriate bucket.
    pub fn push(&mut self, record_index: usize, outcome: VerificationOutcome) {
        match outcome {
            VerificationOutcome::Accepted => self.accepted.push(record_index),
            VerificationOutcome::Rejected { reason } => self.rejected.push(RejectedRecord {
                record_index,
                reason,
            }),
        }
    }

    /// `true` when every record was accepted.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Number of rejections per reason code.
    pub fn counts_by_reason(&self) -> BTreeMap<ReasonCode, usize> {
        let mut counts = BTreeMap::new();
        for entry in &self.rejected {
            *counts.entry(entry.reason).or_insert(0) += 1;
        }
        counts
    }
}
