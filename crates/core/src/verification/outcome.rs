//! Verification outcome and rejection reason codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, machine-readable reason a record was rejected.
///
/// The string forms are part of the downstream contract: reporters map them
/// to localized messages, so they must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReasonCode {
    /// The effective date lies before the evaluation instant.
    DatePassed,
    /// The record updates an existing row but the session may not.
    Forbidden,
    /// An update is missing its row or target row identifier.
    MissingRowId,
    /// The availability date falls after the window start.
    AvailableDatePassed,
    /// The window starts after it ends.
    InvalidTimeRange,
}

impl ReasonCode {
    pub const ALL: &'static [ReasonCode] = &[
        Self::DatePassed,
        Self::Forbidden,
        Self::MissingRowId,
        Self::AvailableDatePassed,
        Self::InvalidTimeRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DatePassed => "date-passed",
            Self::Forbidden => "forbidden",
            Self::MissingRowId => "missing-row-id",
            Self::AvailableDatePassed => "available-date-passed",
            Self::InvalidTimeRange => "invalid-time-range",
        }
    }

    /// Parse a reason code string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.as_str() == s)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision for a single candidate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    Accepted,
    Rejected { reason: ReasonCode },
}

impl VerificationOutcome {
    pub fn rejected(reason: ReasonCode) -> Self {
        Self::Rejected { reason }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// The rejection reason, or `None` when accepted.
    pub fn reason_code(&self) -> Option<ReasonCode> {
        match self {
            Self::Accepted => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }
}
