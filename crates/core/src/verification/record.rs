//! Candidate record types handed over by the upstream reader.

use serde::{Deserialize, Serialize};

use crate::error::VerifyError;
use crate::types::{RowId, Timestamp};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_EFFECTIVE_DATE: &str = "effective_date";
pub const FIELD_START_DATE: &str = "start_date";
pub const FIELD_END_DATE: &str = "end_date";

// ---------------------------------------------------------------------------
// Record kind
// ---------------------------------------------------------------------------

/// Which temporal fields the reader guarantees for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Effective-dated rows (e.g. prices). `effective_date` is always set.
    Dated,
    /// Availability-window rows. `start_date` and `end_date` are always set.
    Windowed,
    /// No temporal guarantees.
    Plain,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dated => "dated",
            Self::Windowed => "windowed",
            Self::Plain => "plain",
        }
    }

    /// Parse a kind string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "dated" => Some(Self::Dated),
            "windowed" => Some(Self::Windowed),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }

    /// Fields the reader must have populated for this kind.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Dated => &[FIELD_EFFECTIVE_DATE],
            Self::Windowed => &[FIELD_START_DATE, FIELD_END_DATE],
            Self::Plain => &[],
        }
    }

    pub fn requires(&self, field: &str) -> bool {
        self.required_fields().contains(&field)
    }
}

// ---------------------------------------------------------------------------
// Candidate record
// ---------------------------------------------------------------------------

/// A record proposed for import, not yet committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub kind: RecordKind,
    /// Identifier of the incoming row; only meaningful for updates.
    pub row_id: Option<RowId>,
    /// Identifier of the persisted row being updated.
    pub target_row_id: Option<RowId>,
    /// `true` when the record modifies an existing row instead of inserting.
    pub is_update: bool,
    pub effective_date: Option<Timestamp>,
    pub available_date: Option<Timestamp>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}

impl CandidateRecord {
    /// An insert candidate of the given kind with every optional field empty.
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            row_id: None,
            target_row_id: None,
            is_update: false,
            effective_date: None,
            available_date: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Mark the record as an update of `target_row_id`.
    pub fn as_update(mut self, row_id: Option<RowId>, target_row_id: Option<RowId>) -> Self {
        self.is_update = true;
        self.row_id = row_id;
        self.target_row_id = target_row_id;
        self
    }

    pub fn with_effective_date(mut self, at: Timestamp) -> Self {
        self.effective_date = Some(at);
        self
    }

    pub fn with_available_date(mut self, at: Timestamp) -> Self {
        self.available_date = Some(at);
        self
    }

    /// Set both ends of the availability window.
    pub fn with_window(mut self, start: Timestamp, end: Timestamp) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Read a temporal field, faulting if the record kind guarantees it but
    /// the reader left it empty.
    pub fn temporal(
        &self,
        field: &'static str,
        value: Option<Timestamp>,
    ) -> Result<Option<Timestamp>, VerifyError> {
        if value.is_none() && self.kind.requires(field) {
            return Err(VerifyError::MissingField {
                kind: self.kind.as_str(),
                field,
            });
        }
        Ok(value)
    }
}
