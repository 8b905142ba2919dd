/// Faults raised while verifying candidate records.
///
/// Business rejections are never represented here; they are returned as
/// [`VerificationOutcome::Rejected`](crate::verification::outcome::VerificationOutcome::Rejected).
/// A `VerifyError` means the input broke a structural guarantee or the
/// session was misconfigured.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("Malformed {kind} record: required field '{field}' is missing")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Record {index} could not be verified: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<VerifyError>,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VerifyError {
    /// Attach the position of the offending record within a batch.
    pub fn at_record(self, index: usize) -> Self {
        Self::Record {
            index,
            source: Box::new(self),
        }
    }
}
