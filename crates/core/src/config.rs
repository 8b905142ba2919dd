use crate::error::VerifyError;
use crate::verification::chain::VerifierChain;

/// Import session configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportConfig {
    /// Whether this session may modify existing rows (default: `false`).
    pub allow_updates: bool,
}

impl ImportConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `IMPORT_ALLOW_UPDATES` | `false` |
    pub fn from_env() -> Result<Self, VerifyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VerifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_updates = match lookup("IMPORT_ALLOW_UPDATES") {
            Some(raw) => parse_flag("IMPORT_ALLOW_UPDATES", &raw)?,
            None => false,
        };
        Ok(Self { allow_updates })
    }

    /// The standard verifier chain for this session.
    pub fn chain(&self) -> VerifierChain {
        VerifierChain::standard(self.allow_updates)
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, VerifyError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(VerifyError::Config(format!(
            "{key} must be a boolean, got '{other}'"
        ))),
    }
}
