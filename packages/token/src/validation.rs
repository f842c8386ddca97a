//! Token validation options

use chrono::{DateTime, Duration, Utc};

/// Options applied by [`crate::parse_with`] after the signature is verified
///
/// The defaults enforce `exp` against the system clock with no leeway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Reject tokens whose `exp` claim is in the past.
    pub validate_exp: bool,
    /// Grace period added to `exp` before a token counts as expired.
    pub leeway: Duration,
    /// Reference time for expiration checks; `None` reads the system clock.
    pub now: Option<DateTime<Utc>>,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            validate_exp: true,
            leeway: Duration::zero(),
            now: None,
        }
    }
}

impl Validation {
    /// Default validation: signature plus expiration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify the signature only and leave `exp` uninterpreted
    #[must_use]
    pub fn signature_only() -> Self {
        Self {
            validate_exp: false,
            ..Self::default()
        }
    }

    /// Set whether to validate expiration.
    #[must_use]
    pub fn validate_expiration(mut self, validate: bool) -> Self {
        self.validate_exp = validate;
        self
    }

    /// Set the time leeway for validation.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Check expiration against a fixed instant instead of the system clock.
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Current time in Unix seconds for this validation run
    pub(crate) fn timestamp(&self) -> i64 {
        self.now.unwrap_or_else(Utc::now).timestamp()
    }

    /// Whether a token expiring at `exp` is expired at `now`
    pub(crate) fn is_expired(&self, exp: i64, now: i64) -> bool {
        exp.saturating_add(self.leeway.num_seconds()) < now
    }
}
