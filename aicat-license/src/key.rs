//! License key validation and log-safe display.
//!
//! AICat treats a user-supplied API key as a license: when a valid key is
//! stored locally, premium features unlock without going through the
//! purchase provider at all. Keys follow the `sk-` prefix convention.

use crate::error::{LicenseError, LicenseResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum plausible key length after trimming.
pub const MIN_KEY_LEN: usize = 20;

/// A validated license key.
///
/// `Display` renders the masked form so keys never leak through logging;
/// use [`LicenseKey::as_str`] for the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseKey(String);

impl LicenseKey {
    /// Validates a key string.
    ///
    /// Input is trimmed. Empty keys, keys containing whitespace, keys
    /// shorter than [`MIN_KEY_LEN`], and keys without the `sk-` prefix
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidKeyFormat`] describing the first
    /// failed check.
    pub fn parse(input: &str) -> LicenseResult<Self> {
        let key = input.trim();

        if key.is_empty() {
            return Err(LicenseError::InvalidKeyFormat("key is empty".to_string()));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(LicenseError::InvalidKeyFormat(
                "key contains whitespace".to_string(),
            ));
        }
        if key.len() < MIN_KEY_LEN {
            return Err(LicenseError::InvalidKeyFormat(format!(
                "key shorter than {MIN_KEY_LEN} characters"
            )));
        }
        if !key.starts_with("sk-") {
            return Err(LicenseError::InvalidKeyFormat(
                "key must start with sk-".to_string(),
            ));
        }

        Ok(Self(key.to_string()))
    }

    /// Returns the raw key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the masked form: first 5 and last 4 characters visible,
    /// middle elided. Safe to log.
    #[must_use]
    pub fn masked(&self) -> String {
        // MIN_KEY_LEN guarantees the slices below are in range, and
        // parse rejects non-ASCII whitespace but not non-ASCII content,
        // so mask on char boundaries.
        let chars: Vec<char> = self.0.chars().collect();
        let head: String = chars[..5].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}****{tail}")
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl FromStr for LicenseKey {
    type Err = LicenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
