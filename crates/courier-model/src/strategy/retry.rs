use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    StatusCode,
    error::{ModelError, ModelResult},
};

/// Set of HTTP status codes treated as transient.
///
/// A response whose status is in the set is retried on the backoff schedule exactly like a transport failure.
/// Every other status is final and becomes a result.
///
/// The default set is `{408, 502, 503, 504}`.
/// `500` is deliberately not part of it: an internal server error is treated as a server bug
/// that retrying will not fix, so it is surfaced to the caller immediately.
/// Deployments that want the opposite can add it with [`RetryCodes::with`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetryCodes(BTreeSet<StatusCode>);

impl RetryCodes {
    /// Create an empty set: nothing is retried by status.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns `true` if `status` should be retried.
    pub fn contains(&self, status: StatusCode) -> bool {
        self.0.contains(&status)
    }

    /// Add a status code to the set.
    pub fn with(mut self, status: StatusCode) -> Self {
        self.0.insert(status);
        self
    }

    /// Remove a status code from the set.
    pub fn without(mut self, status: StatusCode) -> Self {
        self.0.remove(&status);
        self
    }

    /// Iterate over the codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StatusCode> + '_ {
        self.0.iter().copied()
    }

    /// Reject codes outside of the valid HTTP status range.
    pub fn validate(&self) -> ModelResult<()> {
        match self.0.iter().find(|c| !(100..=599).contains(*c)) {
            Some(bad) => Err(ModelError::Invalid(format!(
                "retry code {bad} is not a valid http status"
            ))),
            None => Ok(()),
        }
    }
}

impl Default for RetryCodes {
    fn default() -> Self {
        Self([408, 502, 503, 504].into_iter().collect())
    }
}

impl FromIterator<StatusCode> for RetryCodes {
    fn from_iter<I: IntoIterator<Item = StatusCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::RetryCodes;

    #[test]
    fn default_set_excludes_internal_server_error() {
        let codes = RetryCodes::default();
        for code in [408, 502, 503, 504] {
            assert!(codes.contains(code), "{code} must be retryable by default");
        }
        assert!(!codes.contains(500));
        assert!(!codes.contains(404));
        assert!(!codes.contains(200));
    }

    #[test]
    fn with_and_without_edit_the_set() {
        let codes = RetryCodes::default().with(500).without(408);
        assert!(codes.contains(500));
        assert!(!codes.contains(408));
        assert_eq!(codes.iter().collect::<Vec<_>>(), vec![500, 502, 503, 504]);
    }

    #[test]
    fn validate_rejects_out_of_range_codes() {
        assert!(RetryCodes::default().validate().is_ok());
        assert!(RetryCodes::none().with(42).validate().is_err());
        assert!(RetryCodes::none().with(600).validate().is_err());
    }

    #[test]
    fn serde_is_a_plain_array() {
        let json = serde_json::to_string(&RetryCodes::default()).unwrap();
        assert_eq!(json, "[408,502,503,504]");

        let parsed: RetryCodes = serde_json::from_str("[500, 503]").unwrap();
        assert!(parsed.contains(500));
        assert!(!parsed.contains(502));
    }
}
