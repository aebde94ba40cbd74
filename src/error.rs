//! Error types for index loading, record construction, and source fetching.
//!
//! Every failure is surfaced to the caller unchanged. Nothing in the library
//! catches or retries beyond the fixed source extension probe.

/// Library result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The identifier is absent from the index.
    #[error("PEP {0} not found in index")]
    NotFound(u32),

    /// A raw field does not map to a member of its enumeration.
    #[error("PEP {number}: invalid {field} value: {value:?}")]
    InvalidField {
        number: u32,
        field: &'static str,
        value: String,
    },

    /// The creation date is not in `DD-Mon-YYYY` form.
    #[error("PEP {number}: invalid created date: {value:?}")]
    InvalidDate {
        number: u32,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Every source extension candidate returned a non-success response.
    #[error("PEP content not found (PEP {number})")]
    ContentNotFound { number: u32 },

    #[error("HTTP request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A response body that is not valid UTF-8.
    #[error("response from {url} is not valid UTF-8")]
    Decode {
        url: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The index endpoint answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse index JSON")]
    Json(#[from] serde_json::Error),

    #[error("index key is not a PEP number: {0:?}")]
    InvalidIndexKey(String),
}

impl Error {
    /// True for the "key not found" lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// True for construction-time validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::InvalidField { .. } | Error::InvalidDate { .. })
    }

    /// True when no source extension produced the document body.
    pub fn is_content_not_found(&self) -> bool {
        matches!(self, Error::ContentNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_not_found_message() {
        let err = Error::ContentNotFound { number: 9999 };
        assert!(err.to_string().contains("PEP content not found"));
        assert!(err.is_content_not_found());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_kind_predicates() {
        assert!(Error::NotFound(1).is_not_found());
        let invalid = Error::InvalidField {
            number: 1,
            field: "status",
            value: "Bogus".to_string(),
        };
        assert!(invalid.is_validation());
        assert!(invalid.to_string().contains("Bogus"));
    }
}
