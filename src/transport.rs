//! Synchronous HTTP seam.
//!
//! The [`Transport`] trait is the only place the library performs I/O. The
//! index load and the source probe both go through it, so hosts and tests
//! can substitute their own implementation.
//!
//! # Example
//!
//! ```rust
//! use pep_index::transport::{HttpResponse, Transport};
//! use pep_index::Result;
//!
//! struct Offline;
//!
//! impl Transport for Offline {
//!     fn get(&self, _url: &str) -> Result<HttpResponse> {
//!         Ok(HttpResponse { status: 404, body: String::new() })
//!     }
//! }
//! ```

use crate::config::Config;
use crate::error::{Error, Result};

/// A completed HTTP response. Non-success statuses are data, not errors.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True only for `200 OK`, the sole status that carries a PEP source.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Decode a response body as strict UTF-8.
pub(crate) fn decode_body(url: &str, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|source| Error::Decode {
        url: url.to_string(),
        source,
    })
}

/// A blocking GET-only HTTP client.
pub trait Transport: Send + Sync {
    /// Perform one GET request.
    ///
    /// Returns `Err` only when no usable response was received (connection,
    /// TLS, timeout, or a success body that is not valid UTF-8).
    fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// [`Transport`] backed by `reqwest::blocking`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.http.timeout())
            .user_agent(config.http.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|source| Error::Http {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<HttpResponse> {
        let http_err = |source| Error::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(http_err)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().map_err(http_err)?;
        // Error pages are only inspected for their status, so only success bodies are strict.
        let body = if (200..300).contains(&status) {
            decode_body(url, bytes.to_vec())?
        } else {
            String::from_utf8_lossy(&bytes).into_owned()
        };

        tracing::trace!(url, status, bytes = body.len(), "GET");
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success_range() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let no_content = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let missing = HttpResponse {
            status: 404,
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 301,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(no_content.is_success());
        assert!(!missing.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_is_ok_only_200() {
        let no_content = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(!no_content.is_ok());
        assert!(HttpResponse {
            status: 200,
            body: String::new(),
        }
        .is_ok());
    }

    #[test]
    fn test_decode_body_is_strict() {
        assert_eq!(decode_body("http://x", b"PEP: 8\n".to_vec()).unwrap(), "PEP: 8\n");
        let err = decode_body("http://x/pep-0008.rst", vec![b'P', 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, Error::Decode { ref url, .. } if url == "http://x/pep-0008.rst"));
    }

    #[test]
    fn test_refused_connection_is_http_error() {
        let transport = HttpTransport::from_config(&Config::default()).unwrap();
        let err = transport.get("http://127.0.0.1:9/peps.json").unwrap_err();
        assert!(matches!(err, Error::Http { ref url, .. } if url == "http://127.0.0.1:9/peps.json"));
    }

    #[test]
    fn test_http_transport_builds_from_default_config() {
        assert!(HttpTransport::from_config(&Config::default()).is_ok());
    }
}
