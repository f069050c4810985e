// src/types.rs
//! Domain-specific newtypes for type safety and validation.
//!
//! Raw strings from the manifest, the environment and the command line
//! are promoted into these types at the boundary; everything past the
//! boundary works with validated values only.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

/// Validation failures raised by newtype constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid page id '{value}': {reason}")]
    InvalidPageId { value: String, reason: String },

    #[error("Invalid session cookie: {reason}")]
    InvalidCookie { reason: String },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid artifact extension '{value}': {reason}")]
    InvalidExtension { value: String, reason: String },
}

/// Identifier of a page on the remote wiki, derived from the trailing
/// `_`-delimited segment of the page's export reference.
///
/// Used as the fetch key against the Word export endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    /// Parse a page id token. Confluence page ids are decimal numbers;
    /// anything else is a malformed reference upstream.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValidationError::InvalidPageId {
                value: input.to_string(),
                reason: "page id cannot be empty".to_string(),
            });
        }

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidPageId {
                value: input.to_string(),
                reason: "page id must be a decimal number".to_string(),
            });
        }

        Ok(Self(input.to_string()))
    }

    /// Get the id as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The original reference string to a page's exported artifact, exactly
/// as it appears in the manifest's anchor `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRef(String);

impl SourceRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static session cookie for the Confluence wiki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie(String);

impl SessionCookie {
    /// Create a new session cookie with validation.
    pub fn new(cookie: impl Into<String>) -> Result<Self, ValidationError> {
        let cookie = cookie.into();

        if cookie.trim().is_empty() {
            return Err(ValidationError::InvalidCookie {
                reason: "session cookie cannot be empty".to_string(),
            });
        }

        if cookie.contains('\n') || cookie.contains('\r') {
            return Err(ValidationError::InvalidCookie {
                reason: "session cookie must be a single header line".to_string(),
            });
        }

        Ok(Self(cookie))
    }

    /// Get the cookie as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the credential in display
        write!(f, "[redacted session cookie]")
    }
}

/// Validated wiki base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Create a new validated base URL
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        match Url::parse(url) {
            Ok(parsed_url) => {
                if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
                    return Err(ValidationError::InvalidUrl {
                        url: url.to_string(),
                        reason: "Only HTTP and HTTPS URLs are supported".to_string(),
                    });
                }
                Ok(Self(parsed_url))
            }
            Err(e) => Err(ValidationError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Get the URL as a string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Get the underlying URL
    #[allow(dead_code)]
    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
