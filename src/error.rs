//! Unified error types for the REST client.

use serde::Deserialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Error envelope
// ---------------------------------------------------------------------------

/// One entry in the `errors` array of a failed API response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SingleError {
    /// Human-readable error description.
    pub description: String,
    /// Numeric platform error code.
    pub code: i64,
}

/// Error details in the body of an HTTP error response.
///
/// All three fields are required; a body that does not match this shape is
/// not an error envelope and is discarded during classification.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Top-level error message.
    pub message: String,
    /// List of errors; typically has a single entry.
    pub errors: Vec<SingleError>,
    /// Tracking ID of the request.
    pub tracking_id: String,
}

impl ErrorDetail {
    /// Description of the first error, or `""` when the list is empty.
    pub fn description(&self) -> &str {
        self.errors
            .first()
            .map(|e| e.description.as_str())
            .unwrap_or("")
    }

    /// Code of the first error, or `0` when the list is empty.
    pub fn code(&self) -> i64 {
        self.errors.first().map(|e| e.code).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// RestError
// ---------------------------------------------------------------------------

/// Errors from the REST layer.
#[derive(Debug)]
pub enum RestError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the API.
    Status {
        /// HTTP status code.
        code: u16,
        /// Parsed error envelope, when the body matched it.
        detail: Option<ErrorDetail>,
        /// `Retry-After` header value in seconds, when present.
        retry_after_secs: Option<u64>,
    },
    /// Typed entity encode/decode failure.
    Json(serde_json::Error),
    /// The response body did not have the expected shape.
    InvalidBody(String),
}

impl RestError {
    /// Build a `Status` error from a failed response.
    ///
    /// Envelope parsing is best effort: a body that is not the platform's
    /// error envelope yields `detail = None` and never a secondary error.
    pub(crate) fn status(code: u16, body: &str, retry_after_secs: Option<u64>) -> Self {
        let detail = serde_json::from_str::<ErrorDetail>(body).ok();
        Self::Status {
            code,
            detail,
            retry_after_secs,
        }
    }

    /// HTTP status code, when this error carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Error description from the envelope, or `""`.
    pub fn description(&self) -> &str {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.description(),
            _ => "",
        }
    }

    /// Numeric error code from the envelope, or `0`.
    pub fn code(&self) -> i64 {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.code(),
            _ => 0,
        }
    }

    /// Suggested retry delay in seconds, when the response carried one.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Status {
                retry_after_secs, ..
            } => *retry_after_secs,
            _ => None,
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status {
                code,
                detail: Some(detail),
                ..
            } => write!(
                f,
                "status {code}: {} ({})",
                detail.description(),
                detail.code()
            ),
            Self::Status { code, .. } => write!(f, "status {code}"),
            Self::Json(e) => write!(f, "json: {e}"),
            Self::InvalidBody(msg) => write!(f, "invalid body: {msg}"),
        }
    }
}

impl std::error::Error for RestError {}

impl From<reqwest::Error> for RestError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for RestError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
