//! REST session for API requests.
//!
//! A [`RestSession`]:
//! - attaches an `Authorization` bearer header to each request,
//! - retries on 429 with the server-suggested cooldown (`retry`),
//! - follows RFC 5988 pagination links (`pagination`),
//! - decodes JSON bodies and classifies non-2xx responses.

mod dump;
mod pagination;
mod retry;

pub use pagination::parse_link_next;
pub use retry::RetryPolicy;

use crate::error::RestError;
use crate::tokens::TokenProvider;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::time::sleep;
use uuid::Uuid;

pub(crate) const LOG_TARGET: &str = "webex_simple::rest";

const NO_PARAMS: &[(String, String)] = &[];

/// Decoded body of one response.
///
/// Generic body decoding never fails: a body that is not valid JSON comes
/// back as [`Body::Text`] and interpretation is pushed to the caller. The
/// typed decode step ([`Body::json`]) does fail observably.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Response without a content type.
    Empty,
    /// Parsed `application/json` body.
    Json(Value),
    /// Anything else, verbatim.
    Text(String),
}

impl Body {
    /// Decode into a typed entity. Fails when the body is not JSON or does
    /// not match the target type.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, RestError> {
        match self {
            Self::Json(value) => serde_json::from_value(value).map_err(RestError::Json),
            Self::Empty => Err(RestError::InvalidBody("empty body".into())),
            Self::Text(text) => Err(RestError::InvalidBody(format!(
                "expected JSON, got: {}",
                text.chars().take(80).collect::<String>()
            ))),
        }
    }

    /// The raw JSON value, if this body is JSON.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Response metadata retained past body decoding.
#[derive(Debug, Clone)]
pub(crate) struct ResponseMeta {
    /// URL of the next page from the `Link` header, when present.
    pub(crate) next: Option<String>,
}

/// REST session shared by all API bindings of one client.
///
/// Holds one `reqwest::Client`; safe for concurrent use from multiple tasks.
pub struct RestSession {
    http: reqwest::Client,
    base: String,
    tokens: Arc<dyn TokenProvider>,
    retry: RetryPolicy,
}

impl RestSession {
    /// Production API base URL.
    pub const BASE: &'static str = "https://webexapis.com/v1";

    /// Session against the production base URL.
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self::with_base_url(tokens, Self::BASE)
    }

    /// Session against an alternate base URL (testing, proxies).
    pub fn with_base_url(tokens: Arc<dyn TokenProvider>, base: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            tokens,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the rate-limit retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Endpoint URL for a path below the base URL.
    pub fn ep(&self, path: &str) -> String {
        if path.is_empty() {
            self.base.clone()
        } else {
            format!("{}/{path}", self.base)
        }
    }

    /// GET request returning the decoded body.
    pub async fn rest_get(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Body, RestError> {
        let (_, body) = self.request(Method::GET, url, params, None).await?;
        Ok(body)
    }

    /// POST request with an optional JSON body.
    pub async fn rest_post(&self, url: &str, json: Option<&Value>) -> Result<Body, RestError> {
        let (_, body) = self.request(Method::POST, url, NO_PARAMS, json).await?;
        Ok(body)
    }

    /// PUT request with an optional JSON body.
    pub async fn rest_put(
        &self,
        url: &str,
        params: &[(String, String)],
        json: Option<&Value>,
    ) -> Result<Body, RestError> {
        let (_, body) = self.request(Method::PUT, url, params, json).await?;
        Ok(body)
    }

    /// DELETE request; the body is discarded.
    pub async fn rest_delete(&self, url: &str) -> Result<(), RestError> {
        self.request(Method::DELETE, url, NO_PARAMS, None).await?;
        Ok(())
    }

    /// Issue a request through the rate-limit retry loop.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        params: &[(String, String)],
        json: Option<&Value>,
    ) -> Result<(ResponseMeta, Body), RestError> {
        let mut attempt: u32 = 0;
        loop {
            match self.request_once(&method, url, params, json).await {
                Ok(result) => return Ok(result),
                Err(err) => {
                    if !self.retry.should_retry(&err, attempt) {
                        return Err(err);
                    }
                    let delay = self.retry.delay_for(&err);
                    attempt = attempt.saturating_add(1);
                    tracing::warn!(
                        target: LOG_TARGET,
                        %url,
                        attempt,
                        delay_secs = delay.as_secs(),
                        "rate limited, backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// One network exchange: send, trace, classify, decode.
    async fn request_once(
        &self,
        method: &Method,
        url: &str,
        params: &[(String, String)],
        json: Option<&Value>,
    ) -> Result<(ResponseMeta, Body), RestError> {
        let token = self.tokens.access_token().await;
        let request_headers = [
            ("Authorization", format!("Bearer {token}")),
            ("Content-type", "application/json;charset=utf-8".to_string()),
            ("TrackingID", format!("WXC_SIMPLE_{}", Uuid::new_v4())),
        ];
        let mut req = self.http.request(method.clone(), url);
        for (name, value) in &request_headers {
            req = req.header(*name, value.as_str());
        }
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = json {
            req = req.json(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await.unwrap_or_default();
        dump::dump_exchange(method, url, &request_headers, json, status, &headers, &text);

        if !status.is_success() {
            let retry_after_secs = parse_retry_after_secs(&headers);
            return Err(RestError::status(status.as_u16(), &text, retry_after_secs));
        }

        let next = headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_link_next);
        Ok((ResponseMeta { next }, decode_body(&headers, text)))
    }
}

/// Decode a success body by content type.
///
/// No content type means no body; `application/json` is parsed; anything
/// else (including JSON that fails to parse) is returned as raw text.
fn decode_body(headers: &HeaderMap, text: String) -> Body {
    let Some(content_type) = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
    else {
        return Body::Empty;
    };
    if content_type.starts_with("application/json") && !text.is_empty() {
        match serde_json::from_str(&text) {
            Ok(value) => Body::Json(value),
            Err(_) => Body::Text(text),
        }
    } else {
        Body::Text(text)
    }
}

/// Parse a `Retry-After` header: seconds, or an HTTP-date.
pub(crate) fn parse_retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get("retry-after")?.to_str().ok()?.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }
    let when = httpdate::parse_http_date(value).ok()?;
    Some(
        when.duration_since(SystemTime::now())
            .map(|d| d.as_secs())
            .unwrap_or(0),
    )
}
