//! RFC 5988 pagination for list requests.
//!
//! List responses wrap their payload in an `items` array and point at the
//! next page through a `Link: <url>; rel="next"` header. Pages are fetched
//! serially since each URL comes from the previous response.

use super::{RestSession, LOG_TARGET, NO_PARAMS};
use crate::error::RestError;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

impl RestSession {
    /// Walk all pages starting at `url`, decoding `items` into `T`.
    ///
    /// Query params are sent only on the first request; subsequent requests
    /// rely on the completeness of the `next` URL. Page order and item order
    /// within a page are preserved. A mid-walk failure discards everything.
    pub async fn follow_pagination<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, RestError> {
        let mut results = Vec::new();
        let mut next = Some(url.to_string());
        let mut first = true;
        while let Some(url) = next.take() {
            tracing::debug!(target: LOG_TARGET, %url, "pagination: getting page");
            let page_params = if first { params } else { NO_PARAMS };
            first = false;
            let (meta, body) = self.request(Method::GET, &url, page_params, None).await?;
            next = meta.next;
            // a page without an items array contributes nothing
            let Some(Value::Array(items)) = body
                .into_value()
                .and_then(|mut v| v.get_mut("items").map(Value::take))
            else {
                continue;
            };
            for item in items {
                results.push(serde_json::from_value(item).map_err(RestError::Json)?);
            }
        }
        Ok(results)
    }
}

/// Extract the `rel="next"` target from a `Link` header value.
pub fn parse_link_next(header: &str) -> Option<String> {
    for part in header.split(',') {
        let mut segments = part.split(';');
        let url = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim().replace(' ', "");
            param == "rel=\"next\"" || param == "rel=next"
        });
        if is_next {
            return Some(url.trim_start_matches('<').trim_end_matches('>').to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{bind, spawn, MockResponse};
    use crate::tokens::Tokens;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn link_header_next_relation() {
        assert_eq!(
            parse_link_next("<https://example.com/v1/people?max=2&start=2>; rel=\"next\""),
            Some("https://example.com/v1/people?max=2&start=2".to_string())
        );
        assert_eq!(
            parse_link_next(
                "<https://e.com/prev>; rel=\"prev\", <https://e.com/next>; rel=\"next\""
            ),
            Some("https://e.com/next".to_string())
        );
        assert_eq!(parse_link_next("<https://e.com/prev>; rel=\"prev\""), None);
        assert_eq!(parse_link_next(""), None);
    }

    #[tokio::test]
    async fn walk_accumulates_pages_in_order() {
        let (listener, base) = bind().await;
        let page1 = MockResponse::json(200, r#"{"items":[{"name":"a"},{"name":"b"}]}"#)
            .with_header("Link", &format!("<{base}/page2>; rel=\"next\""));
        let page2 = MockResponse::json(200, r#"{"items":[{"name":"c"}]}"#);
        let log = spawn(listener, vec![page1, page2]);

        let session = RestSession::with_base_url(Arc::new(Tokens::new("t")), &base);
        let items: Vec<Item> = session
            .follow_pagination(&base, &[("name".to_string(), "x".to_string())])
            .await
            .unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);

        let recorded = log.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        // params only on the first request
        assert_eq!(recorded[0].path, "/?name=x");
        assert_eq!(recorded[1].path, "/page2");
    }

    #[tokio::test]
    async fn missing_items_yields_empty_page() {
        let (listener, base) = bind().await;
        let _log = spawn(listener, vec![MockResponse::json(200, "{}")]);

        let session = RestSession::with_base_url(Arc::new(Tokens::new("t")), &base);
        let items: Vec<Item> = session.follow_pagination(&base, &[]).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn mid_walk_failure_discards_results() {
        let (listener, base) = bind().await;
        let page1 = MockResponse::json(200, r#"{"items":[{"name":"a"}]}"#)
            .with_header("Link", &format!("<{base}/page2>; rel=\"next\""));
        let _log = spawn(listener, vec![page1, MockResponse::json(500, "")]);

        let session = RestSession::with_base_url(Arc::new(Tokens::new("t")), &base);
        let err = session
            .follow_pagination::<Item>(&base, &[])
            .await
            .expect_err("expect mid-walk failure");
        assert_eq!(err.status_code(), Some(500));
    }
}
