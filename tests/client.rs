//! End-to-end exercise of the client facade against a scripted HTTP server.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use webex_simple::rest::RestSession;
use webex_simple::tokens::Tokens;
use webex_simple::WebexSimpleApi;

fn init_tracing() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

struct Scripted {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Scripted {
    fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Serve the scripted responses one connection at a time and record the
/// request line of each exchange.
fn serve(listener: TcpListener, responses: Vec<Scripted>) -> Arc<Mutex<Vec<String>>> {
    let log: Arc<Mutex<Vec<String>>> = Arc::default();
    let seen = Arc::clone(&log);
    tokio::spawn(async move {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let Ok(n) = stream.read(&mut buf).await else {
                    return;
                };
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let head_end = raw.windows(4).position(|w| w == b"\r\n\r\n");
                if let Some(pos) = head_end {
                    let head = String::from_utf8_lossy(&raw[..pos]).to_string();
                    let content_length = head
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0)))
                        .unwrap_or(0);
                    if raw.len() >= pos + 4 + content_length {
                        break;
                    }
                }
            }
            let first_line = String::from_utf8_lossy(&raw)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            seen.lock().unwrap().push(first_line);

            let mut out = format!("HTTP/1.1 {} X\r\n", response.status);
            for (name, value) in &response.headers {
                out.push_str(&format!("{name}: {value}\r\n"));
            }
            out.push_str(&format!(
                "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                response.body.len(),
                response.body
            ));
            let _ = stream.write_all(out.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    log
}

async fn client_for(responses: Vec<Scripted>) -> (WebexSimpleApi, Arc<Mutex<Vec<String>>>) {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let log = serve(listener, responses);
    let session = RestSession::with_base_url(Arc::new(Tokens::new("test-token")), &base);
    (WebexSimpleApi::with_session(session), log)
}

#[tokio::test]
async fn me_decodes_through_the_facade() {
    let (api, log) = client_for(vec![Scripted::json(
        200,
        r#"{
            "id": "cGVyc29u",
            "emails": ["a@example.com"],
            "displayName": "A Person",
            "orgId": "b3Jn",
            "type": "person"
        }"#,
    )])
    .await;

    let me = api.people.me(true).await.unwrap();
    assert_eq!(me.display_name.as_deref(), Some("A Person"));

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("GET /people/me?callingData=true"));
}

// The first page links to a second one; the walk stops when no link header
// remains. The Link header must point back at the server, so this test
// scripts the server by hand instead of using client_for().
#[tokio::test]
async fn paginated_webhook_list_walks_both_pages() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let next = format!("{base}/webhooks?page=2");
    let log = serve(
        listener,
        vec![
            Scripted::json(
                200,
                r#"{"items":[{
                    "id": "aG9vaw",
                    "name": "calls",
                    "targetUrl": "https://bot.example.com/hook",
                    "resource": "telephony_calls",
                    "event": "all",
                    "status": "active",
                    "created": "2021-05-01T12:00:00.000Z"
                }]}"#,
            )
            .with_header("Link", &format!("<{next}>; rel=\"next\"")),
            Scripted::json(
                200,
                r#"{"items":[{
                    "id": "aG9vazI",
                    "name": "rooms",
                    "targetUrl": "https://bot.example.com/hook2",
                    "resource": "rooms",
                    "event": "created",
                    "status": "active",
                    "created": "2021-05-02T12:00:00.000Z"
                }]}"#,
            ),
        ],
    );
    let session = RestSession::with_base_url(Arc::new(Tokens::new("test-token")), &base);
    let api = WebexSimpleApi::with_session(session);

    let hooks = api.webhook.list().await.unwrap();
    assert_eq!(hooks.len(), 2);
    assert_eq!(hooks[0].name, "calls");
    assert_eq!(hooks[1].name, "rooms");

    let seen = log.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert!(seen[1].starts_with("GET /webhooks?page=2"));
}

#[tokio::test]
async fn api_error_carries_the_error_envelope() {
    let (api, _log) = client_for(vec![Scripted::json(
        404,
        r#"{"message":"not found","errors":[{"description":"Person not found","code":4043}],"trackingId":"t"}"#,
    )])
    .await;

    let err = api.people.details("missing", false).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.description(), "Person not found");
    assert_eq!(err.code(), 4043);
}
