use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use serde_json::{Value, json};
use tower::ServiceExt;

use dogechat_proxy::state::AppState;

#[derive(Clone, Default)]
struct Captured {
    inner: Arc<Mutex<Vec<(HeaderMap, Bytes)>>>,
}

impl Captured {
    fn calls(&self) -> Vec<(HeaderMap, Bytes)> {
        self.inner.lock().unwrap().clone()
    }
}

/// Start a fake upstream answering every POST with `status` and `body`.
async fn fake_upstream(status: StatusCode, body: &'static str) -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(captured): State<Captured>, headers: HeaderMap, body_in: Bytes| async move {
                    captured.inner.lock().unwrap().push((headers, body_in));
                    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
                },
            ),
        )
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1/chat/completions"), captured)
}

fn state(upstream_url: &str, api_key: Option<&str>) -> AppState {
    AppState {
        http: reqwest::Client::new(),
        upstream_url: upstream_url.to_string(),
        api_key: api_key.map(str::to_string),
        site_url: None,
        site_name: None,
    }
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const CLIENT_BODY: &str =
    r#"{"model":"openchat/openchat-7b:free","messages":[{"role":"user","content":"hi"}]}"#;

#[tokio::test]
async fn forwards_body_with_bearer_credential() {
    let (url, captured) = fake_upstream(
        StatusCode::OK,
        r#"{"choices":[{"message":{"content":"such hello. wow."}}]}"#,
    )
    .await;

    let response = dogechat_proxy::app(state(&url, Some("sk-test")))
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["choices"][0]["message"]["content"], "such hello. wow.");

    let calls = captured.calls();
    assert_eq!(calls.len(), 1);
    let (headers, forwarded) = &calls[0];
    assert_eq!(headers[header::AUTHORIZATION], "Bearer sk-test");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(forwarded.as_ref(), CLIENT_BODY.as_bytes());
}

#[tokio::test]
async fn attribution_headers_sent_when_configured() {
    let (url, captured) = fake_upstream(StatusCode::OK, r#"{"choices":[]}"#).await;
    let mut app_state = state(&url, Some("sk-test"));
    app_state.site_url = Some("https://stfudoge.example".to_string());
    app_state.site_name = Some("STFUDoge".to_string());

    let response = dogechat_proxy::app(app_state)
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (headers, _) = &captured.calls()[0];
    assert_eq!(headers["http-referer"], "https://stfudoge.example");
    assert_eq!(headers["x-title"], "STFUDoge");
}

#[tokio::test]
async fn missing_credential_is_a_configuration_error() {
    let (url, captured) = fake_upstream(StatusCode::OK, "{}").await;

    let response = dogechat_proxy::app(state(&url, None))
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "API key configuration error on server." })
    );
    assert!(captured.calls().is_empty());
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let (url, captured) = fake_upstream(StatusCode::OK, "{}").await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let response = dogechat_proxy::app(state(&url, Some("sk-test")))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "POST");
    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert!(captured.calls().is_empty());
}

#[tokio::test]
async fn upstream_failure_keeps_status_and_message() {
    let (url, _) = fake_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":{"message":"Rate limit exceeded","code":429}}"#,
    )
    .await;

    let response = dogechat_proxy::app(state(&url, Some("sk-test")))
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "upstream API error: Rate limit exceeded" })
    );
}

#[tokio::test]
async fn upstream_failure_without_message_uses_status_reason() {
    let (url, _) = fake_upstream(StatusCode::BAD_GATEWAY, "{}").await;

    let response = dogechat_proxy::app(state(&url, Some("sk-test")))
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "upstream API error: Bad Gateway" })
    );
}

#[tokio::test]
async fn non_json_upstream_body_is_internal_error() {
    let (url, _) = fake_upstream(StatusCode::OK, "<html>oops</html>").await;

    let response = dogechat_proxy::app(state(&url, Some("sk-test")))
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Internal Server Error in proxy." })
    );
}

#[tokio::test]
async fn unreachable_upstream_is_internal_error() {
    // Bind then drop so the port is almost certainly closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = dogechat_proxy::app(state(&format!("http://{addr}/"), Some("sk-test")))
        .oneshot(chat_request(CLIENT_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "Internal Server Error in proxy." })
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = dogechat_proxy::app(state("http://127.0.0.1:9/", None))
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}
