#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

pub const SEARCH_PATH: &str = "/html/";
pub const COMPLETION_PATH: &str = "/openai/v1/chat/completions";

/// What the search stub saw for one request.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub query: Option<String>,
    pub user_agent: Option<String>,
}

/// What the completion stub saw for one request.
#[derive(Debug, Clone)]
pub struct CompletionHit {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Minimal DuckDuckGo-like results page with one `result__a` anchor per entry.
pub fn results_page(anchors: &[(&str, &str)]) -> String {
    let results: String = anchors
        .iter()
        .map(|(title, href)| {
            format!(
                r#"<div class="result results_links web-result">
  <h2 class="result__title"><a rel="nofollow" class="result__a" href="{href}">{title}</a></h2>
  <a class="result__snippet" href="{href}">Snippet for {title}</a>
</div>
"#
            )
        })
        .collect();

    format!("<!DOCTYPE html><html><body><div id=\"links\">{results}</div></body></html>")
}

pub async fn spawn_search_stub(
    status: StatusCode,
    html: String,
) -> (String, Arc<Mutex<Vec<SearchHit>>>) {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = hits.clone();

    let router = Router::new().route(
        SEARCH_PATH,
        get(
            move |Query(params): Query<HashMap<String, String>>, headers: HeaderMap| {
                let hits = recorded.clone();
                let html = html.clone();
                async move {
                    hits.lock().unwrap().push(SearchHit {
                        query: params.get("q").cloned(),
                        user_agent: header_value(&headers, header::USER_AGENT),
                    });
                    (status, Html(html))
                }
            },
        ),
    );

    let base = spawn_stub(router).await;
    (format!("{}{}", base, SEARCH_PATH), hits)
}

pub async fn spawn_completion_stub(
    status: StatusCode,
    response: Value,
) -> (String, Arc<Mutex<Vec<CompletionHit>>>) {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = hits.clone();

    let router = Router::new().route(
        COMPLETION_PATH,
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let hits = recorded.clone();
            let response = response.clone();
            async move {
                hits.lock().unwrap().push(CompletionHit {
                    authorization: header_value(&headers, header::AUTHORIZATION),
                    content_type: header_value(&headers, header::CONTENT_TYPE),
                    body,
                });
                (status, Json(response))
            }
        }),
    );

    let base = spawn_stub(router).await;
    (format!("{}{}", base, COMPLETION_PATH), hits)
}

/// Search and completion endpoints that answer only after `delay`.
///
/// Returns `(search_url, completion_url)`.
pub async fn spawn_slow_stub(delay: Duration) -> (String, String) {
    let router = Router::new()
        .route(
            SEARCH_PATH,
            get(move || async move {
                tokio::time::sleep(delay).await;
                Html(results_page(&[("Late Clinic", "https://late.example/")]))
            }),
        )
        .route(
            COMPLETION_PATH,
            post(move || async move {
                tokio::time::sleep(delay).await;
                Json(completion_response("too late"))
            }),
        );

    let base = spawn_stub(router).await;
    (
        format!("{}{}", base, SEARCH_PATH),
        format!("{}{}", base, COMPLETION_PATH),
    )
}

/// Completion endpoint answering 200 with a plain-text body.
pub async fn spawn_plain_text_completion_stub(body: &'static str) -> String {
    let router = Router::new().route(COMPLETION_PATH, post(move || async move { body }));
    let base = spawn_stub(router).await;
    format!("{}{}", base, COMPLETION_PATH)
}

pub fn completion_response(content: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "llama3-8b-8192",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
