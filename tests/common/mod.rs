//! An axum stand-in for the hosted table.
//!
//! Every request is recorded and answered with the next canned response,
//! whatever its path. The server runs on its own tokio runtime in a
//! background thread so blocking clients can call it from the test thread.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::thread;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    /// Path plus query string, as sent
    pub target: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct StubState {
    requests: Arc<Mutex<Vec<Captured>>>,
    responses: Arc<Mutex<VecDeque<(u16, String)>>>,
}

pub struct StubServer {
    pub url: String,
    state: StubState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    /// Answer requests with `responses` in order; once they run out every
    /// request gets a 500.
    pub fn start(responses: Vec<(u16, &str)>) -> StubServer {
        let state = StubState::default();
        state.responses.lock().unwrap().extend(
            responses
                .into_iter()
                .map(|(status, body)| (status, body.to_string())),
        );

        let app = Router::new().fallback(record).with_state(state.clone());

        // Bind before returning so the first request cannot race the server
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let (shutdown, stop) = oneshot::channel::<()>();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = stop.await;
                    })
                    .await
                    .unwrap();
            });
        });

        StubServer {
            url,
            state,
            shutdown: Some(shutdown),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Captured> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Stop the server and return everything it received
    pub fn finish(self) -> Vec<Captured> {
        self.requests()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn record(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    state.requests.lock().unwrap().push(Captured {
        method: method.to_string(),
        target,
        headers,
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let (status, body) = state
        .responses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((500, r#"{"message":"no canned response left"}"#.to_string()));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(CONTENT_TYPE, "application/json")], body)
}

/// Rows as the hosted table returns them, newest first
pub const ROWS_JSON: &str = r#"[
  {"id":2,"task":"Write report","created_at":"2025-05-14T09:01:00.000000+00:00"},
  {"id":1,"task":"Call mom","created_at":"2025-05-14T09:00:00.000000+00:00"}
]"#;
