//! In-process mock provider server.
//!
//! Binds `127.0.0.1:0`, records every request and rejects any request whose
//! bearer token differs from the expected one with a 401, except paths ending
//! in `/health`.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tokio::net::TcpListener;

/// A request as seen by the mock.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Clone)]
pub struct MockState {
    pub token: String,
    pub log: Arc<Mutex<Vec<Recorded>>>,
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub state: MockState,
}

impl MockServer {
    /// Starts serving `routes`, accepting only `token`.
    pub async fn start(token: &str, routes: Router<MockState>) -> Self {
        let state = MockState {
            token: token.to_string(),
            log: Arc::new(Mutex::new(Vec::new())),
        };

        let app = routes
            .with_state(state.clone())
            .layer(middleware::from_fn_with_state(state.clone(), guard));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL with the given path prefix, e.g. `/api/v1`.
    pub fn url(&self, prefix: &str) -> String {
        format!("http://{}{}", self.addr, prefix)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.log.lock().unwrap().clone()
    }
}

async fn guard(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.log.lock().unwrap().push(Recorded {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        authorization: authorization.clone(),
    });

    if request.uri().path().ends_with("/health") {
        return next.run(request).await;
    }

    let presented = authorization
        .as_deref()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    match presented {
        Some(token) if !token.is_empty() && token == state.token => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_token" })),
        )
            .into_response(),
    }
}
