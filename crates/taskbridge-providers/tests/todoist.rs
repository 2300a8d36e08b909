//! Todoist client against a mock server.

mod support;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use support::{MockServer, MockState};
use taskbridge_providers::todoist::{NewTask, TodoistClient};
use taskbridge_providers::{
    ApiProvider, ProviderErrorCode, StaticToken, TodoistApi, TransportConfig,
};

const TOKEN: &str = "0123456789abcdef";

fn routes() -> Router<MockState> {
    Router::new()
        .route(
            "/api/v1/tasks",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let project = q.get("project_id").cloned().unwrap_or_else(|| "inbox".into());
                match q.get("cursor").map(String::as_str) {
                    None => Json(json!({
                        "results": [{"id": "1", "content": "first", "project_id": project}],
                        "next_cursor": "c2"
                    })),
                    Some(_) => Json(json!({
                        "results": [{"id": "2", "content": "second", "project_id": project}],
                        "next_cursor": null
                    })),
                }
            })
            .post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "id": "99",
                    "content": body["content"],
                    "project_id": "inbox",
                    "priority": body["priority"],
                    "labels": body["labels"]
                }))
            }),
        )
        .route(
            "/api/v1/tasks/{id}",
            get(|Path(id): Path<String>| async move {
                Json(json!({"id": id, "content": "fetched", "project_id": "inbox"}))
            })
            .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/v1/tasks/{id}/close",
            post(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/v1/projects",
            get(|| async { (StatusCode::OK, "not json") }),
        )
}

async fn setup() -> (MockServer, TodoistClient) {
    let server = MockServer::start(TOKEN, routes()).await;
    let client = TodoistApi::connect(
        &server.url("/api/v1"),
        Arc::new(StaticToken::new(TOKEN)),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

#[tokio::test]
async fn list_tasks_follows_cursor() {
    let (server, client) = setup().await;

    let tasks = client.list_tasks(Some("work")).await.unwrap();
    let contents: Vec<_> = tasks.iter().map(|t| t.content.as_str()).collect();
    assert_eq!(contents, vec!["first", "second"]);
    assert!(tasks.iter().all(|t| t.project_id == "work"));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let second = requests[1].query.clone().unwrap();
    assert!(second.contains("cursor=c2"));
    assert!(second.contains("project_id=work"));
}

#[tokio::test]
async fn repeated_or_empty_cursor_ends_pagination() {
    let routes = Router::new()
        .route(
            "/api/v1/tasks",
            get(|| async {
                Json(json!({
                    "results": [{"id": "1", "content": "again", "project_id": "inbox"}],
                    "next_cursor": "stuck"
                }))
            }),
        )
        .route(
            "/api/v1/projects",
            get(|| async {
                Json(json!({
                    "results": [{"id": "p1", "name": "Inbox"}],
                    "next_cursor": ""
                }))
            }),
        );
    let server = MockServer::start(TOKEN, routes).await;
    let client = TodoistApi::connect(
        &server.url("/api/v1"),
        Arc::new(StaticToken::new(TOKEN)),
        &TransportConfig::default(),
    )
    .unwrap();

    let tasks = client.list_tasks(None).await.unwrap();
    assert_eq!(tasks.len(), 2);
    let projects = client.list_projects().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn create_close_delete() {
    let (server, client) = setup().await;

    let created = client
        .create_task(&NewTask::new("Renew passport").with_priority(4).with_label("admin"))
        .await
        .unwrap();
    assert_eq!(created.id, "99");
    assert_eq!(created.priority, 4);
    assert_eq!(created.labels, vec!["admin".to_string()]);

    assert_eq!(client.get_task("99").await.unwrap().content, "fetched");
    client.close_task("99").await.unwrap();
    client.delete_task("99").await.unwrap();

    let methods: Vec<_> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec!["POST", "GET", "POST", "DELETE"]);
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let (_server, client) = setup().await;

    let err = client.list_projects().await.unwrap_err();
    assert_eq!(err.code(), ProviderErrorCode::InvalidResponse);
    assert!(err.message().contains("getProjects"));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = TodoistApi::connect(
        &format!("http://{}/api/v1", addr),
        Arc::new(StaticToken::new(TOKEN)),
        &TransportConfig::default(),
    )
    .unwrap();

    let err = client.get_task("1").await.unwrap_err();
    assert_eq!(err.code(), ProviderErrorCode::NetworkError);
    assert!(err.is_retryable());
}
